//! Sample dataset loading.
//!
//! Loads a small fixture of Brazilian states and cities through the domain
//! services, so the same validation and uniqueness rules apply as for API
//! writes. Loading is tolerant of re-runs: records that already exist are
//! skipped rather than treated as failures.

use tracing::{info, warn};

use crate::domain::{CityParams, CityService, Error, StateParams, StateService};

/// One state with its cities in the sample dataset.
pub struct StateSeed {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub cities: &'static [&'static str],
}

/// Brazilian southern-region sample: three states, ten cities.
pub const SAMPLE_STATES: &[StateSeed] = &[
    StateSeed {
        name: "Paraná",
        abbreviation: "PR",
        cities: &["Abatiá", "Adrianópolis", "Agudos do Sul", "Curitiba"],
    },
    StateSeed {
        name: "Santa Catarina",
        abbreviation: "SC",
        cities: &["Abdon Batista", "Abelardo Luz", "Agrolândia"],
    },
    StateSeed {
        name: "Rio Grande do Sul",
        abbreviation: "RS",
        cities: &["Aceguá", "Água Santa", "Agudo"],
    },
];

/// Load the sample dataset through the domain services.
///
/// Existing records are left alone. A city rejected for any reason other
/// than an unavailable datastore is logged and skipped, so a partially
/// seeded store converges instead of aborting startup.
///
/// # Errors
///
/// Returns [`Error::Unavailable`] when the datastore cannot be reached, and
/// propagates any failure while creating or listing states.
pub async fn load_sample_data(states: &StateService, cities: &CityService) -> Result<(), Error> {
    for seed in SAMPLE_STATES {
        let state_id = match states
            .create(StateParams::new(seed.name, seed.abbreviation))
            .await
        {
            Ok(state) => state.id,
            Err(Error::Validation(_)) => match states.find_by_name(seed.name).await? {
                Some(existing) => existing.id,
                None => {
                    warn!(state = seed.name, "sample state rejected; skipping its cities");
                    continue;
                }
            },
            Err(err) => return Err(err),
        };

        for &name in seed.cities {
            match cities.create(CityParams::new(name, state_id)).await {
                Ok(_) => {}
                Err(err @ Error::Unavailable(_)) => return Err(err),
                Err(err) => warn!(city = name, error = %err, "sample city skipped"),
            }
        }
    }

    info!("sample data loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::state::HttpState;

    #[tokio::test]
    async fn loads_three_states_and_ten_cities() {
        let state = HttpState::in_memory();

        load_sample_data(&state.states, &state.cities)
            .await
            .expect("seed");

        assert_eq!(state.states.list().await.expect("states").len(), 3);
        assert_eq!(state.cities.list().await.expect("cities").len(), 10);
    }

    #[tokio::test]
    async fn reloading_is_idempotent() {
        let state = HttpState::in_memory();

        load_sample_data(&state.states, &state.cities)
            .await
            .expect("first load");
        load_sample_data(&state.states, &state.cities)
            .await
            .expect("second load");

        assert_eq!(state.states.list().await.expect("states").len(), 3);
        assert_eq!(state.cities.list().await.expect("cities").len(), 10);
    }

    #[tokio::test]
    async fn cities_attach_to_their_state() {
        let state = HttpState::in_memory();

        load_sample_data(&state.states, &state.cities)
            .await
            .expect("seed");

        let states = state.states.list().await.expect("states");
        let parana = states
            .iter()
            .find(|s| s.abbreviation == "PR")
            .expect("Paraná");
        let attached = state
            .cities
            .list()
            .await
            .expect("cities")
            .into_iter()
            .filter(|city| city.state_id == Some(parana.id))
            .count();
        assert_eq!(attached, 4);
    }
}
