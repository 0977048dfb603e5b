//! City CRUD and search use-cases.
//!
//! The only field-level rule here is name presence; city-name uniqueness is
//! a schema-level index only, so a concurrent duplicate surfaces from the
//! repository as an internal error rather than a validation failure.

use std::sync::Arc;

use crate::domain::city::{City, CityParams, CitySearchFilter, CityWithState};
use crate::domain::error::Error;
use crate::domain::ports::{CityChanges, CityRepository, NewCity};
use crate::domain::validation::{BLANK, ValidationErrors};

const RESOURCE: &str = "city";

fn validate_name(name: &str) -> Result<(), Error> {
    let mut errors = ValidationErrors::default();
    if name.trim().is_empty() {
        errors.add("name", BLANK);
    }
    errors.into_result()
}

/// Use-case service for the city resource.
#[derive(Clone)]
pub struct CityService {
    repository: Arc<dyn CityRepository>,
}

impl CityService {
    pub fn new(repository: Arc<dyn CityRepository>) -> Self {
        Self { repository }
    }

    /// All cities in natural order.
    pub async fn list(&self) -> Result<Vec<City>, Error> {
        Ok(self.repository.list().await?)
    }

    /// Fetch a city or fail with [`Error::NotFound`].
    pub async fn fetch(&self, id: i64) -> Result<City, Error> {
        self.repository
            .find(id)
            .await?
            .ok_or(Error::NotFound { resource: RESOURCE, id })
    }

    /// Validate and persist a new city. `state_id` is stored as given,
    /// including null when omitted.
    pub async fn create(&self, params: CityParams) -> Result<City, Error> {
        let name = params.name.unwrap_or_default();
        validate_name(&name)?;
        Ok(self
            .repository
            .insert(&NewCity {
                name,
                state_id: params.state_id,
            })
            .await?)
    }

    /// Merge the submitted overrides into the existing record, validate the
    /// result, and persist it.
    pub async fn update(&self, id: i64, params: CityParams) -> Result<City, Error> {
        let existing = self.fetch(id).await?;
        let name = params.name.unwrap_or(existing.name);
        let state_id = params.state_id.or(existing.state_id);
        validate_name(&name)?;

        self.repository
            .update(id, &CityChanges { name, state_id })
            .await?
            .ok_or(Error::NotFound { resource: RESOURCE, id })
    }

    /// Delete a city or fail with [`Error::NotFound`].
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(Error::NotFound { resource: RESOURCE, id })
        }
    }

    /// Filtered, ordered listing of cities with their owning state.
    pub async fn search(
        &self,
        filter: &CitySearchFilter,
    ) -> Result<Vec<CityWithState>, Error> {
        Ok(self.repository.search(filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StateParams;
    use crate::domain::state_service::StateService;
    use crate::outbound::memory::InMemoryStore;
    use rstest::{fixture, rstest};

    struct Services {
        states: StateService,
        cities: CityService,
    }

    #[fixture]
    fn services() -> Services {
        let store = InMemoryStore::new();
        Services {
            states: StateService::new(Arc::new(store.state_repository())),
            cities: CityService::new(Arc::new(store.city_repository())),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_sets_state_id_as_given(services: Services) {
        let state = services
            .states
            .create(StateParams::new("Paraná", "PR"))
            .await
            .expect("state");

        let city = services
            .cities
            .create(CityParams::new("Curitiba", state.id))
            .await
            .expect("city");
        assert_eq!(city.state_id, Some(state.id));

        let orphan = services
            .cities
            .create(CityParams {
                name: Some("Limbo".into()),
                state_id: None,
            })
            .await
            .expect("state_id is optional");
        assert_eq!(orphan.state_id, None);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".into()))]
    #[tokio::test]
    async fn create_rejects_blank_name(services: Services, #[case] name: Option<String>) {
        let err = services
            .cities
            .create(CityParams { name, state_id: None })
            .await
            .expect_err("blank name");
        let Error::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.messages("name"), &[BLANK]);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_name_is_not_a_validation_failure(services: Services) {
        services
            .cities
            .create(CityParams {
                name: Some("Curitiba".into()),
                state_id: None,
            })
            .await
            .expect("first city");

        // The unique index lives in the schema only; its violation surfaces
        // as an internal error, not a field error.
        let err = services
            .cities
            .create(CityParams {
                name: Some("Curitiba".into()),
                state_id: None,
            })
            .await
            .expect_err("duplicate index");
        assert!(matches!(err, Error::Internal(_)), "got {err:?}");
    }

    #[rstest]
    #[tokio::test]
    async fn update_missing_id_is_not_found_never_validation(services: Services) {
        let err = services
            .cities
            .update(7, CityParams::default())
            .await
            .expect_err("missing id");
        assert_eq!(err, Error::not_found("city", 7));
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_unsubmitted_fields(services: Services) {
        let state = services
            .states
            .create(StateParams::new("Paraná", "PR"))
            .await
            .expect("state");
        let city = services
            .cities
            .create(CityParams::new("Curitiba", state.id))
            .await
            .expect("city");

        let updated = services
            .cities
            .update(
                city.id,
                CityParams {
                    name: Some("Abatiá".into()),
                    state_id: None,
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.name, "Abatiá");
        assert_eq!(updated.state_id, Some(state.id));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_then_fetch_is_not_found(services: Services) {
        let city = services
            .cities
            .create(CityParams {
                name: Some("Curitiba".into()),
                state_id: None,
            })
            .await
            .expect("city");

        services.cities.delete(city.id).await.expect("delete");
        let err = services.cities.fetch(city.id).await.expect_err("gone");
        assert_eq!(err, Error::not_found("city", city.id));
    }
}
