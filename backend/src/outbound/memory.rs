//! In-memory adapters implementing the repository ports.
//!
//! Used by handler and service tests and by DB-less development runs. The
//! adapters mirror the PostgreSQL schema's behaviour where it matters to the
//! domain: unique indexes on state name/abbreviation and city name, and the
//! foreign key from city to state, all surface as query errors exactly like
//! their SQL counterparts.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::city::{City, CitySearchFilter, CityWithState};
use crate::domain::ports::{
    CityChanges, CityRepository, NewCity, NewState, PersistenceError, StateChanges,
    StateRepository,
};
use crate::domain::state::State;

#[derive(Default)]
struct MemDb {
    states: BTreeMap<i64, State>,
    cities: BTreeMap<i64, City>,
    next_state_id: i64,
    next_city_id: i64,
}

fn lock(db: &Mutex<MemDb>) -> Result<MutexGuard<'_, MemDb>, PersistenceError> {
    db.lock()
        .map_err(|_| PersistenceError::connection("store mutex poisoned"))
}

/// Shared backing store handing out per-entity repositories over the same
/// data, so the city→state join works across them.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<MemDb>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_repository(&self) -> InMemoryStateRepository {
        InMemoryStateRepository {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn city_repository(&self) -> InMemoryCityRepository {
        InMemoryCityRepository {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// In-memory [`StateRepository`].
#[derive(Clone)]
pub struct InMemoryStateRepository {
    inner: Arc<Mutex<MemDb>>,
}

/// In-memory [`CityRepository`].
#[derive(Clone)]
pub struct InMemoryCityRepository {
    inner: Arc<Mutex<MemDb>>,
}

fn unique_violation(index: &str) -> PersistenceError {
    PersistenceError::query(format!(
        "duplicate key value violates unique constraint \"{index}\""
    ))
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn list(&self) -> Result<Vec<State>, PersistenceError> {
        let db = lock(&self.inner)?;
        Ok(db.states.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<State>, PersistenceError> {
        let db = lock(&self.inner)?;
        Ok(db.states.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<State>, PersistenceError> {
        let db = lock(&self.inner)?;
        Ok(db.states.values().find(|state| state.name == name).cloned())
    }

    async fn find_by_abbreviation(
        &self,
        abbreviation: &str,
    ) -> Result<Option<State>, PersistenceError> {
        let db = lock(&self.inner)?;
        Ok(db
            .states
            .values()
            .find(|state| state.abbreviation == abbreviation)
            .cloned())
    }

    async fn insert(&self, new: &NewState) -> Result<State, PersistenceError> {
        let mut db = lock(&self.inner)?;
        if db.states.values().any(|state| state.name == new.name) {
            return Err(unique_violation("index_states_on_name"));
        }
        if db
            .states
            .values()
            .any(|state| state.abbreviation == new.abbreviation)
        {
            return Err(unique_violation("index_states_on_abbreviation"));
        }

        db.next_state_id += 1;
        let now = Utc::now();
        let state = State {
            id: db.next_state_id,
            name: new.name.clone(),
            abbreviation: new.abbreviation.clone(),
            created_at: now,
            updated_at: now,
        };
        db.states.insert(state.id, state.clone());
        Ok(state)
    }

    async fn update(
        &self,
        id: i64,
        changes: &StateChanges,
    ) -> Result<Option<State>, PersistenceError> {
        let mut db = lock(&self.inner)?;
        if db
            .states
            .values()
            .any(|state| state.id != id && state.name == changes.name)
        {
            return Err(unique_violation("index_states_on_name"));
        }
        if db
            .states
            .values()
            .any(|state| state.id != id && state.abbreviation == changes.abbreviation)
        {
            return Err(unique_violation("index_states_on_abbreviation"));
        }

        let Some(state) = db.states.get_mut(&id) else {
            return Ok(None);
        };
        state.name = changes.name.clone();
        state.abbreviation = changes.abbreviation.clone();
        state.updated_at = Utc::now();
        Ok(Some(state.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, PersistenceError> {
        let mut db = lock(&self.inner)?;
        if db.cities.values().any(|city| city.state_id == Some(id)) {
            return Err(PersistenceError::query(
                "update or delete on table \"states\" violates foreign key constraint \
                 \"cities_state_id_fkey\" on table \"cities\"",
            ));
        }
        Ok(db.states.remove(&id).is_some())
    }
}

#[async_trait]
impl CityRepository for InMemoryCityRepository {
    async fn list(&self) -> Result<Vec<City>, PersistenceError> {
        let db = lock(&self.inner)?;
        Ok(db.cities.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<City>, PersistenceError> {
        let db = lock(&self.inner)?;
        Ok(db.cities.get(&id).cloned())
    }

    async fn insert(&self, new: &NewCity) -> Result<City, PersistenceError> {
        let mut db = lock(&self.inner)?;
        if db.cities.values().any(|city| city.name == new.name) {
            return Err(unique_violation("index_cities_on_name"));
        }
        if let Some(state_id) = new.state_id {
            if !db.states.contains_key(&state_id) {
                return Err(fk_violation());
            }
        }

        db.next_city_id += 1;
        let now = Utc::now();
        let city = City {
            id: db.next_city_id,
            name: new.name.clone(),
            state_id: new.state_id,
            created_at: now,
            updated_at: now,
        };
        db.cities.insert(city.id, city.clone());
        Ok(city)
    }

    async fn update(
        &self,
        id: i64,
        changes: &CityChanges,
    ) -> Result<Option<City>, PersistenceError> {
        let mut db = lock(&self.inner)?;
        if db
            .cities
            .values()
            .any(|city| city.id != id && city.name == changes.name)
        {
            return Err(unique_violation("index_cities_on_name"));
        }
        if let Some(state_id) = changes.state_id {
            if !db.states.contains_key(&state_id) {
                return Err(fk_violation());
            }
        }

        let Some(city) = db.cities.get_mut(&id) else {
            return Ok(None);
        };
        city.name = changes.name.clone();
        city.state_id = changes.state_id;
        city.updated_at = Utc::now();
        Ok(Some(city.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, PersistenceError> {
        let mut db = lock(&self.inner)?;
        Ok(db.cities.remove(&id).is_some())
    }

    async fn search(
        &self,
        filter: &CitySearchFilter,
    ) -> Result<Vec<CityWithState>, PersistenceError> {
        let db = lock(&self.inner)?;
        let state_fragment = filter.state_fragment().map(str::to_lowercase);
        let name_fragment = filter.name_fragment().map(str::to_lowercase);

        let mut rows: Vec<CityWithState> = db
            .cities
            .values()
            .map(|city| CityWithState {
                city: city.clone(),
                state: city.state_id.and_then(|id| db.states.get(&id).cloned()),
            })
            .filter(|row| {
                // A state filter implies the join must match, so stateless
                // cities drop out, mirroring NULL comparisons in SQL.
                state_fragment.as_deref().is_none_or(|fragment| {
                    row.state
                        .as_ref()
                        .is_some_and(|state| state.name.to_lowercase().contains(fragment))
                })
            })
            .filter(|row| {
                name_fragment
                    .as_deref()
                    .is_none_or(|fragment| row.city.name.to_lowercase().contains(fragment))
            })
            .collect();

        rows.sort_by(|a, b| a.city.name.cmp(&b.city.name));
        Ok(rows)
    }
}

fn fk_violation() -> PersistenceError {
    PersistenceError::query(
        "insert or update on table \"cities\" violates foreign key constraint \
         \"cities_state_id_fkey\"",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    async fn seed_state(repo: &InMemoryStateRepository, name: &str, abbreviation: &str) -> State {
        repo.insert(&NewState {
            name: name.into(),
            abbreviation: abbreviation.into(),
        })
        .await
        .expect("state inserted")
    }

    async fn seed_city(repo: &InMemoryCityRepository, name: &str, state_id: Option<i64>) -> City {
        repo.insert(&NewCity {
            name: name.into(),
            state_id,
        })
        .await
        .expect("city inserted")
    }

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    async fn seed_southeast(store: &InMemoryStore) {
        let states = store.state_repository();
        let cities = store.city_repository();
        let rj = seed_state(&states, "Rio de Janeiro", "RJ").await;
        let sp = seed_state(&states, "São Paulo", "SP").await;
        seed_city(&cities, "Rio de Janeiro", Some(rj.id)).await;
        seed_city(&cities, "Angra dos Reis", Some(rj.id)).await;
        seed_city(&cities, "São Paulo", Some(sp.id)).await;
    }

    fn names(rows: &[CityWithState]) -> Vec<&str> {
        rows.iter().map(|row| row.city.name.as_str()).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn search_composes_both_fragments_with_and(store: InMemoryStore) {
        seed_southeast(&store).await;

        let rows = store
            .city_repository()
            .search(&CitySearchFilter::new(
                Some("Rio de Janeiro".into()),
                Some("Ang".into()),
            ))
            .await
            .expect("search");
        assert_eq!(names(&rows), ["Angra dos Reis"]);
    }

    #[rstest]
    #[tokio::test]
    async fn search_by_city_fragment_spans_all_states(store: InMemoryStore) {
        seed_southeast(&store).await;

        let rows = store
            .city_repository()
            .search(&CitySearchFilter::new(None, Some("Paulo".into())))
            .await
            .expect("search");
        assert_eq!(names(&rows), ["São Paulo"]);
    }

    #[rstest]
    #[tokio::test]
    async fn search_with_unmatched_state_is_empty(store: InMemoryStore) {
        seed_southeast(&store).await;

        let rows = store
            .city_repository()
            .search(&CitySearchFilter::new(
                Some("Espirito Santo".into()),
                Some("Vito".into()),
            ))
            .await
            .expect("search");
        assert!(rows.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn search_matching_is_case_insensitive(store: InMemoryStore) {
        seed_southeast(&store).await;

        let rows = store
            .city_repository()
            .search(&CitySearchFilter::new(
                Some("rio DE janeiro".into()),
                Some("angra".into()),
            ))
            .await
            .expect("search");
        assert_eq!(names(&rows), ["Angra dos Reis"]);
    }

    #[rstest]
    #[tokio::test]
    async fn search_without_fragments_lists_everything_ordered(store: InMemoryStore) {
        seed_southeast(&store).await;

        let rows = store
            .city_repository()
            .search(&CitySearchFilter::default())
            .await
            .expect("search");
        assert_eq!(names(&rows), ["Angra dos Reis", "Rio de Janeiro", "São Paulo"]);
        // Eager join: every matched city carries its owning state.
        assert!(rows.iter().all(|row| row.state.is_some()));
    }

    #[rstest]
    #[tokio::test]
    async fn state_filter_excludes_stateless_cities(store: InMemoryStore) {
        seed_southeast(&store).await;
        seed_city(&store.city_repository(), "Limbo", None).await;

        let all = store
            .city_repository()
            .search(&CitySearchFilter::default())
            .await
            .expect("search");
        assert!(names(&all).contains(&"Limbo"));

        let filtered = store
            .city_repository()
            .search(&CitySearchFilter::new(Some("a".into()), None))
            .await
            .expect("search");
        assert!(!names(&filtered).contains(&"Limbo"));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_referenced_state_violates_foreign_key(store: InMemoryStore) {
        seed_southeast(&store).await;
        let states = store.state_repository();
        let rj = states
            .find_by_name("Rio de Janeiro")
            .await
            .expect("query")
            .expect("seeded");

        let err = states.delete(rj.id).await.expect_err("fk violation");
        assert!(matches!(err, PersistenceError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn inserting_city_with_unknown_state_violates_foreign_key(store: InMemoryStore) {
        let err = store
            .city_repository()
            .insert(&NewCity {
                name: "Nowhere".into(),
                state_id: Some(999),
            })
            .await
            .expect_err("fk violation");
        assert!(matches!(err, PersistenceError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_assigned_sequentially(store: InMemoryStore) {
        let states = store.state_repository();
        let first = seed_state(&states, "Paraná", "PR").await;
        let second = seed_state(&states, "Santa Catarina", "SC").await;
        assert_eq!(second.id, first.id + 1);
    }
}
