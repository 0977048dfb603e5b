//! PostgreSQL-backed [`CityRepository`] implementation using Diesel.
//!
//! Search builds one boxed query: a LEFT JOIN onto `states` for the eager
//! load, an `ILIKE` filter per present fragment, and an ascending order on
//! the city name under the database's default collation.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::city::{City, CitySearchFilter, CityWithState};
use crate::domain::ports::{CityChanges, CityRepository, NewCity, PersistenceError};
use crate::domain::state::State;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CityRow, NewCityRow, StateRow};
use super::pool::DbPool;
use super::schema::{cities, states};

/// `ILIKE` containment pattern for a fragment. The fragment itself is passed
/// through unescaped, so `%` and `_` keep their wildcard meaning.
fn contains_pattern(fragment: &str) -> String {
    format!("%{fragment}%")
}

/// Diesel-backed implementation of the [`CityRepository`] port.
#[derive(Clone)]
pub struct DieselCityRepository {
    pool: DbPool,
}

impl DieselCityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityRepository for DieselCityRepository {
    async fn list(&self) -> Result<Vec<City>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CityRow> = cities::table
            .order(cities::id.asc())
            .select(CityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(City::from).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<City>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CityRow> = cities::table
            .find(id)
            .select(CityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(City::from))
    }

    async fn insert(&self, new: &NewCity) -> Result<City, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CityRow = diesel::insert_into(cities::table)
            .values(&NewCityRow {
                name: &new.name,
                state_id: new.state_id,
            })
            .returning(CityRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(City::from(row))
    }

    async fn update(
        &self,
        id: i64,
        changes: &CityChanges,
    ) -> Result<Option<City>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CityRow> = diesel::update(cities::table.find(id))
            .set((
                cities::name.eq(&changes.name),
                cities::state_id.eq(changes.state_id),
                cities::updated_at.eq(Utc::now()),
            ))
            .returning(CityRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(City::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(cities::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn search(
        &self,
        filter: &CitySearchFilter,
    ) -> Result<Vec<CityWithState>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = cities::table
            .left_join(states::table)
            .select((CityRow::as_select(), Option::<StateRow>::as_select()))
            .into_boxed();

        // Filtering on the joined column makes unmatched rows compare as
        // NULL, so a state fragment also drops stateless cities.
        if let Some(fragment) = filter.state_fragment() {
            query = query.filter(states::name.ilike(contains_pattern(fragment)));
        }
        if let Some(fragment) = filter.name_fragment() {
            query = query.filter(cities::name.ilike(contains_pattern(fragment)));
        }

        let rows: Vec<(CityRow, Option<StateRow>)> = query
            .order(cities::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(city, state)| CityWithState {
                city: City::from(city),
                state: state.map(State::from),
            })
            .collect())
    }
}
