//! PostgreSQL-backed [`StateRepository`] implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewState, PersistenceError, StateChanges, StateRepository};
use crate::domain::state::State;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewStateRow, StateRow};
use super::pool::DbPool;
use super::schema::states;

/// Diesel-backed implementation of the [`StateRepository`] port.
#[derive(Clone)]
pub struct DieselStateRepository {
    pool: DbPool,
}

impl DieselStateRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StateRepository for DieselStateRepository {
    async fn list(&self) -> Result<Vec<State>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StateRow> = states::table
            .order(states::id.asc())
            .select(StateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(State::from).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<State>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StateRow> = states::table
            .find(id)
            .select(StateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(State::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<State>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StateRow> = states::table
            .filter(states::name.eq(name))
            .select(StateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(State::from))
    }

    async fn find_by_abbreviation(
        &self,
        abbreviation: &str,
    ) -> Result<Option<State>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StateRow> = states::table
            .filter(states::abbreviation.eq(abbreviation))
            .select(StateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(State::from))
    }

    async fn insert(&self, new: &NewState) -> Result<State, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: StateRow = diesel::insert_into(states::table)
            .values(&NewStateRow {
                name: &new.name,
                abbreviation: &new.abbreviation,
            })
            .returning(StateRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(State::from(row))
    }

    async fn update(
        &self,
        id: i64,
        changes: &StateChanges,
    ) -> Result<Option<State>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StateRow> = diesel::update(states::table.find(id))
            .set((
                states::name.eq(&changes.name),
                states::abbreviation.eq(&changes.abbreviation),
                states::updated_at.eq(Utc::now()),
            ))
            .returning(StateRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(State::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(states::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
