//! Diesel row models and their conversions to domain entities.
//!
//! Internal to the persistence layer; repositories convert rows into domain
//! types before anything crosses the port boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::city::City;
use crate::domain::state::State;

use super::schema::{cities, states};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = states)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StateRow {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = states)]
pub struct NewStateRow<'a> {
    pub name: &'a str,
    pub abbreviation: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CityRow {
    pub id: i64,
    pub name: String,
    pub state_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cities)]
pub struct NewCityRow<'a> {
    pub name: &'a str,
    pub state_id: Option<i64>,
}

impl From<StateRow> for State {
    fn from(row: StateRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            abbreviation: row.abbreviation,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            state_id: row.state_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn city_row_preserves_nullable_state_id() {
        let now = Utc::now();
        let row = CityRow {
            id: 1,
            name: "Curitiba".into(),
            state_id: None,
            created_at: now,
            updated_at: now,
        };

        let city = City::from(row);
        assert_eq!(city.state_id, None);
        assert_eq!(city.name, "Curitiba");
    }

    #[rstest]
    fn state_row_maps_all_fields() {
        let now = Utc::now();
        let row = StateRow {
            id: 7,
            name: "Paraná".into(),
            abbreviation: "PR".into(),
            created_at: now,
            updated_at: now,
        };

        let state = State::from(row);
        assert_eq!(state.id, 7);
        assert_eq!(state.abbreviation, "PR");
    }
}
