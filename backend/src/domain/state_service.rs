//! State CRUD use-cases.
//!
//! Validation is explicit and runs before any persistence call: presence
//! checks locally, uniqueness through the repository port. Update validates
//! the merged candidate (existing record with submitted overrides applied),
//! and fetch-by-id runs first so a missing id never reaches validation.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::ports::{NewState, StateChanges, StateRepository};
use crate::domain::state::{State, StateParams};
use crate::domain::validation::{BLANK, TAKEN, ValidationErrors};

const RESOURCE: &str = "state";

/// `true` when `found` is a different record than the one being validated.
fn conflicts(found: Option<State>, exclude_id: Option<i64>) -> bool {
    found.is_some_and(|record| Some(record.id) != exclude_id)
}

/// Use-case service for the state resource.
#[derive(Clone)]
pub struct StateService {
    repository: Arc<dyn StateRepository>,
}

impl StateService {
    pub fn new(repository: Arc<dyn StateRepository>) -> Self {
        Self { repository }
    }

    /// All states in natural order.
    pub async fn list(&self) -> Result<Vec<State>, Error> {
        Ok(self.repository.list().await?)
    }

    /// Fetch a state or fail with [`Error::NotFound`].
    pub async fn fetch(&self, id: i64) -> Result<State, Error> {
        self.repository
            .find(id)
            .await?
            .ok_or(Error::NotFound { resource: RESOURCE, id })
    }

    /// Look a state up by exact name. Used by the seed loader.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<State>, Error> {
        Ok(self.repository.find_by_name(name).await?)
    }

    /// Validate and persist a new state.
    pub async fn create(&self, params: StateParams) -> Result<State, Error> {
        let name = params.name.unwrap_or_default();
        let abbreviation = params.abbreviation.unwrap_or_default();
        self.validate(&name, &abbreviation, None).await?;
        Ok(self
            .repository
            .insert(&NewState { name, abbreviation })
            .await?)
    }

    /// Merge the submitted overrides into the existing record, validate the
    /// result, and persist it.
    pub async fn update(&self, id: i64, params: StateParams) -> Result<State, Error> {
        let existing = self.fetch(id).await?;
        let name = params.name.unwrap_or(existing.name);
        let abbreviation = params.abbreviation.unwrap_or(existing.abbreviation);
        self.validate(&name, &abbreviation, Some(id)).await?;

        self.repository
            .update(id, &StateChanges { name, abbreviation })
            .await?
            .ok_or(Error::NotFound { resource: RESOURCE, id })
    }

    /// Delete a state or fail with [`Error::NotFound`].
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(Error::NotFound { resource: RESOURCE, id })
        }
    }

    async fn validate(
        &self,
        name: &str,
        abbreviation: &str,
        exclude_id: Option<i64>,
    ) -> Result<(), Error> {
        let mut errors = ValidationErrors::default();

        if name.trim().is_empty() {
            errors.add("name", BLANK);
        } else if conflicts(self.repository.find_by_name(name).await?, exclude_id) {
            errors.add("name", TAKEN);
        }

        if abbreviation.trim().is_empty() {
            errors.add("abbreviation", BLANK);
        } else if conflicts(
            self.repository.find_by_abbreviation(abbreviation).await?,
            exclude_id,
        ) {
            errors.add("abbreviation", TAKEN);
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::{BLANK, TAKEN};
    use crate::outbound::memory::InMemoryStore;
    use rstest::{fixture, rstest};

    #[fixture]
    fn service() -> StateService {
        StateService::new(Arc::new(InMemoryStore::new().state_repository()))
    }

    #[rstest]
    #[tokio::test]
    async fn create_persists_and_is_retrievable(service: StateService) {
        let created = service
            .create(StateParams::new("Paraná", "PR"))
            .await
            .expect("valid state");

        let fetched = service.fetch(created.id).await.expect("retrievable");
        assert_eq!(fetched.name, "Paraná");
        assert_eq!(fetched.abbreviation, "PR");
    }

    #[rstest]
    #[case(StateParams::default(), &["abbreviation", "name"])]
    #[case(StateParams { name: Some("  ".into()), abbreviation: Some("PR".into()) }, &["name"])]
    #[case(StateParams { name: Some("Paraná".into()), abbreviation: None }, &["abbreviation"])]
    #[tokio::test]
    async fn create_rejects_blank_fields(
        service: StateService,
        #[case] params: StateParams,
        #[case] blank_fields: &[&str],
    ) {
        let err = service.create(params).await.expect_err("must fail");
        let Error::Validation(errors) = err else {
            panic!("expected validation failure, got {err:?}");
        };
        for field in blank_fields {
            assert_eq!(errors.messages(field), &[BLANK], "field {field}");
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_duplicate_name_and_abbreviation(service: StateService) {
        service
            .create(StateParams::new("Paraná", "PR"))
            .await
            .expect("first state");

        let err = service
            .create(StateParams::new("Paraná", "PR"))
            .await
            .expect_err("duplicate");
        let Error::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.messages("name"), &[TAKEN]);
        assert_eq!(errors.messages("abbreviation"), &[TAKEN]);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_check_is_case_sensitive(service: StateService) {
        service
            .create(StateParams::new("Paraná", "PR"))
            .await
            .expect("first state");

        // Exact-match semantics: a different casing is a different value.
        service
            .create(StateParams::new("paraná", "pr"))
            .await
            .expect("case variant accepted");
    }

    #[rstest]
    #[tokio::test]
    async fn update_merges_partial_input(service: StateService) {
        let created = service
            .create(StateParams::new("Paraná", "PR"))
            .await
            .expect("state");

        let updated = service
            .update(
                created.id,
                StateParams {
                    name: Some("Paraná do Norte".into()),
                    abbreviation: None,
                },
            )
            .await
            .expect("update succeeds");

        assert_eq!(updated.name, "Paraná do Norte");
        assert_eq!(updated.abbreviation, "PR");
    }

    #[rstest]
    #[tokio::test]
    async fn update_excludes_own_record_from_uniqueness(service: StateService) {
        let created = service
            .create(StateParams::new("Paraná", "PR"))
            .await
            .expect("state");

        // Re-submitting the current values must not trip the duplicate check.
        let updated = service
            .update(created.id, StateParams::new("Paraná", "PR"))
            .await
            .expect("self-update succeeds");
        assert_eq!(updated.id, created.id);
    }

    #[rstest]
    #[tokio::test]
    async fn update_missing_id_is_not_found_never_validation(service: StateService) {
        // Blank input would fail validation, but the missing id wins.
        let err = service
            .update(999, StateParams::default())
            .await
            .expect_err("missing id");
        assert_eq!(err, Error::not_found("state", 999));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_and_subsequent_fetch_is_not_found(service: StateService) {
        let created = service
            .create(StateParams::new("Paraná", "PR"))
            .await
            .expect("state");

        service.delete(created.id).await.expect("delete succeeds");
        let err = service.fetch(created.id).await.expect_err("gone");
        assert_eq!(err, Error::not_found("state", created.id));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_missing_id_is_not_found(service: StateService) {
        let err = service.delete(42).await.expect_err("missing id");
        assert_eq!(err, Error::not_found("state", 42));
    }
}
