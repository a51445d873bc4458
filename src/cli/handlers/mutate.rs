//! Create, update and delete command handlers
//!
//! The mutation runner reports outcomes through the configured notifiers;
//! this handler only prints the record the backend returned.

use std::io::Write;

use serde_json::Value;

use crate::cli::validation::load_payload;
use crate::error::{AppError, AppResult};
use crate::models::{ResourceForm, ResourceKind};
use crate::services::{MutationOutcome, Services};

/// Handler for the create, update and delete commands
pub struct MutateCommandHandler {
    services: Services,
}

impl MutateCommandHandler {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// # Errors
    /// Malformed payloads fail with `BadRequest`; rejected mutations fail
    /// with `MutationFailed` after the operator has been notified.
    pub async fn create(&self, kind: ResourceKind, data: &str, out: &mut impl Write) -> AppResult<()> {
        let form = ResourceForm::parse(kind, load_payload(data)?)?;
        let outcome = self.services.mutations.create(None, &form).await;
        finish_with_record(outcome, out)
    }

    pub async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        data: &str,
        out: &mut impl Write,
    ) -> AppResult<()> {
        let form = ResourceForm::parse(kind, load_payload(data)?)?;
        let outcome = self.services.mutations.update(None, id, &form).await;
        finish_with_record(outcome, out)
    }

    pub async fn delete(&self, kind: ResourceKind, id: &str, out: &mut impl Write) -> AppResult<()> {
        match self.services.mutations.delete(None, kind, id).await {
            MutationOutcome::Completed(()) => Ok(()),
            MutationOutcome::Cancelled => {
                writeln!(out, "Cancelled; {} #{id} was kept", kind.label())?;
                Ok(())
            }
            MutationOutcome::Failed(message) => Err(AppError::MutationFailed { message }),
        }
    }
}

fn finish_with_record(outcome: MutationOutcome<Value>, out: &mut impl Write) -> AppResult<()> {
    match outcome {
        MutationOutcome::Completed(Value::Null) => Ok(()),
        MutationOutcome::Completed(record) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
            Ok(())
        }
        MutationOutcome::Cancelled => Ok(()),
        MutationOutcome::Failed(message) => Err(AppError::MutationFailed { message }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::NotificationLevel;
    use crate::testing::{FakeSource, RecordingNotifier, ScriptedConfirmer};
    use std::sync::Arc;

    struct Fixture {
        source: Arc<FakeSource>,
        notifier: Arc<RecordingNotifier>,
        handler: MutateCommandHandler,
    }

    fn fixture(kind: ResourceKind, rows: usize, confirm: bool) -> Fixture {
        let source = Arc::new(FakeSource::with_rows(kind, rows));
        let notifier = Arc::new(RecordingNotifier::default());
        let services = Services::new(
            source.clone(),
            notifier.clone(),
            Arc::new(ScriptedConfirmer::new(confirm)),
            &Settings::default(),
        );
        Fixture {
            source,
            notifier,
            handler: MutateCommandHandler::new(services),
        }
    }

    #[tokio::test]
    async fn test_create_prints_record() {
        let f = fixture(ResourceKind::Categories, 2, true);
        let mut out = Vec::new();
        f.handler
            .create(ResourceKind::Categories, r#"{"name": "Finance"}"#, &mut out)
            .await
            .unwrap();

        let printed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["id"], 3);
        assert_eq!(printed["name"], "Finance");
        assert_eq!(f.notifier.levels(), vec![NotificationLevel::Success]);
    }

    #[tokio::test]
    async fn test_create_rejects_non_object_payload() {
        let f = fixture(ResourceKind::Categories, 0, true);
        let err = f
            .handler
            .create(ResourceKind::Categories, "[1, 2]", &mut Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
        assert_eq!(f.source.mutation_calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_form_is_reported() {
        let f = fixture(ResourceKind::BlogTags, 0, true);
        let err = f
            .handler
            .create(
                ResourceKind::BlogTags,
                r#"{"name": "Remote", "slug": "Not A Slug"}"#,
                &mut Vec::new(),
            )
            .await
            .unwrap_err();
        assert!(err.is_reported());
        assert_eq!(f.source.mutation_calls(), 0);
        assert_eq!(f.notifier.levels(), vec![NotificationLevel::Error]);
    }

    #[tokio::test]
    async fn test_update_missing_record_fails() {
        let f = fixture(ResourceKind::Categories, 1, true);
        let err = f
            .handler
            .update(ResourceKind::Categories, "9", r#"{"name": "Legal"}"#, &mut Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Category #9 not found");
    }

    #[tokio::test]
    async fn test_delete_declined_prints_note() {
        let f = fixture(ResourceKind::Users, 2, false);
        let mut out = Vec::new();
        f.handler
            .delete(ResourceKind::Users, "1", &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Cancelled; User #1 was kept\n");
        assert_eq!(f.source.mutation_calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_confirmed_is_silent() {
        let f = fixture(ResourceKind::Users, 2, true);
        let mut out = Vec::new();
        f.handler
            .delete(ResourceKind::Users, "2", &mut out)
            .await
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(f.notifier.titles(), vec!["User #2 deleted".to_string()]);
    }
}
