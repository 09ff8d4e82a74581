//! # Resource Synchronizer
//!
//! Keeps a local ordered mirror of a remote collection and the single draft record
//! being authored. Every mutation goes through the [`RemoteCollection`]; the mirror is
//! only changed from server responses.
//!
//! ## Operations
//!
//! * **load**: list fetch. Success replaces the mirror wholesale (server order, no
//!   merge). Failure leaves the mirror as it was.
//! * **begin_create / begin_edit**: reset the draft to defaults, or copy a record into it.
//! * **update_field**: coerce raw input through the [`binder`](crate::binder).
//! * **submit**: create (`Draft::New`) or update (`Draft::Editing`). Success reloads the
//!   mirror and resets the draft. Failure leaves draft and editing state untouched so
//!   the same submission can be retried.
//! * **remove**: delete by identity, then reload (or splice locally, see [`DeletePolicy`]).
//!
//! Failures are logged at `warn` with the resource name, recorded as an [`ErrorNotice`]
//! in the snapshot, and returned to the caller.

use crate::binder;
use crate::draft::Draft;
use crate::error::SyncError;
use crate::record::{Record, Violation};
use crate::remote::RemoteCollection;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// What the mirror does after the server confirms a delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Refetch the whole collection.
    #[default]
    Reload,
    /// Drop the record from the mirror by identity without a refetch.
    Splice,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Refuse to submit drafts that report [`Violation`]s.
    pub strict: bool,
    pub delete_policy: DeletePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Edit,
    Submit,
    Remove,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Load => "load",
            Operation::Edit => "edit",
            Operation::Submit => "submit",
            Operation::Remove => "remove",
        };
        f.write_str(name)
    }
}

/// Operator-visible record of the last failed operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNotice {
    pub operation: Operation,
    pub message: String,
    pub retryable: bool,
}

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted<T: Record> {
    /// The server created the record and assigned it an identity.
    Created(T),
    /// The record at `id` was updated; `echoed` is the server's copy when it sent one.
    Updated { id: T::Id, echoed: Option<T> },
}

/// Read-only snapshot for renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncView<T: Record> {
    pub mirror: Vec<T>,
    /// Bumped every time the mirror changes.
    pub generation: u64,
    pub draft: T,
    pub editing: bool,
    pub violations: Vec<Violation>,
    pub notice: Option<ErrorNotice>,
}

impl<T: Record> SyncView<T> {
    pub fn find(&self, id: T::Id) -> Option<&T> {
        self.mirror.iter().find(|record| record.id() == Some(id))
    }
}

pub struct Synchronizer<T: Record> {
    remote: Box<dyn RemoteCollection<T>>,
    mirror: Vec<T>,
    generation: u64,
    draft: Draft<T>,
    notice: Option<ErrorNotice>,
    options: SyncOptions,
}

impl<T: Record> Synchronizer<T> {
    pub fn new(remote: Box<dyn RemoteCollection<T>>, options: SyncOptions) -> Self {
        Self {
            remote,
            mirror: Vec::new(),
            generation: 0,
            draft: Draft::default(),
            notice: None,
            options,
        }
    }

    pub fn mirror(&self) -> &[T] {
        &self.mirror
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn draft(&self) -> &Draft<T> {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_editing()
    }

    pub fn notice(&self) -> Option<&ErrorNotice> {
        self.notice.as_ref()
    }

    pub fn view(&self) -> SyncView<T> {
        SyncView {
            mirror: self.mirror.clone(),
            generation: self.generation,
            draft: self.draft.record().clone(),
            editing: self.draft.is_editing(),
            violations: self.draft.record().violations(),
            notice: self.notice.clone(),
        }
    }

    /// Replaces the mirror with the server's current list. Returns the new size.
    pub async fn load(&mut self) -> Result<usize, SyncError> {
        match self.remote.list().await {
            Ok(records) => {
                self.replace_mirror(records);
                self.notice = None;
                info!(
                    resource = T::RESOURCE,
                    size = self.mirror.len(),
                    generation = self.generation,
                    "Loaded"
                );
                Ok(self.mirror.len())
            }
            Err(e) => Err(self.fail(Operation::Load, e.into())),
        }
    }

    pub fn begin_create(&mut self) {
        self.draft = Draft::default();
        debug!(resource = T::RESOURCE, "Draft reset");
    }

    /// Copies `record` verbatim into the draft; the next submit updates it.
    pub fn begin_edit(&mut self, record: T) -> Result<(), SyncError> {
        match Draft::editing(record) {
            Some(draft) => {
                debug!(resource = T::RESOURCE, id = ?draft.target(), "Editing");
                self.draft = draft;
                Ok(())
            }
            None => {
                warn!(resource = T::RESOURCE, "Refusing to edit a record without identity");
                Err(SyncError::MissingIdentity)
            }
        }
    }

    /// Starts editing the mirror entry with identity `id`.
    pub fn begin_edit_id(&mut self, id: T::Id) -> Result<(), SyncError> {
        let record = self
            .mirror
            .iter()
            .find(|record| record.id() == Some(id))
            .cloned();
        match record {
            Some(record) => self.begin_edit(record),
            None => Err(self.fail(Operation::Edit, SyncError::NotFound(id.to_string()))),
        }
    }

    pub fn update_field(&mut self, field: &str, raw: &str) -> Result<(), SyncError> {
        if let Err(e) = binder::bind(self.draft.record_mut(), field, raw) {
            return Err(self.fail(Operation::Edit, e.into()));
        }
        debug!(resource = T::RESOURCE, field, raw, "Draft field updated");
        Ok(())
    }

    /// Creates or updates the draft on the server, then reloads and resets the draft.
    pub async fn submit(&mut self) -> Result<Submitted<T>, SyncError> {
        if self.options.strict {
            let violations = self.draft.record().violations();
            if !violations.is_empty() {
                return Err(self.fail(Operation::Submit, SyncError::Invalid(violations)));
            }
        }

        let outcome = match &self.draft {
            Draft::New(record) => {
                debug!(resource = T::RESOURCE, ?record, "Create");
                self.remote.create(record).await.map(Submitted::Created)
            }
            Draft::Editing { id, record } => {
                let id = *id;
                debug!(resource = T::RESOURCE, %id, ?record, "Update");
                self.remote
                    .update(id, record)
                    .await
                    .map(|echoed| Submitted::Updated { id, echoed })
            }
        };

        match outcome {
            Ok(submitted) => {
                match &submitted {
                    Submitted::Created(record) => {
                        info!(resource = T::RESOURCE, id = ?record.id(), "Created")
                    }
                    Submitted::Updated { id, .. } => info!(resource = T::RESOURCE, %id, "Updated"),
                }
                self.notice = None;
                if self.load().await.is_err() {
                    debug!(resource = T::RESOURCE, "Mirror kept after failed reload");
                }
                self.begin_create();
                Ok(submitted)
            }
            Err(e) => Err(self.fail(Operation::Submit, e.into())),
        }
    }

    /// Deletes `id` on the server and drops it from the mirror.
    pub async fn remove(&mut self, id: T::Id) -> Result<(), SyncError> {
        debug!(resource = T::RESOURCE, %id, "Delete");
        match self.remote.delete(id).await {
            Ok(()) => {
                info!(resource = T::RESOURCE, %id, "Deleted");
                self.notice = None;
                match self.options.delete_policy {
                    DeletePolicy::Reload => {
                        // The server confirmed the delete, so the record goes even if
                        // the refetch does not come back.
                        if self.load().await.is_err() {
                            self.splice(id);
                        }
                    }
                    DeletePolicy::Splice => self.splice(id),
                }
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::Remove, e.into())),
        }
    }

    fn replace_mirror(&mut self, records: Vec<T>) {
        self.mirror = records;
        self.generation += 1;
    }

    fn splice(&mut self, id: T::Id) {
        let before = self.mirror.len();
        self.mirror.retain(|record| record.id() != Some(id));
        if self.mirror.len() != before {
            self.generation += 1;
        }
    }

    fn fail(&mut self, operation: Operation, error: SyncError) -> SyncError {
        warn!(resource = T::RESOURCE, %operation, error = %error, "Operation failed");
        self.notice = Some(ErrorNotice {
            operation,
            message: error.to_string(),
            retryable: error.is_retryable(),
        });
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{BindError, Binding, FieldRule, FieldValue};
    use crate::mock::{MockCollection, RemoteCall};
    use crate::remote::RemoteError;
    use serde::{Deserialize, Serialize};

    crate::record_id!(Shelf);

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Shelf {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<ShelfId>,
        label: String,
        slots: f64,
    }

    impl Record for Shelf {
        type Id = ShelfId;
        const RESOURCE: &'static str = "shelves";

        fn id(&self) -> Option<ShelfId> {
            self.id
        }

        fn bindings() -> &'static [Binding] {
            const BINDINGS: &[Binding] = &[
                Binding::new("label", FieldRule::Text),
                Binding::new("slots", FieldRule::Number),
            ];
            BINDINGS
        }

        fn apply(&mut self, field: &str, value: FieldValue) -> Result<(), BindError> {
            match field {
                "label" => self.label = value.into_text(field)?,
                "slots" => self.slots = value.into_number(field)?,
                _ => return Err(BindError::UnknownField(field.to_string())),
            }
            Ok(())
        }

        fn violations(&self) -> Vec<Violation> {
            let mut found = Vec::new();
            crate::record::require_text(&mut found, "label", &self.label);
            found
        }
    }

    fn shelf(id: u32, label: &str) -> Shelf {
        Shelf {
            id: Some(ShelfId(id)),
            label: label.to_string(),
            slots: 4.0,
        }
    }

    fn rejected() -> RemoteError {
        RemoteError::Rejected {
            status: 500,
            body: "boom".to_string(),
        }
    }

    #[tokio::test]
    async fn load_replaces_instead_of_merging() {
        let mut mock = MockCollection::<Shelf>::new();
        mock.expect_list().return_ok(vec![shelf(1, "A"), shelf(2, "B")]);
        mock.expect_list().return_ok(vec![shelf(3, "C")]);

        let mut sync = Synchronizer::new(mock.collection(), SyncOptions::default());
        sync.load().await.unwrap();
        assert_eq!(sync.mirror().len(), 2);

        sync.load().await.unwrap();
        assert_eq!(sync.mirror(), &[shelf(3, "C")]);
        assert_eq!(sync.generation(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn failed_load_keeps_mirror_and_records_notice() {
        let mut mock = MockCollection::<Shelf>::new();
        mock.expect_list().return_ok(vec![shelf(1, "A")]);
        mock.expect_list()
            .return_err(RemoteError::Transport("connection refused".to_string()));

        let mut sync = Synchronizer::new(mock.collection(), SyncOptions::default());
        sync.load().await.unwrap();
        let err = sync.load().await.unwrap_err();

        assert!(matches!(err, SyncError::Remote(RemoteError::Transport(_))));
        assert_eq!(sync.mirror(), &[shelf(1, "A")]);
        let notice = sync.notice().unwrap();
        assert_eq!(notice.operation, Operation::Load);
        assert!(notice.retryable);
    }

    #[tokio::test]
    async fn create_sends_defaults_and_resets_draft() {
        let mut mock = MockCollection::<Shelf>::new();
        mock.expect_create().return_ok(shelf(9, ""));
        mock.expect_list().return_ok(vec![shelf(9, "")]);

        let mut sync = Synchronizer::new(mock.collection(), SyncOptions::default());
        sync.begin_create();
        let submitted = sync.submit().await.unwrap();

        assert_eq!(submitted, Submitted::Created(shelf(9, "")));
        assert_eq!(mock.calls()[0], RemoteCall::Create(Shelf::default()));
        assert_eq!(sync.draft(), &Draft::New(Shelf::default()));
        assert!(!sync.is_editing());
    }

    #[tokio::test]
    async fn failed_submit_can_be_retried_with_same_payload() {
        let mut mock = MockCollection::<Shelf>::new();
        mock.expect_update(ShelfId(1)).return_err(rejected());
        mock.expect_update(ShelfId(1)).return_ok(None);
        mock.expect_list().return_ok(vec![shelf(1, "Renamed")]);

        let mut sync = Synchronizer::new(mock.collection(), SyncOptions::default());
        sync.begin_edit(shelf(1, "A")).unwrap();
        sync.update_field("label", "Renamed").unwrap();

        assert!(sync.submit().await.is_err());
        assert!(sync.is_editing());
        assert_eq!(sync.draft().record().label, "Renamed");

        sync.submit().await.unwrap();
        let calls = mock.calls();
        assert_eq!(calls[0], calls[1]);
        assert!(sync.notice().is_none());
        mock.verify();
    }

    #[tokio::test]
    async fn strict_mode_refuses_invalid_drafts_without_calling_out() {
        let mock = MockCollection::<Shelf>::new();
        let options = SyncOptions {
            strict: true,
            ..SyncOptions::default()
        };
        let mut sync = Synchronizer::new(mock.collection(), options);

        let err = sync.submit().await.unwrap_err();
        assert!(matches!(err, SyncError::Invalid(ref v) if v[0].field == "label"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_falls_back_to_splice_when_reload_fails() {
        let mut mock = MockCollection::<Shelf>::new();
        mock.expect_list().return_ok(vec![shelf(1, "A"), shelf(2, "B")]);
        mock.expect_delete(ShelfId(1)).return_ok(());
        mock.expect_list().return_err(rejected());

        let mut sync = Synchronizer::new(mock.collection(), SyncOptions::default());
        sync.load().await.unwrap();
        sync.remove(ShelfId(1)).await.unwrap();

        assert_eq!(sync.mirror(), &[shelf(2, "B")]);
    }

    #[tokio::test]
    async fn failed_delete_leaves_mirror() {
        let mut mock = MockCollection::<Shelf>::new();
        mock.expect_list().return_ok(vec![shelf(1, "A")]);
        mock.expect_delete(ShelfId(1)).return_err(rejected());

        let mut sync = Synchronizer::new(mock.collection(), SyncOptions::default());
        sync.load().await.unwrap();
        assert!(sync.remove(ShelfId(1)).await.is_err());
        assert_eq!(sync.mirror(), &[shelf(1, "A")]);
        assert_eq!(sync.notice().unwrap().operation, Operation::Remove);
    }

    #[test]
    fn edit_requires_identity() {
        let mock = MockCollection::<Shelf>::new();
        let mut sync = Synchronizer::new(mock.collection(), SyncOptions::default());
        assert_eq!(
            sync.begin_edit(Shelf::default()),
            Err(SyncError::MissingIdentity)
        );
        assert!(!sync.is_editing());
    }
}
