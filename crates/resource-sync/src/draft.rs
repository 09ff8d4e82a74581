//! # Draft
//!
//! The single record currently being authored or edited. The variant decides what the
//! next submit does: `New` creates, `Editing` updates the record it was loaded from.

use crate::record::Record;

#[derive(Debug, Clone, PartialEq)]
pub enum Draft<T: Record> {
    /// A record that does not exist on the server yet.
    New(T),
    /// A copy of an existing record; submits are addressed at `id`.
    Editing { id: T::Id, record: T },
}

impl<T: Record> Default for Draft<T> {
    fn default() -> Self {
        Draft::New(T::default())
    }
}

impl<T: Record> Draft<T> {
    /// Loads a copy of an existing record. Returns `None` when the record has no identity.
    pub fn editing(record: T) -> Option<Self> {
        let id = record.id()?;
        Some(Draft::Editing { id, record })
    }

    pub fn record(&self) -> &T {
        match self {
            Draft::New(record) | Draft::Editing { record, .. } => record,
        }
    }

    pub fn record_mut(&mut self) -> &mut T {
        match self {
            Draft::New(record) | Draft::Editing { record, .. } => record,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Draft::Editing { .. })
    }

    /// The identity an update would be addressed at.
    pub fn target(&self) -> Option<T::Id> {
        match self {
            Draft::New(_) => None,
            Draft::Editing { id, .. } => Some(*id),
        }
    }
}
