//! # Record Trait
//!
//! The `Record` trait is the contract every synchronized resource (warehouse, category,
//! product, ...) implements. It names the collection path segment, exposes the
//! server-assigned identity, and declares the form bindings used by the
//! [`binder`](crate::binder).
//!
//! # Identity
//! A record's identity is `Option<Self::Id>`. A record that has never been created on
//! the server has no identity at all; there is no sentinel value. Whether a draft is
//! new or an edit of an existing record is tracked by [`Draft`](crate::Draft), not
//! by inspecting the identity.

use crate::binder::{BindError, Binding, FieldValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// Trait that any resource type must implement to be mirrored by a
/// [`Synchronizer`](crate::Synchronizer).
///
/// `Default` is the blank form: the value a draft is reset to by `begin_create` and
/// after every successful submit.
pub trait Record:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Server-assigned identifier, used to address updates and deletes.
    type Id: Copy + Eq + Hash + Display + Debug + FromStr + Send + Sync + 'static;

    /// Path segment of the remote collection (e.g. `almacenes`).
    const RESOURCE: &'static str;

    /// The server-assigned identity, `None` for a record that was never persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Field name to coercion rule table for the form binder.
    fn bindings() -> &'static [Binding];

    /// Write an already-coerced value into the named field.
    fn apply(&mut self, field: &str, value: FieldValue) -> Result<(), BindError>;

    /// Advisory consistency checks. Reported in snapshots, and enforced on submit
    /// only when strict validation is enabled.
    fn violations(&self) -> Vec<Violation> {
        Vec::new()
    }
}

/// A single failed consistency check on a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Pushes a violation when `value` is blank.
pub fn require_text(violations: &mut Vec<Violation>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        violations.push(Violation::new(field, "must not be empty"));
    }
}

/// Pushes a violation when `value` is not a finite number `>= 0`.
pub fn require_non_negative(violations: &mut Vec<Violation>, field: &'static str, value: f64) {
    if !value.is_finite() {
        violations.push(Violation::new(field, "is not a number"));
    } else if value < 0.0 {
        violations.push(Violation::new(field, format!("must be >= 0, got {value}")));
    }
}

/// Deserializes a number field that the server may hand back as `null`.
///
/// Unparseable form input is sent as `NaN`, which JSON carries as `null`; reading it
/// back yields `NaN` again instead of failing the whole list.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<f64> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or(f64::NAN))
}

/// Declares a `u32` identity newtype for a record, named `<Entity>Id`.
///
/// The generated type is `Copy`, serializes as a bare integer, displays as the bare
/// integer (it is used verbatim in resource paths) and parses from text.
///
/// ```rust,ignore
/// resource_sync::record_id!(Warehouse);
/// let id = WarehouseId(7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[macro_export]
macro_rules! record_id {
    ($(#[$meta:meta])* $entity:ident) => {
        $crate::__paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
            #[serde(transparent)]
            pub struct [<$entity Id>](pub u32);

            impl From<u32> for [<$entity Id>] {
                fn from(id: u32) -> Self {
                    Self(id)
                }
            }

            impl ::std::fmt::Display for [<$entity Id>] {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl ::std::str::FromStr for [<$entity Id>] {
                type Err = ::std::num::ParseIntError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    s.trim().parse().map(Self)
                }
            }
        }
    };
}
