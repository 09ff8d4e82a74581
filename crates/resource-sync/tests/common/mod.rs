#![allow(dead_code)]

use resource_sync::{BindError, Binding, FieldRule, FieldValue, Record, Violation};
use serde::{Deserialize, Serialize};

resource_sync::record_id!(Shelf);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ShelfId>,
    pub label: String,
    #[serde(default, deserialize_with = "resource_sync::record::lenient_number")]
    pub slots: f64,
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
        resource_sync::record::require_text(&mut found, "label", &self.label);
        resource_sync::record::require_non_negative(&mut found, "slots", self.slots);
        found
    }
}

pub fn shelf(id: u32, label: &str, slots: f64) -> Shelf {
    Shelf {
        id: Some(ShelfId(id)),
        label: label.to_string(),
        slots,
    }
}
