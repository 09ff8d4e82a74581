//! A storage location in the restaurant (cold room, dry pantry, ...).
//!
//! # Resource
//! Mirrored from `/almacenes`. Capacity and current usage are free numbers; the server
//! decides what is acceptable. With strict validation on, the console additionally
//! refuses negative values and usage above capacity.

use resource_sync::record::{lenient_number, require_non_negative, require_text};
use resource_sync::{BindError, Binding, FieldRule, FieldValue, Record, Violation};
use serde::{Deserialize, Serialize};

resource_sync::record_id!(
    /// Server-assigned identifier for warehouses.
    Warehouse
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WarehouseId>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub rango_temperatura: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub capacidad: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub uso_actual: f64,
}

impl Warehouse {
    pub fn new(
        id: u32,
        nombre: impl Into<String>,
        tipo: impl Into<String>,
        rango_temperatura: impl Into<String>,
        capacidad: f64,
        uso_actual: f64,
    ) -> Self {
        Self {
            id: Some(WarehouseId(id)),
            nombre: nombre.into(),
            tipo: tipo.into(),
            rango_temperatura: rango_temperatura.into(),
            capacidad,
            uso_actual,
        }
    }
}

impl Record for Warehouse {
    type Id = WarehouseId;
    const RESOURCE: &'static str = "almacenes";

    fn id(&self) -> Option<WarehouseId> {
        self.id
    }

    fn bindings() -> &'static [Binding] {
        const BINDINGS: &[Binding] = &[
            Binding::new("nombre", FieldRule::Text),
            Binding::new("tipo", FieldRule::Text),
            Binding::new("rango_temperatura", FieldRule::Text),
            Binding::new("capacidad", FieldRule::Number),
            Binding::new("uso_actual", FieldRule::Number),
        ];
        BINDINGS
    }

    fn apply(&mut self, field: &str, value: FieldValue) -> Result<(), BindError> {
        match field {
            "nombre" => self.nombre = value.into_text(field)?,
            "tipo" => self.tipo = value.into_text(field)?,
            "rango_temperatura" => self.rango_temperatura = value.into_text(field)?,
            "capacidad" => self.capacidad = value.into_number(field)?,
            "uso_actual" => self.uso_actual = value.into_number(field)?,
            _ => return Err(BindError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn violations(&self) -> Vec<Violation> {
        let mut found = Vec::new();
        require_text(&mut found, "nombre", &self.nombre);
        require_non_negative(&mut found, "capacidad", self.capacidad);
        require_non_negative(&mut found, "uso_actual", self.uso_actual);
        if self.uso_actual > self.capacidad {
            found.push(Violation::new(
                "uso_actual",
                format!("exceeds capacidad ({} > {})", self.uso_actual, self.capacidad),
            ));
        }
        found
    }
}
