//! Product categories (`/categorias`).

use resource_sync::record::require_text;
use resource_sync::{BindError, Binding, FieldRule, FieldValue, Record, Violation};
use serde::{Deserialize, Serialize};

resource_sync::record_id!(
    /// Server-assigned identifier for categories.
    Category
);

/// Options offered for [`Category::tipo`]. An empty `tipo` means "not selected".
pub const CATEGORY_KINDS: &[&str] = &["BEBIDA", "COMIDA", "UTENSILIO", "OTRO"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

impl Category {
    pub fn new(id: u32, nombre: impl Into<String>, tipo: impl Into<String>) -> Self {
        Self {
            id: Some(CategoryId(id)),
            nombre: nombre.into(),
            tipo: tipo.into(),
            descripcion: None,
        }
    }
}

impl Record for Category {
    type Id = CategoryId;
    const RESOURCE: &'static str = "categorias";

    fn id(&self) -> Option<CategoryId> {
        self.id
    }

    fn bindings() -> &'static [Binding] {
        const BINDINGS: &[Binding] = &[
            Binding::new("nombre", FieldRule::Text),
            Binding::new("tipo", FieldRule::Choice(CATEGORY_KINDS)),
            Binding::new("descripcion", FieldRule::Text),
        ];
        BINDINGS
    }

    fn apply(&mut self, field: &str, value: FieldValue) -> Result<(), BindError> {
        match field {
            "nombre" => self.nombre = value.into_text(field)?,
            "tipo" => self.tipo = value.into_text(field)?,
            "descripcion" => {
                let text = value.into_text(field)?;
                self.descripcion = (!text.is_empty()).then_some(text);
            }
            _ => return Err(BindError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn violations(&self) -> Vec<Violation> {
        let mut found = Vec::new();
        require_text(&mut found, "nombre", &self.nombre);
        found
    }
}
