//! Products (`/items`) and their perishability.
//!
//! A product points at its category by identity. The reference is not checked here;
//! a dangling one simply renders blank in the product list.

use resource_sync::record::{lenient_number, require_non_negative, require_text};
use resource_sync::{BindError, Binding, FieldRule, FieldValue, Record, Violation};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::CategoryId;

resource_sync::record_id!(
    /// Server-assigned identifier for products.
    Product
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Perishability {
    Perecedero,
    #[default]
    NoPerecedero,
}

impl Perishability {
    pub const OPTIONS: &'static [&'static str] = &["PERECEDERO", "NO_PERECEDERO"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Perishability::Perecedero => "PERECEDERO",
            Perishability::NoPerecedero => "NO_PERECEDERO",
        }
    }
}

impl Display for Perishability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Perishability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PERECEDERO" => Ok(Perishability::Perecedero),
            "NO_PERECEDERO" => Ok(Perishability::NoPerecedero),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub categoria_id: Option<CategoryId>,
    #[serde(default, deserialize_with = "lenient_perishability")]
    pub tipo_perecible: Perishability,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stock_minimo: f64,
    #[serde(default)]
    pub unidad: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub precio: f64,
    #[serde(default = "active")]
    pub activo: bool,
}

fn active() -> bool {
    true
}

/// Reads `tipo_perecible` from a server row. A `null` or unknown variant falls back to
/// the default so one odd row does not fail the whole list.
fn lenient_perishability<'de, D>(deserializer: D) -> Result<Perishability, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Deserialize::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(Perishability::default());
    };
    Ok(raw.parse().unwrap_or_else(|()| {
        tracing::warn!(value = %raw, "Unknown tipo_perecible, using default");
        Perishability::default()
    }))
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            nombre: String::new(),
            descripcion: String::new(),
            categoria_id: None,
            tipo_perecible: Perishability::default(),
            stock_minimo: 0.0,
            unidad: String::new(),
            precio: 0.0,
            activo: true,
        }
    }
}

impl Product {
    pub fn new(id: u32, nombre: impl Into<String>, categoria_id: Option<u32>, precio: f64) -> Self {
        Self {
            id: Some(ProductId(id)),
            nombre: nombre.into(),
            categoria_id: categoria_id.map(CategoryId),
            precio,
            ..Self::default()
        }
    }
}

impl Record for Product {
    type Id = ProductId;
    const RESOURCE: &'static str = "items";

    fn id(&self) -> Option<ProductId> {
        self.id
    }

    fn bindings() -> &'static [Binding] {
        const BINDINGS: &[Binding] = &[
            Binding::new("nombre", FieldRule::Text),
            Binding::new("descripcion", FieldRule::Text),
            Binding::new("categoria_id", FieldRule::Reference),
            Binding::new("tipo_perecible", FieldRule::Choice(Perishability::OPTIONS)),
            Binding::new("stock_minimo", FieldRule::Number),
            Binding::new("unidad", FieldRule::Text),
            Binding::new("precio", FieldRule::Number),
            Binding::new("activo", FieldRule::Flag),
        ];
        BINDINGS
    }

    fn apply(&mut self, field: &str, value: FieldValue) -> Result<(), BindError> {
        match field {
            "nombre" => self.nombre = value.into_text(field)?,
            "descripcion" => self.descripcion = value.into_text(field)?,
            "categoria_id" => self.categoria_id = value.into_reference(field)?.map(CategoryId),
            "tipo_perecible" => {
                let text = value.into_text(field)?;
                // The typed field cannot hold an unlisted value, unlike plain choices.
                self.tipo_perecible =
                    text.parse().map_err(|()| BindError::UnknownVariant {
                        field: field.to_string(),
                        value: text,
                    })?;
            }
            "stock_minimo" => self.stock_minimo = value.into_number(field)?,
            "unidad" => self.unidad = value.into_text(field)?,
            "precio" => self.precio = value.into_number(field)?,
            "activo" => self.activo = value.into_flag(field)?,
            _ => return Err(BindError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn violations(&self) -> Vec<Violation> {
        let mut found = Vec::new();
        require_text(&mut found, "nombre", &self.nombre);
        require_non_negative(&mut found, "stock_minimo", self.stock_minimo);
        require_non_negative(&mut found, "precio", self.precio);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_sync::binder::bind;

    #[test]
    fn defaults_match_blank_form() {
        let product = Product::default();
        assert_eq!(product.tipo_perecible, Perishability::NoPerecedero);
        assert!(product.activo);
        assert_eq!(product.categoria_id, None);

        let body = serde_json::to_value(&product).unwrap();
        assert_eq!(body["tipo_perecible"], "NO_PERECEDERO");
        assert_eq!(body["activo"], true);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn perishability_rejects_unknown_values() {
        let mut product = Product::default();
        bind(&mut product, "tipo_perecible", "PERECEDERO").unwrap();
        assert_eq!(product.tipo_perecible, Perishability::Perecedero);

        let err = bind(&mut product, "tipo_perecible", "CONGELADO").unwrap_err();
        assert!(matches!(err, BindError::UnknownVariant { .. }));
        assert_eq!(product.tipo_perecible, Perishability::Perecedero);
    }

    #[test]
    fn category_reference_and_flag() {
        let mut product = Product::default();
        bind(&mut product, "categoria_id", "4").unwrap();
        bind(&mut product, "activo", "no").unwrap();
        assert_eq!(product.categoria_id, Some(CategoryId(4)));
        assert!(!product.activo);

        bind(&mut product, "categoria_id", "").unwrap();
        assert_eq!(product.categoria_id, None);
    }

    #[test]
    fn missing_activo_defaults_to_true() {
        let product: Product =
            serde_json::from_str(r#"{"id":3,"nombre":"Leche","precio":1.5}"#).unwrap();
        assert!(product.activo);
        assert_eq!(product.id, Some(ProductId(3)));
    }

    #[test]
    fn odd_perishability_in_a_row_reads_as_default() {
        let rows: Vec<Product> = serde_json::from_str(
            r#"[
                {"id":1,"nombre":"Helado","tipo_perecible":"CONGELADO"},
                {"id":2,"nombre":"Arroz","tipo_perecible":null},
                {"id":3,"nombre":"Leche","tipo_perecible":"PERECEDERO"}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].tipo_perecible, Perishability::NoPerecedero);
        assert_eq!(rows[1].tipo_perecible, Perishability::NoPerecedero);
        assert_eq!(rows[2].tipo_perecible, Perishability::Perecedero);
    }
}
