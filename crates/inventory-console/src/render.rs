//! # List Renderer
//!
//! Plain-text rendering of mirror snapshots. Rows expose two intents, edit and delete,
//! which [`RowIntent::dispatch`] turns into synchronizer calls. Renderers never touch
//! the mirror themselves.

use crate::model::{Category, CategoryId, Product, Warehouse};
use resource_sync::{FieldRule, Record, SyncClient, SyncError, SyncView};
use serde_json::Value;
use std::fmt::{Display, Write};

/// What an operator can do with one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowIntent<T: Record> {
    /// Copy the row into the draft.
    Edit(T),
    Delete(T::Id),
}

impl<T: Record> RowIntent<T> {
    /// Edit intent for the row with identity `id`, if the snapshot has it.
    pub fn edit(view: &SyncView<T>, id: T::Id) -> Option<Self> {
        view.find(id).cloned().map(RowIntent::Edit)
    }

    pub async fn dispatch(self, client: &SyncClient<T>) -> Result<(), SyncError> {
        match self {
            RowIntent::Edit(record) => client.begin_edit(record).await,
            RowIntent::Delete(id) => client.remove(id).await,
        }
    }
}

/// A rendered table with left-aligned, space-padded columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let widths = self.widths();
        writeln!(f, "{}", line(&self.headers, &widths))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", line(&rule, &widths))?;
        if self.rows.is_empty() {
            return writeln!(f, "(sin registros)");
        }
        for row in &self.rows {
            writeln!(f, "{}", line(row, &widths))?;
        }
        Ok(())
    }
}

fn line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell.as_ref(), *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{cell}{}", " ".repeat(fill))
}

/// Numbers as a form would show them; `NaN` and infinities render blank.
pub fn number(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

/// Prices with two decimals and a `$` prefix.
pub fn price(value: f64) -> String {
    if value.is_finite() {
        format!("${value:.2}")
    } else {
        String::new()
    }
}

fn id_cell<I: Display>(id: Option<I>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

pub fn warehouse_table(warehouses: &[Warehouse]) -> Table {
    let mut table = Table::new(&[
        "ID",
        "Nombre",
        "Tipo",
        "Rango de Temperatura",
        "Capacidad",
        "Uso Actual",
    ]);
    for warehouse in warehouses {
        table.push(vec![
            id_cell(warehouse.id),
            warehouse.nombre.clone(),
            warehouse.tipo.clone(),
            warehouse.rango_temperatura.clone(),
            number(warehouse.capacidad),
            number(warehouse.uso_actual),
        ]);
    }
    table
}

pub fn category_table(categories: &[Category]) -> Table {
    let mut table = Table::new(&["ID", "Nombre", "Tipo", "Descripción"]);
    for category in categories {
        table.push(vec![
            id_cell(category.id),
            category.nombre.clone(),
            category.tipo.clone(),
            category.descripcion.clone().unwrap_or_default(),
        ]);
    }
    table
}

/// Name of the category `id` refers to; blank when unset or not in `categories`.
pub fn category_name(categories: &[Category], id: Option<CategoryId>) -> String {
    id.and_then(|id| categories.iter().find(|c| c.id == Some(id)))
        .map(|c| c.nombre.clone())
        .unwrap_or_default()
}

pub fn product_table(products: &[Product], categories: &[Category]) -> Table {
    let mut table = Table::new(&[
        "ID",
        "Nombre",
        "Categoría",
        "Tipo Perecible",
        "Stock Mínimo",
        "Unidad",
        "Precio",
    ]);
    for product in products {
        table.push(vec![
            id_cell(product.id),
            product.nombre.clone(),
            category_name(categories, product.categoria_id),
            product.tipo_perecible.to_string(),
            number(product.stock_minimo),
            product.unidad.clone(),
            price(product.precio),
        ]);
    }
    table
}

/// The draft as a form: one line per bound field, then violations and the last error.
pub fn draft_form<T: Record>(view: &SyncView<T>) -> String {
    let mut out = String::new();
    let heading = match view.draft.id() {
        Some(id) if view.editing => format!("Editando {} #{id}", T::RESOURCE),
        _ => format!("Nuevo registro en {}", T::RESOURCE),
    };
    let _ = writeln!(out, "{heading}");

    let values = serde_json::to_value(&view.draft).unwrap_or(Value::Null);
    for binding in T::bindings() {
        let value = field_text(values.get(binding.field));
        match binding.rule {
            FieldRule::Choice(options) => {
                let _ = writeln!(out, "  {} = {value}  [{}]", binding.field, options.join("|"));
            }
            _ => {
                let _ = writeln!(out, "  {} = {value}", binding.field);
            }
        }
    }

    for violation in &view.violations {
        let _ = writeln!(out, "  * {violation}");
    }
    if let Some(banner) = notice_banner(view) {
        let _ = writeln!(out, "{banner}");
    }
    out
}

/// One-line description of the last failed operation, if any.
pub fn notice_banner<T: Record>(view: &SyncView<T>) -> Option<String> {
    view.notice.as_ref().map(|notice| {
        let hint = if notice.retryable {
            " (puede reintentarse)"
        } else {
            ""
        };
        format!("! {} falló: {}{hint}", notice.operation, notice.message)
    })
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(n)) => n.as_f64().map(number).unwrap_or_else(|| n.to_string()),
        Some(other) => other.to_string(),
    }
}
