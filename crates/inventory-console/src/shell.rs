//! # Command Shell
//!
//! Line-oriented commands for driving the pages from a terminal. Parsing is pure
//! ([`Command::from_str`]); [`execute`] runs a command against a [`ConsoleSystem`]
//! and returns the text to print.

use crate::clients::PageClient;
use crate::error::ConsoleError;
use crate::lifecycle::ConsoleSystem;
use crate::model::{Category, Product, Warehouse};
use crate::pages::Page;
use crate::render::{self, RowIntent, Table};
use resource_sync::{Record, Submitted, SyncView};
use std::str::FromStr;

pub const HELP: &str = "\
Comandos:
  list <página>                   muestra la lista
  reload <página>                 vuelve a cargar desde el servidor
  new <página>                    formulario en blanco
  edit <página> <id>              copia la fila al formulario
  set <página> <campo> <valor>    cambia un campo del formulario
  show <página>                   muestra el formulario
  submit <página>                 crea o actualiza
  delete <página> <id>            elimina la fila
  help | quit
Páginas: almacenes, categorias, productos";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Page(Page, PageCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageCommand {
    List,
    Reload,
    New,
    Show,
    Submit,
    Edit(String),
    Delete(String),
    Set { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Unknown page: {0}")]
    UnknownPage(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Not a valid identity: {0}")]
    InvalidId(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        match verb.as_str() {
            "help" | "?" => return Ok(Command::Help),
            "quit" | "exit" => return Ok(Command::Quit),
            _ => {}
        }

        let usage = usage(&verb).ok_or_else(|| CommandError::UnknownCommand(verb.clone()))?;
        let page: Page = words
            .next()
            .ok_or(CommandError::Usage(usage))?
            .parse()
            .map_err(CommandError::UnknownPage)?;

        let command = match verb.as_str() {
            "list" | "ls" => PageCommand::List,
            "reload" => PageCommand::Reload,
            "new" => PageCommand::New,
            "show" => PageCommand::Show,
            "submit" | "save" => PageCommand::Submit,
            "edit" => {
                let id = words.next().ok_or(CommandError::Usage(usage))?;
                PageCommand::Edit(id.to_string())
            }
            "delete" | "rm" => {
                let id = words.next().ok_or(CommandError::Usage(usage))?;
                PageCommand::Delete(id.to_string())
            }
            _ => {
                let field = words.next().ok_or(CommandError::Usage(usage))?.to_string();
                // The value is the rest of the line, inner spacing preserved.
                let value = rest_after(line, 3);
                PageCommand::Set { field, value }
            }
        };
        Ok(Command::Page(page, command))
    }
}

fn usage(verb: &str) -> Option<&'static str> {
    let usage = match verb {
        "list" | "ls" => "list <página>",
        "reload" => "reload <página>",
        "new" => "new <página>",
        "show" => "show <página>",
        "submit" | "save" => "submit <página>",
        "edit" => "edit <página> <id>",
        "delete" | "rm" => "delete <página> <id>",
        "set" => "set <página> <campo> <valor>",
        _ => return None,
    };
    Some(usage)
}

/// The text after the first `words` whitespace-separated words, trimmed.
fn rest_after(line: &str, words: usize) -> String {
    let mut rest = line.trim_start();
    for _ in 0..words {
        rest = rest
            .find(char::is_whitespace)
            .map(|end| rest[end..].trim_start())
            .unwrap_or("");
    }
    rest.trim_end().to_string()
}

/// What the terminal should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// Runs one command.
///
/// Synchronizer failures are returned as errors; the failure is also kept in the
/// page's snapshot, so a later `show` still displays it.
pub async fn execute(system: &ConsoleSystem, command: Command) -> Result<Reply, ConsoleError> {
    let text = match command {
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Reply::Quit),
        Command::Page(Page::Warehouses, command) => {
            let shown = run::<Warehouse, _>(&system.warehouses, command).await?;
            shown.render(|view| render::warehouse_table(&view.mirror))
        }
        Command::Page(Page::Categories, command) => {
            let shown = run::<Category, _>(&system.categories, command).await?;
            shown.render(|view| render::category_table(&view.mirror))
        }
        Command::Page(Page::Products, command) => {
            let shown = run::<Product, _>(&system.products, command).await?;
            // Read after the command: a reload also refreshes the category mirror.
            let categories = system.products.categories().await?;
            shown.render(|view| render::product_table(&view.mirror, &categories))
        }
    };
    Ok(Reply::Print(text))
}

/// What a page command leaves on screen.
enum Shown<T: Record> {
    Form(String),
    List { status: String, view: SyncView<T> },
}

impl<T: Record> Shown<T> {
    fn render(self, table: impl FnOnce(&SyncView<T>) -> Table) -> String {
        match self {
            Shown::Form(form) => form,
            Shown::List { mut status, view } => {
                status.push_str(&table(&view).to_string());
                if let Some(banner) = render::notice_banner(&view) {
                    status.push_str(&banner);
                    status.push('\n');
                }
                status
            }
        }
    }
}

async fn run<T, C>(client: &C, command: PageCommand) -> Result<Shown<T>, ConsoleError>
where
    T: Record,
    C: PageClient<T>,
{
    let status = match command {
        PageCommand::List => String::new(),
        PageCommand::Reload => {
            let size = client.load().await?;
            format!("{size} registros\n")
        }
        PageCommand::New => {
            client.begin_create().await?;
            return form(client).await;
        }
        PageCommand::Show => return form(client).await,
        PageCommand::Edit(raw) => {
            let id = parse_id::<T>(&raw)?;
            client.begin_edit_id(id).await?;
            return form(client).await;
        }
        PageCommand::Set { field, value } => {
            client.set_field(field, value).await?;
            return form(client).await;
        }
        PageCommand::Submit => match client.submit().await? {
            Submitted::Created(record) => match record.id() {
                Some(id) => format!("Creado #{id}\n"),
                None => "Creado\n".to_string(),
            },
            Submitted::Updated { id, .. } => format!("Actualizado #{id}\n"),
        },
        PageCommand::Delete(raw) => {
            let id = parse_id::<T>(&raw)?;
            RowIntent::<T>::Delete(id).dispatch(client.inner()).await?;
            format!("Eliminado #{id}\n")
        }
    };

    let view = client.snapshot().await?;
    Ok(Shown::List { status, view })
}

async fn form<T: Record, C: PageClient<T>>(client: &C) -> Result<Shown<T>, ConsoleError> {
    Ok(Shown::Form(render::draft_form(&client.snapshot().await?)))
}

fn parse_id<T: Record>(raw: &str) -> Result<T::Id, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidId(raw.to_string()))
}
