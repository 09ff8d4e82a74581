use inventory_console::config::ConsoleConfig;
use inventory_console::error::ConsoleError;
use inventory_console::lifecycle::{setup_tracing, ConsoleSystem};
use inventory_console::shell::{self, Command, Reply, HELP};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = ConsoleConfig::from_env()?;
    info!(?config, "Starting inventory console");

    let system = ConsoleSystem::new(&config)?;
    system.load_all().await;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    stdout.write_all(format!("{HELP}\n").as_bytes()).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                stdout.write_all(format!("{e}\n").as_bytes()).await?;
                continue;
            }
        };

        match shell::execute(&system, command).await {
            Ok(Reply::Print(text)) => stdout.write_all(text.as_bytes()).await?,
            Ok(Reply::Quit) => break,
            Err(e) => {
                // Already logged by the synchronizer when it came from one.
                warn!(error = %e, "Command failed");
                stdout.write_all(format!("Error: {e}\n").as_bytes()).await?;
            }
        }
    }

    system.shutdown().await?;
    info!("Console closed");
    Ok(())
}
