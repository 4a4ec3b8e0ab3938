use clap::Parser;
use formcraft::cli::{Cli, Command};
use formcraft::commands;
use formcraft::config::Settings;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command() {
        Command::Serve => serve(&cli).await,
        Command::Validate { file } => {
            println!("{}", commands::validate_file(&file)?);
            Ok(())
        }
        Command::Format { file, write } => {
            let formatted = commands::format_file(&file, write)?;
            if !write {
                println!("{}", formatted);
            }
            Ok(())
        }
        Command::Sample => {
            println!("{}", commands::sample());
            Ok(())
        }
    }
}

async fn serve(cli: &Cli) -> anyhow::Result<()> {
    let settings = Settings::new_with_cli(cli)?;
    let addr = settings.address();

    info!("Starting Formcraft on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, formcraft::create_app()).await?;

    Ok(())
}
