use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Formcraft - author JSON form definitions with a live preview
#[derive(Parser, Debug, Clone)]
#[command(name = "formcraft", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FORMCRAFT_CONFIG", default_value = "formcraft.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "FORMCRAFT_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "FORMCRAFT_PORT")]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the authoring UI (default)
    Serve,
    /// Validate a form definition file
    Validate {
        /// JSON document to check
        file: PathBuf,
    },
    /// Pretty-print a form definition file with 2-space indentation
    Format {
        file: PathBuf,
        /// Rewrite the file instead of printing the result
        #[arg(short, long)]
        write: bool,
    },
    /// Print the sample form definition
    Sample,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["formcraft"]);
        assert_eq!(cli.config, PathBuf::from("formcraft.toml"));
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "formcraft",
            "--config",
            "custom.toml",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "serve",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.host, Some("0.0.0.0".to_string()));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn test_file_commands() {
        let cli = Cli::parse_from(["formcraft", "validate", "form.json"]);
        assert_eq!(cli.command(), Command::Validate { file: PathBuf::from("form.json") });

        let cli = Cli::parse_from(["formcraft", "format", "--write", "form.json"]);
        assert_eq!(
            cli.command(),
            Command::Format { file: PathBuf::from("form.json"), write: true }
        );
    }
}
