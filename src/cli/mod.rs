pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "planner-api")]
#[command(about = "Planner API - REST gateway over the Planner MySQL schema")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Bind host (overrides API_HOST)")]
    pub host: Option<String>,

    #[arg(long, global = true, help = "Bind port (overrides API_PORT)")]
    pub port: Option<u16>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Print an Argon2 hash for AUTH_PASSWORD_HASH or AUTH_USERS")]
    HashPassword {
        #[arg(help = "Password to hash")]
        password: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle(cli.host, cli.port).await,
        Commands::HashPassword { password } => commands::hash_password::handle(&password, output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["planner-api", "--port", "8080"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn parses_hash_password() {
        let cli = Cli::try_parse_from(["planner-api", "hash-password", "s3cret", "--json"]).unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        match cli.command {
            Some(Commands::HashPassword { password }) => assert_eq!(password, "s3cret"),
            _ => panic!("expected hash-password"),
        }
    }
}
