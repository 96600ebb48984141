mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aiven-provider")]
#[command(about = "Tooling for the Aiven infrastructure provider", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode or decode composite resource identifiers
    #[command(subcommand)]
    Id(IdCommands),
    /// List the resource types the provider registers
    Catalog {
        /// List data sources instead of resources
        #[arg(long)]
        data_sources: bool,
    },
    /// Render markdown reference docs from a provider schema dump
    Docs {
        /// Output of `terraform providers schema -json` for this provider
        #[arg(long)]
        schema: PathBuf,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a client timeout value and print its canonical form
    Duration {
        /// Duration literal, e.g. 10m or 1h30m
        value: String,
    },
    /// Check whether a project or service exists
    Exists {
        /// Project name
        project: String,
        /// Service name (checks the project when omitted)
        service: Option<String>,
        /// API base URL
        #[arg(long, env = "AIVEN_API_URL")]
        api_url: Option<String>,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum IdCommands {
    /// Join parts into an identifier
    Encode {
        /// Identifier parts, in order
        #[arg(required = true)]
        parts: Vec<String>,
    },
    /// Split an identifier into its parts, one per line
    Decode {
        id: String,
        /// Number of parts the identifier holds
        #[arg(short, long, default_value = "2")]
        arity: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays scriptable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match cli.command {
        Commands::Id(IdCommands::Encode { parts }) => commands::id::encode(&parts),
        Commands::Id(IdCommands::Decode { id, arity }) => commands::id::decode(&id, arity)?,
        Commands::Catalog { data_sources } => commands::catalog::handle(data_sources),
        Commands::Docs { schema, output } => commands::docs::handle(&schema, output.as_deref())?,
        Commands::Duration { value } => commands::duration::handle(&value)?,
        Commands::Exists {
            project,
            service,
            api_url,
        } => {
            commands::exists::handle(&project, service.as_deref(), api_url).await?;
        }
        Commands::Version => {
            println!("aiven-provider {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
