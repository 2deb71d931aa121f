mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use orgbot::app::AgentKind;
use orgbot::config::OrgbotConfig;

#[derive(Parser)]
#[command(name = "orgbot", version, about = "Virtual Org chatbot for company and general questions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session (default)
    Chat {
        /// Conversation thread to continue
        #[arg(long)]
        thread: Option<String>,
        /// Responder to use
        #[arg(long, value_enum, default_value_t = Mode::Org)]
        mode: Mode,
    },
    /// Answer one question and exit
    Ask {
        query: String,
        /// Responder to use
        #[arg(long, value_enum, default_value_t = Mode::Org)]
        mode: Mode,
    },
    /// Ask the department navigator where something is
    Locate {
        query: String,
        /// Number of location facts to retrieve
        #[arg(short, long)]
        k: Option<usize>,
        /// Print the retrieved facts without calling a model
        #[arg(long)]
        retrieve_only: bool,
    },
    /// Create the employee store and insert the seed rows
    Seed,
    /// Print the employee directory
    Directory {
        /// Emit the JSON the get_employees tool returns
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// No tools, no routing
    Plain,
    /// With the employee directory tool
    Directory,
    /// Org chatbot with routing to the department navigator
    Org,
}

impl From<Mode> for AgentKind {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Plain => AgentKind::Plain,
            Mode::Directory => AgentKind::Directory,
            Mode::Org => AgentKind::Org,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = OrgbotConfig::load()?;

    // Logs go to stderr so answers on stdout stay clean.
    let filter = EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Command::Chat {
        thread: None,
        mode: Mode::Org,
    });
    match command {
        Command::Chat { thread, mode } => cli::chat::chat(&config, mode.into(), thread).await?,
        Command::Ask { query, mode } => cli::ask::ask(&config, mode.into(), &query).await?,
        Command::Locate {
            query,
            k,
            retrieve_only,
        } => cli::locate::locate(&config, &query, k, retrieve_only).await?,
        Command::Seed => cli::seed::seed(&config)?,
        Command::Directory { json } => cli::directory::directory(&config, json)?,
    }

    Ok(())
}
