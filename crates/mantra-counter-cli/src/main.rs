use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mantra_counter::store::{MemoryStorage, SqliteStorage, Storage};
use mantra_counter::{Counter, CounterConfig};
use tracing_subscriber::EnvFilter;

mod interactive;
mod terminal;

use terminal::{render, TerminalNotifier, View};

#[derive(Parser, Debug)]
#[command(name = "mantra", version, about = "Count mantras toward a target")]
struct Cli {
    /// SQLite database holding the count and target.
    #[arg(long, env = "MANTRA_DB", default_value = "mantra.db")]
    db: PathBuf,
    /// Keep state in memory only.
    #[arg(long)]
    memory: bool,
    /// TOML file with counter settings.
    #[arg(long, env = "MANTRA_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current count and target.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Increment the count.
    Count {
        #[arg(long, default_value_t = 1)]
        times: u64,
    },
    /// Set the count back to zero.
    Reset,
    /// Set a new target.
    Target { value: String },
    /// Read actions from stdin, one per line.
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let command = cli.command.unwrap_or(Command::Show { json: false });

    if cli.memory {
        run(MemoryStorage::new(), config, command).await
    } else {
        let storage = SqliteStorage::open(&cli.db)
            .with_context(|| format!("failed to open database {}", cli.db.display()))?;
        run(storage, config, command).await
    }
}

fn load_config(path: Option<&Path>) -> Result<CounterConfig> {
    let Some(path) = path else {
        return Ok(CounterConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

async fn run<S: Storage + 'static>(
    storage: S,
    config: CounterConfig,
    command: Command,
) -> Result<()> {
    let mut counter = Counter::initialize(storage, TerminalNotifier, config).await;

    let outcome = match command {
        Command::Show { json } => {
            if json {
                println!("{}", serde_json::to_string(&View::from(counter.state()))?);
            } else {
                println!("{}", render(&counter.state()));
            }
            Ok(())
        }
        Command::Count { times } => {
            for _ in 0..times {
                counter.increment();
            }
            println!("{}", render(&counter.state()));
            Ok(())
        }
        Command::Reset => {
            counter.reset();
            println!("{}", render(&counter.state()));
            Ok(())
        }
        Command::Target { value } => match counter.set_target(&value) {
            Ok(state) => {
                println!("{}", render(&state));
                Ok(())
            }
            Err(e) => Err(anyhow::Error::new(e)),
        },
        Command::Interactive => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            interactive::run(&mut counter, stdin, &mut stdout).await
        }
    };

    counter.shutdown().await?;
    outcome
}
