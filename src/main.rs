mod commands;
mod render;

use std::path::PathBuf;

use agenda_core::config::{AgendaConfig, Variant};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Manage agenda events stored in a local slot")]
struct Cli {
    /// Use this config file instead of ~/.config/agenda/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Slot layout to operate on. Overrides the configured variant and its
    /// storage_key; [fields] renames still apply
    #[arg(long, global = true, value_enum)]
    variant: Option<VariantArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Enhanced,
    Legacy,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Enhanced => Variant::Enhanced,
            VariantArg::Legacy => Variant::Legacy,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List all agendas, newest event date first
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single agenda
    Show { id: String },
    /// Add a new agenda (prompts for missing fields)
    New {
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Path to an image file (max 5MB)
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Edit an existing agenda (prompts when no fields are given)
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Replace the image (keeps the current one if omitted)
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete an agenda
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search title, description and category
    Search { query: String },
    /// List agendas within a date range
    Range {
        /// Start date (YYYY-MM-DD, or "start" for no lower bound)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show the next agendas from today on
    Upcoming {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show agenda counts
    Stats,
    /// Write a JSON backup of all agendas
    Export {
        /// Directory to write the backup into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Merge agendas from a JSON backup
    Import { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.variant)?;
    let store = config.open_store();
    tracing::debug!(key = store.key(), data_dir = %config.data_path().display(), "store opened");

    match cli.command {
        Commands::List { json } => commands::list::run(&store, json),
        Commands::Show { id } => commands::show::run(&store, &id),
        Commands::New {
            title,
            category,
            date,
            description,
            image,
        } => {
            let fields = commands::FormFields {
                title,
                category,
                date,
                description,
                image,
            };
            commands::new::run(&store, fields).await
        }
        Commands::Edit {
            id,
            title,
            category,
            date,
            description,
            image,
        } => {
            let fields = commands::FormFields {
                title,
                category,
                date,
                description,
                image,
            };
            commands::edit::run(&store, &id, fields).await
        }
        Commands::Delete { id, yes } => commands::delete::run(&store, &id, yes),
        Commands::Search { query } => commands::search::run(&store, &query),
        Commands::Range { from, to } => commands::range::run(&store, from.as_deref(), to.as_deref()),
        Commands::Upcoming { limit } => {
            commands::upcoming::run(&store, limit.unwrap_or(config.upcoming_limit))
        }
        Commands::Stats => commands::stats::run(&store),
        Commands::Export { dir } => commands::export::run(&store, &dir).await,
        Commands::Import { file } => commands::import::run(&store, &file).await,
    }
}

fn load_config(path: Option<&std::path::Path>, variant: Option<VariantArg>) -> Result<AgendaConfig> {
    let config = match path {
        Some(p) => AgendaConfig::load_from(p)?,
        None => AgendaConfig::load()?,
    };

    Ok(match variant {
        Some(v) => config.with_variant(v.into()),
        None => config,
    })
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("agenda_core=warn,agenda=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
