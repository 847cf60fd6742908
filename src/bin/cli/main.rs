mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordhoard", about = "Read short books and review their vocabulary", version)]
struct Cli {
    /// Directory holding books and progress (overrides config and WORDHOARD_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List books with their review status
    Books,

    /// Import a book from a .json, .yaml or .txt file
    Import {
        /// Path to the book file
        file: PathBuf,
    },

    /// Remove a book and its progress
    Remove {
        /// Book id or title (case-insensitive prefix match)
        book: String,
    },

    /// Print the next unread sentences and mark them read
    Read {
        /// Book id or title
        book: String,
        /// Number of sentences to read
        #[arg(long, short, default_value = "1")]
        next: usize,
        /// Speak each sentence
        #[arg(long)]
        speak: bool,
    },

    /// List the words due for review
    Due {
        /// Book id or title
        book: String,
    },

    /// Show reading position and review statistics
    Stats {
        /// Book id or title
        book: String,
    },

    /// Review the due words interactively
    Study {
        /// Book id or title
        book: String,
        /// Speak each word
        #[arg(long)]
        speak: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.data_dir.as_deref())?;

    match cli.command {
        Command::Books => {
            commands::books::run(&app, &cli.format, use_color)?;
        }
        Command::Import { file } => {
            commands::import::run(&app, &file, &cli.format)?;
        }
        Command::Remove { book } => {
            commands::remove::run(&app, &book, &cli.format)?;
        }
        Command::Read { book, next, speak } => {
            commands::read::run(&app, &book, next, speak, &cli.format, use_color)?;
        }
        Command::Due { book } => {
            commands::due::run(&app, &book, &cli.format, use_color)?;
        }
        Command::Stats { book } => {
            commands::stats::run(&app, &book, &cli.format)?;
        }
        Command::Study { book, speak } => {
            commands::study::run(&app, &book, speak, use_color)?;
        }
    }

    Ok(())
}
