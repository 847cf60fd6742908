use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use wordhoard_lib::books::{Book, BookStorage, BookSummary};
use wordhoard_lib::config::Config;
use wordhoard_lib::progress::FileProgressStore;
use wordhoard_lib::reader::ReaderSession;
use wordhoard_lib::speech::{speaker_from_config, Speaker};

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub data_dir: PathBuf,
    pub books: BookStorage,
    pub progress_store: FileProgressStore,
}

impl App {
    /// Initialize from the config file and the resolved data directory
    pub fn new(data_dir_override: Option<&Path>) -> Result<Self> {
        let config = Config::load().context("Failed to load config")?;
        let data_dir = config
            .resolve_data_dir(data_dir_override)
            .context("Failed to get data directory")?;
        log::debug!("Using data directory {:?}", data_dir);

        Ok(Self {
            books: BookStorage::new(data_dir.clone()),
            progress_store: FileProgressStore::new(data_dir.clone()),
            config,
            data_dir,
        })
    }

    pub fn list_books(&self) -> Result<Vec<BookSummary>> {
        self.books.list_books().context("Failed to list books")
    }

    /// Find a book by id, or by title (case-insensitive prefix match)
    pub fn find_book(&self, name: &str) -> Result<Book> {
        let books = self.list_books()?;
        let name_lower = name.to_lowercase();

        // Exact id or title first
        if let Some(summary) = books
            .iter()
            .find(|b| b.id == name || b.title.to_lowercase() == name_lower)
        {
            return self.get_book(&summary.id);
        }

        let matches: Vec<&BookSummary> = books
            .iter()
            .filter(|b| b.title.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!("No book matching '{}'. Available books:\n{}", name,
                books.iter().map(|b| format!("  - {} ({})", b.title, b.id)).collect::<Vec<_>>().join("\n")),
            1 => self.get_book(&matches[0].id),
            _ => bail!("Ambiguous book name '{}'. Matches:\n{}", name,
                matches.iter().map(|b| format!("  - {} ({})", b.title, b.id)).collect::<Vec<_>>().join("\n")),
        }
    }

    pub fn get_book(&self, id: &str) -> Result<Book> {
        self.books
            .get_book(id)
            .with_context(|| format!("Failed to load book '{}'", id))
    }

    /// Open a book for reading with its saved progress
    pub fn open_reader(&self, name: &str) -> Result<ReaderSession<'_>> {
        let book = self.find_book(name)?;
        let mut session = ReaderSession::open(book, &self.progress_store);
        session.set_speech_rate(self.config.speech.rate);
        Ok(session)
    }

    pub fn import_book(&self, path: &Path) -> Result<Book> {
        self.books
            .import_file(path)
            .with_context(|| format!("Failed to import {}", path.display()))
    }

    pub fn remove_book(&self, name: &str) -> Result<Book> {
        let book = self.find_book(name)?;
        self.books
            .remove_book(&book.id, &self.progress_store)
            .with_context(|| format!("Failed to remove book '{}'", book.id))?;
        Ok(book)
    }

    /// Speaker from config; `force` turns speech on even if disabled there
    pub fn speaker(&self, force: bool) -> Box<dyn Speaker> {
        let mut speech = self.config.speech.clone();
        speech.enabled |= force;
        speaker_from_config(&speech)
    }
}
