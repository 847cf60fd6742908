use std::path::Path;

use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, file: &Path, format: &OutputFormat) -> Result<()> {
    let book = app.import_book(file)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&book.summary())?);
        }
        OutputFormat::Plain => {
            println!("Imported \"{}\"", book.title);
            println!("  ID: {}", book.id);
            println!("  {} sentences, {} words", book.sentences.len(), book.vocabulary.len());
        }
    }

    Ok(())
}
