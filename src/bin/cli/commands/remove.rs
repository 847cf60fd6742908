use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, name: &str, format: &OutputFormat) -> Result<()> {
    let book = app.remove_book(name)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": book.id,
                "title": book.title,
                "removed": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Removed \"{}\" and its progress", book.title);
        }
    }

    Ok(())
}
