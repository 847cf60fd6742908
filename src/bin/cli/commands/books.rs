use std::path::Path;

use anyhow::Result;

use wordhoard_lib::progress::ProgressStore;
use wordhoard_lib::review::review_stats;

use crate::app::App;
use crate::render::terminal::truncate;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let summaries = app.list_books()?;
    let now = wordhoard_lib::now_millis();

    let mut rows = Vec::new();
    for summary in &summaries {
        let book = app.get_book(&summary.id)?;
        let progress = app.progress_store.load(&book.id);
        let stats = review_stats(&book.vocabulary, &progress.vocabulary, now);
        let read = progress.sentences_read().min(book.sentences.len());
        rows.push((summary, read, stats));
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = rows.iter().map(|(summary, read, stats)| {
                serde_json::json!({
                    "id": summary.id,
                    "title": summary.title,
                    "sentenceCount": summary.sentence_count,
                    "sentencesRead": read,
                    "stats": stats,
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if rows.is_empty() {
                println!("{}", empty_library_message(&app.data_dir));
                return Ok(());
            }

            let title_width = rows.iter().map(|(s, _, _)| s.title.chars().count()).max().unwrap_or(5).clamp(5, 40);
            let id_width = rows.iter().map(|(s, _, _)| s.id.len()).max().unwrap_or(2).max(2);

            println!("{:<tw$} {:<iw$} {:>9} {:>5} {:>8}",
                "Title", "Id", "Read", "Due", "Mastered",
                tw = title_width, iw = id_width);
            println!("{} {} {} {} {}",
                "\u{2500}".repeat(title_width),
                "\u{2500}".repeat(id_width),
                "\u{2500}".repeat(9),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(8));

            for (summary, read, stats) in &rows {
                println!("{:<tw$} {:<iw$} {:>9} {:>5} {:>8}",
                    truncate(&summary.title, title_width),
                    summary.id,
                    format!("{}/{}", read, summary.sentence_count),
                    stats.due_words,
                    format!("{}/{}", stats.mastered_words, stats.total_words),
                    tw = title_width, iw = id_width);
            }

            println!("\n{} books total", rows.len());
        }
    }

    Ok(())
}

fn empty_library_message(data_dir: &Path) -> String {
    format!(
        "No books in {}. Import one with `wordhoard import <file>`.",
        data_dir.join("books").display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_library_message_names_books_dir() {
        let message = empty_library_message(Path::new("/tmp/hoard"));
        assert!(message.contains(&Path::new("/tmp/hoard").join("books").display().to_string()));
        assert!(message.contains("wordhoard import"));
    }
}
