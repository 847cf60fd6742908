use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, name: &str, format: &OutputFormat) -> Result<()> {
    let session = app.open_reader(name)?;
    let now = wordhoard_lib::now_millis();
    let stats = session.stats(now);
    let book = session.book();
    let read = session.progress().sentences_read().min(book.sentences.len());

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": book.id,
                "title": book.title,
                "sentenceCount": book.sentences.len(),
                "sentencesRead": read,
                "lastReadSentence": session.progress().last_read_sentence,
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{} ({})", book.title, book.id);
            println!("  Read:        {}/{} sentences", read, book.sentences.len());
            println!("  Words:       {}", stats.total_words);
            println!("    new:       {}", stats.new_words);
            println!("    learning:  {}", stats.cooling_down_words);
            println!("    mastered:  {}", stats.mastered_words);
            println!("  Due now:     {}", stats.due_words);
        }
    }

    Ok(())
}
