use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, wrap_lines, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    name: &str,
    count: usize,
    speak: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut session = app.open_reader(name)?;
    let speaker = app.speaker(speak);
    let total = session.book().sentences.len();

    let mut read = Vec::new();
    for _ in 0..count {
        let Some(index) = session.current_sentence_index() else {
            break;
        };
        let Some(sentence) = session.read_next() else {
            break;
        };
        if speak {
            session.speak(speaker.as_ref(), &sentence);
        }
        read.push((index, sentence));
    }

    if let Some(error) = session.last_save_error() {
        eprintln!("Warning: reading position not saved: {}", error);
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = read.iter().map(|(index, sentence)| {
                serde_json::json!({
                    "index": index,
                    "sentence": sentence,
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if read.is_empty() {
                println!("Finished \"{}\". Nothing left to read.", session.book().title);
                return Ok(());
            }

            for (index, sentence) in &read {
                let marker = paint(&format!("[{}/{}]", index + 1, total), Color::GRAY, use_color);
                println!("{}", marker);
                for line in wrap_lines(sentence, "  ", 80) {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}
