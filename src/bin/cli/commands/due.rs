use anyhow::Result;

use wordhoard_lib::review::algorithm::format_interval;
use wordhoard_lib::review::word_stage;

use crate::app::App;
use crate::render::terminal::{render_stage, stage_label, truncate};
use crate::OutputFormat;

pub fn run(app: &App, name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let session = app.open_reader(name)?;
    let now = wordhoard_lib::now_millis();
    let vocabulary = &session.progress().vocabulary;
    let due = session.due_words(now);

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = due.iter().map(|item| {
                let stage = word_stage(vocabulary, &item.word);
                serde_json::json!({
                    "word": item.word,
                    "meaning": item.meaning,
                    "stage": stage,
                    "progress": vocabulary.get(&item.word),
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due in \"{}\".", session.book().title);
                return Ok(());
            }

            let word_width = due.iter().map(|i| i.word.chars().count()).max().unwrap_or(4).clamp(4, 24);
            let stage_width = 8;

            println!("{:<ww$} {:<sw$} {:<8} {}",
                "Word", "Stage", "Streak", "Meaning",
                ww = word_width, sw = stage_width);

            for item in &due {
                let stage = word_stage(vocabulary, &item.word);
                let streak = vocabulary
                    .get(&item.word)
                    .map_or("-".to_string(), |p| p.correct_count.to_string());
                // Pad before coloring so ANSI codes do not break alignment
                let padding = " ".repeat(stage_width.saturating_sub(stage_label(stage).len()));

                println!("{:<ww$} {}{} {:<8} {}",
                    truncate(&item.word, word_width),
                    render_stage(stage, use_color),
                    padding,
                    streak,
                    truncate(&item.meaning, 40),
                    ww = word_width);
            }

            println!("\n{} of {} words due", due.len(), session.book().vocabulary.len());

            let next = session
                .book()
                .vocabulary
                .iter()
                .filter_map(|item| vocabulary.get(&item.word))
                .filter(|p| !p.is_due(now))
                .map(|p| p.next_review)
                .min();
            if let Some(next_review) = next {
                println!("Next word due in {}", format_interval(next_review.saturating_sub(now)));
            }
        }
    }

    Ok(())
}
