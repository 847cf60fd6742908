use std::io::{self, BufRead, Write};

use anyhow::Result;

use wordhoard_lib::review::algorithm::{format_interval, preview_intervals, MASTERY_THRESHOLD};

use crate::app::App;
use crate::render::terminal::{paint, render_card_back, render_card_front, Color};

/// What the learner typed at a prompt
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Knew,
    Again,
    Flip,
    Quit,
}

fn parse_reply(line: &str) -> Reply {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" | "k" => Reply::Knew,
        "n" | "no" | "a" => Reply::Again,
        "q" | "quit" => Reply::Quit,
        _ => Reply::Flip,
    }
}

/// Read one reply; end of input counts as quitting
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Reply> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        println!();
        return Ok(Reply::Quit);
    }
    Ok(parse_reply(&line))
}

pub fn run(app: &App, name: &str, speak: bool, use_color: bool) -> Result<()> {
    let mut session = app.open_reader(name)?;
    let speaker = app.speaker(speak);
    let mut cursor = session.start_review(wordhoard_lib::now_millis());

    if cursor.is_empty() {
        println!("Nothing due in \"{}\". Come back later.", session.book().title);
        return Ok(());
    }

    println!("Reviewing {} words from \"{}\"", cursor.len(), session.book().title);
    println!("{}", paint("Enter: show meaning   y: knew it   n: again   q: quit", Color::DIM, use_color));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut knew_count = 0;
    let mut again_count = 0;

    while let Some(item) = cursor.current().cloned() {
        println!();
        println!("{} {}",
            paint(&format!("[{}/{}]", cursor.position() + 1, cursor.len()), Color::GRAY, use_color),
            render_card_front(&item, use_color).trim_start());
        if speak {
            session.speak(speaker.as_ref(), &item.word);
        }

        let mut reply = prompt(&mut input, "  ? ")?;
        if reply == Reply::Flip {
            session.flip_card();
            println!("{}", render_card_back(&item, use_color));
            let [again, good] = preview_intervals(
                &session.progress().vocabulary,
                &item.word,
                wordhoard_lib::now_millis(),
            );
            println!("{}", paint(
                &format!("  n: {}   y: {}", format_interval(again), format_interval(good)),
                Color::DIM,
                use_color,
            ));
            reply = prompt(&mut input, "  knew it? [y/n] ")?;
            while reply == Reply::Flip {
                reply = prompt(&mut input, "  y or n (q to quit): ")?;
            }
        }

        let knew = match reply {
            Reply::Knew => true,
            Reply::Again => false,
            Reply::Quit | Reply::Flip => break,
        };

        let now = wordhoard_lib::now_millis();
        let result = session.answer(&item.word, knew, now);
        if knew {
            knew_count += 1;
        } else {
            again_count += 1;
        }

        let outcome = if knew && result.correct_count >= MASTERY_THRESHOLD {
            paint("mastered", Color::GREEN, use_color)
        } else if knew {
            paint("good", Color::GREEN, use_color)
        } else {
            paint("again", Color::RED, use_color)
        };
        println!("  {}; next review in {}", outcome, format_interval(result.next_review.saturating_sub(now)));

        if let Some(error) = session.last_save_error() {
            eprintln!("  Warning: progress not saved: {}", error);
        }

        cursor.advance();
    }

    let progress = cursor.progress();
    println!();
    if progress.is_complete {
        println!("Session complete.");
    } else {
        println!("Stopped with {} words left.", progress.remaining);
    }
    println!("  knew: {}   again: {}", knew_count, again_count);

    Ok(())
}
