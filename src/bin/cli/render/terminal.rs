use wordhoard_lib::books::VocabularyItem;
use wordhoard_lib::review::WordStage;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn stage_label(stage: WordStage) -> &'static str {
    match stage {
        WordStage::New => "new",
        WordStage::CoolingDown => "learning",
        WordStage::Mastered => "mastered",
    }
}

pub fn render_stage(stage: WordStage, use_color: bool) -> String {
    let color = match stage {
        WordStage::New => Color::CYAN,
        WordStage::CoolingDown => Color::YELLOW,
        WordStage::Mastered => Color::GREEN,
    };
    paint(stage_label(stage), color, use_color)
}

/// Front of a flashcard: just the word
pub fn render_card_front(item: &VocabularyItem, use_color: bool) -> String {
    format!("  {}", paint(&item.word, Color::BOLD, use_color))
}

/// Back of a flashcard: meaning and example
pub fn render_card_back(item: &VocabularyItem, use_color: bool) -> String {
    let mut lines = wrap_lines(&item.meaning, "    ", 80);
    if !item.example.is_empty() {
        let example = paint(&item.example, Color::ITALIC, use_color);
        lines.extend(wrap_lines(&example, "    > ", 80));
    }
    lines.join("\n")
}

/// Shorten `text` to at most `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Simple word-wrapping for terminal output
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.len() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
        } else {
            let mut current_line = String::new();
            for word in line.split_whitespace() {
                if current_line.is_empty() {
                    current_line = word.to_string();
                } else if current_line.len() + 1 + word.len() <= effective_width {
                    current_line.push(' ');
                    current_line.push_str(word);
                } else {
                    lines.push(format!("{}{}", prefix, current_line));
                    current_line = word.to_string();
                }
            }
            if !current_line.is_empty() {
                lines.push(format!("{}{}", prefix, current_line));
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title", 10), "a very ...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_wrap_lines() {
        let lines = wrap_lines("one two three four", "  ", 11);
        assert_eq!(lines, vec!["  one two", "  three", "  four"]);
    }

    #[test]
    fn test_paint_without_color() {
        assert_eq!(paint("word", Color::BOLD, false), "word");
    }
}
