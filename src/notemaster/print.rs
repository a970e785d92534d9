use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use notemaster::commands::{CmdMessage, MessageLevel};
use notemaster::model::{Evaluation, Note, Question, Stats};
use std::collections::BTreeMap;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TITLE_WIDTH: usize = 24;
const TIME_WIDTH: usize = 16;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per note: padded title, then a single-line content preview.
pub(crate) fn print_notes(notes: &[Note]) {
    for note in notes {
        let title = truncate_to_width(&note.title, TITLE_WIDTH);
        let padding = TITLE_WIDTH.saturating_sub(title.width());

        let preview: String = note
            .content
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let available = LINE_WIDTH.saturating_sub(TITLE_WIDTH + 2);
        let preview = truncate_to_width(preview.trim(), available);

        println!("{}{}  {}", title.bold(), " ".repeat(padding), preview.dimmed());
    }
}

pub(crate) fn print_full_notes(notes: &[Note]) {
    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{}", note.title.bold());
        println!("--------------------------------");
        println!("{}", note.content);
    }
}

pub(crate) fn print_questions(questions: &[Question]) {
    for (i, question) in questions.iter().enumerate() {
        println!("{} {}", format!("{}.", i + 1).yellow(), question.text);
    }
}

pub(crate) fn print_evaluation(evaluation: &Evaluation) {
    let score = evaluation.score.to_string();
    let colored = match evaluation.score.value() {
        4..=5 => score.green(),
        2..=3 => score.yellow(),
        _ => score.red(),
    };
    println!("{}", colored.bold());
}

pub(crate) fn print_stats(stats: &BTreeMap<String, Stats>, detailed: bool) {
    for (title, note_stats) in stats {
        let summary = note_stats.summary();
        let average = summary
            .average_score
            .map(|a| format!("{:.1}/5", a))
            .unwrap_or_else(|| "-".to_string());
        let best = summary
            .best_score
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());
        let last = summary
            .last_attempt
            .map(format_time_ago)
            .unwrap_or_default();

        let title_display = truncate_to_width(title, TITLE_WIDTH);
        let padding = TITLE_WIDTH.saturating_sub(title_display.width());
        println!(
            "{}{}  {:>3} attempts  avg {:>5}  best {:>3}  {}",
            title_display.bold(),
            " ".repeat(padding),
            summary.attempts,
            average,
            best,
            last.dimmed()
        );

        if detailed {
            for attempt in &note_stats.attempts {
                println!(
                    "    {}  {}  {}",
                    attempt.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                    attempt.score,
                    truncate_to_width(&attempt.question, LINE_WIDTH - 32)
                );
            }
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: NaiveDateTime) -> String {
    let duration = Local::now().naive_local().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_are_untouched() {
        assert_eq!(truncate_to_width("Bio", 10), "Bio");
    }

    #[test]
    fn long_strings_end_with_ellipsis() {
        let truncated = truncate_to_width("Photosynthesis in plants", 10);
        assert_eq!(truncated, "Photosynt…");
        assert_eq!(truncated.width(), 10);
    }

    #[test]
    fn wide_characters_count_double() {
        let truncated = truncate_to_width("光合作用光合作用", 7);
        assert!(truncated.width() <= 7);
        assert!(truncated.ends_with('…'));
    }
}
