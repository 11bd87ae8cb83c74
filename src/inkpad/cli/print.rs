use colored::Colorize;
use inkpad::commands::pages::{Ink, PageSummary};
use inkpad::commands::{CmdMessage, MessageLevel};
use inkpad::model::PageCounter;

const PREVIEW_WIDTH: usize = 48;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_counter(counter: PageCounter) {
    println!("{}", counter.to_string().bold());
}

pub(super) fn print_summaries(summaries: &[PageSummary]) {
    for summary in summaries {
        let marker = if summary.active { "*" } else { " " };
        let ink = match summary.ink {
            Ink::Present => "ink".green(),
            Ink::Blank | Ink::Missing => "   ".normal(),
            Ink::Unreadable => "bad".red(),
        };
        let text = preview(&summary.text);
        let text = if text.is_empty() {
            "(no text)".dimmed()
        } else {
            text.normal()
        };
        println!(
            "{} {:>3}. {}  {}",
            marker.yellow(),
            summary.number,
            ink,
            text
        );
    }
}

/// First line of the text, cut to fit one terminal row.
fn preview(text: &str) -> String {
    let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let line = line.trim();
    if line.chars().count() > PREVIEW_WIDTH {
        let cut: String = line.chars().take(PREVIEW_WIDTH - 1).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}
