//! Console formatting: time prefix, colored tag and level columns
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stderr, ErrorKind, Write};

/// Column widths for alignment
const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 7;

pub fn format_and_log(tag: &LogTag, level: LogLevel, message: &str, colors: bool) {
    let time = Local::now().format("%H:%M:%S").to_string();
    let tag_str = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    let level_str = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);

    let line = if colors {
        format!(
            "{} [{}] [{}] {}",
            time.dimmed(),
            color_tag(tag, tag_str),
            color_level(level, level_str),
            message
        )
    } else {
        format!("{} [{}] [{}] {}", time, tag_str, level_str, message)
    };

    print_stderr_safe(&line);
}

fn color_tag(tag: &LogTag, padded: String) -> ColoredString {
    match tag {
        LogTag::Api => padded.bright_purple().bold(),
        LogTag::Cache => padded.bright_cyan().bold(),
        LogTag::RateLimit => padded.bright_yellow().bold(),
        LogTag::Client => padded.bright_green().bold(),
        LogTag::Config => padded.bright_blue().bold(),
        LogTag::System => padded.bright_white().bold(),
        LogTag::Other(_) => padded.white().bold(),
    }
}

fn color_level(level: LogLevel, padded: String) -> ColoredString {
    match level {
        LogLevel::Error => padded.bright_red().bold(),
        LogLevel::Warning => padded.yellow().bold(),
        LogLevel::Info => padded.white().bold(),
        LogLevel::Debug | LogLevel::Verbose => padded.dimmed(),
    }
}

/// Write to stderr, exiting quietly if the reader went away
fn print_stderr_safe(message: &str) {
    let mut handle = stderr().lock();
    if let Err(e) = writeln!(handle, "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
}
