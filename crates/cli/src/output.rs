//! Terminal output for `prebuild`.
//!
//! Every human-readable line starts with a status marker. Results go to
//! stdout, problems to stderr, so `--output json` stays parseable.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{AnsiColors, OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Kind of line being printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
  Done,
  Failed,
  Warning,
  Note,
  /// Indented detail under a target: a command line or a collected entry.
  Detail,
}

impl Status {
  fn marker(self) -> &'static str {
    match self {
      Status::Done => "✓",
      Status::Failed => "✗",
      Status::Warning => "⚠",
      Status::Note => "•",
      Status::Detail => "  →",
    }
  }

  fn color(self) -> AnsiColors {
    match self {
      Status::Done => AnsiColors::Green,
      Status::Failed => AnsiColors::Red,
      Status::Warning => AnsiColors::Yellow,
      Status::Note => AnsiColors::Blue,
      Status::Detail => AnsiColors::Cyan,
    }
  }

  fn stream(self) -> Stream {
    match self {
      Status::Failed | Status::Warning => Stream::Stderr,
      _ => Stream::Stdout,
    }
  }
}

fn emit(status: Status, message: &str) {
  let stream = status.stream();
  let marker_text = status.marker();
  let marker = marker_text.if_supports_color(stream, |m| m.color(status.color()));
  match stream {
    // Problems are colored in full so they stand out in build tool noise
    Stream::Stderr => eprintln!("{} {}", marker, message.if_supports_color(stream, |m| m.color(status.color()))),
    _ => println!("{} {}", marker, message),
  }
}

pub fn print_success(message: &str) {
  emit(Status::Done, message);
}

pub fn print_error(message: &str) {
  emit(Status::Failed, message);
}

pub fn print_warning(message: &str) {
  emit(Status::Warning, message);
}

pub fn print_info(message: &str) {
  emit(Status::Note, message);
}

/// Detail line, e.g. `  → prebuilt/ios/armv8/lib`.
pub fn print_step(message: &str) {
  emit(Status::Detail, message);
}

pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |l| l.dimmed()), value);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Short wall-clock time for the build summary.
pub fn format_duration(elapsed: Duration) -> String {
  let millis = elapsed.as_millis();
  match millis {
    0..1_000 => format!("{}ms", millis),
    1_000..60_000 => format!("{}.{:02}s", millis / 1_000, millis % 1_000 / 10),
    _ => {
      let secs = elapsed.as_secs();
      format!("{}m {}s", secs / 60, secs % 60)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn durations_pick_a_unit() {
    assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
    assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    assert_eq!(format_duration(Duration::from_millis(59_999)), "59.99s");
    assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
    assert_eq!(format_duration(Duration::from_secs(3600)), "60m 0s");
  }

  #[test]
  fn problems_go_to_stderr() {
    assert!(matches!(Status::Failed.stream(), Stream::Stderr));
    assert!(matches!(Status::Warning.stream(), Stream::Stderr));
    assert!(matches!(Status::Done.stream(), Stream::Stdout));
    assert!(matches!(Status::Detail.stream(), Stream::Stdout));
  }

  #[test]
  fn detail_lines_are_indented() {
    assert!(Status::Detail.marker().starts_with("  "));
    assert!(!Status::Note.marker().starts_with(' '));
  }

  #[test]
  fn json_format_is_detected() {
    assert!(OutputFormat::Json.is_json());
    assert!(!OutputFormat::Text.is_json());
  }
}
