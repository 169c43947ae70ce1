//! Styled terminal lines: headers, status tags, warnings and errors.

use console::{style, Color};

/// `NO_COLOR` is set to any value.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Render `text` bold in `color`, or unchanged when colors are off.
fn paint(text: &str, color: Color, colored: bool) -> String {
    if colored {
        style(text).fg(color).bold().to_string()
    } else {
        text.to_owned()
    }
}

fn tagged(tag: &str, color: Color, text: &str) -> String {
    format!("{} {text}", paint(tag, color, !is_color_disabled()))
}

/// Print a section header to stdout.
pub fn print_header(text: &str) {
    let line = format!("=== {text} ===");
    println!("{}", paint(&line, Color::Cyan, !is_color_disabled()));
}

/// Print an `[OK]` line to stdout.
pub fn print_success(text: &str) {
    println!("{}", tagged("[OK]", Color::Green, text));
}

/// Print a `[WARN]` line to stderr.
pub fn print_warning(text: &str) {
    eprintln!("{}", tagged("[WARN]", Color::Yellow, text));
}

/// Print an `[ERROR]` line to stderr.
pub fn print_error(text: &str) {
    eprintln!("{}", tagged("[ERROR]", Color::Red, text));
}
