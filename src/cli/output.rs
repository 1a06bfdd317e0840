//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::HexColor;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print a selected row (green bold)
pub fn selected(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().green().bold());
}

/// Print a badge using its own background and text colors, followed by plain text
pub fn badge(label: &str, background: HexColor, foreground: HexColor, rest: &str) {
    let painted = format!(" {label} ")
        .on_truecolor(background.r, background.g, background.b)
        .truecolor(foreground.r, foreground.g, foreground.b);
    println!("{} {}", painted, rest);
}

/// Print a color swatch with its resolved text color
pub fn swatch(background: HexColor, foreground: HexColor) {
    let painted = format!(" {foreground} ")
        .on_truecolor(background.r, background.g, background.b)
        .truecolor(foreground.r, foreground.g, foreground.b);
    println!("{}  {}", background, painted);
}
