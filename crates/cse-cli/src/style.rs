//! Console styling. Colors only when the target stream is a terminal.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Error,
    Accent,
}

fn paint(text: &str, tone: Tone, terminal: bool) -> String {
    if !terminal {
        return text.to_string();
    }
    match tone {
        Tone::Success => text.green().to_string(),
        Tone::Warning => text.yellow().to_string(),
        Tone::Error => text.red().bold().to_string(),
        Tone::Accent => text.cyan().to_string(),
    }
}

pub fn success(text: impl AsRef<str>) -> String {
    paint(text.as_ref(), Tone::Success, std::io::stdout().is_terminal())
}

pub fn warning(text: impl AsRef<str>) -> String {
    paint(text.as_ref(), Tone::Warning, std::io::stdout().is_terminal())
}

/// For stderr output.
pub fn error(text: impl AsRef<str>) -> String {
    paint(text.as_ref(), Tone::Error, std::io::stderr().is_terminal())
}

pub fn accent(text: impl AsRef<str>) -> String {
    paint(text.as_ref(), Tone::Accent, std::io::stdout().is_terminal())
}

pub fn print_banner(export_tag: &str) {
    println!("{}", accent(format!("CSE v{}", env!("CARGO_PKG_VERSION"))));
    println!("Strips the symbol files generated by CoDeSys 2.3.x");
    println!("keeping only symbols tagged with \"{export_tag}\" in the project sources");
    println!();
}
