//! Dracula-ish ANSI palette for terminal output.

pub const RESET: &str = "\x1b[0m";

const ORANGE: &str = "\x1b[38;2;255;184;108m";
const PURPLE: &str = "\x1b[38;2;189;147;249m";
const PINK: &str = "\x1b[38;2;255;121;198m";
const GREEN: &str = "\x1b[38;2;80;250;123m";
const CYAN: &str = "\x1b[38;2;139;233;253m";
const RED: &str = "\x1b[38;2;255;85;85m";
const YELLOW: &str = "\x1b[38;2;241;250;140m";
const MAGENTA: &str = "\x1b[38;2;255;121;198m";
const DIM: &str = "\x1b[2m";

fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}

pub fn orange(text: &str) -> String {
    paint(ORANGE, text)
}

pub fn purple(text: &str) -> String {
    paint(PURPLE, text)
}

pub fn pink(text: &str) -> String {
    paint(PINK, text)
}

pub fn green(text: &str) -> String {
    paint(GREEN, text)
}

pub fn cyan(text: &str) -> String {
    paint(CYAN, text)
}

pub fn success(text: &str) -> String {
    paint(GREEN, text)
}

pub fn error(text: &str) -> String {
    paint(RED, text)
}

pub fn info(text: &str) -> String {
    paint(YELLOW, text)
}

pub fn special(text: &str) -> String {
    paint(MAGENTA, text)
}

pub fn dim(text: &str) -> String {
    paint(DIM, text)
}

/// Section divider used across the stats output.
pub fn rule() -> String {
    dim(&"─".repeat(50))
}
