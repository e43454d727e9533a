//! Thin wrappers over dialoguer. Every prompt returns `Ok(None)` when the
//! user backs out (Esc or Ctrl-C) so callers can treat cancellation as a
//! value instead of an error.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::io;

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn map_err(err: dialoguer::Error) -> io::Result<()> {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => Ok(()),
        dialoguer::Error::IO(e) => Err(e),
    }
}

fn map_cancel<T>(result: dialoguer::Result<Option<T>>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => map_err(err).map(|_| None),
    }
}

fn map_interrupt<T>(result: dialoguer::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) => map_err(err).map(|_| None),
    }
}

pub fn confirm(message: &str) -> io::Result<Option<bool>> {
    map_cancel(
        Confirm::with_theme(&theme())
            .with_prompt(message)
            .interact_opt(),
    )
}

pub fn select<S: ToString>(message: &str, items: &[S]) -> io::Result<Option<usize>> {
    map_cancel(
        Select::with_theme(&theme())
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt(),
    )
}

/// Free-text input; an empty reply is allowed and comes back as "".
pub fn input(message: &str) -> io::Result<Option<String>> {
    map_interrupt(
        Input::<String>::with_theme(&theme())
            .with_prompt(message)
            .allow_empty(true)
            .interact_text(),
    )
}

/// Free-text input with a prefilled default.
pub fn input_with_default(message: &str, default: &str) -> io::Result<Option<String>> {
    map_interrupt(
        Input::<String>::with_theme(&theme())
            .with_prompt(message)
            .default(default.to_string())
            .interact_text(),
    )
}

/// Input that re-prompts until the reply matches `expected` exactly
/// (case-sensitive). Used for the destructive-action confirmation phrase.
pub fn input_matching(message: &str, expected: &'static str) -> io::Result<Option<String>> {
    map_interrupt(
        Input::<String>::with_theme(&theme())
            .with_prompt(message)
            .allow_empty(true)
            .validate_with(|reply: &String| -> Result<(), String> {
                if reply == expected {
                    Ok(())
                } else {
                    Err(format!("type exactly \"{expected}\" to continue"))
                }
            })
            .interact_text(),
    )
}
