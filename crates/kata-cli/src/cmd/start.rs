use crate::handlers::InteractiveHandler;
use crate::{prompt, theme};
use anyhow::Result;
use kata_core::runner::{run_session, RunOutcome};
use kata_core::store::Store;
use kata_core::types::{today_key, KataType, SessionStatus};

pub fn run(store: &Store) -> Result<()> {
    let labels = super::tier_labels();
    let Some(idx) = prompt::select("Which kata?", &labels)? else {
        return super::bail_cancelled();
    };
    let kata_type = KataType::all()[idx];

    let tasks = store.kata(kata_type)?;
    if tasks.is_empty() {
        println!(
            "{}",
            theme::info(&format!(
                "No saved {kata_type} yet. Create one with 'devkata new'."
            ))
        );
        return Ok(());
    }

    println!(
        "{}",
        theme::special(&format!("Starting {kata_type} ({} tasks)", tasks.len()))
    );

    let config = store.user_config()?;
    let mut handler = InteractiveHandler::new(store, config);
    let outcome = run_session(kata_type, tasks, &mut handler)?;

    // Session history first, then the kata progress file: a kata-save
    // failure must never lose the session record.
    let date = today_key();
    if !persist_with_recovery("session log", || store.append_session(&date, &outcome.session))? {
        return Ok(());
    }
    if !persist_with_recovery("kata progress", || store.save_kata(kata_type, &outcome.tasks))? {
        return Ok(());
    }

    print_recap(&outcome);
    Ok(())
}

// ---------------------------------------------------------------------------
// Persistence recovery
// ---------------------------------------------------------------------------

/// Run a save, and on failure let the user retry, continue unsaved, or stop.
/// Returns false only when the user chose to stop.
fn persist_with_recovery(
    what: &str,
    mut op: impl FnMut() -> kata_core::Result<()>,
) -> Result<bool> {
    let mut last_err = match op() {
        Ok(()) => return Ok(true),
        Err(e) => e,
    };
    loop {
        tracing::warn!("failed to save {what}: {last_err}");
        println!(
            "{}",
            theme::error(&format!("Failed to save {what}: {last_err}"))
        );
        let items = ["Try again", "Continue without saving", "Exit"];
        match prompt::select("How do you want to proceed?", &items)? {
            Some(0) => match op() {
                Ok(()) => {
                    println!("{}", theme::success(&format!("Saved {what}.")));
                    return Ok(true);
                }
                Err(e) => last_err = e,
            },
            Some(1) => {
                println!(
                    "{}",
                    theme::info(&format!("Continuing; the {what} was not saved."))
                );
                return Ok(true);
            }
            _ => {
                println!("{}", theme::info("Exiting without saving."));
                return Ok(false);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Recap
// ---------------------------------------------------------------------------

fn print_recap(outcome: &RunOutcome) {
    let session = &outcome.session;
    let status = session.status.map(|s| s.as_str()).unwrap_or("unknown");
    println!(
        "\n{}",
        theme::orange(&format!("  {} session - {status}", session.kata_type))
    );
    println!("{}", theme::rule());

    let summary = &session.summary;
    println!("  Tasks      {}", summary.total_tasks);
    println!(
        "  Mastered   {}",
        theme::green(&summary.mastered.to_string())
    );
    if summary.deferred > 0 {
        println!(
            "  Deferred   {}",
            theme::info(&summary.deferred.to_string())
        );
    }
    if summary.abandoned > 0 {
        println!(
            "  Abandoned  {}",
            theme::error(&summary.abandoned.to_string())
        );
    }
    if let Some(seconds) = session.total_duration {
        let minutes = (seconds as f64 / 60.0 * 10.0).round() / 10.0;
        println!("  Duration   {minutes} min");
    }

    match session.status {
        Some(SessionStatus::Mastered) => {
            println!("\n{}", theme::success("Full mastery. See you tomorrow."));
        }
        Some(SessionStatus::Partial) => {
            println!(
                "\n{}",
                theme::info("Some tasks deferred; they will come around again.")
            );
        }
        Some(SessionStatus::Abandoned) => {
            println!(
                "\n{}",
                theme::dim("Session abandoned. Tomorrow is another day.")
            );
        }
        None => {}
    }
}
