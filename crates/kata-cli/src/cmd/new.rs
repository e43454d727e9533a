use crate::{prompt, theme};
use anyhow::{Context, Result};
use kata_core::catalog;
use kata_core::store::Store;
use kata_core::types::KataType;

pub fn run(store: &Store) -> Result<()> {
    println!("{}", theme::special("Create a kata routine"));

    let labels = super::tier_labels();
    let Some(idx) = prompt::select("Which tier?", &labels)? else {
        return super::bail_cancelled();
    };
    let kata_type = KataType::all()[idx];

    let existing = store.kata(kata_type)?;
    if !existing.is_empty() {
        println!(
            "{}",
            theme::info(&format!(
                "A {kata_type} with {} task(s) already exists and will be replaced.",
                existing.len()
            ))
        );
    }

    let start_options = ["Start from the built-in defaults", "Start empty"];
    let Some(defaults) = prompt::select("How do you want to start?", &start_options)? else {
        return super::bail_cancelled();
    };
    let mut tasks = if defaults == 0 {
        catalog::default_tasks(kata_type)
    } else {
        Vec::new()
    };
    if !tasks.is_empty() {
        println!("{}", theme::cyan(&format!("{} default task(s):", tasks.len())));
        for task in &tasks {
            println!("  {} {}", theme::green("•"), task.description);
        }
    }

    loop {
        let Some(reply) = prompt::input("Add a task (leave empty to finish)")? else {
            return super::bail_cancelled();
        };
        let description = reply.trim().to_string();
        if description.is_empty() {
            break;
        }
        let task = catalog::new_task(description, kata_type);
        println!(
            "  {} {} {}",
            theme::green("+"),
            task.description,
            theme::dim(&format!("[{}]", task.category))
        );
        tasks.push(task);
    }

    if tasks.is_empty() {
        println!("{}", theme::info("No tasks added; nothing was saved."));
        return Ok(());
    }

    store
        .save_kata(kata_type, &tasks)
        .context("could not save the kata")?;
    println!(
        "{}",
        theme::success(&format!("{kata_type} saved with {} task(s).", tasks.len()))
    );
    println!("{}", theme::dim("Run it with 'devkata start'."));
    Ok(())
}
