use crate::{prompt, system, theme};
use anyhow::{Context, Result};
use kata_core::store::Store;
use std::path::Path;

const LANGUAGE_OPTIONS: &[(&str, &str)] = &[
    ("javascript", "js"),
    ("typescript", "ts"),
    ("python", "py"),
    ("rust", "rs"),
    ("go", "go"),
    ("c", "c"),
    ("html", "html"),
    ("css", "css"),
];

pub fn run(store: &Store) -> Result<()> {
    println!("{}", theme::special("Configure devkata"));
    let mut config = store.user_config()?;

    // Linked repositories, used by the code-review task.
    if !config.repositories.is_empty() {
        println!(
            "{}",
            theme::cyan(&format!("{} linked repositories:", config.repositories.len()))
        );
        for repo in &config.repositories {
            println!("  {} {repo}", theme::green("•"));
        }
    }
    let repo_options = ["Link a git repository", "Skip"];
    loop {
        let Some(choice) = prompt::select("Repositories for code review:", &repo_options)? else {
            return super::bail_cancelled();
        };
        if choice != 0 {
            break;
        }
        let Some(reply) = prompt::input("Repository path (leave empty to stop)")? else {
            return super::bail_cancelled();
        };
        let path = reply.trim().to_string();
        if path.is_empty() {
            break;
        }
        if !system::is_git_repo(Path::new(&path)) {
            println!(
                "{}",
                theme::error(&format!("{path} is not a git working tree; not linked."))
            );
            continue;
        }
        if config.add_repository(&path) {
            println!("{}", theme::success(&format!("Linked {path}.")));
        } else {
            println!("{}", theme::info(&format!("{path} was already linked.")));
        }
    }

    // Sandbox languages (language -> scratch-file extension).
    if !config.sandbox_languages.is_empty() {
        let configured: Vec<String> = config
            .sandbox_languages
            .iter()
            .map(|(lang, ext)| format!("{lang} (.{ext})"))
            .collect();
        println!(
            "{}",
            theme::cyan(&format!("Sandbox languages: {}", configured.join(", ")))
        );
    }
    let labels: Vec<String> = LANGUAGE_OPTIONS
        .iter()
        .map(|(lang, ext)| format!("{lang} (.{ext})"))
        .collect();
    loop {
        let Some(add) = prompt::confirm("Add a sandbox language?")? else {
            return super::bail_cancelled();
        };
        if !add {
            break;
        }
        let Some(idx) = prompt::select("Language:", &labels)? else {
            return super::bail_cancelled();
        };
        let (language, extension) = LANGUAGE_OPTIONS[idx];
        if config.add_sandbox_language(language, extension) {
            println!("{}", theme::success(&format!("Sandbox language {language} added.")));
        } else {
            println!("{}", theme::info(&format!("{language} was already configured.")));
        }
    }

    store
        .save_user_config(&config)
        .context("could not save the configuration")?;
    println!("{}", theme::success("Configuration saved."));
    Ok(())
}
