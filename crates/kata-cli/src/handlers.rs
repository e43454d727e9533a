//! Prompt-driven task handlers. Each one talks to the user, optionally
//! touches the network or the filesystem, and reports back a
//! [`HandlerOutcome`]. Collaborator failures (HTTP, git, browser) are shown
//! and recovered inline; only real terminal IO errors propagate.

use crate::{api, prompt, system, theme};
use kata_core::config::UserConfig;
use kata_core::dispatch::{HandlerKind, HandlerOutcome, TaskHandler};
use kata_core::store::Store;
use kata_core::task::Task;
use kata_core::types::{today_key, Details};
use kata_core::Result;
use rand::seq::SliceRandom;
use serde_json::{json, Value};
use std::io;
use std::path::Path;

const POSTURE_TIPS: &[&str] = &[
    "Feet flat on the floor",
    "Screen at eye level",
    "Shoulders relaxed, back supported",
    "Elbows bent at roughly 90 degrees",
    "Unclench your jaw",
];

const STRETCH_TIPS: &[&str] = &[
    "Roll your shoulders back five times",
    "Stretch your wrists and fingers",
    "Stand up and reach for the ceiling",
    "Slow neck rolls, both directions",
];

const TYPING_URL: &str = "https://monkeytype.com";

const CHALLENGE_SITES: &[(&str, &str)] = &[
    ("Codewars", "https://www.codewars.com/dashboard"),
    ("LeetCode", "https://leetcode.com/problemset/"),
    ("Exercism", "https://exercism.org/dashboard"),
];

fn obj(value: Value) -> Details {
    match value {
        Value::Object(map) => map,
        _ => Details::new(),
    }
}

fn cancel() -> Result<HandlerOutcome> {
    Ok(HandlerOutcome::cancelled())
}

fn confirmed(done: bool, details: Details) -> Result<HandlerOutcome> {
    Ok(if done {
        HandlerOutcome::completed(details)
    } else {
        HandlerOutcome::deferred(details)
    })
}

// ---------------------------------------------------------------------------
// Fallback menu for unreachable collaborators
// ---------------------------------------------------------------------------

enum Fallback {
    Retry,
    CompleteAnyway,
    Skip,
}

fn fallback_menu() -> io::Result<Option<Fallback>> {
    let items = ["Try again", "Mark the task complete anyway", "Skip this task"];
    Ok(prompt::select("How do you want to proceed?", &items)?.map(|i| match i {
        0 => Fallback::Retry,
        1 => Fallback::CompleteAnyway,
        _ => Fallback::Skip,
    }))
}

// ---------------------------------------------------------------------------
// InteractiveHandler
// ---------------------------------------------------------------------------

pub struct InteractiveHandler<'a> {
    store: &'a Store,
    config: UserConfig,
}

impl<'a> InteractiveHandler<'a> {
    pub fn new(store: &'a Store, config: UserConfig) -> Self {
        Self { store, config }
    }

    fn posture(&mut self) -> Result<HandlerOutcome> {
        println!("{}", theme::cyan("Quick posture scan:"));
        for tip in POSTURE_TIPS {
            println!("  {} {tip}", theme::green("•"));
        }
        let Some(done) = prompt::confirm("Posture adjusted?")? else {
            return cancel();
        };
        confirmed(
            done,
            obj(json!({ "tipsShown": POSTURE_TIPS.len(), "userConfirmed": done })),
        )
    }

    fn daily_goals(&mut self) -> Result<HandlerOutcome> {
        println!("{}", theme::cyan("Set up to three goals for today."));
        let mut goals: Vec<String> = Vec::new();
        for n in 1..=3 {
            let Some(reply) = prompt::input(&format!("Goal {n} (leave empty to finish)"))? else {
                return cancel();
            };
            let goal = reply.trim().to_string();
            if goal.is_empty() {
                break;
            }
            goals.push(goal);
        }
        if goals.is_empty() {
            println!("{}", theme::info("No goals set this time."));
            return Ok(HandlerOutcome::deferred(Details::new()));
        }
        println!("{}", theme::success(&format!("{} goal(s) locked in.", goals.len())));
        Ok(HandlerOutcome::completed(obj(json!({ "goals": goals }))))
    }

    fn article(&mut self, task: &Task) -> Result<HandlerOutcome> {
        let default_tag = task
            .metadata
            .tags
            .first()
            .map(String::as_str)
            .unwrap_or("programming");
        let Some(tag) = prompt::input_with_default("dev.to tag", default_tag)? else {
            return cancel();
        };
        loop {
            let picked = match api::fetch_articles(&tag) {
                Ok(articles) => {
                    if articles.is_empty() {
                        println!("{}", theme::info(&format!("No articles found for #{tag}.")));
                    }
                    articles.choose(&mut rand::thread_rng()).cloned()
                }
                Err(e) => {
                    println!("{}", theme::error(&format!("Could not reach dev.to: {e:#}")));
                    None
                }
            };
            let Some(article) = picked else {
                match fallback_menu()? {
                    None => return cancel(),
                    Some(Fallback::Retry) => continue,
                    Some(Fallback::CompleteAnyway) => {
                        return Ok(HandlerOutcome::completed(obj(json!({ "tag": tag }))));
                    }
                    Some(Fallback::Skip) => return Ok(HandlerOutcome::deferred(Details::new())),
                }
            };

            println!("\n  {}", theme::orange(&article.title));
            if article.reading_time_minutes > 0 {
                println!(
                    "  {}",
                    theme::dim(&format!("{} min read", article.reading_time_minutes))
                );
            }
            println!("  {}", theme::cyan(&article.url));

            let Some(open_now) = prompt::confirm("Open it in your browser?")? else {
                return cancel();
            };
            if open_now {
                if let Err(e) = system::open_in_browser(&article.url) {
                    println!("{}", theme::error(&format!("{e:#}")));
                }
            }
            let Some(read) = prompt::confirm("Mark this article as read?")? else {
                return cancel();
            };
            let details = obj(json!({
                "title": article.title,
                "url": article.url,
                "tag": tag,
            }));
            return confirmed(read, details);
        }
    }

    fn repo_review(&mut self) -> Result<HandlerOutcome> {
        let Some(query) = prompt::input_with_default("Language or topic to explore", "rust")?
        else {
            return cancel();
        };
        loop {
            let picked = match api::fetch_repos(&query) {
                Ok(repos) => {
                    if repos.is_empty() {
                        println!(
                            "{}",
                            theme::info(&format!("No popular repositories match \"{query}\"."))
                        );
                    }
                    repos.choose(&mut rand::thread_rng()).cloned()
                }
                Err(e) => {
                    println!("{}", theme::error(&format!("Could not reach GitHub: {e:#}")));
                    None
                }
            };
            let Some(repo) = picked else {
                match fallback_menu()? {
                    None => return cancel(),
                    Some(Fallback::Retry) => continue,
                    Some(Fallback::CompleteAnyway) => {
                        return Ok(HandlerOutcome::completed(obj(json!({ "query": query }))));
                    }
                    Some(Fallback::Skip) => return Ok(HandlerOutcome::deferred(Details::new())),
                }
            };

            println!("\n  {}", theme::orange(&repo.full_name));
            if let Some(description) = &repo.description {
                println!("  {}", theme::dim(description));
            }
            println!(
                "  {} {}",
                theme::info(&format!("★ {}", repo.stargazers_count)),
                theme::cyan(&repo.html_url)
            );

            let Some(open_now) = prompt::confirm("Open it in your browser?")? else {
                return cancel();
            };
            if open_now {
                if let Err(e) = system::open_in_browser(&repo.html_url) {
                    println!("{}", theme::error(&format!("{e:#}")));
                }
            }
            let Some(reviewed) = prompt::confirm("Repository reviewed?")? else {
                return cancel();
            };
            let details = obj(json!({
                "repoName": repo.full_name,
                "repoUrl": repo.html_url,
                "stars": repo.stargazers_count,
                "query": query,
            }));
            return confirmed(reviewed, details);
        }
    }

    fn yesterday_review(&mut self) -> Result<HandlerOutcome> {
        if self.config.repositories.is_empty() {
            println!(
                "{}",
                theme::info("No repositories linked yet. Run 'devkata config' to add some.")
            );
            let Some(done) = prompt::confirm("Reviewed yesterday's code on your own?")? else {
                return cancel();
            };
            return confirmed(done, obj(json!({ "commitCount": 0 })));
        }

        let Some(idx) = prompt::select("Which repository?", &self.config.repositories)? else {
            return cancel();
        };
        let repo = self.config.repositories[idx].clone();
        let mut shown: Vec<String> = Vec::new();
        let commit_count = match system::commits_yesterday(Path::new(&repo)) {
            Ok(commits) => {
                if commits.is_empty() {
                    println!("{}", theme::info("No commits found for yesterday."));
                } else {
                    println!(
                        "{}",
                        theme::green(&format!("{} commit(s) yesterday:", commits.len()))
                    );
                    for line in commits.iter().take(10) {
                        println!("  {}", theme::dim(line));
                    }
                    if commits.len() > 10 {
                        println!(
                            "  {}",
                            theme::dim(&format!("... and {} more", commits.len() - 10))
                        );
                    }
                }
                shown = commits.iter().take(10).cloned().collect();
                commits.len()
            }
            Err(e) => {
                println!("{}", theme::error(&format!("{e:#}")));
                0
            }
        };

        let Some(done) = prompt::confirm("Done reviewing?")? else {
            return cancel();
        };
        confirmed(
            done,
            obj(json!({
                "repoPath": repo,
                "commitCount": commit_count,
                "commits": shown,
            })),
        )
    }

    fn typing(&mut self) -> Result<HandlerOutcome> {
        let Some(open_now) = prompt::confirm("Open monkeytype in your browser?")? else {
            return cancel();
        };
        if open_now {
            if let Err(e) = system::open_in_browser(TYPING_URL) {
                println!("{}", theme::error(&format!("{e:#}")));
            }
        }
        let Some(done) = prompt::confirm("Typing practice finished?")? else {
            return cancel();
        };
        confirmed(done, obj(json!({ "url": TYPING_URL })))
    }

    fn challenge(&mut self) -> Result<HandlerOutcome> {
        let names: Vec<&str> = CHALLENGE_SITES.iter().map(|(name, _)| *name).collect();
        let Some(idx) = prompt::select("Where do you want to practice?", &names)? else {
            return cancel();
        };
        let (site, url) = CHALLENGE_SITES[idx];
        let Some(open_now) = prompt::confirm(&format!("Open {site} in your browser?"))? else {
            return cancel();
        };
        if open_now {
            if let Err(e) = system::open_in_browser(url) {
                println!("{}", theme::error(&format!("{e:#}")));
            }
        }
        let Some(done) = prompt::confirm("Challenge solved (or honestly attempted)?")? else {
            return cancel();
        };
        confirmed(done, obj(json!({ "site": site, "url": url })))
    }

    fn sandbox(&mut self) -> Result<HandlerOutcome> {
        if self.config.sandbox_languages.is_empty() {
            println!(
                "{}",
                theme::info("No sandbox languages configured. Run 'devkata config' first.")
            );
            let Some(done) = prompt::confirm("Experimented somewhere else?")? else {
                return cancel();
            };
            return confirmed(done, Details::new());
        }

        let languages: Vec<String> = self.config.sandbox_languages.keys().cloned().collect();
        let Some(idx) = prompt::select("Sandbox language:", &languages)? else {
            return cancel();
        };
        let language = languages[idx].clone();
        let extension = self.config.sandbox_languages[&language].clone();

        let mut details = obj(json!({ "language": language }));
        match system::ensure_sandbox_file(&self.store.sandbox_dir(), &extension, &today_key()) {
            Ok(path) => {
                println!("  {}", theme::cyan(&path.display().to_string()));
                if let Err(e) = system::open_in_editor(&path) {
                    println!("{}", theme::error(&format!("{e:#}")));
                }
                details.insert("file".into(), json!(path.display().to_string()));
            }
            Err(e) => println!("{}", theme::error(&format!("{e:#}"))),
        }

        let Some(done) = prompt::confirm("Done experimenting?")? else {
            return cancel();
        };
        confirmed(done, details)
    }

    fn hydration(&mut self) -> Result<HandlerOutcome> {
        println!("{}", theme::cyan("Time for a glass of water."));
        let Some(done) = prompt::confirm("Glass finished?")? else {
            return cancel();
        };
        confirmed(done, obj(json!({ "userConfirmed": done })))
    }

    fn stretch(&mut self) -> Result<HandlerOutcome> {
        println!("{}", theme::cyan("Shake it out:"));
        for tip in STRETCH_TIPS {
            println!("  {} {tip}", theme::green("•"));
        }
        let Some(done) = prompt::confirm("Stretched?")? else {
            return cancel();
        };
        confirmed(
            done,
            obj(json!({ "tipsShown": STRETCH_TIPS.len(), "userConfirmed": done })),
        )
    }

    fn communications(&mut self) -> Result<HandlerOutcome> {
        let Some(done) = prompt::confirm("Inbox and Slack checked?")? else {
            return cancel();
        };
        confirmed(done, obj(json!({ "userConfirmed": done })))
    }

    fn confirm_generic(&mut self, task: &Task) -> Result<HandlerOutcome> {
        let Some(done) = prompt::confirm(&format!("Did you complete \"{}\"?", task.description))?
        else {
            return cancel();
        };
        confirmed(done, obj(json!({ "userConfirmed": done })))
    }
}

impl TaskHandler for InteractiveHandler<'_> {
    fn handle(&mut self, task: &Task, kind: HandlerKind) -> Result<HandlerOutcome> {
        println!("\n{}", theme::purple(&format!("▸ {}", task.description)));
        match kind {
            HandlerKind::Posture => self.posture(),
            HandlerKind::DailyGoals => self.daily_goals(),
            HandlerKind::Article => self.article(task),
            HandlerKind::RepoReview => self.repo_review(),
            HandlerKind::YesterdayReview => self.yesterday_review(),
            HandlerKind::Typing => self.typing(),
            HandlerKind::Challenge => self.challenge(),
            HandlerKind::Sandbox => self.sandbox(),
            HandlerKind::Hydration => self.hydration(),
            HandlerKind::Stretch => self.stretch(),
            HandlerKind::Communications => self.communications(),
            HandlerKind::Confirm => self.confirm_generic(task),
        }
    }
}
