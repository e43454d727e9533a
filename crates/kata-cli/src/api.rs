//! HTTP clients for the article and repository tasks. Failures here are
//! surfaced to the user as a retry menu, never propagated past the handler.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

const DEVTO_ARTICLES_URL: &str = "https://dev.to/api/articles";
const GITHUB_SEARCH_URL: &str = "https://api.github.com/search/repositories";
const TIMEOUT: Duration = Duration::from_secs(10);

fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(TIMEOUT)
        .user_agent(concat!("devkata/", env!("CARGO_PKG_VERSION")))
        .build()
}

// ---------------------------------------------------------------------------
// dev.to articles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub reading_time_minutes: u32,
}

pub fn fetch_articles(tag: &str) -> Result<Vec<Article>> {
    let response = agent()
        .get(DEVTO_ARTICLES_URL)
        .query("tag", tag)
        .query("per_page", "100")
        .set("Accept", "application/json")
        .call()
        .context("dev.to request failed")?;
    let articles: Vec<Article> = response
        .into_json()
        .context("unexpected dev.to response shape")?;
    Ok(articles)
}

// ---------------------------------------------------------------------------
// GitHub repository search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Repo>,
}

/// A bare word is treated as a language qualifier; anything with spaces or
/// an explicit qualifier is passed through as-is. Both get a popularity
/// floor so random picks stay interesting.
pub fn search_query(input: &str) -> String {
    let input = input.trim();
    if input.contains(' ') || input.contains(':') {
        format!("{input} stars:>1000")
    } else {
        format!("language:{input} stars:>1000")
    }
}

pub fn fetch_repos(query: &str) -> Result<Vec<Repo>> {
    let response = agent()
        .get(GITHUB_SEARCH_URL)
        .query("q", &search_query(query))
        .query("sort", "stars")
        .query("order", "desc")
        .query("per_page", "100")
        .set("Accept", "application/vnd.github+json")
        .call()
        .context("GitHub search failed")?;
    let parsed: SearchResponse = response
        .into_json()
        .context("unexpected GitHub response shape")?;
    Ok(parsed.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_word_becomes_language_qualifier() {
        assert_eq!(search_query("rust"), "language:rust stars:>1000");
        assert_eq!(search_query("  go "), "language:go stars:>1000");
    }

    #[test]
    fn qualified_queries_pass_through() {
        assert_eq!(
            search_query("topic:cli language:rust"),
            "topic:cli language:rust stars:>1000"
        );
        assert_eq!(search_query("web framework"), "web framework stars:>1000");
    }
}
