//! Browser, editor, sandbox file and git plumbing for the interactive
//! handlers.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

pub fn open_in_browser(url: &str) -> Result<()> {
    if !url.starts_with("https://") && !url.starts_with("http://") {
        bail!("refusing to open non-http URL: {url}");
    }
    open::that(url).with_context(|| format!("could not open {url}"))?;
    Ok(())
}

pub fn open_in_editor(path: &Path) -> Result<()> {
    open::that(path).with_context(|| format!("could not open {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Sandbox files
// ---------------------------------------------------------------------------

/// Ensure `<dir>/daily.<extension>` exists, seeding it with a dated comment
/// header on first creation. Returns the file path.
pub fn ensure_sandbox_file(dir: &Path, extension: &str, date: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("could not create {}", dir.display()))?;
    let path = dir.join(format!("daily.{extension}"));
    if !path.exists() {
        let header = comment_header(extension, date);
        std::fs::write(&path, header)
            .with_context(|| format!("could not create {}", path.display()))?;
    }
    Ok(path)
}

fn comment_header(extension: &str, date: &str) -> String {
    let line = format!("Daily sandbox - {date}");
    match extension {
        "html" => format!("<!-- {line} -->\n"),
        "css" | "c" => format!("/* {line} */\n"),
        "py" | "rb" | "sh" => format!("# {line}\n"),
        _ => format!("// {line}\n"),
    }
}

// ---------------------------------------------------------------------------
// Git
// ---------------------------------------------------------------------------

/// True when `path` is the working tree of a git repository.
pub fn is_git_repo(path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(path)
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// One-line summaries of yesterday's commits in `repo`.
pub fn commits_yesterday(repo: &Path) -> Result<Vec<String>> {
    let output = Command::new("git")
        .args([
            "--no-pager",
            "log",
            "--since=yesterday.midnight",
            "--until=midnight",
            "--oneline",
        ])
        .current_dir(repo)
        .output()
        .with_context(|| format!("could not run git in {}", repo.display()))?;
    if !output.status.success() {
        bail!(
            "git log failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sandbox_file_created_once_with_header() {
        let dir = TempDir::new().unwrap();
        let path = ensure_sandbox_file(dir.path(), "rs", "2025-06-11").unwrap();
        assert_eq!(path.file_name().unwrap(), "daily.rs");
        let first = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, "// Daily sandbox - 2025-06-11\n");

        // A later call must not clobber the user's scratch work.
        std::fs::write(&path, "fn main() {}\n").unwrap();
        ensure_sandbox_file(dir.path(), "rs", "2025-06-12").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fn main() {}\n");
    }

    #[test]
    fn comment_headers_match_language() {
        assert!(comment_header("html", "d").starts_with("<!--"));
        assert!(comment_header("css", "d").starts_with("/*"));
        assert!(comment_header("py", "d").starts_with("#"));
        assert!(comment_header("js", "d").starts_with("//"));
    }

    #[test]
    fn plain_directory_is_not_a_repo() {
        let dir = TempDir::new().unwrap();
        assert!(!is_git_repo(dir.path()));
        assert!(!is_git_repo(&dir.path().join("missing")));
    }
}
