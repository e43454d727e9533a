use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User-level settings: repositories linked for code review and the
/// languages available to the coding sandbox (language -> file extension).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    #[serde(default)]
    pub repositories: Vec<String>,
    #[serde(default)]
    pub sandbox_languages: BTreeMap<String, String>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            repositories: Vec::new(),
            sandbox_languages: BTreeMap::new(),
            version: default_version(),
        }
    }
}

impl UserConfig {
    /// Add a repository path. Returns false if it was already linked.
    pub fn add_repository(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.repositories.contains(&path) {
            return false;
        }
        self.repositories.push(path);
        true
    }

    /// Add or update a sandbox language. Returns false if the language was
    /// already configured with the same extension.
    pub fn add_sandbox_language(
        &mut self,
        language: impl Into<String>,
        extension: impl Into<String>,
    ) -> bool {
        let language = language.into();
        let extension = extension.into();
        if self.sandbox_languages.get(&language) == Some(&extension) {
            return false;
        }
        self.sandbox_languages.insert(language, extension);
        true
    }
}
