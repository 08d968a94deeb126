use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

pub const DEFAULT_EDITOR: &str = "code";
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionMatch {
    Any,
    /// Lowercased suffixes matched against top-level entry names.
    Suffixes(Vec<String>),
}

impl ExtensionMatch {
    fn matches_any(&self, entries: &[String]) -> bool {
        match self {
            Self::Any => true,
            Self::Suffixes(suffixes) => entries
                .iter()
                .any(|entry| suffixes.iter().any(|suffix| entry.ends_with(suffix.as_str()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorRule {
    pub command: String,
    pub extensions: ExtensionMatch,
}

/// Ordered editor rules with a fallback command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorRouting {
    rules: Vec<EditorRule>,
    fallback: String,
}

impl Default for EditorRouting {
    fn default() -> Self {
        Self::single(DEFAULT_EDITOR)
    }
}

impl EditorRouting {
    /// One wildcard rule: every repository opens with `command`.
    pub fn single(command: &str) -> Self {
        let command = command.trim();
        let command = if command.is_empty() {
            DEFAULT_EDITOR
        } else {
            command
        };
        Self {
            rules: vec![EditorRule {
                command: command.to_string(),
                extensions: ExtensionMatch::Any,
            }],
            fallback: command.to_string(),
        }
    }

    /// Parse `command=ext1,ext2` lines. Blank lines, `#` comments and malformed lines
    /// are skipped.
    pub fn parse(config: &str, default_command: Option<&str>) -> Self {
        let rules = config
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(parse_rule)
            .collect::<Vec<_>>();

        let fallback = rules
            .iter()
            .find(|rule| rule.extensions == ExtensionMatch::Any)
            .map(|rule| rule.command.clone())
            .or_else(|| {
                default_command
                    .map(str::trim)
                    .filter(|command| !command.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[EditorRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Pick the editor for the repository at `repo`.
    ///
    /// The directory is listed at most once, and only when a non-wildcard rule is
    /// reached before any wildcard rule.
    pub fn editor_for(&self, repo: &Path) -> &str {
        let mut entries: Option<Vec<String>> = None;
        for rule in &self.rules {
            if rule.extensions == ExtensionMatch::Any {
                return &rule.command;
            }
            let entries = entries.get_or_insert_with(|| list_top_level(repo));
            if rule.extensions.matches_any(entries) {
                debug!(repo = %repo.display(), editor = %rule.command, "matched editor rule");
                return &rule.command;
            }
        }
        &self.fallback
    }
}

fn parse_rule(line: &str) -> Option<EditorRule> {
    let parts = line.split('=').collect::<Vec<_>>();
    let [command, extensions] = parts.as_slice() else {
        return None;
    };
    let command = command.trim();
    if command.is_empty() {
        return None;
    }

    let extensions = extensions
        .split(',')
        .map(|extension| extension.trim().to_lowercase())
        .filter(|extension| !extension.is_empty())
        .collect::<Vec<_>>();
    if extensions.is_empty() {
        return None;
    }

    let extensions = if extensions.iter().any(|extension| extension == WILDCARD) {
        ExtensionMatch::Any
    } else {
        ExtensionMatch::Suffixes(extensions)
    };
    Some(EditorRule {
        command: command.to_string(),
        extensions,
    })
}

fn list_top_level(repo: &Path) -> Vec<String> {
    let mut out = Vec::new();
    for entry in WalkDir::new(repo).min_depth(1).max_depth(1) {
        match entry {
            Ok(entry) => out.push(entry.file_name().to_string_lossy().to_lowercase()),
            Err(error) => {
                warn!(repo = %repo.display(), %error, "failed to list repository");
                break;
            }
        }
    }
    out
}
