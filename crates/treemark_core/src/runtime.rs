use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::editor::EditorRouting;

pub const BOOKMARKS_RELATIVE_PATH: &str = "Library/Application Support/SourceTree/browser.plist";
pub const DEFAULT_APP_PATH: &str = "/Applications/SourceTree.app";
pub const APP_HOMEPAGE: &str = "https://sourcetreeapp.com/";
pub const ISSUE_URL: &str = "https://github.com/oe/sourcetree-alfred-workflow/issues/new";

pub const BOOKMARKS_PATH_ENV: &str = "TREEMARK_BOOKMARKS_PATH";
pub const APP_PATH_ENV: &str = "TREEMARK_APP_PATH";
pub const EDITOR_CLI_ENV: &str = "EDITOR_CLI";
pub const EDITOR_CLI_CONFIG_ENV: &str = "EDITOR_CLI_CONFIG";
pub const LOG_ENV: &str = "TREEMARK_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Env,
    Default,
}

impl ValueSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Default => "default",
        }
    }
}

/// Everything a run needs from the environment, resolved once at startup.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub bookmarks_path: PathBuf,
    pub app_path: PathBuf,
    pub editors: EditorRouting,
    pub issue_url: String,
    pub bookmarks_source: ValueSource,
    pub app_source: ValueSource,
    pub editors_source: ValueSource,
}

impl WorkflowConfig {
    pub fn from_process() -> Result<Self> {
        resolve_config_with_lookup(|key| env::var(key).ok())
    }

    pub fn diagnostics(&self) -> String {
        format!(
            "bookmarks_path={} ({})\napp_path={} ({})\neditor_rules={} ({})\neditor_fallback={}",
            normalize_for_display(&self.bookmarks_path),
            self.bookmarks_source.as_str(),
            normalize_for_display(&self.app_path),
            self.app_source.as_str(),
            self.editors.rules().len(),
            self.editors_source.as_str(),
            self.editors.fallback(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStatus {
    pub bookmarks_exist: bool,
    pub app_installed: bool,
}

pub fn inspect_source(config: &WorkflowConfig) -> SourceStatus {
    SourceStatus {
        bookmarks_exist: config.bookmarks_path.is_file(),
        app_installed: config.app_path.exists(),
    }
}

pub fn resolve_config_with_lookup<F>(lookup_env: F) -> Result<WorkflowConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| {
        lookup_env(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let (bookmarks_path, bookmarks_source) = if let Some(value) = lookup(BOOKMARKS_PATH_ENV) {
        (PathBuf::from(value), ValueSource::Env)
    } else if let Some(home) = lookup("HOME") {
        (
            Path::new(&home).join(BOOKMARKS_RELATIVE_PATH),
            ValueSource::Default,
        )
    } else {
        bail!("HOME is not set and {BOOKMARKS_PATH_ENV} was not provided");
    };

    let (app_path, app_source) = match lookup(APP_PATH_ENV) {
        Some(value) => (PathBuf::from(value), ValueSource::Env),
        None => (PathBuf::from(DEFAULT_APP_PATH), ValueSource::Default),
    };

    let editor_cli = lookup(EDITOR_CLI_ENV);
    let (editors, editors_source) = match lookup_env(EDITOR_CLI_CONFIG_ENV) {
        Some(config) if !config.trim().is_empty() => (
            EditorRouting::parse(&config, editor_cli.as_deref()),
            ValueSource::Env,
        ),
        _ => match editor_cli {
            Some(command) => (EditorRouting::single(&command), ValueSource::Env),
            None => (EditorRouting::default(), ValueSource::Default),
        },
    };

    Ok(WorkflowConfig {
        bookmarks_path,
        app_path,
        editors,
        issue_url: ISSUE_URL.to_string(),
        bookmarks_source,
        app_source,
        editors_source,
    })
}

fn normalize_for_display(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::{
        APP_PATH_ENV, BOOKMARKS_PATH_ENV, DEFAULT_APP_PATH, EDITOR_CLI_CONFIG_ENV,
        EDITOR_CLI_ENV, ValueSource, inspect_source, resolve_config_with_lookup,
    };
    use crate::editor::DEFAULT_EDITOR;

    fn lookup(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_derive_from_home() {
        let env = lookup(&[("HOME", "/Users/dev")]);
        let config = resolve_config_with_lookup(|key| env.get(key).cloned()).expect("resolve");
        assert_eq!(
            config.bookmarks_path,
            PathBuf::from("/Users/dev/Library/Application Support/SourceTree/browser.plist")
        );
        assert_eq!(config.bookmarks_source, ValueSource::Default);
        assert_eq!(config.app_path, PathBuf::from(DEFAULT_APP_PATH));
        assert_eq!(config.editors.fallback(), DEFAULT_EDITOR);
        assert_eq!(config.editors_source, ValueSource::Default);
    }

    #[test]
    fn env_overrides_win() {
        let env = lookup(&[
            ("HOME", "/Users/dev"),
            (BOOKMARKS_PATH_ENV, " /tmp/browser.plist "),
            (APP_PATH_ENV, "/tmp/SourceTree.app"),
            (EDITOR_CLI_ENV, "cursor"),
        ]);
        let config = resolve_config_with_lookup(|key| env.get(key).cloned()).expect("resolve");
        assert_eq!(config.bookmarks_path, PathBuf::from("/tmp/browser.plist"));
        assert_eq!(config.bookmarks_source, ValueSource::Env);
        assert_eq!(config.app_path, PathBuf::from("/tmp/SourceTree.app"));
        assert_eq!(config.app_source, ValueSource::Env);
        assert_eq!(config.editors.fallback(), "cursor");
        assert_eq!(config.editors_source, ValueSource::Env);
    }

    #[test]
    fn editor_config_takes_precedence_over_editor_cli() {
        let env = lookup(&[
            ("HOME", "/Users/dev"),
            (EDITOR_CLI_ENV, "cursor"),
            (EDITOR_CLI_CONFIG_ENV, "xed=.xcodeproj\n# comment\nzed=*"),
        ]);
        let config = resolve_config_with_lookup(|key| env.get(key).cloned()).expect("resolve");
        assert_eq!(config.editors.rules().len(), 2);
        assert_eq!(config.editors.fallback(), "zed");
    }

    #[test]
    fn blank_values_are_ignored() {
        let env = lookup(&[
            ("HOME", "/Users/dev"),
            (BOOKMARKS_PATH_ENV, "   "),
            (EDITOR_CLI_CONFIG_ENV, "\n  \n"),
        ]);
        let config = resolve_config_with_lookup(|key| env.get(key).cloned()).expect("resolve");
        assert_eq!(config.bookmarks_source, ValueSource::Default);
        assert_eq!(config.editors_source, ValueSource::Default);
    }

    #[test]
    fn missing_home_without_override_fails() {
        let error = resolve_config_with_lookup(|_| None).expect_err("must fail");
        assert!(error.to_string().contains("HOME is not set"));
    }

    #[test]
    fn inspect_source_checks_file_and_bundle() {
        let temp = tempdir().expect("tempdir");
        let plist = temp.path().join("browser.plist");
        let app = temp.path().join("SourceTree.app");
        let env = lookup(&[
            (BOOKMARKS_PATH_ENV, plist.to_str().expect("utf8 path")),
            (APP_PATH_ENV, app.to_str().expect("utf8 path")),
        ]);
        let config = resolve_config_with_lookup(|key| env.get(key).cloned()).expect("resolve");

        let status = inspect_source(&config);
        assert!(!status.bookmarks_exist);
        assert!(!status.app_installed);

        fs::write(&plist, b"").expect("write plist");
        fs::create_dir_all(&app).expect("create app");
        let status = inspect_source(&config);
        assert!(status.bookmarks_exist);
        assert!(status.app_installed);
        assert!(config.diagnostics().contains("bookmarks_path="));
    }
}
