//! Alfred script filter JSON.

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AlfredResult {
    pub items: Vec<AlfredItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AlfredItem {
    pub title: String,
    pub subtitle: String,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods: Option<AlfredMods>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AlfredMods {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmd: Option<AlfredModItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<AlfredModItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AlfredModItem {
    pub valid: bool,
    pub arg: String,
    pub subtitle: String,
}

impl AlfredItem {
    pub fn message(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            match_text: None,
            arg: None,
            mods: None,
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn with_mods(mut self, mods: AlfredMods) -> Self {
        self.mods = Some(mods);
        self
    }
}

impl AlfredModItem {
    pub fn new(arg: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            valid: true,
            arg: arg.into(),
            subtitle: subtitle.into(),
        }
    }
}

impl AlfredResult {
    pub fn single(item: AlfredItem) -> Self {
        Self { items: vec![item] }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize Alfred result")
    }
}

impl From<Vec<AlfredItem>> for AlfredResult {
    fn from(items: Vec<AlfredItem>) -> Self {
        Self { items }
    }
}

/// Shell command that passes `target` as one double-quoted argument.
pub fn quoted_command(program: &str, target: &str) -> String {
    format!("{program} \"{target}\"")
}
