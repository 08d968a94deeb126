use std::path::Path;

use anyhow::Error;
use tracing::{debug, warn};
use url::Url;

use crate::alfred::{AlfredItem, AlfredModItem, AlfredMods, AlfredResult, quoted_command};
use crate::archive::read_archive_strings;
use crate::bookmarks::{Bookmark, extract_bookmarks};
use crate::editor::EditorRouting;
use crate::ranking::rank_bookmarks;
use crate::runtime::{APP_HOMEPAGE, WorkflowConfig, inspect_source};

pub const ISSUE_TITLE: &str = "SourceTree plist parse error";

/// Result of one run; every variant renders to at least one item.
#[derive(Debug)]
pub enum Outcome {
    /// SourceTree is not installed and there is no bookmark store.
    SourceMissing,
    /// The bookmark store exists but could not be read or decoded.
    DecodeError(Error),
    /// The store holds no bookmarks.
    Empty,
    /// A non-empty query matched nothing.
    NoMatch,
    Bookmarks(Vec<Bookmark>),
}

pub fn run(config: &WorkflowConfig, query: &str) -> Outcome {
    let status = inspect_source(config);
    if !status.bookmarks_exist {
        debug!(
            path = %config.bookmarks_path.display(),
            app_installed = status.app_installed,
            "bookmark store not found"
        );
        return if status.app_installed {
            Outcome::Empty
        } else {
            Outcome::SourceMissing
        };
    }

    let bookmarks = match load_bookmarks(&config.bookmarks_path) {
        Ok(bookmarks) => bookmarks,
        Err(error) => {
            warn!("{error:#}");
            return Outcome::DecodeError(error);
        }
    };
    filter_outcome(bookmarks, query)
}

pub fn load_bookmarks(path: &Path) -> anyhow::Result<Vec<Bookmark>> {
    let tokens = read_archive_strings(path)?;
    let bookmarks = extract_bookmarks(tokens);
    debug!(count = bookmarks.len(), "extracted bookmarks");
    Ok(bookmarks)
}

/// Apply `query` to already loaded bookmarks.
pub fn filter_outcome(bookmarks: Vec<Bookmark>, query: &str) -> Outcome {
    if bookmarks.is_empty() {
        return Outcome::Empty;
    }
    let ranked = rank_bookmarks(bookmarks, query);
    if ranked.is_empty() {
        Outcome::NoMatch
    } else {
        Outcome::Bookmarks(ranked)
    }
}

impl Outcome {
    pub fn into_result(self, config: &WorkflowConfig) -> AlfredResult {
        match self {
            Self::SourceMissing => AlfredResult::single(
                AlfredItem::message(
                    "SourceTree not installed",
                    "Press enter to open SourceTree homepage and download it",
                )
                .with_arg(quoted_command("open", APP_HOMEPAGE)),
            ),
            Self::DecodeError(error) => AlfredResult::single(
                AlfredItem::message(
                    "Error occurred",
                    "Press enter to open github and report an issue to me",
                )
                .with_arg(quoted_command(
                    "open",
                    &issue_report_url(&config.issue_url, &error),
                )),
            ),
            Self::Empty => AlfredResult::single(AlfredItem::message(
                "Your SourceTree Bookmark Is Empty",
                "Please add repos to SourceTree first",
            )),
            Self::NoMatch => AlfredResult::single(AlfredItem::message(
                "Nothing found",
                "Please try another thing",
            )),
            Self::Bookmarks(bookmarks) => bookmarks
                .iter()
                .map(|bookmark| bookmark_item(bookmark, &config.editors))
                .collect::<Vec<_>>()
                .into(),
        }
    }
}

pub fn bookmark_item(bookmark: &Bookmark, editors: &EditorRouting) -> AlfredItem {
    let editor = editors.editor_for(Path::new(&bookmark.path));
    AlfredItem::message(&bookmark.name, &bookmark.path)
        .with_arg(&bookmark.path)
        .with_mods(AlfredMods {
            cmd: Some(AlfredModItem::new(
                quoted_command(editor, &bookmark.path),
                "Open in code editor",
            )),
            alt: Some(AlfredModItem::new(
                quoted_command("open", &bookmark.path),
                "Reveal in Finder",
            )),
        })
}

/// New-issue URL prefilled with the error chain.
pub fn issue_report_url(base: &str, error: &Error) -> String {
    let body = format!(
        "error message:\n{error:#}\n\nenvironment info:\nmacOS version: [please fill your version]\ntreemark version: {}",
        env!("CARGO_PKG_VERSION")
    );
    match Url::parse_with_params(base, &[("title", ISSUE_TITLE), ("body", body.as_str())]) {
        Ok(url) => url.to_string(),
        Err(parse_error) => {
            warn!(base, %parse_error, "invalid issue url");
            base.to_string()
        }
    }
}
