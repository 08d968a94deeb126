pub const PATH_SEPARATOR: char = '/';

/// A saved repository: display name plus absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub name: String,
    pub path: String,
}

impl Bookmark {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Pair archive tokens into bookmarks by adjacency.
///
/// A token starting with `/` closes the most recent name token; any other token
/// replaces the pending name. Paths with no pending name and a trailing name with no
/// path are dropped.
pub fn extract_bookmarks<I, S>(tokens: I) -> Vec<Bookmark>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = Vec::new();
    let mut pending_name = String::new();

    for token in tokens {
        let token = token.into();
        if token.starts_with(PATH_SEPARATOR) {
            if pending_name.is_empty() {
                continue;
            }
            out.push(Bookmark {
                name: std::mem::take(&mut pending_name),
                path: token,
            });
        } else {
            pending_name = token;
        }
    }

    out
}
