use tracing::debug;

use crate::bookmarks::Bookmark;
use crate::fuzzy::{NO_MATCH, score};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedBookmark {
    pub bookmark: Bookmark,
    pub score: usize,
}

/// Keep bookmarks whose name matches `query`, best score first.
///
/// An empty query returns the input untouched. Equal scores keep their original
/// relative order.
pub fn rank_bookmarks(bookmarks: Vec<Bookmark>, query: &str) -> Vec<Bookmark> {
    if query.is_empty() {
        return bookmarks;
    }
    score_bookmarks(bookmarks, query)
        .into_iter()
        .map(|ranked| ranked.bookmark)
        .collect()
}

pub fn score_bookmarks(bookmarks: Vec<Bookmark>, query: &str) -> Vec<RankedBookmark> {
    let total = bookmarks.len();
    let mut ranked = bookmarks
        .into_iter()
        .filter_map(|bookmark| {
            let score = score(&bookmark.name, query);
            (score != NO_MATCH).then_some(RankedBookmark { bookmark, score })
        })
        .collect::<Vec<_>>();
    // `sort_by_key` is stable.
    ranked.sort_by_key(|ranked| ranked.score);
    debug!(query, total, matched = ranked.len(), "ranked bookmarks");
    ranked
}

#[cfg(test)]
mod tests {
    use super::{rank_bookmarks, score_bookmarks};
    use crate::bookmarks::Bookmark;

    fn bookmarks(names: &[&str]) -> Vec<Bookmark> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| Bookmark::new(*name, format!("/repos/{index}")))
            .collect()
    }

    fn names(bookmarks: &[Bookmark]) -> Vec<&str> {
        bookmarks.iter().map(|bookmark| bookmark.name.as_str()).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let input = bookmarks(&["zeta", "alpha", "alpha", "Mid"]);
        let output = rank_bookmarks(input.clone(), "");
        assert_eq!(output, input);
    }

    #[test]
    fn exact_match_ranks_first_and_ties_keep_order() {
        let ranked = score_bookmarks(bookmarks(&["xFoo", "FooBar", "Foo"]), "Foo");
        let order = ranked
            .iter()
            .map(|entry| (entry.bookmark.name.as_str(), entry.score))
            .collect::<Vec<_>>();
        assert_eq!(order, vec![("FooBar", 1), ("Foo", 1), ("xFoo", 2)]);

        let output = rank_bookmarks(bookmarks(&["Foo", "FooBar", "xFoo"]), "Foo");
        assert_eq!(names(&output), vec!["Foo", "FooBar", "xFoo"]);
    }

    #[test]
    fn non_matches_are_dropped() {
        let output = rank_bookmarks(bookmarks(&["alpha", "beta", "gamma"]), "am");
        assert_eq!(names(&output), vec!["gamma"]);
    }

    #[test]
    fn no_match_yields_empty_list() {
        let output = rank_bookmarks(bookmarks(&["alpha", "beta"]), "xyz");
        assert!(output.is_empty());
    }

    #[test]
    fn equal_scores_preserve_input_order() {
        let output = rank_bookmarks(bookmarks(&["web-b", "api", "web-a", "web-c"]), "web");
        assert_eq!(names(&output), vec!["web-b", "web-a", "web-c"]);
    }

    #[test]
    fn paths_are_carried_through() {
        let output = rank_bookmarks(bookmarks(&["one", "two"]), "tw");
        assert_eq!(output, vec![Bookmark::new("two", "/repos/1")]);
    }
}
