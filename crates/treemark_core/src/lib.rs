pub mod alfred;
pub mod archive;
pub mod bookmarks;
pub mod editor;
pub mod fuzzy;
pub mod ranking;
pub mod runtime;
pub mod workflow;
