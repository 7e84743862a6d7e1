//! On-disk side of a multi-version documentation output directory.

mod atomic;
mod diff;
mod error;
mod inventory;
mod links;
mod metadata;
mod paths;
mod remove;
pub mod render;

pub use diff::{LabelledDiff, pending_changes};
pub use error::TreeError;
pub use inventory::DocsTree;
pub use links::{
    is_broken_symlink, is_symlink, make_symlinks, minor_link_targets, unlink_broken_symlinks,
};
pub use metadata::Metadata;
pub use paths::{
    DocsPaths, INDEX_HTML_FILE, METADATA_FILE, VERSIONS_JS_FILE, display_label, minor_key,
};
pub use remove::{Removal, remove_builds};
