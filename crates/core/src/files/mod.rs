//! Files module - a folder tree of text files keyed by parent id.

mod files_model;
mod files_tree;

pub use files_model::{FileItem, FileType};
pub use files_tree::{breadcrumbs, children, descendant_ids};
