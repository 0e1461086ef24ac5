//! Notes module - domain models.

mod notes_model;

pub use notes_model::Note;
