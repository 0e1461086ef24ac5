//! 2ndBrain Core - the personal data document, its reducer and store.
//!
//! This crate holds the domain records, the closed action vocabulary, the
//! pure reducer and the `Store` that owns the document. It is database- and
//! network-agnostic: durable storage plugs in through [`state::StateStorage`],
//! implemented by the `storage-sqlite` crate.

pub mod calendar;
pub mod chat;
pub mod constants;
pub mod crm;
pub mod errors;
pub mod files;
pub mod finance;
pub mod goals;
pub mod insights;
pub mod lookup;
pub mod notes;
pub mod settings;
pub mod state;
pub mod utils;

pub use lookup::{find_by_name, Named};
pub use state::{Action, AppState, Store};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
