//! State module - the aggregate document, the action vocabulary, the pure
//! reducer and the `Store` container that owns and persists the document.

mod actions;
mod app_state;
mod reducer;
mod storage_traits;
mod store;

pub use actions::Action;
pub use app_state::AppState;
pub use reducer::reduce;
pub use storage_traits::{MemoryStorage, StateStorage};
pub use store::Store;
