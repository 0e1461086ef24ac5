pub mod id_utils;
pub mod number_utils;
pub mod serde_utils;
pub mod time_utils;

pub use id_utils::new_id;
