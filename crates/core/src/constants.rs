/// Key under which the whole aggregate document is persisted.
pub const STORAGE_KEY: &str = "monomind_db";

/// Currency symbol used until the user picks one.
pub const DEFAULT_CURRENCY: &str = "$";

/// Id of the canonical greeting message seeded on login and on chat clear.
pub const GREETING_MESSAGE_ID: &str = "init";

/// Name of the assistant as it introduces itself.
pub const ASSISTANT_NAME: &str = "2ndBrain";

/// Date format used for calendar days and habit log keys.
pub const DAY_FORMAT: &str = "%Y-%m-%d";
