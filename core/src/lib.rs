pub mod errors;
pub mod protocol;
pub mod types;

pub use errors::*;
pub use types::*;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use uuid::Uuid;
