// Persistence for job records
pub mod sqlite;

pub use sqlite::{JobStore, SqliteStorage};
