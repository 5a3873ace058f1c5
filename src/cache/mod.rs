pub mod content;
pub mod store;

pub use content::{ContentCache, FetchState};
pub use store::SnapshotStore;
