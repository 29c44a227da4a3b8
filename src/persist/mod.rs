//! Painting persistence: stores, the background request manager and outcomes.

pub mod manager;
pub mod store;
pub mod types;


pub use manager::PersistManager;
pub use store::{GalleryStore, INDEX_FILE, PaintingStore};
pub use types::{PaintingRecord, PersistError, PersistOutcome, decide};
