//! In-memory narrative store.
//!
//! [`MemoryStore`] implements [`scriptorium_interface::NarrativeStore`]
//! over `HashMap`s behind a single `tokio::sync::RwLock`. Every operation
//! takes the lock once, so each individual write (including cascade
//! deletes and evaluation replacement) is atomic from a caller's
//! perspective. Concurrent writers targeting the same scene still race at
//! the operation level: last write wins, as the concurrency model allows.
//!
//! All data is lost when the store is dropped. SQL persistence is an
//! external collaborator and lives behind the same trait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;

pub use memory::MemoryStore;
