//! Warga Storage crate - read-only access to the hosted table-store.
//!
//! Defines the [`TableStore`] port used by the context collector, a
//! PostgREST (Supabase) implementation over `reqwest`, and an in-memory
//! store for tests and local runs.

pub mod error;
pub mod memory;
pub mod postgrest;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;
pub use store::TableStore;
pub use types::{AnnouncementRow, TransactionKind, TransactionRow};
