//! User ledger: records, the ledger map and its durable store.
//!
//! ## Key Types
//!
//! - `UserRecord`: Display name, owned cards, points
//! - `Ledger`: user id -> record, O(1) snapshot clones
//! - `LedgerBackend`: Storage seam (`JsonFileBackend`, `MemoryBackend`)
//! - `LedgerStore`: Serialized load-mutate-save over a backend
//!
//! ## File Format
//!
//! ```json
//! { "1234": { "username": "ada", "cards": ["Pebble"], "points": 1 } }
//! ```

pub mod backend;
pub mod record;
pub mod snapshot;
pub mod store;

pub use backend::{JsonFileBackend, LedgerBackend, MemoryBackend};
pub use record::UserRecord;
pub use snapshot::Ledger;
pub use store::{LedgerStore, Registration};
