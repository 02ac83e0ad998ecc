//! Durable client-side state for the SRMiggy client.
//!
//! Holds the persistent cart and the small set of user preferences the web
//! client kept in browser storage. All operations are synchronous and
//! write-through.

pub mod cart;
pub mod error;
pub mod kv;
pub mod preferences;
pub mod snapshot;

pub use cart::{CartStore, VendorSwitch};
pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use preferences::Preferences;
pub use snapshot::CART_SCHEMA_VERSION;
