//! Prediction cache
//!
//! Provides content-addressed caching of salary estimates keyed by a
//! SHA256 fingerprint of the normalized request.
//!
//! # Entry Lifecycle
//!
//! | Event | Effect |
//! |-------|--------|
//! | First successful estimate | Row inserted |
//! | Same fingerprint stored again | Text and timestamp replaced |
//! | Failed or empty estimate | Nothing written |
//!
//! Entries are never evicted.

pub mod fingerprint;
pub mod store;

pub use fingerprint::{fingerprint, Fingerprint, FINGERPRINT_LEN};
pub use store::{CacheEntry, ResultStore, SqliteStore};
