//! Persisted key/value flags.
//!
//! The tracker never talks to the browser directly; it reads and writes
//! named string flags through this trait. Implementations exist over
//! cookies (guidepost-web) and over a plain map for tests and native hosts.

pub mod memory;

pub use memory::MemoryStore;

use std::time::Duration;

/// A persisted string flag store. Last-write-wins, no transactions;
/// reads immediately reflect prior writes in the same execution context.
pub trait FlagStore {
    /// Read a flag. `None` means the flag was never set (or expired).
    fn get(&self, key: &str) -> Option<String>;

    /// Write a flag with a time-to-live. Idempotent: re-setting the same
    /// key extends the TTL but does not change semantics.
    fn set(&mut self, key: &str, value: &str, ttl: Duration);

    /// Enumerate all flags whose key starts with `prefix`.
    /// Returns (key-suffix, value) pairs with the prefix stripped.
    fn get_all(&self, prefix: &str) -> Vec<(String, String)>;

    /// Delete a flag. Deleting an absent key is a no-op.
    fn remove(&mut self, key: &str);
}
