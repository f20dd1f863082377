// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable key/value storage (the local-storage seam).
//!
//! The session store never touches a concrete backend; it is handed a
//! [`KeyValueStore`] at construction so it can be driven by an in-memory
//! map in tests and by a JSON file on disk in the CLI.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Storage keys as constants.
pub mod keys {
    /// Persisted `{token, user}` session object.
    pub const SESSION: &str = "qci.auth.session";
}

/// Synchronous string key/value storage, shaped like browser local storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for `key`, `Ok(None)` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
