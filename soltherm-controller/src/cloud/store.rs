//! Remote key-value store capability.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Capability to read and write JSON values at slash-separated paths in
/// the remote store.
///
/// The core reaches the store only through this trait so tests can stand
/// in an in-memory fake that simulates failures.
#[async_trait]
pub trait RemoteStore: Send {
    /// Establish the store session.
    ///
    /// Implementations may not reliably detect connectivity problems at
    /// this stage. Treat a successful return as unverified until the
    /// first read or write confirms reachability.
    async fn connect(&mut self, host: &str, auth: &str) -> Result<()>;

    /// Read the value at `path`.
    async fn get(&mut self, path: &str) -> Result<Value>;

    /// Replace the value at `path`.
    async fn set(&mut self, path: &str, value: &Value) -> Result<()>;
}
