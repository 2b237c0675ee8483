//! REST-backed implementation of [`RemoteStore`].

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::store::RemoteStore;
use crate::error::{Error, Result};

/// Remote store client speaking the store's JSON-over-HTTP interface:
/// `GET`/`PUT` on `{base}/{path}.json` with the auth token as a query
/// parameter.
pub struct RestStore {
    client: reqwest::Client,
    base_url: Option<String>,
    auth: Option<String>,
}

impl RestStore {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: None,
            auth: None,
        }
    }

    fn url(&self, path: &str) -> Result<String> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| Error::RemoteUnavailable("store session not established".into()))?;
        let auth = self.auth.as_deref().unwrap_or_default();
        Ok(format!("{base}/{path}.json?auth={auth}"))
    }
}

impl Default for RestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn connect(&mut self, host: &str, auth: &str) -> Result<()> {
        // No handshake on this interface, so this cannot fail even when
        // the store is unreachable. Reachability is only confirmed by the
        // first read or write.
        self.base_url = Some(format!("https://{host}"));
        self.auth = Some(auth.to_owned());
        Ok(())
    }

    async fn get(&mut self, path: &str) -> Result<Value> {
        let url = self.url(path)?;
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| Error::RemoteUnavailable(err.to_string()))?
            .error_for_status()
            .map_err(|err| Error::RemoteUnavailable(err.to_string()))?;
        let value = response
            .json::<Value>()
            .await
            .map_err(|err| Error::RemoteUnavailable(err.to_string()))?;
        debug!(path, "remote get");
        Ok(value)
    }

    async fn set(&mut self, path: &str, value: &Value) -> Result<()> {
        let url = self.url(path)?;
        self.client
            .put(&url)
            .json(value)
            .send()
            .await
            .map_err(|err| Error::RemoteUnavailable(err.to_string()))?
            .error_for_status()
            .map_err(|err| Error::RemoteUnavailable(err.to_string()))?;
        debug!(path, "remote set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_refuse_reads_before_connect() {
        let mut store = RestStore::new();

        let result = store.get("config").await;

        assert!(matches!(result, Err(Error::RemoteUnavailable(_))));
    }

    #[tokio::test]
    async fn should_build_urls_from_session_parameters() {
        let mut store = RestStore::new();
        store
            .connect("controller.example.com", "secret")
            .await
            .unwrap();

        assert_eq!(
            store.url("log/3").unwrap(),
            "https://controller.example.com/log/3.json?auth=secret"
        );
    }
}
