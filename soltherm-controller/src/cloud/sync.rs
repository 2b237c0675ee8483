//! Configuration refresh and wraparound telemetry log.
//!
//! Pulls the override configuration from the remote store field by field
//! with partial-failure tolerance, and appends timestamped samples to a
//! fixed-capacity circular log, with bounded retry on write failure.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::config::{CONFIG_PATH, RemoteConfig};
use super::store::RemoteStore;
use crate::board::{ActivityPattern, BoardStatus};
use crate::clock;
use crate::error::Result;

/// Root path for telemetry records; one record per slot under it.
const LOG_PATH: &str = "log";

/// Write attempts per log record before it is dropped.
const LOG_WRITE_ATTEMPTS: u32 = 3;

/// Pause between a failed write attempt and the next.
const LOG_RETRY_DELAY: Duration = Duration::from_millis(100);

/// One telemetry record. Each write fully replaces any prior record at
/// its slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Seconds since the Unix epoch, UTC.
    pub time: i64,
    /// Raw ADC sample from channel 0.
    #[serde(rename = "0")]
    pub channel0: f64,
    /// Raw ADC sample from channel 1.
    #[serde(rename = "1")]
    pub channel1: f64,
    /// Whether the collector was engaged when the samples were taken.
    pub active: bool,
}

/// Remote configuration and telemetry synchronization.
///
/// Owns the mutable parameter set and the log write cursor. The cursor
/// lives only in process memory: a restart resumes writing at slot 0 and
/// eventually overwrites old records, which is accepted wraparound
/// behavior. Single-writer: a second controller writing to the same
/// store would silently corrupt both the config and the log.
pub struct CloudSync<S> {
    store: S,
    config: RemoteConfig,
    cursor: u32,
}

impl<S: RemoteStore> CloudSync<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: RemoteConfig::default(),
            cursor: 0,
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Current log write slot.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Establish the remote store session.
    ///
    /// Not retried. A successful return does not imply the store is
    /// reachable; the session is only verified by the first subsequent
    /// read or write.
    pub async fn connect(&mut self, host: &str, auth: &str) -> Result<()> {
        info!(host, "connecting to remote store");
        self.store.connect(host, auth).await
    }

    /// Update the cached configuration from the remote store.
    ///
    /// Returns false if the config object was inaccessible or any of its
    /// expected fields could not be read, so the caller may retry at its
    /// own cadence. Fields that could be read are updated even when
    /// others fail; an unreachable store leaves every field at its prior
    /// value. Board activity is signaled for the duration and cleared
    /// regardless of outcome.
    pub async fn refresh_config(&mut self, board: &mut dyn BoardStatus) -> bool {
        debug!("updating config from remote store");

        board.signal_activity(ActivityPattern::ConfigRefresh);

        let success = match self.store.get(CONFIG_PATH).await {
            Ok(obj) => self.config.apply(&obj),
            Err(err) => {
                warn!(%err, "config object inaccessible, keeping previous values");
                false
            }
        };

        board.clear_activity();
        success
    }

    /// Append one telemetry record to the next log slot.
    ///
    /// Best effort: up to three write attempts with a short pause between
    /// failures, terminating early on the first success. Success advances
    /// the cursor, wrapping at the configured capacity. Exhaustion drops
    /// the record with the cursor unchanged; the loss is observable only
    /// in the trace output.
    ///
    /// Refuses to write until a log capacity has been pulled from the
    /// store, since no slot can be addressed in a zero-capacity log.
    pub async fn append_log(
        &mut self,
        board: &mut dyn BoardStatus,
        timestamp: i64,
        channel0: f64,
        channel1: f64,
        active: bool,
    ) {
        let max_entries = self.config.max_entries();
        if max_entries == 0 {
            warn!("log capacity not configured, dropping record");
            return;
        }

        let record = LogRecord {
            time: timestamp,
            channel0,
            channel1,
            active,
        };
        let value = match serde_json::to_value(&record) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "failed to encode log record, dropping it");
                return;
            }
        };

        let slot_path = format!("{LOG_PATH}/{}", self.cursor);

        for attempt in 1..=LOG_WRITE_ATTEMPTS {
            board.signal_activity(ActivityPattern::LogWrite);
            let result = self.store.set(&slot_path, &value).await;
            board.clear_activity();

            match result {
                Ok(()) => {
                    info!(
                        slot = %slot_path,
                        time = %clock::local_timestamp(timestamp, self.config.gmt_offset().unwrap_or(0)),
                        active,
                        "log record written"
                    );
                    self.cursor = (self.cursor + 1) % max_entries;
                    return;
                }
                Err(err) if attempt < LOG_WRITE_ATTEMPTS => {
                    debug!(slot = %slot_path, attempt, %err, "log write failed, retrying");
                    tokio::time::sleep(LOG_RETRY_DELAY).await;
                }
                Err(err) => {
                    warn!(
                        slot = %slot_path,
                        attempts = LOG_WRITE_ATTEMPTS,
                        %err,
                        "log write failed, dropping record"
                    );
                }
            }
        }
    }
}
