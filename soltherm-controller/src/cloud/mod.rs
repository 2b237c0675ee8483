mod config;
mod rest;
mod store;
mod sync;

pub use config::RemoteConfig;
pub use rest::RestStore;
pub use store::RemoteStore;
pub use sync::{CloudSync, LogRecord};
