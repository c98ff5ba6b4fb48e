//! Live-reload preview server for sitewright.
//!
//! Renders the configuration file on every request, watches it for changes
//! and tells connected browsers to reload over a WebSocket.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{ConfigWatcher, WatchEvent};
pub use websocket::{ReloadHub, ReloadMessage};
