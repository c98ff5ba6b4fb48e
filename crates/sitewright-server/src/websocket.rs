//! WebSocket-based live reload.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Path of the reload WebSocket endpoint.
pub const RELOAD_SOCKET_PATH: &str = "/__reload";

/// Path the reload client script is served from.
pub const RELOAD_SCRIPT_PATH: &str = "/__reload.js";

/// Messages sent to preview clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReloadMessage {
    /// The configuration changed; reload the page
    Reload,

    /// The configuration file failed to load; the previous one is still served
    ConfigError {
        /// Human readable error
        message: String,
    },

    /// Connection established
    Connected,
}

impl ReloadMessage {
    /// Encode as a JSON text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Broadcasts reload messages to every connected client.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    sender: broadcast::Sender<ReloadMessage>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: ReloadMessage) {
        // No receivers is not an error
        let _ = self.sender.send(msg);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadMessage> {
        self.sender.subscribe()
    }

    /// Number of connected clients.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Client script connecting back to the server it was loaded from.
pub fn reload_client_script() -> String {
    format!(
        r#"
(function() {{
  'use strict';

  const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  const ws = new WebSocket(scheme + location.host + '{socket}');
  let reconnectAttempts = 0;
  const maxReconnectAttempts = 10;

  function showError(message) {{
    let banner = document.getElementById('sitewright-error');
    if (!banner) {{
      banner = document.createElement('pre');
      banner.id = 'sitewright-error';
      banner.style.cssText = 'position:fixed;bottom:0;left:0;right:0;margin:0;padding:1rem;' +
        'background:#7f1d1d;color:#fff;font:13px monospace;white-space:pre-wrap;z-index:9999';
      document.body.appendChild(banner);
    }}
    banner.textContent = message;
  }}

  ws.onopen = function() {{
    console.log('[sitewright] Connected');
    reconnectAttempts = 0;
  }};

  ws.onmessage = function(event) {{
    const msg = JSON.parse(event.data);

    switch (msg.type) {{
      case 'reload':
        location.reload();
        break;

      case 'config_error':
        console.error('[sitewright]', msg.message);
        showError(msg.message);
        break;

      case 'connected':
        console.log('[sitewright] Live reload active');
        break;
    }}
  }};

  ws.onclose = function() {{
    console.log('[sitewright] Disconnected');
    if (reconnectAttempts < maxReconnectAttempts) {{
      reconnectAttempts++;
      setTimeout(function() {{
        location.reload();
      }}, 1000 * reconnectAttempts);
    }}
  }};
}})();
"#,
        socket = RELOAD_SOCKET_PATH
    )
}
