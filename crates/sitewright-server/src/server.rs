//! Preview server implementation.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use sitewright_model::{inline_local_images, ConfigStore, Configuration, StoreError};
use sitewright_render::{RenderError, RenderOptions, SiteArtifacts, SiteRenderer};

use crate::watcher::{ConfigWatcher, WatchEvent};
use crate::websocket::{
    reload_client_script, ReloadHub, ReloadMessage, RELOAD_SCRIPT_PATH, RELOAD_SOCKET_PATH,
};

/// Configuration for the preview server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Configuration file to render and watch
    pub config_path: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("sitewright.toml"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind to {0}: {1}")]
    Bind(String, String),

    #[error("File watch error: {0}")]
    Watch(String),

    #[error(transparent)]
    Config(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// The configuration being previewed and the renderer for it.
struct Preview {
    site: Configuration,
    renderer: SiteRenderer,
}

impl Preview {
    /// Load the configuration file, or the defaults when it is missing.
    fn load(store: &ConfigStore) -> Result<Self, ServerError> {
        let mut file = store.load_or_default()?;
        if file.build.inline_images {
            let inlined = inline_local_images(&mut file.site, store.base_dir());
            if inlined > 0 {
                tracing::debug!("Inlined {} local images", inlined);
            }
        }

        let renderer = SiteRenderer::new(RenderOptions {
            escape: file.build.escape,
            extra_scripts: vec![RELOAD_SCRIPT_PATH.to_string()],
        })?;

        Ok(Self {
            site: file.site,
            renderer,
        })
    }

    fn render(&self) -> Result<SiteArtifacts, RenderError> {
        self.renderer.render(&self.site)
    }
}

/// Shared server state.
struct ServerState {
    store: ConfigStore,
    preview: Preview,
    hub: ReloadHub,
}

type SharedState = Arc<RwLock<ServerState>>;

/// Live-reload preview server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the server and run until it fails.
    pub async fn start(self) -> Result<(), ServerError> {
        let store = ConfigStore::new(&self.config.config_path)?;
        let base_dir = store.base_dir().to_path_buf();
        let config_path = store.path().to_path_buf();
        let state = new_state(store)?;

        let (watcher, mut rx) = ConfigWatcher::new(&config_path)
            .map_err(|e| ServerError::Watch(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, base_dir);

        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| ServerError::Bind(addr.clone(), e.to_string()))?;

        tracing::info!("Previewing {} at http://{}", config_path.display(), addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::debug!("Could not open browser: {}", e);
            }
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        Ok(())
    }
}

fn new_state(store: ConfigStore) -> Result<SharedState, ServerError> {
    let preview = Preview::load(&store)?;
    Ok(Arc::new(RwLock::new(ServerState {
        store,
        preview,
        hub: ReloadHub::new(),
    })))
}

fn router(state: SharedState, base_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/style.css", get(style_handler))
        .route("/script.js", get(script_handler))
        .route(RELOAD_SOCKET_PATH, get(ws_handler))
        .route(RELOAD_SCRIPT_PATH, get(reload_script_handler))
        // Relative image paths resolve next to the configuration file
        .fallback_service(ServeDir::new(base_dir))
        .with_state(state)
}

async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    match event {
        WatchEvent::Changed(path) => {
            tracing::info!("Configuration changed: {}", path.display());
            reload(state).await;
        }
        WatchEvent::Removed(path) => {
            tracing::warn!(
                "Configuration removed: {}, serving the last loaded version",
                path.display()
            );
        }
    }
}

/// Load a preview off the async workers.
///
/// Reads the file and inlines images without holding the state lock.
async fn load_preview(store: ConfigStore) -> Result<Preview, String> {
    match tokio::task::spawn_blocking(move || Preview::load(&store)).await {
        Ok(loaded) => loaded.map_err(|e| e.to_string()),
        Err(e) => Err(format!("Reload task failed: {}", e)),
    }
}

/// Reload the configuration file and notify clients.
///
/// A file that fails to load leaves the previous configuration in place.
async fn reload(state: &SharedState) {
    let (store, hub) = {
        let state = state.read().await;
        (state.store.clone(), state.hub.clone())
    };

    match load_preview(store).await {
        Ok(preview) => {
            state.write().await.preview = preview;
            hub.send(ReloadMessage::Reload);
            tracing::debug!("Reloaded {} connected clients", hub.subscriber_count());
        }
        Err(message) => {
            tracing::warn!("Keeping previous configuration: {}", message);
            hub.send(ReloadMessage::ConfigError { message });
        }
    }
}

/// Render the current configuration and respond with one artifact.
async fn artifact_response(
    state: &SharedState,
    content_type: &'static str,
    pick: fn(SiteArtifacts) -> String,
) -> Response {
    let state = state.read().await;

    match state.preview.render() {
        Ok(artifacts) => ([(header::CONTENT_TYPE, content_type)], pick(artifacts)).into_response(),
        Err(e) => {
            tracing::error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn index_handler(State(state): State<SharedState>) -> Response {
    artifact_response(&state, "text/html; charset=utf-8", |a| a.document).await
}

async fn style_handler(State(state): State<SharedState>) -> Response {
    artifact_response(&state, "text/css; charset=utf-8", |a| a.style).await
}

async fn script_handler(State(state): State<SharedState>) -> Response {
    artifact_response(&state, "application/javascript; charset=utf-8", |a| a.script).await
}

async fn reload_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        reload_client_script(),
    )
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = {
        let state = state.read().await;
        state.hub.subscribe()
    };

    if send_message(&mut socket, &ReloadMessage::Connected).await.is_err() {
        return;
    }

    while let Ok(msg) = rx.recv().await {
        if send_message(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ReloadMessage) -> Result<(), ()> {
    let json = msg.to_json().map_err(|e| {
        tracing::error!("Failed to encode reload message: {}", e);
    })?;
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn state_for(path: &std::path::Path) -> SharedState {
        new_state(ConfigStore::new(path).unwrap()).unwrap()
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 7777);
        assert_eq!(server.config.config_path, PathBuf::from("sitewright.toml"));
    }

    #[tokio::test]
    async fn index_injects_reload_client() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sitewright.toml");
        fs::write(&path, "title = \"Preview\"\n").unwrap();
        let state = state_for(&path);

        let response = index_handler(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("<title>Preview</title>"));
        assert!(html.contains("<script src=\"/__reload.js\"></script>"));
    }

    #[tokio::test]
    async fn missing_file_previews_defaults() {
        let temp = tempdir().unwrap();
        let state = state_for(&temp.path().join("absent.toml"));

        let html = body_text(index_handler(State(state)).await).await;

        assert!(html.contains("<title>My Website</title>"));
    }

    #[tokio::test]
    async fn serves_style_and_script() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sitewright.json");
        fs::write(&path, r#"{"title": "Acme"}"#).unwrap();
        let state = state_for(&path);

        let style = style_handler(State(Arc::clone(&state))).await;
        assert_eq!(style.headers()[header::CONTENT_TYPE], "text/css; charset=utf-8");
        assert!(body_text(style).await.contains("@keyframes fadeIn"));

        let script = body_text(script_handler(State(state)).await).await;
        assert!(script.contains("console.log('Acme website loaded!');"));
    }

    #[tokio::test]
    async fn reload_swaps_configuration_and_notifies() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sitewright.toml");
        fs::write(&path, "title = \"Before\"\n").unwrap();
        let state = state_for(&path);
        let mut rx = state.read().await.hub.subscribe();

        fs::write(&path, "title = \"After\"\n").unwrap();
        reload(&state).await;

        assert_eq!(rx.try_recv().unwrap(), ReloadMessage::Reload);
        let html = body_text(index_handler(State(state)).await).await;
        assert!(html.contains("<title>After</title>"));
    }

    #[tokio::test]
    async fn broken_file_keeps_last_good_configuration() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sitewright.toml");
        fs::write(&path, "title = \"Good\"\n").unwrap();
        let state = state_for(&path);
        let mut rx = state.read().await.hub.subscribe();

        fs::write(&path, "title = \n").unwrap();
        reload(&state).await;

        match rx.try_recv().unwrap() {
            ReloadMessage::ConfigError { message } => assert!(message.contains("sitewright.toml")),
            other => panic!("expected config error, got {other:?}"),
        }
        let html = body_text(index_handler(State(state)).await).await;
        assert!(html.contains("<title>Good</title>"));
    }

    #[tokio::test]
    async fn escape_policy_comes_from_build_table() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sitewright.toml");
        fs::write(&path, "title = \"A & B\"\n\n[build]\nescape = \"html\"\n").unwrap();
        let state = state_for(&path);

        let html = body_text(index_handler(State(state)).await).await;

        assert!(html.contains("<title>A &amp; B</title>"));
    }

    #[tokio::test]
    async fn loading_does_not_block_readers() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sitewright.toml");
        fs::write(&path, "title = \"Before\"\n").unwrap();
        let state = state_for(&path);
        let store = ConfigStore::new(&path).unwrap();

        fs::write(&path, "title = \"After\"\n").unwrap();
        let guard = state.read().await;
        let loaded = tokio::time::timeout(Duration::from_secs(3), load_preview(store))
            .await
            .expect("load must not wait for the state lock")
            .unwrap();
        assert_eq!(loaded.site.title, "After");
        assert_eq!(guard.preview.site.title, "Before");
        drop(guard);

        reload(&state).await;
        assert_eq!(state.read().await.preview.site.title, "After");
    }

    #[tokio::test]
    async fn removed_file_is_not_reloaded() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sitewright.toml");
        fs::write(&path, "title = \"Kept\"\n").unwrap();
        let state = state_for(&path);
        let mut rx = state.read().await.hub.subscribe();

        fs::remove_file(&path).unwrap();
        handle_watch_event(&state, WatchEvent::Removed(path)).await;

        assert!(rx.try_recv().is_err());
        let html = body_text(index_handler(State(state)).await).await;
        assert!(html.contains("<title>Kept</title>"));
    }
}
