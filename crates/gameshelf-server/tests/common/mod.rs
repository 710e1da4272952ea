use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use gameshelf_server::build_app;
use gameshelf_server::config::{ServerConfig, StorageConfig};

pub struct TestServer {
    pub addr: SocketAddr,
    data_dir: TempDir,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server over a fresh temp directory.
    pub async fn new() -> Self {
        Self::from_storage(|_| {}).await
    }

    /// Start a test server with create operations serialized behind the
    /// opt-in write lock.
    pub async fn with_serialized_writes() -> Self {
        Self::from_storage(|storage| storage.serialize_writes = true).await
    }

    async fn from_storage(tweak: impl FnOnce(&mut StorageConfig)) -> Self {
        let data_dir = TempDir::new().unwrap();
        let root = data_dir.path();

        let mut storage = StorageConfig {
            data_file: root.join("games.json").to_string_lossy().into_owned(),
            upload_dir: root.join("uploads").to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };
        tweak(&mut storage);
        storage.ensure_layout().unwrap();

        let config = ServerConfig {
            storage,
            ..ServerConfig::default()
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (app, _state) = build_app(config);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            data_dir,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir.path().join("games.json")
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.data_dir.path().join("uploads")
    }
}

/// Multipart form carrying all required fields for a new game.
pub fn game_form(title: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("title", title.to_string())
        .text("age_range", "8+")
        .text("setup_difficulty", "2")
        .text("play_difficulty", "3")
        .text("duration", "45.5")
        .text("fun_rating", "5")
        .text("description", "A worker placement game")
        .text("resources", "board, dice, cards")
}

/// Attach an image file part to a form.
pub fn with_image(
    form: reqwest::multipart::Form,
    file_name: &str,
    bytes: &[u8],
) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
    form.part("image", part)
}

/// POST a form to the create endpoint and return the response.
pub async fn post_game(
    client: &reqwest::Client,
    base_url: &str,
    form: reqwest::multipart::Form,
) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/v1/games"))
        .multipart(form)
        .send()
        .await
        .unwrap()
}
