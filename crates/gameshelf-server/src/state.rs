use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::store::GameStore;
use crate::upload::ImageStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let store = GameStore::new(config.storage.data_file.clone());
        let images = ImageStore::new(
            config.storage.upload_dir.clone(),
            config.storage.allowed_extensions.clone(),
            config.storage.sentinel_image.clone(),
        );

        let mut catalog = Catalog::new(store, images);
        if config.storage.serialize_writes {
            catalog = catalog.with_serialized_writes();
        }

        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}
