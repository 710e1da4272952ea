use std::collections::HashMap;

use bytes::Bytes;
use tokio::sync::Mutex;
use uuid::Uuid;

use gameshelf_core::game::Game;

use crate::store::{GameStore, StoreError};
use crate::upload::{ImageStore, UploadError};

/// Error raised by [`Catalog::create`].
#[derive(Debug)]
pub enum CatalogError {
    MissingField(&'static str),
    InvalidNumber {
        field: &'static str,
        value: String,
    },
    Store(StoreError),
    Upload(UploadError),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field {field}"),
            Self::InvalidNumber { field, value } => {
                write!(f, "field {field} is not a number: {value:?}")
            },
            Self::Store(e) => write!(f, "{e}"),
            Self::Upload(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<UploadError> for CatalogError {
    fn from(e: UploadError) -> Self {
        Self::Upload(e)
    }
}

/// Typed create input, parsed from the plain-text fields of a form
/// submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub title: String,
    pub age_range: String,
    pub setup_difficulty: i32,
    pub play_difficulty: i32,
    pub duration: f64,
    pub fun_rating: i32,
    pub description: Option<String>,
    pub resources: Option<String>,
}

impl NewGame {
    /// Build from the key/value pairs of a form submission. Conversion of
    /// the numeric fields is the only validation applied: ratings outside
    /// 1-5 and non-positive durations are accepted as-is.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, CatalogError> {
        Ok(Self {
            title: required(fields, "title")?.to_string(),
            age_range: required(fields, "age_range")?.to_string(),
            setup_difficulty: int_field(fields, "setup_difficulty")?,
            play_difficulty: int_field(fields, "play_difficulty")?,
            duration: float_field(fields, "duration")?,
            fun_rating: int_field(fields, "fun_rating")?,
            description: fields.get("description").cloned(),
            resources: fields.get("resources").cloned(),
        })
    }
}

fn required<'a>(
    fields: &'a HashMap<String, String>,
    name: &'static str,
) -> Result<&'a str, CatalogError> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or(CatalogError::MissingField(name))
}

fn int_field(fields: &HashMap<String, String>, name: &'static str) -> Result<i32, CatalogError> {
    let raw = required(fields, name)?;
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::InvalidNumber {
            field: name,
            value: raw.to_string(),
        })
}

fn float_field(fields: &HashMap<String, String>, name: &'static str) -> Result<f64, CatalogError> {
    let raw = required(fields, name)?;
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::InvalidNumber {
            field: name,
            value: raw.to_string(),
        })
}

/// Composes the JSON store and the image store into the catalog operations.
///
/// Every operation is a single-shot read-modify-write against the store
/// file; there is no in-memory state to get out of sync.
pub struct Catalog {
    store: GameStore,
    images: ImageStore,
    write_lock: Option<Mutex<()>>,
}

impl Catalog {
    pub fn new(store: GameStore, images: ImageStore) -> Self {
        Self {
            store,
            images,
            write_lock: None,
        }
    }

    /// Serialize create operations behind a mutex. Without it, concurrent
    /// creates can interleave their load-append-save cycles and one record
    /// is silently lost.
    pub fn with_serialized_writes(mut self) -> Self {
        self.write_lock = Some(Mutex::new(()));
        self
    }

    /// The full catalog in stored order.
    pub async fn list(&self) -> Vec<Game> {
        self.store.load().await
    }

    /// Linear scan for the given id. Absence is a normal outcome.
    pub async fn get(&self, id: &str) -> Option<Game> {
        self.list().await.into_iter().find(|g| g.id == id)
    }

    /// Append a new record and persist the full collection. Nothing is
    /// persisted when the image write or the store save fails.
    pub async fn create(
        &self,
        fields: NewGame,
        upload: Option<(String, Bytes)>,
    ) -> Result<Game, CatalogError> {
        let _guard = match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let image = match upload {
            Some((name, data)) => self.images.store(&name, &data).await?,
            None => self.images.sentinel().to_string(),
        };

        let game = Game {
            id: Uuid::new_v4().to_string(),
            title: fields.title,
            image,
            age_range: fields.age_range,
            setup_difficulty: fields.setup_difficulty,
            play_difficulty: fields.play_difficulty,
            duration: fields.duration,
            fun_rating: fields.fun_rating,
            description: fields.description,
            resources: fields.resources,
        };

        let mut games = self.store.load().await;
        games.push(game.clone());
        self.store.save(&games).await?;

        tracing::info!(id = %game.id, title = %game.title, "game created");
        Ok(game)
    }
}
