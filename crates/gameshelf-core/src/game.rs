use serde::{Deserialize, Serialize};

/// One catalog entry describing a tabletop game and its metadata.
///
/// Serialized field names are the on-disk and over-the-wire contract; the
/// store file holds an ordered array of these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// UUIDv4 assigned at creation. Immutable and unique within the store.
    pub id: String,
    pub title: String,
    /// File name under the upload directory, or the sentinel image name.
    pub image: String,
    pub age_range: String,
    /// Expected range 1-5, not enforced.
    pub setup_difficulty: i32,
    /// Expected range 1-5, not enforced.
    pub play_difficulty: i32,
    /// Playing time in minutes.
    pub duration: f64,
    /// Expected range 1-5, not enforced.
    pub fun_rating: i32,
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form list of needed materials.
    #[serde(default)]
    pub resources: Option<String>,
}
