use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use bytes::Bytes;

use gameshelf_core::game::Game;

use crate::catalog::NewGame;
use crate::error::AppError;
use crate::state::AppState;

/// Multipart field name carrying the uploaded image file.
const IMAGE_FIELD: &str = "image";

/// GET /api/v1/games: the full catalog in stored order.
pub async fn list_games(State(state): State<AppState>) -> Json<Vec<Game>> {
    Json(state.catalog.list().await)
}

/// GET /api/v1/games/{id}: a single game. Absence is a 404, not a failure.
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Game>, AppError> {
    match state.catalog.get(&id).await {
        Some(game) => Ok(Json(game)),
        None => Err(AppError::NotFound(format!("Game {id} not found"))),
    }
}

/// POST /api/v1/games: multipart form submission carrying the record fields
/// as plain-text parts plus an optional `image` file part.
pub async fn create_game(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Game>), AppError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let Some(name) = field.name().map(str::to_string) else {
            return Err(AppError::BadRequest("unnamed multipart field".to_string()));
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.map_err(bad_multipart)?;
            upload = Some((file_name, data));
        } else {
            let value = field.text().await.map_err(bad_multipart)?;
            fields.insert(name, value);
        }
    }

    let new_game = NewGame::from_fields(&fields)?;
    let game = state.catalog.create(new_game, upload).await?;

    Ok((StatusCode::CREATED, Json(game)))
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("invalid multipart body: {e}"))
}
