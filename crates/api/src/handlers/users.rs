//! Handlers for the `/users` resource.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use venia_core::error::CoreError;
use venia_core::types::DbId;
use venia_db::models::user::{CreateUser, UpdateUser, User};
use venia_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::images::is_valid_image;
use crate::state::AppState;

/// POST /api/v1/users
///
/// A duplicate email surfaces as a 409 via unique-constraint classification.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = UserRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}
///
/// Partial profile update; changing the email to one already taken is a
/// 409 via the unique constraint.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// POST /api/v1/users/{id}/avatar
///
/// Multipart upload of a single profile picture, sniffed by magic bytes
/// like gallery images.
pub async fn upload_avatar(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<User>> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Malformed multipart request: {err}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("Unreadable file part: {err}")))?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("Missing avatar file".to_string()))?;
    if !is_valid_image(&bytes) {
        return Err(CoreError::Validation(format!(
            "File {filename} is not a valid image or is corrupt."
        ))
        .into());
    }

    let url = state
        .images
        .upload(&filename, &bytes)
        .await
        .map_err(|err| AppError::InternalError(err.to_string()))?;

    let user = UserRepo::set_avatar_url(&state.pool, id, &url)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}
