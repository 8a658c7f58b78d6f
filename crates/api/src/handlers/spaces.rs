//! Handlers for the `/spaces` resource.
//!
//! Create and update are multipart endpoints: a `data` part carries the JSON
//! DTO and any remaining parts are gallery uploads, validated by magic bytes
//! before anything is stored. Gallery order is dictated by the DTO's
//! `image_order` list, which mixes existing URLs with new-upload file names.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use venia_core::catalog::publish_requirements;
use venia_core::error::CoreError;
use venia_core::occupancy::occupied_dates;
use venia_core::types::{DbId, Money, Timestamp};
use venia_db::models::space::{
    AddressVisibility, CreateSpace, Space, SpaceSearch, SpaceStatus, UpdateSpace,
};
use venia_db::repositories::{ReservationRepo, SpaceImageRepo, SpaceRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::images::is_valid_image;
use crate::query::{PaginationParams, RequesterParams};
use crate::response::PageResponse;
use crate::state::AppState;

/// Query parameter identifying the owner on owner-scoped endpoints.
#[derive(Debug, Deserialize)]
pub struct OwnerParams {
    pub owner_id: DbId,
}

/// Catalog search filters (`?owner_id=&requester_id=&q=&kind=&amenity=&min_capacity=`).
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub owner_id: Option<DbId>,
    pub requester_id: Option<DbId>,
    pub q: Option<String>,
    pub kind: Option<String>,
    pub amenity: Option<String>,
    pub min_capacity: Option<i32>,
}

/// Space configuration block nested in [`SpaceResponse`].
#[derive(Debug, Serialize)]
pub struct SpaceConfig {
    pub pricing_unit: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_ref: Option<String>,
    pub location_hint: Option<String>,
    pub weekend_price: Option<Money>,
    pub cleaning_fee: Option<Money>,
    pub deposit_amount: Option<Money>,
    pub deposit_policy: Option<venia_db::models::space::DepositPolicy>,
    pub check_in_time: Option<chrono::NaiveTime>,
    pub check_out_time: Option<chrono::NaiveTime>,
    pub prep_minutes: Option<i32>,
    pub min_notice_hours: Option<i32>,
    pub max_lead_months: Option<i32>,
    pub min_stay: Option<i32>,
    pub blocked_weekdays: Option<Vec<String>>,
    pub booking_mode: Option<venia_db::models::space::BookingMode>,
    pub cancellation_policy: Option<String>,
    pub address_visibility: Option<AddressVisibility>,
    pub allows_guest_booking: Option<bool>,
    pub allows_overnight: Option<bool>,
}

/// Full listing payload returned by every space endpoint.
///
/// Address fields are subject to the visibility policy: approximate
/// listings hide the street address and jitter the coordinates for anyone
/// but the owner.
#[derive(Debug, Serialize)]
pub struct SpaceResponse {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub address: Option<String>,
    pub max_capacity: Option<i32>,
    pub base_price: Option<Money>,
    pub status: SpaceStatus,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub rules: Vec<String>,
    pub config: SpaceConfig,
    pub occupied_dates: Vec<NaiveDate>,
}

/// POST /api/v1/spaces?owner_id=
pub async fn create(
    State(state): State<AppState>,
    Query(params): Query<OwnerParams>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<SpaceResponse>)> {
    let (data, files) = read_multipart(multipart).await?;
    let input: CreateSpace = parse_data_part(data)?;

    validate_uploads(&files)?;

    UserRepo::find_by_id(&state.pool, params.owner_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: params.owner_id,
        }))?;

    if input.status == Some(SpaceStatus::Published) {
        publish_requirements(input.base_price, input.max_capacity, files.len())?;
    }

    let space = SpaceRepo::create(&state.pool, params.owner_id, &input).await?;

    // Upload in gallery order; files missing from image_order go last.
    let ordered = order_uploads(files, input.image_order.as_deref());
    let mut urls = Vec::with_capacity(ordered.len());
    for (filename, bytes) in &ordered {
        let url = state
            .images
            .upload(filename, bytes)
            .await
            .map_err(|err| AppError::InternalError(err.to_string()))?;
        urls.push(url);
    }
    if !urls.is_empty() {
        SpaceImageRepo::replace_gallery(&state.pool, space.id, &urls).await?;
    }

    let response = space_response(&state, space, Some(params.owner_id)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/spaces
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<SpaceResponse>>> {
    let filters = SpaceSearch {
        owner_id: params.owner_id,
        browsing_user_id: params.requester_id,
        text: params.q,
        kind: params.kind,
        amenity: params.amenity,
        min_capacity: params.min_capacity,
    };
    let (limit, offset) = pagination.clamped();

    let spaces = SpaceRepo::search(&state.pool, &filters, limit, offset).await?;
    let total = SpaceRepo::count(&state.pool, &filters).await?;

    let mut items = Vec::with_capacity(spaces.len());
    for space in spaces {
        items.push(space_response(&state, space, params.requester_id).await?);
    }

    Ok(Json(PageResponse {
        items,
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/spaces/{id}?requester_id=
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RequesterParams>,
) -> AppResult<Json<SpaceResponse>> {
    let space = SpaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Space", id }))?;

    let response = space_response(&state, space, params.requester_id).await?;
    Ok(Json(response))
}

/// PUT /api/v1/spaces/{id}?owner_id=
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<OwnerParams>,
    multipart: Multipart,
) -> AppResult<Json<SpaceResponse>> {
    let (data, files) = read_multipart(multipart).await?;
    let input: UpdateSpace = parse_data_part(data)?;

    validate_uploads(&files)?;

    let space = find_owned_space(&state, id, params.owner_id).await?;

    if input.status == Some(SpaceStatus::Published) {
        let gallery_len = match &input.image_order {
            Some(order) => order.len(),
            None => SpaceImageRepo::count_for_space(&state.pool, id).await? as usize,
        };
        publish_requirements(
            input.base_price.or(space.base_price),
            input.max_capacity.or(space.max_capacity),
            gallery_len,
        )?;
    }

    let updated = SpaceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Space", id }))?;

    // Gallery reconciliation: entries starting with "http" are kept as
    // existing URLs, anything else must match an uploaded file name.
    // Unmatched names are skipped.
    if let Some(order) = &input.image_order {
        let mut uploads: std::collections::HashMap<String, Vec<u8>> = files.into_iter().collect();
        let mut urls = Vec::with_capacity(order.len());
        for item in order {
            if item.starts_with("http") {
                urls.push(item.clone());
            } else if let Some(bytes) = uploads.remove(item) {
                let url = state
                    .images
                    .upload(item, &bytes)
                    .await
                    .map_err(|err| AppError::InternalError(err.to_string()))?;
                urls.push(url);
            }
        }
        SpaceImageRepo::replace_gallery(&state.pool, id, &urls).await?;
    }

    let response = space_response(&state, updated, Some(params.owner_id)).await?;
    Ok(Json(response))
}

/// DELETE /api/v1/spaces/{id}?owner_id=
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<OwnerParams>,
) -> AppResult<StatusCode> {
    find_owned_space(&state, id, params.owner_id).await?;
    SpaceRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/spaces/{id}/publish?owner_id=
///
/// Gate: a listing needs a positive price, a capacity of at least one and
/// at least one gallery image before it can go live.
pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<OwnerParams>,
) -> AppResult<Json<SpaceResponse>> {
    let space = find_owned_space(&state, id, params.owner_id).await?;

    let gallery_len = SpaceImageRepo::count_for_space(&state.pool, id).await? as usize;
    publish_requirements(space.base_price, space.max_capacity, gallery_len)?;

    let updated = SpaceRepo::set_status(&state.pool, id, SpaceStatus::Published)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Space", id }))?;

    let response = space_response(&state, updated, Some(params.owner_id)).await?;
    Ok(Json(response))
}

/// POST /api/v1/spaces/{id}/pause?owner_id=
pub async fn pause(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<OwnerParams>,
) -> AppResult<Json<SpaceResponse>> {
    find_owned_space(&state, id, params.owner_id).await?;

    let updated = SpaceRepo::set_status(&state.pool, id, SpaceStatus::Paused)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Space", id }))?;

    let response = space_response(&state, updated, Some(params.owner_id)).await?;
    Ok(Json(response))
}

/// Load a space and verify ownership: 404 if missing, 403 on mismatch.
async fn find_owned_space(state: &AppState, id: DbId, owner_id: DbId) -> AppResult<Space> {
    let space = SpaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Space", id }))?;

    if space.owner_id != owner_id {
        return Err(CoreError::Forbidden(
            "You do not have permission over this space.".to_string(),
        )
        .into());
    }

    Ok(space)
}

/// Drain a multipart request into the `data` JSON text and the uploaded
/// files as `(file name, bytes)` pairs.
async fn read_multipart(
    mut multipart: Multipart,
) -> AppResult<(Option<String>, Vec<(String, Vec<u8>)>)> {
    let mut data = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Malformed multipart request: {err}")))?
    {
        if field.name() == Some("data") {
            let text = field
                .text()
                .await
                .map_err(|err| AppError::BadRequest(format!("Unreadable data part: {err}")))?;
            data = Some(text);
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("Unreadable file part: {err}")))?;
        files.push((filename, bytes.to_vec()));
    }

    Ok((data, files))
}

/// Parse the mandatory `data` part into the request DTO.
fn parse_data_part<T: serde::de::DeserializeOwned>(data: Option<String>) -> AppResult<T> {
    let data = data.ok_or_else(|| AppError::BadRequest("Missing data part".to_string()))?;
    serde_json::from_str(&data)
        .map_err(|err| AppError::BadRequest(format!("Invalid data part: {err}")))
}

/// Reject any upload whose leading bytes are not a supported image format.
fn validate_uploads(files: &[(String, Vec<u8>)]) -> AppResult<()> {
    for (filename, bytes) in files {
        if !is_valid_image(bytes) {
            return Err(CoreError::Validation(format!(
                "File {filename} is not a valid image or is corrupt."
            ))
            .into());
        }
    }
    Ok(())
}

/// Reorder uploads to match `image_order`; names absent from the order keep
/// their upload position at the end.
fn order_uploads(
    files: Vec<(String, Vec<u8>)>,
    order: Option<&[String]>,
) -> Vec<(String, Vec<u8>)> {
    let Some(order) = order else {
        return files;
    };

    let mut remaining: Vec<Option<(String, Vec<u8>)>> = files.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(remaining.len());

    for name in order {
        let found = remaining
            .iter_mut()
            .find_map(|slot| match slot {
                Some((n, _)) if n == name => slot.take(),
                _ => None,
            });
        if let Some(file) = found {
            ordered.push(file);
        }
    }
    ordered.extend(remaining.into_iter().flatten());
    ordered
}

/// Assemble the full response payload: gallery, occupied dates, and the
/// address-visibility policy applied for the viewing user.
async fn space_response(
    state: &AppState,
    space: Space,
    viewer: Option<DbId>,
) -> AppResult<SpaceResponse> {
    let gallery = SpaceImageRepo::list_for_space(&state.pool, space.id).await?;
    let images: Vec<String> = gallery.into_iter().map(|image| image.url).collect();

    let intervals = ReservationRepo::active_intervals(&state.pool, space.id).await?;
    let dates: Vec<NaiveDate> = occupied_dates(intervals).into_iter().collect();

    let is_owner = viewer == Some(space.owner_id);
    let hide_address =
        space.address_visibility == Some(AddressVisibility::Approximate) && !is_owner;

    let (address, location_hint, place_ref) = if hide_address {
        (None, None, None)
    } else {
        (space.address, space.location_hint, space.place_ref)
    };

    let (latitude, longitude) = if hide_address {
        (space.latitude.map(jitter), space.longitude.map(jitter))
    } else {
        (space.latitude, space.longitude)
    };

    Ok(SpaceResponse {
        id: space.id,
        name: space.name,
        description: space.description,
        kind: space.kind,
        address,
        max_capacity: space.max_capacity,
        base_price: space.base_price,
        status: space.status,
        owner_id: space.owner_id,
        created_at: space.created_at,
        images,
        amenities: split_csv(space.amenities.as_deref()),
        rules: split_csv(space.rules.as_deref()),
        config: SpaceConfig {
            pricing_unit: space.pricing_unit,
            latitude,
            longitude,
            place_ref,
            location_hint,
            weekend_price: space.weekend_price,
            cleaning_fee: space.cleaning_fee,
            deposit_amount: space.deposit_amount,
            deposit_policy: space.deposit_policy,
            check_in_time: space.check_in_time,
            check_out_time: space.check_out_time,
            prep_minutes: space.prep_minutes,
            min_notice_hours: space.min_notice_hours,
            max_lead_months: space.max_lead_months,
            min_stay: space.min_stay,
            blocked_weekdays: space.blocked_weekdays,
            booking_mode: space.booking_mode,
            cancellation_policy: space.cancellation_policy,
            address_visibility: space.address_visibility,
            allows_guest_booking: space.allows_guest_booking,
            allows_overnight: space.allows_overnight,
        },
        occupied_dates: dates,
    })
}

/// Offset a coordinate by up to ~200 m so approximate listings cannot be
/// pinpointed.
fn jitter(coordinate: f64) -> f64 {
    coordinate + (rand::rng().random::<f64>() - 0.5) * 0.004
}

/// Comma-separated TEXT column to a list; empty or missing text yields `[]`.
fn split_csv(text: Option<&str>) -> Vec<String> {
    match text {
        Some(text) if !text.trim().is_empty() => {
            text.split(',').map(|part| part.trim().to_string()).collect()
        }
        _ => Vec::new(),
    }
}
