//! Handlers for the `/reservations` resource.
//!
//! Creation runs the availability engine (policy checks + pricing) against
//! the space's configuration, then delegates the race-sensitive overlap
//! check and insert to the transactional repository path.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use venia_core::booking::{total_price, validate_interval};
use venia_core::error::CoreError;
use venia_core::occupancy::occupied_dates;
use venia_core::types::{DbId, Timestamp};
use venia_db::models::reservation::{
    BookingParty, GuestContact, NewReservation, OwnerReservationSummary, Reservation,
    UserReservationSummary,
};
use venia_db::models::space::SpaceStatus;
use venia_db::repositories::{ReservationRepo, SpaceRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::query::RequesterParams;
use crate::state::AppState;

/// Request body for creating a reservation. Exactly one of `user_id` or the
/// guest contact fields identifies the booking party.
#[derive(Debug, Deserialize)]
pub struct CreateReservation {
    pub space_id: DbId,
    pub user_id: Option<DbId>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// POST /api/v1/reservations
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let space = SpaceRepo::find_by_id(&state.pool, input.space_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Space",
            id: input.space_id,
        }))?;

    if space.status != SpaceStatus::Published {
        return Err(CoreError::Conflict(
            "The selected space is not open for booking.".to_string(),
        )
        .into());
    }

    let party = match input.user_id {
        Some(user_id) => {
            UserRepo::find_by_id(&state.pool, user_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "User",
                    id: user_id,
                }))?;
            BookingParty::Registered(user_id)
        }
        None => {
            // Blank contact fields are as useless as missing ones.
            let name = input
                .guest_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty());
            let email = input
                .guest_email
                .as_deref()
                .map(str::trim)
                .filter(|email| !email.is_empty());
            let (Some(name), Some(email)) = (name, email) else {
                return Err(CoreError::Validation(
                    "Guest bookings require a contact name and email.".to_string(),
                )
                .into());
            };
            BookingParty::Guest(GuestContact {
                name: name.to_string(),
                email: email.to_string(),
                phone: input.guest_phone.clone(),
            })
        }
    };

    validate_interval(
        space.unit(),
        &space.policy(),
        input.starts_at,
        input.ends_at,
        Utc::now(),
    )?;

    let base_price = space.base_price.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "The selected space has no price configured.".to_string(),
        ))
    })?;
    let amount = total_price(space.unit(), base_price, input.starts_at, input.ends_at);

    let new_reservation = NewReservation {
        space_id: space.id,
        party,
        starts_at: input.starts_at,
        ends_at: input.ends_at,
        total_price: amount,
    };

    let reservation = ReservationRepo::create_confirmed(&state.pool, &new_reservation, &space.name)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "The space is not available in the requested window.".to_string(),
            ))
        })?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /api/v1/reservations/user/{user_id}
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<UserReservationSummary>>> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let reservations = ReservationRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(reservations))
}

/// GET /api/v1/reservations/space/{space_id}?requester_id=
///
/// Only the space owner may see who booked their space.
pub async fn list_for_space(
    State(state): State<AppState>,
    Path(space_id): Path<DbId>,
    Query(params): Query<RequesterParams>,
) -> AppResult<Json<Vec<OwnerReservationSummary>>> {
    let space = SpaceRepo::find_by_id(&state.pool, space_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Space",
            id: space_id,
        }))?;

    if params.requester_id != Some(space.owner_id) {
        return Err(CoreError::Forbidden(
            "Only the owner may list this space's reservations.".to_string(),
        )
        .into());
    }

    let reservations = ReservationRepo::list_for_space(&state.pool, space_id).await?;
    Ok(Json(reservations))
}

/// GET /api/v1/reservations/occupied/{space_id}
///
/// Every calendar day touched by a non-cancelled reservation, inclusive of
/// the end date, deduplicated and sorted.
pub async fn occupied(
    State(state): State<AppState>,
    Path(space_id): Path<DbId>,
) -> AppResult<Json<Vec<NaiveDate>>> {
    SpaceRepo::find_by_id(&state.pool, space_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Space",
            id: space_id,
        }))?;

    let intervals = ReservationRepo::active_intervals(&state.pool, space_id).await?;
    let dates: Vec<NaiveDate> = occupied_dates(intervals).into_iter().collect();
    Ok(Json(dates))
}

/// PATCH /api/v1/reservations/{id}/cancel?requester_id=
///
/// Reservations with an attached user may only be cancelled by that user.
/// Guest reservations carry no credential and are cancellable by anyone who
/// knows the ID.
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RequesterParams>,
) -> AppResult<StatusCode> {
    let reservation = ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reservation",
            id,
        }))?;

    if let Some(user_id) = reservation.user_id {
        if params.requester_id != Some(user_id) {
            return Err(CoreError::Forbidden(
                "You do not have permission to cancel this reservation.".to_string(),
            )
            .into());
        }
    }

    let cancelled = ReservationRepo::set_cancelled(&state.pool, id).await?;
    if !cancelled {
        return Err(CoreError::Conflict(
            "The reservation is already cancelled.".to_string(),
        )
        .into());
    }

    Ok(StatusCode::NO_CONTENT)
}
