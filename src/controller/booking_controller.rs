use axum::{Extension, Json, Router};
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use serde_json::Value;
use tracing::{error, info, warn};
use crate::helpers::api_error::error_response;
use crate::models::booking::{BookingFields, BookingPayload, InvalidBooking};
use crate::repositories::booking_repo::DynBookingRepository;

pub fn router(booking_repo: DynBookingRepository) -> Router {
    Router::new()
        .route(
            "/bookings",
            get(list_bookings)
                .post(create_booking)
                .delete(delete_all_bookings),
        )
        .route(
            "/bookings/:id",
            put(update_booking).delete(delete_booking),
        )
        .route_layer(Extension(booking_repo))
}

fn parse_booking_body(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<BookingFields, InvalidBooking> {
    let Json(body) = body.map_err(|_| InvalidBooking::MalformedJson)?;
    BookingPayload::from_json(body)?.validate()
}

fn invalid_booking_response(reason: InvalidBooking) -> axum::response::Response {
    warn!("Rejected booking payload: {}", reason);
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid booking data: {}", reason),
    )
}

pub async fn list_bookings(
    Extension(booking_repo): Extension<DynBookingRepository>,
) -> impl IntoResponse {
    let bookings_res = booking_repo.list_bookings().await;

    return match bookings_res {
        Ok(bookings) => {
            (StatusCode::OK, Json(bookings)).into_response()
        }
        Err(e) => {
            error!("Something went wrong retrieving bookings due to: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve bookings")
        }
    };
}

pub async fn create_booking(
    Extension(booking_repo): Extension<DynBookingRepository>,
    body: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let fields = match parse_booking_body(body) {
        Ok(fields) => fields,
        Err(reason) => return invalid_booking_response(reason),
    };

    let create_booking_res = booking_repo.create_booking(fields).await;

    return match create_booking_res {
        Ok(booking) => {
            info!("Created booking: {}", booking.id);
            (StatusCode::CREATED, Json(booking)).into_response()
        }
        Err(e) => {
            error!("Something went wrong adding booking due to: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to add booking")
        }
    };
}

pub async fn update_booking(
    Extension(booking_repo): Extension<DynBookingRepository>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let fields = match parse_booking_body(body) {
        Ok(fields) => fields,
        Err(reason) => return invalid_booking_response(reason),
    };

    let update_booking_res = booking_repo.update_booking(&id, fields).await;

    return match update_booking_res {
        Ok(Some(booking)) => {
            info!("Updated booking: {}", booking.id);
            (StatusCode::OK, Json(booking)).into_response()
        }
        Ok(None) => {
            error_response(StatusCode::NOT_FOUND, "Booking not found")
        }
        Err(e) => {
            error!("Something went wrong updating booking: {}, due to: {:#}", id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update booking")
        }
    };
}

pub async fn delete_booking(
    Extension(booking_repo): Extension<DynBookingRepository>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let delete_booking_res = booking_repo.delete_booking(&id).await;

    return match delete_booking_res {
        Ok(true) => {
            info!("Deleted booking: {}", id);
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => {
            error_response(StatusCode::NOT_FOUND, "Booking not found")
        }
        Err(e) => {
            error!("Something went wrong deleting booking: {}, due to: {:#}", id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete booking")
        }
    };
}

pub async fn delete_all_bookings(
    Extension(booking_repo): Extension<DynBookingRepository>,
) -> impl IntoResponse {
    let delete_all_res = booking_repo.delete_all_bookings().await;

    return match delete_all_res {
        Ok(removed) => {
            info!("Cleared {} bookings", removed);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!("Something went wrong clearing bookings due to: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to clear bookings")
        }
    };
}
