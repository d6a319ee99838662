use std::sync::Arc;

use async_trait::async_trait;

use crate::models::booking::{Booking, BookingFields};

pub type DynBookingRepository = Arc<dyn BookingRepository>;

/// Data access for the `bookings` table. Every method maps onto a single
/// statement; failures come back as `Err` and are never retried.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// all bookings ordered ascending by `time`
    async fn list_bookings(&self) -> anyhow::Result<Vec<Booking>>;

    /// insert a booking under a freshly generated id
    async fn create_booking(&self, fields: BookingFields) -> anyhow::Result<Booking>;

    /// overwrite all fields of an existing booking, `None` if no row has `id`
    async fn update_booking(
        &self,
        id: &str,
        fields: BookingFields,
    ) -> anyhow::Result<Option<Booking>>;

    /// `false` if no row has `id`
    async fn delete_booking(&self, id: &str) -> anyhow::Result<bool>;

    async fn delete_all_bookings(&self) -> anyhow::Result<u64>;
}
