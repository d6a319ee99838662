use std::sync::RwLock;

use anyhow::anyhow;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingFields};
use crate::repositories::booking_repo::BookingRepository;

/// Keeps bookings in a vector, insertion ordered.
#[derive(Default)]
pub struct InMemoryBookingRepo {
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryBookingRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookings.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepo {
    async fn list_bookings(&self) -> anyhow::Result<Vec<Booking>> {
        let mut bookings = self.bookings.read().unwrap().clone();
        bookings.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(bookings)
    }

    async fn create_booking(&self, fields: BookingFields) -> anyhow::Result<Booking> {
        let booking = Booking::from_fields(Uuid::new_v4().to_string(), fields);
        self.bookings.write().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn update_booking(
        &self,
        id: &str,
        fields: BookingFields,
    ) -> anyhow::Result<Option<Booking>> {
        let mut bookings = self.bookings.write().unwrap();
        match bookings.iter_mut().find(|booking| booking.id == id) {
            Some(existing) => {
                *existing = Booking::from_fields(id.to_string(), fields);
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_booking(&self, id: &str) -> anyhow::Result<bool> {
        let mut bookings = self.bookings.write().unwrap();
        let before = bookings.len();
        bookings.retain(|booking| booking.id != id);
        Ok(bookings.len() < before)
    }

    async fn delete_all_bookings(&self) -> anyhow::Result<u64> {
        let mut bookings = self.bookings.write().unwrap();
        let removed = bookings.len() as u64;
        bookings.clear();
        Ok(removed)
    }
}

/// Fails every call the way an unreachable database would.
pub struct UnavailableBookingRepo;

#[async_trait]
impl BookingRepository for UnavailableBookingRepo {
    async fn list_bookings(&self) -> anyhow::Result<Vec<Booking>> {
        Err(anyhow!("connection refused"))
    }

    async fn create_booking(&self, _fields: BookingFields) -> anyhow::Result<Booking> {
        Err(anyhow!("connection refused"))
    }

    async fn update_booking(
        &self,
        _id: &str,
        _fields: BookingFields,
    ) -> anyhow::Result<Option<Booking>> {
        Err(anyhow!("connection refused"))
    }

    async fn delete_booking(&self, _id: &str) -> anyhow::Result<bool> {
        Err(anyhow!("connection refused"))
    }

    async fn delete_all_bookings(&self) -> anyhow::Result<u64> {
        Err(anyhow!("connection refused"))
    }
}
