use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bb8_postgres::bb8::{Pool, PooledConnection};
use bb8_postgres::PostgresConnectionManager;
use bb8_postgres::tokio_postgres::{NoTls, Row};
use tracing::info;
use uuid::Uuid;
use crate::config::Config;
use crate::models::booking::{Booking, BookingFields};
use crate::repositories::booking_repo::BookingRepository;

pub type PostgresPool = Pool<PostgresConnectionManager<NoTls>>;

/// Builds the process wide connection pool. Called once at startup.
pub async fn build_pool(config: &Config) -> anyhow::Result<PostgresPool> {
    let manager = PostgresConnectionManager::new_from_stringlike(
        config.postgres_connection_url.as_str(),
        NoTls,
    )
    .context("Invalid postgres connection url")?;

    let pool = Pool::builder()
        .max_size(config.pool_max_size)
        .connection_timeout(Duration::from_secs(config.pool_connection_timeout_secs))
        .build(manager)
        .await
        .context("Failed to build postgres connection pool")?;

    info!("Postgres connection pool ready with max size: {}", config.pool_max_size);
    Ok(pool)
}

pub struct PostgresConnectionRepo {
    postgres_connection: PostgresPool,
}

impl PostgresConnectionRepo {
    pub fn new(
        postgres_connection: PostgresPool,
    ) -> Self {
        Self {
            postgres_connection
        }
    }

    async fn get_postgres_connection(
        &self,
    ) -> anyhow::Result<PooledConnection<'_, PostgresConnectionManager<NoTls>>> {
        self.postgres_connection
            .get()
            .await
            .context("Failed to retrieve a connection from the postgres pool")
    }
}

#[async_trait]
impl BookingRepository for PostgresConnectionRepo {
    async fn list_bookings(&self) -> anyhow::Result<Vec<Booking>> {
        let conn = self.get_postgres_connection().await?;
        let rows = conn
            .query(
                "SELECT id, time, name, room_number, number_of_people FROM bookings ORDER BY time;",
                &[],
            )
            .await
            .context("Failed to select bookings")?;

        rows.iter().map(parse_row_into_booking).collect()
    }

    async fn create_booking(&self, fields: BookingFields) -> anyhow::Result<Booking> {
        let conn = self.get_postgres_connection().await?;
        let booking = Booking::from_fields(Uuid::new_v4().to_string(), fields);

        conn.execute(
            "INSERT INTO bookings (id, time, name, room_number, number_of_people) \
            VALUES ($1, $2, $3, $4, $5);",
            &[
                &booking.id,
                &booking.time,
                &booking.name,
                &booking.room_number,
                &booking.number_of_people,
            ],
        )
        .await
        .context("Failed to insert booking")?;

        Ok(booking)
    }

    async fn update_booking(
        &self,
        id: &str,
        fields: BookingFields,
    ) -> anyhow::Result<Option<Booking>> {
        let conn = self.get_postgres_connection().await?;
        let updated = conn
            .execute(
                "UPDATE bookings SET time = $1, name = $2, room_number = $3, number_of_people = $4 \
                WHERE id = $5;",
                &[
                    &fields.time,
                    &fields.name,
                    &fields.room_number,
                    &fields.number_of_people,
                    &id,
                ],
            )
            .await
            .with_context(|| format!("Failed to update booking with id: {}", id))?;

        if updated == 0 {
            return Ok(None);
        }
        Ok(Some(Booking::from_fields(id.to_string(), fields)))
    }

    async fn delete_booking(&self, id: &str) -> anyhow::Result<bool> {
        let conn = self.get_postgres_connection().await?;
        let deleted = conn
            .execute("DELETE FROM bookings WHERE id = $1;", &[&id])
            .await
            .with_context(|| format!("Failed to delete booking with id: {}", id))?;

        Ok(deleted > 0)
    }

    async fn delete_all_bookings(&self) -> anyhow::Result<u64> {
        let conn = self.get_postgres_connection().await?;
        conn.execute("DELETE FROM bookings;", &[])
            .await
            .context("Failed to clear bookings")
    }
}

fn parse_row_into_booking(
    row: &Row,
) -> anyhow::Result<Booking> {
    Ok(Booking {
        id: row.try_get("id")?,
        time: row.try_get("time")?,
        name: row.try_get("name")?,
        room_number: row.try_get("room_number")?,
        number_of_people: row.try_get::<&str, i32>("number_of_people")?,
    })
}
