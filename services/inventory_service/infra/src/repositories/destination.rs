use async_trait::async_trait;
use sqlx::PgPool;

use inventory_service_core::models::{Destination, DestinationType};
use inventory_service_core::repositories::DestinationRepository;
use shared_error::AppError;
use std::str::FromStr;

pub struct PgDestinationRepository {
    pool: PgPool,
}

impl PgDestinationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DestinationRepository for PgDestinationRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Destination>, AppError> {
        let row = sqlx::query!(
            r#"
            SELECT id, name, tipe, address, contact, location_id
            FROM destinations
            WHERE id = $1
            "#,
            id,
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| {
            Ok(Destination {
                id: r.id,
                name: r.name,
                tipe: DestinationType::from_str(&r.tipe)
                    .map_err(AppError::internal)?,
                address: r.address,
                contact: r.contact,
                location_id: r.location_id,
            })
        })
        .transpose()
    }
}
