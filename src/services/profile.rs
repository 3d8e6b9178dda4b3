use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::center::ProfileCard;
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::query::Role;

pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The signed-in admin's center identity card. The global Admin has no
    /// center, so a fixed placeholder card is returned instead.
    pub async fn card(&self, session: &AuthSession) -> Result<ProfileCard, ApiError> {
        match session.role {
            Role::Admin => Ok(master_admin_card()),
            Role::CenterAdmin => {
                let center_id = session
                    .center_id
                    .ok_or_else(|| ApiError::not_found("No center assigned"))?;

                let row = sqlx::query_as::<_, ProfileCard>(
                    "SELECT center_legal_name, center_address, center_pan, \
                            center_email, center_phone, website \
                     FROM centers WHERE id = $1",
                )
                .bind(center_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(DatabaseError::from)?;

                row.ok_or_else(|| ApiError::not_found("Center not found"))
            }
        }
    }
}

fn master_admin_card() -> ProfileCard {
    ProfileCard {
        center_legal_name: Some("Master Admin".to_string()),
        center_address: Some("All Centers Access".to_string()),
        center_pan: Some("-".to_string()),
        center_email: Some("-".to_string()),
        center_phone: Some("-".to_string()),
        website: Some("-".to_string()),
    }
}
