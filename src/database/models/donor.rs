use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A donor record. `donor_id` is the generated, human-facing identifier;
/// `mobile` is unique per center (storage constraint).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donor {
    pub id: i32,
    pub donor_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub mobile: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub center_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDonor {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub mobile: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Business-editable donor fields. The center reference and generated
/// donor_id are never updatable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDonor {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub mobile: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Slim row returned by the exact-mobile lookup on the donation entry form.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DonorMatch {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub mobile: String,
}
