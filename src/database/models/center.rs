use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tenant/branch of the NGO. Root of multi-tenancy: every other entity
/// except global-Admin-authored data carries exactly one center reference.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Center {
    pub id: i32,
    pub center_name: String,
    pub center_code: String,
    pub center_legal_name: Option<String>,
    pub center_address: Option<String>,
    pub center_email: Option<String>,
    pub center_phone: Option<String>,
    pub center_pan: Option<String>,
    pub gst_number: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCenter {
    pub center_name: String,
    pub center_code: String,
    pub center_legal_name: Option<String>,
    pub center_address: Option<String>,
    pub center_email: Option<String>,
    pub center_phone: Option<String>,
    pub center_pan: Option<String>,
    pub gst_number: Option<String>,
    pub website: Option<String>,
}

/// Center identity card shown on the profile page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileCard {
    pub center_legal_name: Option<String>,
    pub center_address: Option<String>,
    pub center_pan: Option<String>,
    pub center_email: Option<String>,
    pub center_phone: Option<String>,
    #[serde(rename = "center_website")]
    pub website: Option<String>,
}
