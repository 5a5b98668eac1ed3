use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

fn default_can_view() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InviteWorkerRequest {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default = "default_can_view")]
    pub can_view: bool,
    #[serde(default)]
    pub can_manage_finance: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateWorkerRequest {
    pub can_edit: Option<bool>,
    pub can_view: Option<bool>,
    pub can_manage_finance: Option<bool>,
    /// One of ACTIVE, INACTIVE, LEFT.
    pub status: Option<String>,
}
