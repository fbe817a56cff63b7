use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Credential status. Never carries the key itself.
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub has_deployment_key: bool,
    pub has_user_key: bool,
    /// No usable key from either source: the UI should open the settings dialog
    pub key_required: bool,
    /// Localized hint shown when a deployment key shadows the user key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub storage_tip: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveApiKeyRequest {
    /// Empty string removes the stored key
    #[serde(default)]
    pub api_key: String,
}
