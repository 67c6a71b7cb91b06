use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "User Test")]
    pub name: String,
    #[schema(example = "user@example.pl")]
    pub email: String,
    #[schema(example = "123Test!")]
    pub password: String,
}

/// Partial profile update; any field outside this set is rejected
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "User One")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "userOne@example.pl")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "456Test!")]
    pub password: Option<String>,
}
