use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq, Hash)]
pub struct LoginRequest {
    #[schema(example = "userOne@example.pl")]
    pub email: String,
    #[schema(example = "123Test!")]
    pub password: String,
}
