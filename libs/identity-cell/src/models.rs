use serde::{Deserialize, Serialize};

use shared_models::entities::Role;

/// Registration request. The plaintext secret is hashed on the way in and
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub secret: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}
