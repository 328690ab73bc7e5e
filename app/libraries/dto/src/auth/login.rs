use app_schema::profile::Role;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PostLoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PostLoginOutput {
    pub access_token: String,
    pub refresh_token: String,
    pub role: Role,
    /// Landing page for the role.
    pub redirect: String,
}
