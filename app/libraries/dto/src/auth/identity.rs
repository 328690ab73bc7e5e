use app_schema::profile::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The caller behind a validated session, attached to the request by the auth middleware.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    #[serde(skip_serializing)]
    pub access_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetMeOutput {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}

impl From<&Identity> for GetMeOutput {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.user_id,
            email: identity.email.clone(),
            name: identity.name.clone(),
            role: identity.role,
        }
    }
}
