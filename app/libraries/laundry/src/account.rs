use crate::guard::landing_for;
use app_dto::auth::{identity::Identity, signup::PostSignupInput};
use app_error::AppError;
use app_schema::{
    customer::{Customer, NewCustomer},
    profile::{NewProfile, Role},
};
use app_store::LaundryStore;
use app_supabase::{AuthProvider, AuthSession, AuthUser};
use tracing::*;
use uuid::Uuid;

pub const SIGNUP_FIELDS_REQUIRED: &str = "All fields are required.";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match!";
pub const PROFILE_LOOKUP_FAILED: &str = "Failed to retrieve user profile.";
const UNNAMED: &str = "Unnamed";

/// Registers the principal with the auth platform and records its profile.
pub async fn sign_up(
    auth: &dyn AuthProvider,
    store: &dyn LaundryStore,
    input: &PostSignupInput,
) -> Result<AuthUser, AppError> {
    let name = input.name.trim();
    let email = input.email.trim();
    if name.is_empty() || email.is_empty() || input.password.is_empty() {
        return Err(AppError::bad_request(SIGNUP_FIELDS_REQUIRED));
    }
    if input.password != input.confirm_password {
        return Err(AppError::bad_request(PASSWORD_MISMATCH));
    }
    let user = auth.sign_up(email, &input.password, name).await?;
    store
        .insert_profile(&NewProfile {
            id: user.id,
            name: name.to_owned(),
            email: email.to_owned(),
            role: Role::Customer,
        })
        .await?;
    info!("New account {} ({})", user.id, email);
    Ok(user)
}

#[derive(Debug, Clone)]
pub struct SignedIn {
    pub session: AuthSession,
    pub role: Role,
}

impl SignedIn {
    pub fn landing(&self) -> &'static str {
        landing_for(self.role)
    }
}

pub async fn sign_in(
    auth: &dyn AuthProvider,
    store: &dyn LaundryStore,
    email: &str,
    password: &str,
) -> Result<SignedIn, AppError> {
    let session = auth.sign_in(email.trim(), password).await?;
    let role = match resolve_role(store, session.user.id).await {
        Ok(role) => role,
        Err(e) => {
            error!("Profile lookup for {} failed: {}", session.user.id, e);
            return Err(AppError::internal(PROFILE_LOOKUP_FAILED));
        }
    };
    info!("User {} signed in as {}", session.user.email, role);
    Ok(SignedIn { session, role })
}

/// Revokes the session at the auth platform. Failures only get logged.
pub async fn sign_out(auth: &dyn AuthProvider, access_token: &str) {
    if let Err(e) = auth.sign_out(access_token).await {
        warn!("Sign-out was not acknowledged: {}", e);
    }
}

/// The profile's role; a principal without a profile is a customer.
pub async fn resolve_role(store: &dyn LaundryStore, user_id: Uuid) -> Result<Role, AppError> {
    Ok(store
        .find_profile(user_id)
        .await?
        .map(|profile| profile.role)
        .unwrap_or_default())
}

/// Makes sure the caller has a profile and a customer record, creating either on first use.
pub async fn ensure_customer(
    store: &dyn LaundryStore,
    identity: &Identity,
) -> Result<Customer, AppError> {
    let profile = match store.find_profile(identity.user_id).await? {
        Some(profile) => profile,
        None => {
            debug!("Creating missing profile for {}", identity.user_id);
            store
                .insert_profile(&NewProfile {
                    id: identity.user_id,
                    name: identity
                        .name
                        .clone()
                        .filter(|n| !n.trim().is_empty())
                        .unwrap_or_else(|| UNNAMED.to_owned()),
                    email: identity.email.clone(),
                    role: Role::Customer,
                })
                .await?
        }
    };

    if let Some(customer) = store.find_customer_by_profile(profile.id).await? {
        return Ok(customer);
    }
    debug!("Creating customer record for profile {}", profile.id);
    store
        .insert_customer(&NewCustomer {
            profile_id: profile.id,
            name: profile.name,
            email: profile.email,
        })
        .await
}
