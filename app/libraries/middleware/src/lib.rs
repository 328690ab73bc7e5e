pub mod cookies;

use crate::cookies::{clear_session_cookies, read_cookie, session_cookies};
use app_cryptography::jwt::{Algorithm, Claims, validate_token};
use app_dto::auth::identity::Identity;
use app_error::AppError;
use app_laundry::{
    account::resolve_role,
    guard::{Access, LOGIN_ROUTE, RouteScope, authorize},
};
use app_state::AppState;
use app_supabase::AuthSession;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::*;
use uuid::Uuid;

pub const ACCESS_COOKIE: &str = "laundry_access";
pub const REFRESH_COOKIE: &str = "laundry_refresh";
pub const ACCESS_TOKEN_HEADER: &str = "x-auth-access-token";
pub const REFRESH_TOKEN_HEADER: &str = "x-auth-refresh-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenSource {
    Header,
    Cookie,
}

#[derive(Debug, Clone)]
struct Credentials {
    access_token: String,
    refresh_token: Option<String>,
    source: TokenSource,
}

/// Expects `Bearer <access_token> [<refresh_token>]`, falling back to the session cookies
/// when the header is absent or malformed.
fn credentials(headers: &HeaderMap) -> Option<Credentials> {
    if let Some(auth_header) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let parts: Vec<&str> = auth_header.split_whitespace().collect();
        if (parts.len() == 2 || parts.len() == 3) && parts[0].eq_ignore_ascii_case("bearer") {
            return Some(Credentials {
                access_token: parts[1].to_owned(),
                refresh_token: parts.get(2).map(|s| (*s).to_owned()),
                source: TokenSource::Header,
            });
        }
        debug!("Ignoring malformed Authorization header");
    }
    let access_token = read_cookie(headers, ACCESS_COOKIE);
    let refresh_token = read_cookie(headers, REFRESH_COOKIE);
    if access_token.is_none() && refresh_token.is_none() {
        return None;
    }
    Some(Credentials {
        access_token: access_token.unwrap_or_default(),
        refresh_token,
        source: TokenSource::Cookie,
    })
}

fn claims_for(state: &AppState, token: &str) -> Result<Claims, AppError> {
    let config = &state.config;
    Ok(validate_token::<Claims>(
        Algorithm::HS256,
        &config.jwt_secret,
        &config.jwt_audience,
        token,
    )?
    .claims)
}

struct Authenticated {
    identity: Identity,
    renewed: Option<AuthSession>,
    source: TokenSource,
}

/// Validates the access token locally, renewing it through the auth provider
/// when it has expired and a refresh token came along.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Option<Authenticated> {
    let creds = credentials(headers)?;

    let (claims, access_token, renewed) = match claims_for(state, &creds.access_token) {
        Ok(claims) => (claims, creds.access_token.clone(), None),
        Err(e) => {
            debug!("Access token rejected: {}", e.message);
            let refresh_token = creds.refresh_token.as_deref()?;
            let session = match state.auth.refresh(refresh_token).await {
                Ok(session) => session,
                Err(e) => {
                    info!("Session refresh failed: {}", e.message);
                    return None;
                }
            };
            let claims = claims_for(state, &session.access_token).ok()?;
            (claims, session.access_token.clone(), Some(session))
        }
    };

    let user_id = Uuid::parse_str(&claims.sub).ok()?;
    let role = match resolve_role(state.store.as_ref(), user_id).await {
        Ok(role) => role,
        Err(e) => {
            warn!("Role lookup for {} failed, treating as customer: {}", user_id, e);
            Default::default()
        }
    };

    Some(Authenticated {
        identity: Identity {
            user_id,
            email: claims.email,
            name: claims.user_metadata.full_name,
            role,
            access_token,
        },
        renewed,
        source: creds.source,
    })
}

fn add_res_headers(res: &mut Response, authenticated: &Authenticated, secure: bool) {
    let _ = res.headers_mut().insert(
        ACCESS_TOKEN_HEADER,
        HeaderValue::from_str(&authenticated.identity.access_token)
            .unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    let Some(session) = &authenticated.renewed else {
        return;
    };
    match authenticated.source {
        TokenSource::Cookie => session_cookies(res, session, secure),
        // The old refresh token is spent once rotated.
        TokenSource::Header => {
            if let Ok(value) = HeaderValue::from_str(&session.refresh_token) {
                let _ = res.headers_mut().insert(REFRESH_TOKEN_HEADER, value);
            }
        }
    }
}

async fn guard_api(state: Arc<AppState>, mut req: Request, next: Next, scope: RouteScope) -> Response {
    info!(
        "Authorization Middleware Running for {} {}",
        req.method(),
        req.uri()
    );
    let headers = req.headers().clone();
    let authenticated = authenticate(&state, &headers).await;
    let role = authenticated.as_ref().map(|a| a.identity.role);
    if let Access::Redirect(_) = authorize(scope, role) {
        return match authenticated {
            None => AppError::unauthorized("Unauthorized").into_response(),
            Some(_) => AppError::forbidden("Admin access required").into_response(),
        };
    }
    let Some(authenticated) = authenticated else {
        return AppError::unauthorized("Unauthorized").into_response();
    };

    info!("User {} approved", authenticated.identity.email);
    req.extensions_mut().insert(authenticated.identity.clone());
    let mut res = next.run(req).await;
    add_res_headers(&mut res, &authenticated, state.config.cookie_secure);
    res
}

async fn guard_page(state: Arc<AppState>, mut req: Request, next: Next, scope: RouteScope) -> Response {
    let headers = req.headers().clone();
    let authenticated = authenticate(&state, &headers).await;
    let role = authenticated.as_ref().map(|a| a.identity.role);
    if let Access::Redirect(to) = authorize(scope, role) {
        info!("Redirecting {} {} to {}", req.method(), req.uri(), to);
        let mut res = Redirect::to(to).into_response();
        if authenticated.is_none() && credentials(&headers).is_some() {
            clear_session_cookies(&mut res, state.config.cookie_secure);
        }
        return res;
    }
    let Some(authenticated) = authenticated else {
        return Redirect::to(LOGIN_ROUTE).into_response();
    };

    req.extensions_mut().insert(authenticated.identity.clone());
    let mut res = next.run(req).await;
    add_res_headers(&mut res, &authenticated, state.config.cookie_secure);
    res
}

/// JSON routes for any signed-in user; 401 otherwise.
pub async fn api_auth_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    guard_api(state, req, next, RouteScope::Authenticated).await
}

/// JSON routes for admins; 401 without a session, 403 for other roles.
pub async fn api_admin_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    guard_api(state, req, next, RouteScope::AdminOnly).await
}

/// Pages for any signed-in user; redirects to the login page otherwise.
pub async fn page_auth_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    guard_page(state, req, next, RouteScope::Authenticated).await
}

/// Admin pages; customers are sent back to their dashboard.
pub async fn page_admin_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    guard_page(state, req, next, RouteScope::AdminOnly).await
}
