use crate::handlers::{PageQuery, signup::form_error};
use app_dto::auth::login::PostLoginInput;
use app_error::AppError;
use app_laundry::{
    account::{PROFILE_LOOKUP_FAILED, sign_in, sign_out},
    guard::LOGIN_ROUTE,
};
use app_middleware::{
    ACCESS_COOKIE,
    cookies::{clear_session_cookies, read_cookie, session_cookies},
};
use app_state::AppState;
use askama::Template;
use axum::{
    extract::{Form, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::*;

#[derive(Template, Default)]
#[template(path = "login.html")]
struct LoginPage {
    error: String,
    email: String,
    notice: String,
}

pub async fn get_login(Query(query): Query<PageQuery>) -> Result<Html<String>, AppError> {
    let page = LoginPage {
        notice: query
            .notice()
            .map(|n| n.message().to_owned())
            .unwrap_or_default(),
        ..Default::default()
    };
    Ok(Html(page.render()?))
}

pub async fn post_login(
    State(state): State<Arc<AppState>>,
    Form(args): Form<PostLoginInput>,
) -> Result<Response, AppError> {
    match sign_in(
        state.auth.as_ref(),
        state.store.as_ref(),
        &args.email,
        &args.password,
    )
    .await
    {
        Ok(signed_in) => {
            let mut res = Redirect::to(signed_in.landing()).into_response();
            session_cookies(&mut res, &signed_in.session, state.config.cookie_secure);
            Ok(res)
        }
        Err(e) => {
            info!("Login for {} rejected: {}", args.email, e.message);
            let error = if e.message == PROFILE_LOOKUP_FAILED {
                e.message.clone()
            } else {
                form_error(&e)
            };
            let page = LoginPage {
                error,
                email: args.email,
                notice: String::new(),
            };
            Ok((StatusCode::UNAUTHORIZED, Html(page.render()?)).into_response())
        }
    }
}

pub async fn post_logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = read_cookie(&headers, ACCESS_COOKIE) {
        sign_out(state.auth.as_ref(), &token).await;
    }
    let mut res = Redirect::to(LOGIN_ROUTE).into_response();
    clear_session_cookies(&mut res, state.config.cookie_secure);
    res
}
