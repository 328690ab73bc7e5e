use crate::notice::Notice;
use app_dto::auth::signup::PostSignupInput;
use app_error::AppError;
use app_laundry::{account::sign_up, guard::LOGIN_ROUTE};
use app_state::AppState;
use askama::Template;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::*;

pub const SOMETHING_WENT_WRONG: &str = "Something went wrong. Please try again.";

#[derive(Template, Default)]
#[template(path = "signup.html")]
struct SignupPage {
    error: String,
    name: String,
    email: String,
}

pub async fn get_signup() -> Result<Html<String>, AppError> {
    let page = SignupPage::default();
    Ok(Html(page.render()?))
}

/// Server faults get a generic line; the platform's own rejections are shown as-is.
pub fn form_error(e: &AppError) -> String {
    if e.status.is_server_error() {
        SOMETHING_WENT_WRONG.to_owned()
    } else {
        e.message.clone()
    }
}

pub async fn post_signup(
    State(state): State<Arc<AppState>>,
    Form(args): Form<PostSignupInput>,
) -> Result<Response, AppError> {
    match sign_up(state.auth.as_ref(), state.store.as_ref(), &args).await {
        Ok(_) => Ok(Notice::SignedUp.redirect(LOGIN_ROUTE).into_response()),
        Err(e) => {
            info!("Sign-up for {} rejected: {}", args.email, e.message);
            let page = SignupPage {
                error: form_error(&e),
                name: args.name,
                email: args.email,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page.render()?)).into_response())
        }
    }
}
