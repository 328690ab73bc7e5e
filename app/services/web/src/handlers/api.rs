use app_dto::{
    auth::{
        identity::{GetMeOutput, Identity},
        login::{PostLoginInput, PostLoginOutput},
        signup::{PostSignupInput, PostSignupOutput},
    },
    chat::{PostChatInput, PostChatOutput},
    order::{AdminOrderInput, OrderInput},
    stats::{AdminStats, CustomerStats},
};
use app_error::AppError;
use app_gemini::answer;
use app_laundry::{
    account::{ensure_customer, sign_in, sign_out, sign_up},
    orders::{
        admin_delete_order, admin_update_order, create_order, delete_own_order, list_all_orders,
        list_own_orders, update_own_order,
    },
    stats::{customer_stats, load_admin_stats},
};
use app_middleware::cookies::clear_session_cookies;
use app_schema::order::{Order, OrderWithCustomer};
use app_state::AppState;
use axum::{
    extract::{Extension, Json, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::*;

pub async fn post_api_signup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PostSignupInput>, JsonRejection>,
) -> Result<(StatusCode, Json<PostSignupOutput>), AppError> {
    let Json(args) = payload?;
    debug!("Sign-up request: {:?}", &args);
    let user = sign_up(state.auth.as_ref(), state.store.as_ref(), &args).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostSignupOutput {
            id: user.id,
            email: user.email,
        }),
    ))
}

pub async fn post_api_login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PostLoginInput>, JsonRejection>,
) -> Result<Json<PostLoginOutput>, AppError> {
    let Json(args) = payload?;
    let signed_in = sign_in(
        state.auth.as_ref(),
        state.store.as_ref(),
        &args.email,
        &args.password,
    )
    .await?;
    Ok(Json(PostLoginOutput {
        redirect: signed_in.landing().to_owned(),
        role: signed_in.role,
        access_token: signed_in.session.access_token,
        refresh_token: signed_in.session.refresh_token,
    }))
}

pub async fn post_api_logout(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Response {
    sign_out(state.auth.as_ref(), &identity.access_token).await;
    let mut res = StatusCode::NO_CONTENT.into_response();
    clear_session_cookies(&mut res, state.config.cookie_secure);
    res
}

pub async fn get_me(Extension(identity): Extension<Identity>) -> Json<GetMeOutput> {
    Json(GetMeOutput::from(&identity))
}

pub async fn get_orders(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Order>>, AppError> {
    let store = state.store.as_ref();
    let customer = ensure_customer(store, &identity).await?;
    Ok(Json(list_own_orders(store, &customer).await?))
}

pub async fn post_orders(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<OrderInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let Json(args) = payload?;
    let store = state.store.as_ref();
    let customer = ensure_customer(store, &identity).await?;
    let order = create_order(store, &customer, &args).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn put_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    payload: Result<Json<OrderInput>, JsonRejection>,
) -> Result<Json<Order>, AppError> {
    let Json(args) = payload?;
    let store = state.store.as_ref();
    let customer = ensure_customer(store, &identity).await?;
    Ok(Json(update_own_order(store, &customer, id, &args).await?))
}

pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let store = state.store.as_ref();
    let customer = ensure_customer(store, &identity).await?;
    delete_own_order(store, &customer, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<CustomerStats>, AppError> {
    let store = state.store.as_ref();
    let customer = ensure_customer(store, &identity).await?;
    let orders = list_own_orders(store, &customer).await?;
    Ok(Json(customer_stats(&orders)))
}

pub async fn post_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PostChatInput>, JsonRejection>,
) -> Result<Json<PostChatOutput>, AppError> {
    let Json(args) = payload?;
    let reply = answer(state.assistant.as_ref(), &args.message).await?;
    Ok(Json(PostChatOutput { reply }))
}

pub async fn get_admin_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderWithCustomer>>, AppError> {
    Ok(Json(list_all_orders(state.store.as_ref()).await?))
}

pub async fn patch_admin_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: Result<Json<AdminOrderInput>, JsonRejection>,
) -> Result<Json<Order>, AppError> {
    let Json(args) = payload?;
    Ok(Json(
        admin_update_order(state.store.as_ref(), id, &args).await?,
    ))
}

pub async fn delete_admin_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    admin_delete_order(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_admin_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AdminStats>, AppError> {
    Ok(Json(load_admin_stats(state.store.as_ref()).await?))
}
