use crate::handlers::{
    admin_dashboard::*, api::*, customer::*, customer_dashboard::*, index::*, login::*, signup::*,
};
use app_middleware::{
    api_admin_middleware, api_auth_middleware, page_admin_middleware, page_auth_middleware,
};
use app_state::AppState;
use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub fn router(state: Arc<AppState>) -> Router {
    let asset_path = state.config.asset_path.clone();
    let asset_service = ServeDir::new(&asset_path).append_index_html_on_directories(true);

    let customer_pages = Router::new()
        .route("/customer-dashboard", get(get_customer_dashboard))
        .route("/customer-dashboard/orders", post(post_order))
        .route("/customer-dashboard/orders/{id}", post(post_order_update))
        .route(
            "/customer-dashboard/orders/{id}/delete",
            post(post_order_delete),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            page_auth_middleware,
        ));

    let admin_pages = Router::new()
        .route("/customer", get(get_customer))
        .route("/customer/orders/{id}", post(post_customer_order))
        .route(
            "/customer/orders/{id}/delete",
            post(post_customer_order_delete),
        )
        .route("/admin-dashboard", get(get_admin_dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            page_admin_middleware,
        ));

    let api = Router::new()
        .route("/signup", post(post_api_signup))
        .route("/login", post(post_api_login))
        .nest(
            "/auth",
            Router::new()
                .route("/logout", post(post_api_logout))
                .route("/me", get(get_me))
                .route("/orders", get(get_orders).post(post_orders))
                .route("/orders/{id}", put(put_order).delete(delete_order))
                .route("/stats", get(get_stats))
                .route("/chat", post(post_chat))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    api_auth_middleware,
                )),
        )
        .nest(
            "/admin",
            Router::new()
                .route("/orders", get(get_admin_orders))
                .route(
                    "/orders/{id}",
                    patch(patch_admin_order).delete(delete_admin_order),
                )
                .route("/stats", get(get_admin_stats))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    api_admin_middleware,
                )),
        );

    Router::new()
        .route("/", get(get_index))
        .route("/signup", get(get_signup).post(post_signup))
        .route("/login", get(get_login).post(post_login))
        .route("/logout", post(post_logout))
        .merge(customer_pages)
        .merge(admin_pages)
        .nest("/api", api)
        .nest_service("/assets", asset_service)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
