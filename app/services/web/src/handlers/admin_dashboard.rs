use crate::{
    handlers::peso,
    notice::{Banner, Notice},
};
use app_dto::{auth::identity::Identity, stats::AdminStats};
use app_error::AppError;
use app_laundry::stats::load_admin_stats;
use app_state::AppState;
use askama::Template;
use axum::{
    extract::{Extension, State},
    response::Html,
};
use std::sync::Arc;
use tracing::*;

#[derive(Template)]
#[template(path = "admin_dashboard.html")]
struct AdminDashboardPage {
    name: String,
    banner: Banner,
    stats: AdminStats,
    revenue: String,
}

pub async fn get_admin_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Html<String>, AppError> {
    let (stats, notice) = match load_admin_stats(state.store.as_ref()).await {
        Ok(stats) => (stats, None),
        Err(e) => {
            error!("Cannot load statistics: {}", e);
            (AdminStats::default(), Some(Notice::StatsLoadFailed))
        }
    };
    let page = AdminDashboardPage {
        name: identity.name.clone().unwrap_or(identity.email.clone()),
        banner: Banner::from(notice),
        revenue: peso(stats.total_revenue),
        stats,
    };
    Ok(Html(page.render()?))
}
