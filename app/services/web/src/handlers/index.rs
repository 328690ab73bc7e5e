use app_error::AppError;
use askama::Template;
use axum::response::Html;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage;

pub async fn get_index() -> Result<Html<String>, AppError> {
    let page = IndexPage;
    Ok(Html(page.render()?))
}
