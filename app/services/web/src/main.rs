use laundry_web::web_service;

#[tokio::main]
async fn main() {
    web_service().await;
}
