use app_config::AppConfig;
use app_gemini::Assistant;
use app_store::LaundryStore;
use app_supabase::AuthProvider;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn LaundryStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub assistant: Arc<dyn Assistant>,
}
