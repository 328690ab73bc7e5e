use app_log::LogLevel;
use dotenv::dotenv;
use log::*;
use serde::{Deserialize, Serialize};
use std::{env, fs, io::Read};

/// Where tables live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreKind {
    Postgres,
    Memory,
}

/// Who signs users in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthKind {
    Supabase,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_bind: String, // 0.0.0.0:9000
    pub log_level: LogLevel,  // Off, Error, Warn, Info, Debug, Trace
    pub asset_path: String,   // ./assets
    pub store: StoreKind,
    #[serde(default = "default_pg_connection")]
    pub pg_connection: usize,
    #[serde(default)]
    pub pg_migrate: bool,
    pub auth: AuthKind,
    #[serde(default)]
    pub supabase_url: String, // https://<project>.supabase.co
    #[serde(default)]
    pub supabase_anon_key: String,
    pub jwt_secret: String,
    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String, // authenticated
    #[serde(default = "default_jwt_access_session_minutes")]
    pub jwt_access_session_minutes: i64,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default)]
    pub gemini_api_key: String,
}

fn default_pg_connection() -> usize {
    5
}

fn default_jwt_audience() -> String {
    "authenticated".to_owned()
}

fn default_jwt_access_session_minutes() -> i64 {
    60
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_owned()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_owned()
}

impl AppConfig {
    pub fn new() -> Self {
        dotenv().ok();
        let mut config = match env::var("APP_CONFIG") {
            Err(e) => {
                debug!("{}", &e);
                panic!(
                    "Cannot locate config file; please set APP_CONFIG env variable! {}",
                    &e
                );
            }
            Ok(config_file_path) => match fs::File::open(config_file_path) {
                Err(e) => {
                    debug!("{}", &e);
                    panic!("Cannot read config file! {}", &e);
                }
                Ok(config_file) => match Self::from_reader(config_file) {
                    Err(e) => {
                        debug!("{}", &e);
                        panic!("Cannot parse json! {}", &e);
                    }
                    Ok(config) => config,
                },
            },
        };
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            config.gemini_api_key = key;
        }
        config
    }

    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}
