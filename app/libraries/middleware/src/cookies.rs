use crate::{ACCESS_COOKIE, REFRESH_COOKIE};
use app_supabase::AuthSession;
use axum::{
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    response::Response,
};

const REFRESH_MAX_AGE: i64 = 60 * 60 * 24 * 7;

/// Value of the first cookie called `name`.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_owned())
}

fn cookie(name: &str, value: &str, max_age: i64, secure: bool) -> Option<HeaderValue> {
    let mut raw = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        raw.push_str("; Secure");
    }
    HeaderValue::from_str(&raw).ok()
}

pub fn session_cookies(res: &mut Response, session: &AuthSession, secure: bool) {
    let access_age = if session.expires_in > 0 {
        session.expires_in
    } else {
        3600
    };
    let headers = res.headers_mut();
    if let Some(v) = cookie(ACCESS_COOKIE, &session.access_token, access_age, secure) {
        headers.append(SET_COOKIE, v);
    }
    if let Some(v) = cookie(REFRESH_COOKIE, &session.refresh_token, REFRESH_MAX_AGE, secure) {
        headers.append(SET_COOKIE, v);
    }
}

pub fn clear_session_cookies(res: &mut Response, secure: bool) {
    let headers = res.headers_mut();
    for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
        if let Some(v) = cookie(name, "", 0, secure) {
            headers.append(SET_COOKIE, v);
        }
    }
}
