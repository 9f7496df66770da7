use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN },
        HeaderValue,
    },
    routing::post,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::relay::{ chat_relay, preflight, AppState };

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub fn build_router(state: AppState, route: &str, max_body_bytes: usize) -> Router {
    let route = if route.starts_with('/') { route.to_string() } else { format!("/{}", route) };

    Router::new()
        .route(&route, post(chat_relay).options(preflight))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(
            SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(ALLOW_ORIGIN)
            )
        )
        .layer(
            SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOW_HEADERS)
            )
        )
        .with_state(state)
}
