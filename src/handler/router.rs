//! Request dispatch module
//!
//! Entry point for HTTP request processing: route matching, fixture loading
//! and access logging.

use crate::config::AppState;
use crate::handler::fixture;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::Method;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    // Routes carry decoded directory names, so `/caf%C3%A9` must become `/café`
    let response = match urlencoding::decode(req.uri().path()) {
        Ok(path) => dispatch(&state, &method, &path).await,
        Err(_) => http::build_404_response(),
    };

    if state.config.logging.access_log {
        let entry = build_access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Answer `method path` from the route table.
///
/// Only the method and the exact path take part in matching. A fixture that
/// can't be served answers 500, or stops the process when
/// `mocks.fatal_fixture_errors` is set.
pub async fn dispatch(
    state: &AppState,
    method: &hyper::Method,
    path: &str,
) -> Response<Full<Bytes>> {
    let Ok(method) = Method::try_from(method) else {
        return http::build_404_response();
    };

    let Some(route) = state.routes.match_route(path, method) else {
        return http::build_404_response();
    };

    let fixture_path = state.routes.fixture_path(route);
    match fixture::read_fixture_value(&fixture_path, method).await {
        Ok(body) => http::build_json_response(body),
        Err(e) => {
            logger::log_error(&format!("{method} {path}: {e}"));
            if state.config.mocks.fatal_fixture_errors {
                logger::log_error("Fixture errors are fatal, stopping server");
                std::process::exit(1);
            }
            http::build_500_response()
        }
    }
}

fn build_access_entry<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
