//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body limits, route matching,
//! method checks and access logging.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::fixtures;
use super::swis;
use crate::config::{AppState, HealthConfig};
use crate::http;
use crate::logger::{self, AccessLogEntry};

pub const QUERY_PATH: &str = "/SolarWinds/InformationService/v3/Json/Query";
pub const FIRST_AVAILABLE_IP_PATH: &str =
    "/SolarWinds/InformationService/v3/Json/Invoke/IPAM.SubnetManagement/GetFirstAvailableIp";
pub const CHANGE_IP_STATUS_PATH: &str =
    "/SolarWinds/InformationService/v3/Json/Invoke/IPAM.SubnetManagement/ChangeIPStatus";

const ALLOW_GET: &str = "GET, HEAD";
const ALLOW_POST: &str = "POST";

/// Every path the mock answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Root,
    Health,
    Query,
    FirstAvailableIp,
    ChangeIpStatus,
}

impl Route {
    fn match_path(path: &str, health: &HealthConfig) -> Option<Self> {
        match path {
            "/" => Some(Self::Root),
            QUERY_PATH => Some(Self::Query),
            FIRST_AVAILABLE_IP_PATH => Some(Self::FirstAvailableIp),
            CHANGE_IP_STATUS_PATH => Some(Self::ChangeIpStatus),
            p if health.enabled && (p == health.liveness_path || p == health.readiness_path) => {
                Some(Self::Health)
            }
            _ => None,
        }
    }

    const fn allow(self) -> &'static str {
        match self {
            Self::Root | Self::Health => ALLOW_GET,
            Self::Query | Self::FirstAvailableIp | Self::ChangeIpStatus => ALLOW_POST,
        }
    }

    fn accepts(self, method: &Method) -> bool {
        match self {
            Self::Root | Self::Health => *method == Method::GET || *method == Method::HEAD,
            Self::Query | Self::FirstAvailableIp | Self::ChangeIpStatus => *method == Method::POST,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let access_log = state.config.logging.access_log;
    let entry = access_log.then(|| AccessLogEntry::from_parts(peer_addr, &parts));

    logger::log_headers_count(parts.headers.len(), state.config.logging.show_headers);

    let mut response = route_request(&parts, body, &state).await;

    if let Ok(server_name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server_name);
    }

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path and method
async fn route_request<B>(parts: &Parts, body: B, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let Some(route) = Route::match_path(parts.uri.path(), &state.config.health) else {
        return http::build_404_response();
    };

    if !route.accepts(&parts.method) {
        logger::log_warning(&format!(
            "Method not allowed: {} {}",
            parts.method,
            parts.uri.path()
        ));
        return http::build_405_response(route.allow());
    }

    if let Some(resp) = check_body_size(parts, state.config.http.max_body_size) {
        return resp;
    }

    match route {
        Route::Root => http::build_text_response(fixtures::ROOT_GREETING),
        Route::Health => http::build_health_response("ok"),
        Route::Query => match read_body(body, state.config.http.max_body_size).await {
            Ok(bytes) => swis::handle_query(&bytes),
            Err(resp) => resp,
        },
        Route::FirstAvailableIp => swis::handle_get_first_available_ip(),
        Route::ChangeIpStatus => swis::handle_change_ip_status(),
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(parts: &Parts, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = parts.headers.get(hyper::header::CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Collect the whole body, capped at `max_body_size` for chunked uploads
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, Response<Full<Bytes>>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_error(&format!("Request body exceeded {max_body_size} bytes"));
            Err(http::build_413_response())
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(http::build_400_response("Failed to read request body"))
        }
    }
}
