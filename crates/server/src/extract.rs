//! Request-scoped extractors: client address and the authenticated user.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{header, request::Parts, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use service::RequestContext;
use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

/// Address of the requesting client.
#[derive(Debug, Clone)]
pub struct ClientIp(pub IpAddr);

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let first_forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok());
    first_forwarded.or_else(|| {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    })
}

#[async_trait]
impl FromRequestParts<ServerState> for ClientIp {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        if state.trust_proxy_headers {
            if let Some(ip) = forwarded_ip(&parts.headers) {
                return Ok(ClientIp(ip));
            }
        }
        match parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            Some(ConnectInfo(addr)) => Ok(ClientIp(addr.ip())),
            None => {
                warn!("no peer address on request; recording as unspecified");
                Ok(ClientIp(IpAddr::V4(Ipv4Addr::UNSPECIFIED)))
            }
        }
    }
}

/// Bearer token from `Authorization`, else the `auth_token` cookie.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());
    from_header.or_else(|| CookieJar::from_headers(headers).get(AUTH_COOKIE).map(|c| c.value().to_string()))
}

/// [`RequestContext`] for the current request. A missing or unusable token
/// yields an anonymous context; back-office operations reject it later.
pub struct Ctx(pub RequestContext);

#[async_trait]
impl FromRequestParts<ServerState> for Ctx {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let ClientIp(ip) = ClientIp::from_request_parts(parts, state).await?;
        let client_ip = ip.to_string();
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(Ctx(RequestContext::anonymous(client_ip)));
        };
        match state.auth.authenticate(&token).await {
            Ok(user) => Ok(Ctx(RequestContext::authenticated(user, client_ip))),
            Err(e) => {
                debug!(error = %e, code = e.code(), "ignoring unusable credentials");
                Ok(Ctx(RequestContext::anonymous(client_ip)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_for_takes_first_hop() {
        let mut h = HeaderMap::new();
        h.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9, 10.0.0.1"));
        h.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(forwarded_ip(&h), Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn real_ip_is_fallback() {
        let mut h = HeaderMap::new();
        h.insert("x-forwarded-for", HeaderValue::from_static("garbage"));
        h.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(forwarded_ip(&h), Some("10.0.0.2".parse().unwrap()));
    }

    #[test]
    fn bearer_header_beats_cookie() {
        let mut h = HeaderMap::new();
        h.insert(header::COOKIE, HeaderValue::from_static("auth_token=from-cookie"));
        assert_eq!(bearer_token(&h).as_deref(), Some("from-cookie"));
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(bearer_token(&h).as_deref(), Some("from-header"));
    }
}
