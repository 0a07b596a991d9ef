//! Per-request visitor context: client address and Cloudflare metadata.

use super::AppState;
use crate::models::{Address, CfMetadata};
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Version};
use std::convert::Infallible;
use std::net::SocketAddr;

/// Header carrying the original client address behind Cloudflare.
pub const CONNECTING_IP_HEADER: &str = "cf-connecting-ip";

/// Visitor details extracted from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    /// Client address text, if known.
    pub address: Option<String>,
    pub cf: CfMetadata,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn protocol_name(version: Version) -> Option<String> {
    let name = match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => return None,
    };
    Some(name.to_string())
}

/// Read the visitor-location headers a Cloudflare proxy attaches.
pub fn cf_metadata(headers: &HeaderMap, version: Version) -> CfMetadata {
    CfMetadata {
        continent: header(headers, "cf-ipcontinent"),
        country: header(headers, "cf-ipcountry"),
        city: header(headers, "cf-ipcity"),
        region: header(headers, "cf-region"),
        region_code: header(headers, "cf-region-code"),
        timezone: header(headers, "cf-timezone"),
        http_protocol: protocol_name(version),
    }
}

/// Resolve the client address: `CF-Connecting-IP`, else the TCP peer when trusted.
pub fn client_address(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_peer_addr: bool,
) -> Option<String> {
    if let Some(address) = header(headers, CONNECTING_IP_HEADER) {
        return Some(address);
    }
    if trust_peer_addr {
        // Dual-stack listeners report IPv4 clients as `::ffff:a.b.c.d`.
        return peer.map(|peer| Address::from(peer.ip().to_canonical()).to_string());
    }
    None
}

impl FromRequestParts<AppState> for ClientContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientContext {
            address: client_address(&parts.headers, peer, state.config.trust_peer_addr),
            cf: cf_metadata(&parts.headers, parts.version),
        })
    }
}
