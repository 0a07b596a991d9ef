//! Visitor metadata supplied by the Cloudflare proxy.

use serde::Serialize;

/// Location and connection details attached to a proxied request.
///
/// Fields are `None` when the proxy did not send them.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct CfMetadata {
    pub continent: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub region_code: Option<String>,
    pub timezone: Option<String>,
    pub http_protocol: Option<String>,
}
