//! libcurl transport: one easy handle per request.

use std::str;
use std::time::Duration;

use super::parse::{canonical_reason, parse_header_lines};
use super::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Blocking transport over libcurl. Requests are never timed out; only the
/// connect phase may be bounded.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    connect_timeout: Option<Duration>,
}

impl CurlTransport {
    pub fn new(connect_timeout: Option<Duration>) -> Self {
        Self { connect_timeout }
    }
}

impl Transport for CurlTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }

        match request.method {
            Method::Get => easy.get(true)?,
            Method::Post => easy.post(true)?,
            Method::Put | Method::Delete => easy.custom_request(request.method.as_str())?,
        }
        if let Some(payload) = &request.body {
            easy.post_fields_copy(payload)?;
        }

        let mut list = curl::easy::List::new();
        for (k, v) in &request.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        // Small JSON bodies; skip the 100-continue round trip.
        list.append("Expect:")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let summary = parse_header_lines(&header_lines);
        let reason = summary
            .reason
            .or_else(|| canonical_reason(status).map(str::to_string))
            .unwrap_or_default();

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status,
            bytes = body.len(),
            "request completed"
        );

        Ok(HttpResponse {
            status,
            reason,
            content_type: summary.content_type,
            body,
        })
    }
}
