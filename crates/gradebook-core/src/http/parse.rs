//! Parse HTTP response header lines collected by curl.

/// Status reason and content type of the final response.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct HeaderSummary {
    pub reason: Option<String>,
    pub content_type: Option<String>,
}

/// Parse collected header lines. Interim responses (`100 Continue`, redirects)
/// each start with a status line; only the last block is kept.
pub(crate) fn parse_header_lines(lines: &[String]) -> HeaderSummary {
    let mut summary = HeaderSummary::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            summary = HeaderSummary {
                reason: reason_from_status_line(line),
                content_type: None,
            };
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                summary.content_type = Some(value.trim().to_string());
            }
        }
    }

    summary
}

/// `HTTP/1.1 404 Not Found` → `Some("Not Found")`; `HTTP/2 404` → `None`.
fn reason_from_status_line(line: &str) -> Option<String> {
    let mut parts = line.splitn(3, ' ');
    let _version = parts.next()?;
    let _code = parts.next()?;
    let reason = parts.next()?.trim();
    if reason.is_empty() {
        None
    } else {
        Some(reason.to_string())
    }
}

/// Standard reason phrase for the status codes this service is known to use.
pub fn canonical_reason(status: u32) -> Option<&'static str> {
    Some(match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        415 => "Unsupported Media Type",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => return None,
    })
}
