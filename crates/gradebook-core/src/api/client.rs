use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::ConsoleError;
use crate::http::{HttpRequest, HttpResponse, Method, Transport};

/// Endpoint client bound to one service base URL.
///
/// Borrows the transport so a console can rebuild it whenever the service
/// URL changes at login.
pub struct ApiClient<'t, T: Transport + ?Sized> {
    base: Url,
    transport: &'t T,
}

impl<'t, T: Transport + ?Sized> ApiClient<'t, T> {
    pub fn new(api_url: &str, transport: &'t T) -> Result<Self, ConsoleError> {
        let base = Url::parse(api_url.trim())
            .map_err(|e| ConsoleError::validation(format!("Invalid API URL '{api_url}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ConsoleError::validation(format!(
                "Invalid API URL '{api_url}'"
            )));
        }
        Ok(Self { base, transport })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Joins path segments onto the base URL. Each segment is percent-encoded
    /// on its own, so a `/` inside a username stays part of that segment.
    pub(crate) fn endpoint(&self, segments: &[&str], query: Option<(&str, &str)>) -> String {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.set_query(None);
        if let Some((k, v)) = query {
            url.query_pairs_mut().append_pair(k, v);
        }
        url.into()
    }

    pub(crate) fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        headers: &[(String, String)],
        body: Option<&B>,
    ) -> Result<HttpResponse, ConsoleError> {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ConsoleError::validation(format!("could not encode request: {e}")))?;
        let request = HttpRequest {
            method,
            url,
            headers: headers.to_vec(),
            body,
        };
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        self.transport.send(&request).map_err(|e| {
            tracing::warn!(
                method = %request.method,
                url = %request.url,
                kind = ?e.kind,
                "transport failure: {}",
                e
            );
            ConsoleError::Transport(e.message)
        })
    }

    pub(crate) fn get(
        &self,
        url: String,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, ConsoleError> {
        self.send::<()>(Method::Get, url, headers, None)
    }
}

/// Decodes a 2xx JSON body.
pub(crate) fn decode<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ConsoleError> {
    serde_json::from_slice(&response.body).map_err(|e| {
        tracing::warn!(status = response.status, "undecodable response body: {}", e);
        ConsoleError::Decode(response.text())
    })
}
