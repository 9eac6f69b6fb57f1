use super::client::{decode, ApiClient};
use super::message::remote_error;
use super::models::Statistics;
use crate::error::ConsoleError;
use crate::http::Transport;
use crate::session::json_headers;

impl<T: Transport + ?Sized> ApiClient<'_, T> {
    /// `GET /api/statistics[?subject=..]`. A blank subject is omitted.
    pub fn statistics(&self, subject: Option<&str>) -> Result<Statistics, ConsoleError> {
        let query = subject
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| ("subject", s));
        let url = self.endpoint(&["api", "statistics"], query);
        let response = self.get(url, &json_headers())?;
        if !response.is_success() {
            return Err(remote_error(&response, "Failed to load statistics"));
        }
        decode(&response)
    }
}
