use super::client::{decode, ApiClient};
use super::message::remote_error;
use super::models::{LoginRequest, LoginResponse};
use crate::error::ConsoleError;
use crate::http::{Method, Transport};
use crate::session::{json_headers, Role};

impl<T: Transport + ?Sized> ApiClient<'_, T> {
    /// `POST /api/auth/login`. Returns the role granted by the service.
    pub fn login(&self, username: &str, password: &str) -> Result<Role, ConsoleError> {
        let url = self.endpoint(&["api", "auth", "login"], None);
        let body = LoginRequest { username, password };
        let response = self.send(Method::Post, url, &json_headers(), Some(&body))?;
        if !response.is_success() {
            return Err(remote_error(&response, "Login failed"));
        }
        let data: LoginResponse = decode(&response)?;
        Ok(Role::parse(&data.role))
    }
}
