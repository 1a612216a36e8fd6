//! Helper functions for creating specific error types

use super::types::ClientError;

impl ClientError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_url<S: Into<String>>(message: S) -> Self {
        Self::InvalidUrl(message.into())
    }

    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn status<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Whether the caller should treat the user as logged out
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Unauthorized(_))
            || matches!(self, Self::Status { status: 401, .. })
    }

    /// Whether the request never produced a response
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect() || e.is_timeout() || e.is_request())
    }
}
