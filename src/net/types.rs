//! Wire DTOs for the auth API.
//!
//! DESIGN
//! ======
//! Every remote call answers with an envelope `{success, data, error}` where
//! exactly one of `data`/`error` is populated. `ApiResponse` makes that
//! invariant a Rust enum and rejects envelopes that break it.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::{Error as _, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error detail of a failed envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable code (e.g. `"NOT_FOUND"`).
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Success(T),
    Failure(ApiErrorBody),
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Convert to a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the envelope's error body for a failed response.
    pub fn into_result(self) -> Result<T, ApiErrorBody> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(error) => Err(error),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<ApiErrorBody>,
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let envelope = match self {
            Self::Success(data) => Envelope { success: true, data: Some(data), error: None },
            Self::Failure(error) => Envelope { success: false, data: None, error: Some(error.clone()) },
        };
        envelope.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let envelope = Envelope::<T>::deserialize(deserializer)?;
        match (envelope.success, envelope.data, envelope.error) {
            (true, Some(data), None) => Ok(Self::Success(data)),
            // `data: null` (or missing) is a valid payload for unit-like `T`.
            (true, None, None) => T::deserialize(IntoDeserializer::<'de, D::Error>::into_deserializer(()))
                .map(Self::Success)
                .map_err(|_| D::Error::custom("success envelope must carry data")),
            (false, None, Some(error)) => Ok(Self::Failure(error)),
            (true, _, _) => Err(D::Error::custom("success envelope must carry data and no error")),
            (false, _, _) => Err(D::Error::custom("error envelope must carry an error and no data")),
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload of a successful login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
