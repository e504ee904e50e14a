//! Response envelope returned by every data-access call
//!
//! On the wire the envelope is the familiar `{success, data?, error?, meta?}`
//! object. In Rust it is a sum type, so a failure can never carry a payload
//! and a success can never carry an error message.

use crate::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Message used when a failure envelope arrives without an `error` field.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Pagination hints attached to collection responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ResponseMeta {
    pub fn new(total: usize, page: u32, limit: u32) -> Self {
        Self {
            total: Some(total),
            page: Some(page),
            limit: Some(limit),
        }
    }
}

/// Normalized result of a data-access call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// The call completed; `data` is absent when the endpoint has no body.
    Success {
        data: Option<T>,
        meta: Option<ResponseMeta>,
    },
    /// The call failed for any reason (transport, timeout, parse, simulated, unknown endpoint).
    Failure { error: String },
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload
    pub fn ok(data: T) -> Self {
        Self::Success {
            data: Some(data),
            meta: None,
        }
    }

    /// Successful response without a body
    pub fn empty() -> Self {
        Self::Success {
            data: None,
            meta: None,
        }
    }

    /// Failed response with a human-readable message
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// Attach pagination hints. Failures are returned unchanged.
    pub fn with_meta(self, meta: ResponseMeta) -> Self {
        match self {
            Self::Success { data, .. } => Self::Success {
                data,
                meta: Some(meta),
            },
            failure => failure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => data.as_ref(),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => data,
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error.as_str()),
        }
    }

    pub fn meta(&self) -> Option<&ResponseMeta> {
        match self {
            Self::Success { meta, .. } => meta.as_ref(),
            Self::Failure { .. } => None,
        }
    }

    /// Transform the payload, keeping meta and failures intact
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success { data, meta } => ApiResponse::Success {
                data: data.map(f),
                meta,
            },
            Self::Failure { error } => ApiResponse::Failure { error },
        }
    }

    /// Convert into a standard `Result`, dropping meta
    pub fn into_result(self) -> std::result::Result<Option<T>, String> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { error } => Err(error),
        }
    }
}

impl<T> From<Error> for ApiResponse<T> {
    fn from(err: Error) -> Self {
        Self::failure(err.to_string())
    }
}

#[derive(Serialize)]
struct WireEnvelopeRef<'a, T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<&'a ResponseMeta>,
}

#[derive(Deserialize)]
struct WireEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
    meta: Option<ResponseMeta>,
}

impl<T> From<WireEnvelope<T>> for ApiResponse<T> {
    fn from(wire: WireEnvelope<T>) -> Self {
        if wire.success {
            Self::Success {
                data: wire.data,
                meta: wire.meta,
            }
        } else {
            Self::Failure {
                error: wire
                    .error
                    .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
            }
        }
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let wire = match self {
            Self::Success { data, meta } => WireEnvelopeRef {
                success: true,
                data: data.as_ref(),
                error: None,
                meta: meta.as_ref(),
            },
            Self::Failure { error } => WireEnvelopeRef {
                success: false,
                data: None,
                error: Some(error.as_str()),
                meta: None,
            },
        };
        wire.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        WireEnvelope::<T>::deserialize(deserializer).map(Self::from)
    }
}
