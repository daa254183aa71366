//! Request identifiers in TypeID format
//!
//! Every request is tagged with a [`RequestId`] of the form
//! `req_<base32 uuidv7>`, which sorts by creation time and reads well in
//! logs:
//!
//! ```rust
//! use lens_catalog::ids::RequestId;
//!
//! let request_id = RequestId::new();
//! assert!(request_id.as_str().starts_with("req_"));
//! ```
//!
//! Product identifiers stay plain UUIDs on the wire; only request
//! tracking uses TypeIDs.

use http::Request;
use mti::prelude::*;
use std::fmt;
use std::str::FromStr;
use tower_http::request_id::{MakeRequestId, RequestId as TowerRequestId};

/// A request identifier for log correlation
///
/// Format: `req_01h455vb4pex5vsknk084sn02q`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(MagicTypeId);

impl RequestId {
    /// The prefix used for request IDs
    pub const PREFIX: &'static str = "req";

    /// Creates a new, time-sortable request ID
    #[must_use]
    pub fn new() -> Self {
        Self(Self::PREFIX.create_type_id::<V7>())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        self.0.prefix().as_str()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = RequestIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mti = MagicTypeId::from_str(s).map_err(RequestIdError::Parse)?;

        if mti.prefix().as_str() != Self::PREFIX {
            return Err(RequestIdError::InvalidPrefix {
                expected: Self::PREFIX.to_string(),
                actual: mti.prefix().as_str().to_string(),
            });
        }

        Ok(Self(mti))
    }
}

impl AsRef<str> for RequestId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Error type for request ID parsing
#[derive(Debug, thiserror::Error)]
pub enum RequestIdError {
    #[error("failed to parse request ID: {0}")]
    Parse(#[from] MagicTypeIdError),

    #[error("invalid prefix: expected '{expected}', got '{actual}'")]
    InvalidPrefix { expected: String, actual: String },
}

/// Generates [`RequestId`]s for `tower_http`'s `SetRequestIdLayer`
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeTypedRequestId;

impl MakeRequestId for MakeTypedRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<TowerRequestId> {
        let id = RequestId::new();
        let header_value = http::HeaderValue::from_str(id.as_str()).ok()?;
        Some(TowerRequestId::new(header_value))
    }
}
