use std::collections::HashMap;

use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::ClaimsError;

/// Claim keys owned by the codec. Augmentation hooks may not set these.
pub const RESERVED_KEYS: [&str; 3] = ["identity", "issued-at", "expires-at"];

/// Signed token payload.
///
/// The subject identifier is an opaque JSON scalar the core never inspects
/// beyond equality. Custom fields live in `extra` and are flattened into
/// the encoded payload. Invariant: `expires_at > issued_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier of the authenticated principal.
    pub identity: serde_json::Value,

    /// Unix timestamp the token was issued at.
    #[serde(rename = "issued-at")]
    pub issued_at: i64,

    /// Unix timestamp the token stops being valid at.
    #[serde(rename = "expires-at")]
    pub expires_at: i64,

    /// Additional custom fields (flattened into the payload).
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims issued now, expiring `lifetime_seconds` from now.
    pub fn issue(identity: serde_json::Value, lifetime_seconds: i64) -> Self {
        Self::issue_at(identity, Utc::now().timestamp(), lifetime_seconds)
    }

    /// Create claims with an explicit issue time.
    pub fn issue_at(identity: serde_json::Value, issued_at: i64, lifetime_seconds: i64) -> Self {
        debug_assert!(lifetime_seconds > 0, "token lifetime must be positive");

        Self {
            identity,
            issued_at,
            expires_at: issued_at + lifetime_seconds,
            extra: HashMap::new(),
        }
    }

    /// Add a custom field, rejecting codec-owned keys.
    pub fn merge_extra(
        &mut self,
        key: String,
        value: serde_json::Value,
    ) -> Result<(), ClaimsError> {
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(ClaimsError::ReservedKey(key));
        }

        self.extra.insert(key, value);
        Ok(())
    }

    /// Whether the token is no longer valid at `now`, allowing `leeway`
    /// seconds of clock skew.
    pub fn is_expired(&self, now: i64, leeway: i64) -> bool {
        now >= self.expires_at + leeway
    }
}
