//! Credential pool with cyclic round-robin selection.
//!
//! The pool is the gateway's only shared mutable resource. Every
//! operation holds the one inner lock for its whole critical section, so
//! cursor advancement stays atomic with respect to concurrent callers.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::Serialize;

/// Status entry for one pooled credential, keyed by display id. Validity
/// is binary presence: anything still in the pool reports valid.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TokenStatus {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub index: usize,
}

#[derive(Default)]
struct PoolInner {
    tokens: Vec<String>,
    cursor: usize,
}

/// Ordered, deduplicated set of upstream session cookies plus a rotation
/// cursor. Membership changes reset the cursor to zero: rotation
/// position is not preserved across add/remove.
#[derive(Default)]
pub struct CredentialPool {
    inner: Mutex<PoolInner>,
}

impl CredentialPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a credential. Rejects empty and duplicate values.
    pub fn add(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        let mut inner = self.inner.lock();
        if inner.tokens.iter().any(|t| t == token) {
            return false;
        }
        inner.tokens.push(token.to_string());
        inner.cursor = 0;
        tracing::info!("credential added: {}...", preview(token));
        true
    }

    /// Remove a credential (admin delete or eviction). Returns whether
    /// removal occurred.
    pub fn remove(&self, token: &str) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.tokens.len();
        inner.tokens.retain(|t| t != token);
        let removed = inner.tokens.len() != before;
        if removed {
            inner.cursor = 0;
            tracing::info!("credential removed: {}...", preview(token));
        }
        removed
    }

    /// Next credential in strict insertion-order rotation, or `None`
    /// when the pool is empty. Never panics.
    pub fn next(&self) -> Option<String> {
        let mut inner = self.inner.lock();
        if inner.tokens.is_empty() {
            return None;
        }
        let token = inner.tokens[inner.cursor].clone();
        inner.cursor = (inner.cursor + 1) % inner.tokens.len();
        Some(token)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().tokens.len()
    }

    /// Presence-only status view keyed by display id.
    pub fn status_snapshot(&self) -> BTreeMap<String, TokenStatus> {
        let inner = self.inner.lock();
        inner
            .tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (display_id(token, index), TokenStatus { is_valid: true, index }))
            .collect()
    }
}

/// Short display id: the `sso=` sub-value when the cookie carries one,
/// `token_<index>` otherwise.
pub fn display_id(token: &str, index: usize) -> String {
    token
        .split("sso=")
        .nth(1)
        .and_then(|rest| rest.split(';').next())
        .map(str::to_string)
        .unwrap_or_else(|| format!("token_{index}"))
}

/// Wrap a raw seed value in the cookie pair the upstream expects.
pub fn format_session_cookie(seed: &str) -> String {
    format!("sso-rw={seed};sso={seed}")
}

/// Loggable credential prefix. Cookies are ASCII, so a byte cut is safe.
pub fn preview(token: &str) -> &str {
    token.get(..20).unwrap_or(token)
}
