//! Admin session authentication.
//!
//! Credentials live in configuration as a username plus the SHA-256 hex
//! digest of the password. A successful login issues an opaque expiring
//! token tracked in memory; restarting the server logs everyone out.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use time::{Duration, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

const SOURCE: &str = "application::auth";

pub const SESSION_COOKIE: &str = "kadro_admin_session";

pub struct AdminAuthService {
    username: String,
    password_digest: Vec<u8>,
    session_ttl: Duration,
    sessions: DashMap<String, OffsetDateTime>,
}

impl AdminAuthService {
    /// `password_sha256` is the lowercase hex digest from configuration.
    pub fn new(username: String, password_sha256: &str, session_ttl: Duration) -> Self {
        let password_digest = hex::decode(password_sha256).unwrap_or_default();
        Self {
            username,
            password_digest,
            session_ttl,
            sessions: DashMap::new(),
        }
    }

    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        let digest = Sha256::digest(password.as_bytes());
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = digest.as_slice().ct_eq(&self.password_digest);
        bool::from(user_ok & pass_ok)
    }

    /// Check credentials and mint a session token on success.
    pub fn login(&self, username: &str, password: &str) -> Option<String> {
        if !self.verify_credentials(username, password) {
            metrics::counter!("kadro_admin_logins_total", "outcome" => "rejected").increment(1);
            return None;
        }
        metrics::counter!("kadro_admin_logins_total", "outcome" => "accepted").increment(1);
        let token = mint_token();
        let expires = OffsetDateTime::now_utc() + self.session_ttl;
        self.sessions.insert(token.clone(), expires);
        info!(target = SOURCE, "admin session issued");
        Some(token)
    }

    /// True when the token exists and has not expired. Expired tokens are
    /// pruned on sight.
    pub fn validate_session(&self, token: &str) -> bool {
        // The read guard must drop before `remove` to avoid self-deadlock.
        let live = match self.sessions.get(token) {
            Some(entry) => *entry.value() > OffsetDateTime::now_utc(),
            None => return false,
        };
        if !live {
            self.sessions.remove(token);
        }
        live
    }

    pub fn logout(&self, token: &str) {
        if self.sessions.remove(token).is_some() {
            info!(target = SOURCE, "admin session revoked");
        }
    }
}

fn mint_token() -> String {
    let mut bytes = Vec::with_capacity(32);
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hex SHA-256 of a password, for generating configuration values.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
