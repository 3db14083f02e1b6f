use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::HttpRequest;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Issued bearer tokens and their expiry.
#[derive(Clone)]
pub struct TokenStore {
    ttl: Duration,
    issued: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
}

impl TokenStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            issued: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Issue a fresh random 32-byte hex token. Expired tokens are purged first.
    pub fn issue(&self) -> String {
        self.issue_at(Utc::now())
    }

    pub fn issue_at(&self, now: DateTime<Utc>) -> String {
        let bytes: [u8; 32] = rand::rng().random();
        let token = hex::encode(bytes);
        let mut map = self.issued.lock().unwrap_or_else(|e| e.into_inner());
        map.retain(|_, expires| *expires > now);
        map.insert(token.clone(), now + self.ttl);
        token
    }

    /// Number of tokens currently held, expired or not.
    pub fn len(&self) -> usize {
        self.issued.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the token was issued here and has not expired.
    /// Expired entries are dropped on the way.
    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        let mut map = self.issued.lock().unwrap_or_else(|e| e.into_inner());
        match map.get(token) {
            Some(expires) if *expires > now => true,
            Some(_) => {
                map.remove(token);
                false
            }
            None => false,
        }
    }

    pub fn revoke(&self, token: &str) {
        let mut map = self.issued.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(token);
    }
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
