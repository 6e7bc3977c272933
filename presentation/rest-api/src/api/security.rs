use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use business::domain::shared::value_objects::{UserId, UserRef};

use crate::config::firebase_config::FirebaseConfig;

const GOOGLE_CERTS_URL: &str =
    "https://www.googleapis.com/robot/v1/metadata/x509/securetoken@system.gserviceaccount.com";
const CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("auth.not_configured")]
    NotConfigured,
    #[error("auth.certs_fetch_failed: {0}")]
    CertsFetch(String),
    #[error("auth.cert_decode_failed: {0}")]
    CertDecode(String),
    #[error("auth.cache_poisoned")]
    CachePoisoned,
    #[error("auth.certs_not_loaded")]
    CertsNotLoaded,
    #[error("auth.invalid_token_header: {0}")]
    InvalidHeader(String),
    #[error("auth.missing_kid")]
    MissingKid,
    #[error("auth.unknown_kid")]
    UnknownKid,
    #[error("auth.token_validation_failed: {0}")]
    Validation(String),
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    name: Option<String>,
    email: Option<String>,
}

/// The signed-in user behind a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: UserId,
    pub display_name: String,
}

impl SessionUser {
    fn from_claims(claims: FirebaseClaims) -> Self {
        let display_name = claims
            .name
            .filter(|n| !n.trim().is_empty())
            .or(claims.email)
            .unwrap_or_else(|| claims.sub.clone());
        Self {
            id: UserId::new(claims.sub),
            display_name,
        }
    }

    pub fn as_owner(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

struct CachedCerts {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
}

static CERTS_CACHE: Lazy<RwLock<Option<CachedCerts>>> = Lazy::new(|| RwLock::new(None));
static FIREBASE: Lazy<Option<FirebaseConfig>> = Lazy::new(FirebaseConfig::from_env);

async fn fetch_google_certs() -> Result<HashMap<String, DecodingKey>, AuthError> {
    let response: HashMap<String, String> = reqwest::get(GOOGLE_CERTS_URL)
        .await
        .map_err(|e| AuthError::CertsFetch(e.to_string()))?
        .json()
        .await
        .map_err(|e| AuthError::CertsFetch(e.to_string()))?;

    response
        .into_iter()
        .map(|(kid, pem)| {
            DecodingKey::from_rsa_pem(pem.as_bytes())
                .map(|key| (kid, key))
                .map_err(|e| AuthError::CertDecode(e.to_string()))
        })
        .collect()
}

/// Makes sure fresh signing certs are cached.
async fn refresh_certs_if_stale() -> Result<(), AuthError> {
    {
        let cache = CERTS_CACHE.read().map_err(|_| AuthError::CachePoisoned)?;
        if cache
            .as_ref()
            .is_some_and(|cached| cached.fetched_at.elapsed() < CACHE_TTL)
        {
            return Ok(());
        }
    }

    let keys = fetch_google_certs().await?;

    let mut cache = CERTS_CACHE.write().map_err(|_| AuthError::CachePoisoned)?;
    *cache = Some(CachedCerts {
        keys,
        fetched_at: Instant::now(),
    });
    Ok(())
}

/// Verifies `token` against the cached certs. Certs must already be loaded.
fn session_from_token(token: &str, project_id: &str) -> Result<SessionUser, AuthError> {
    let header = decode_header(token).map_err(|e| AuthError::InvalidHeader(e.to_string()))?;
    let kid = header.kid.ok_or(AuthError::MissingKid)?;

    let cache = CERTS_CACHE.read().map_err(|_| AuthError::CachePoisoned)?;
    let cached = cache.as_ref().ok_or(AuthError::CertsNotLoaded)?;
    let decoding_key = cached.keys.get(&kid).ok_or(AuthError::UnknownKid)?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[project_id]);
    validation.set_issuer(&[format!("https://securetoken.google.com/{project_id}")]);
    validation.validate_exp = true;

    let token_data = decode::<FirebaseClaims>(token, decoding_key, &validation)
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    Ok(SessionUser::from_claims(token_data.claims))
}

async fn authenticate(token: &str) -> Result<SessionUser, AuthError> {
    let config = FIREBASE.as_ref().ok_or(AuthError::NotConfigured)?;
    refresh_certs_if_stale().await?;
    session_from_token(token, &config.project_id)
}

/// Resolves the session behind a raw bearer token, `None` when it does not
/// verify.
async fn verify_bearer(token: &str) -> Option<SessionUser> {
    match authenticate(token).await {
        Ok(session) => Some(session),
        Err(AuthError::NotConfigured) => {
            tracing::error!("FIREBASE_PROJECT_ID is not set, rejecting bearer token");
            None
        }
        Err(e) => {
            tracing::warn!("Firebase auth failed: {e}");
            None
        }
    }
}

/// Session from an optional `Authorization: Bearer <token>` header value.
pub async fn optional_session(authorization: Option<&str>) -> Option<SessionUser> {
    let token = authorization?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    verify_bearer(token).await
}

/// Turns the raw `Authorization` header of a request into a verified session.
/// A missing or rejected token yields `None`.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, authorization: Option<&str>) -> Option<SessionUser>;
}

/// Sessions backed by Firebase ID tokens.
pub struct FirebaseSessions;

#[async_trait]
impl SessionResolver for FirebaseSessions {
    async fn resolve(&self, authorization: Option<&str>) -> Option<SessionUser> {
        optional_session(authorization).await
    }
}
