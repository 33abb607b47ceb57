use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{encode, DecodingKey, EncodingKey, Header};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::claims::Claims;
use super::repo_types::User;
use crate::state::AppState;

/// Holds the signing and verification keys with the token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let cfg = &state.config.jwt;
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::from_secs((cfg.ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    /// Signs a fresh token for the user. Tokens are stateless: a new one is
    /// minted on every response, never stored, and validity is decided by
    /// signature and expiry alone.
    pub fn sign(&self, user: &User) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = user.id, "jwt signed");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Validation};

    fn make_keys() -> JwtKeys {
        JwtKeys::from_ref(&AppState::fake())
    }

    fn make_user(id: i64, email: &str) -> User {
        User {
            id,
            username: "Ada".into(),
            email: email.into(),
            password_hash: "irrelevant".into(),
            image: None,
            demo: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn sign_embeds_identity_and_email() {
        let keys = make_keys();
        let token = keys.sign(&make_user(42, "ada@x.io")).expect("sign");
        let data =
            decode::<Claims>(&token, &keys.decoding, &Validation::default()).expect("decode");
        assert_eq!(data.claims.sub, 42);
        assert_eq!(data.claims.email, "ada@x.io");
    }

    #[test]
    fn expiry_is_one_hour_out() {
        let keys = make_keys();
        let token = keys.sign(&make_user(1, "ada@x.io")).expect("sign");
        let data =
            decode::<Claims>(&token, &keys.decoding, &Validation::default()).expect("decode");
        assert_eq!(data.claims.exp - data.claims.iat, 3600);
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let keys = make_keys();
        let token = keys.sign(&make_user(1, "ada@x.io")).expect("sign");
        let other = DecodingKey::from_secret(b"a-different-secret");
        assert!(decode::<Claims>(&token, &other, &Validation::default()).is_err());
    }
}
