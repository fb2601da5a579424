use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::models::Claims;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

/// Issues the signed session token returned by login. The token carries
/// the admin identity and an expiry; nothing is stored server side, so a
/// token stays valid until it expires.
pub fn generate_session_token(admin_id: u64, username: String, secret: &str, ttl: usize) -> String {
    let claims = Claims {
        admin_id,
        sub: username,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn verify_session_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trip_preserves_identity() {
        let token = generate_session_token(42, "admin".to_string(), SECRET, 3600);
        let claims = verify_session_token(&token, SECRET).unwrap();
        assert_eq!(claims.admin_id, 42);
        assert_eq!(claims.sub, "admin");
        assert!(claims.exp > now());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Built directly so the expiry can sit far enough in the past to
        // clear the default validation leeway.
        let claims = Claims {
            admin_id: 1,
            sub: "admin".to_string(),
            exp: now() - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(verify_session_token(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_session_token(1, "admin".to_string(), SECRET, 3600);
        assert!(verify_session_token(&token, "other-secret").is_err());
    }

    #[test]
    fn each_token_gets_a_fresh_jti() {
        let first = generate_session_token(1, "admin".to_string(), SECRET, 3600);
        let second = generate_session_token(1, "admin".to_string(), SECRET, 3600);
        let first_claims = verify_session_token(&first, SECRET).unwrap();
        let second_claims = verify_session_token(&second, SECRET).unwrap();
        assert_ne!(first_claims.jti, second_claims.jti);
    }
}
