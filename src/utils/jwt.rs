use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // employee id
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: String,
}

const SESSION_TOKEN_TYPE: &str = "session";

/// Signs and checks the identity token carried by the session cookie.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, session_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_expires_in,
        }
    }

    pub fn generate_session_token(&self, employee_id: i64, username: &str) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.session_expires_in);

        let claims = Claims {
            sub: employee_id.to_string(),
            username: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    /// Returns the employee id the token was issued for.
    pub fn verify_session_token(&self, token: &str) -> AppResult<i64> {
        let validation = Validation::new(Algorithm::HS256);
        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)?;

        if claims.token_type != SESSION_TOKEN_TYPE {
            return Err(AppError::AuthError("Invalid session token type".to_string()));
        }

        claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::AuthError("Invalid session subject".to_string()))
    }

    pub fn session_expires_in(&self) -> i64 {
        self.session_expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_round_trip() {
        let jwt = JwtService::new("secret", 3600);
        let token = jwt.generate_session_token(7, "admin").unwrap();
        assert_eq!(jwt.verify_session_token(&token).unwrap(), 7);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a", 3600);
        let verifier = JwtService::new("secret-b", 3600);
        let token = issuer.generate_session_token(1, "admin").unwrap();
        assert!(verifier.verify_session_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Past the default 60s validation leeway.
        let jwt = JwtService::new("secret", -3600);
        let token = jwt.generate_session_token(1, "admin").unwrap();
        assert!(jwt.verify_session_token(&token).is_err());
    }
}
