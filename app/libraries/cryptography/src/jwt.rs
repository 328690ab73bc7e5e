pub use jsonwebtoken::Algorithm;
use jsonwebtoken::errors::Error;
pub use jsonwebtoken::errors::ErrorKind as JWTErrorKind;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, TokenData, Validation, decode as jdec, encode as jenc,
};
use serde::{Deserialize, Serialize};

/// Claims carried by the auth platform's access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    pub aud: String,
    #[serde(default)]
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

pub fn generate_token<T>(algorithm: Algorithm, key: &str, claims: T) -> Result<String, Error>
where
    T: Serialize,
{
    jenc(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
}

pub fn validate_token<T>(
    algorithm: Algorithm,
    key: &str,
    audience: &str,
    token: &str,
) -> Result<TokenData<T>, Error>
where
    for<'a> T: Deserialize<'a>,
{
    let mut validation = Validation::new(algorithm);
    validation.set_audience(&[audience]);
    jdec::<T>(
        token,
        &DecodingKey::from_secret(key.as_bytes()),
        &validation,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

    fn claims(exp: i64) -> Claims {
        Claims {
            sub: "5f0c2a52-8f0e-4d8b-9a43-0d3c1c4f0a11".to_owned(),
            email: "test@unit".to_owned(),
            aud: "authenticated".to_owned(),
            role: "authenticated".to_owned(),
            exp,
            iat: 0,
            session_id: None,
            user_metadata: UserMetadata {
                full_name: Some("Test Unit".to_owned()),
            },
        }
    }

    #[test]
    fn check_jwt_functions() {
        let token = generate_token(Algorithm::HS256, SECRET, claims(i64::MAX)).unwrap();
        let validate =
            validate_token::<Claims>(Algorithm::HS256, SECRET, "authenticated", &token).unwrap();
        assert_eq!(validate.claims.email, "test@unit");
        assert_eq!(
            validate.claims.user_metadata.full_name.as_deref(),
            Some("Test Unit")
        );

        let token = generate_token(Algorithm::HS256, SECRET, claims(0)).unwrap();
        let error = validate_token::<Claims>(Algorithm::HS256, SECRET, "authenticated", &token)
            .err()
            .unwrap();
        assert_eq!(error.kind(), &JWTErrorKind::ExpiredSignature);
    }

    #[test]
    fn rejects_other_audience_and_secret() {
        let token = generate_token(Algorithm::HS256, SECRET, claims(i64::MAX)).unwrap();
        let error = validate_token::<Claims>(Algorithm::HS256, SECRET, "anon", &token)
            .err()
            .unwrap();
        assert_eq!(error.kind(), &JWTErrorKind::InvalidAudience);
        let error = validate_token::<Claims>(
            Algorithm::HS256,
            "another-secret-that-is-also-long-enough",
            "authenticated",
            &token,
        )
        .err()
        .unwrap();
        assert_eq!(error.kind(), &JWTErrorKind::InvalidSignature);
    }
}
