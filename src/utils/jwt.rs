use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const ACCESS: &str = "access";
const REFRESH: &str = "refresh";
const REFRESH_COOKIE: &str = "refresh_token";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 账号 ID
    pub role: String,       // 签发时的角色，仅供参考，权限以存储中的账号为准
    pub token_type: String, // "access" 或 "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn account_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    fn encode_with_secret(
        secret: &str,
        account_id: i64,
        role: &str,
        token_type: &str,
        ttl: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    fn decode_with_secret(
        secret: &str,
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn generate_access_token(
        account_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let minutes = AppConfig::get().jwt.access_token_expiry;
        Self::encode_with_secret(
            Self::secret(),
            account_id,
            role,
            ACCESS,
            chrono::Duration::minutes(minutes),
        )
    }

    /// `ttl` 为空时使用配置的默认有效期
    pub fn generate_refresh_token(
        account_id: i64,
        role: &str,
        ttl: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let ttl = ttl.unwrap_or_else(|| {
            chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry)
        });
        Self::encode_with_secret(Self::secret(), account_id, role, REFRESH, ttl)
    }

    pub fn generate_token_pair(
        account_id: i64,
        role: &str,
        refresh_ttl: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(account_id, role)?,
            refresh_token: Self::generate_refresh_token(account_id, role, refresh_ttl)?,
        })
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(Self::secret(), token, ACCESS)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(Self::secret(), token, REFRESH)
    }

    /// 使用 Refresh Token 换取新的 Access Token
    pub fn refresh_access_token(
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let account_id = claims
            .account_id()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_access_token(account_id, &claims.role)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        ttl: chrono::Duration,
    ) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(ttl.num_seconds()))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的 Refresh Token Cookie，用于清除失效令牌
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_access_token_round_trip() {
        let token =
            JwtUtils::encode_with_secret(SECRET, 7, "manager", ACCESS, chrono::Duration::minutes(5))
                .unwrap();
        let claims = JwtUtils::decode_with_secret(SECRET, &token, ACCESS).unwrap();
        assert_eq!(claims.account_id(), Some(7));
        assert_eq!(claims.role, "manager");
    }

    #[test]
    fn test_token_type_is_enforced() {
        let refresh =
            JwtUtils::encode_with_secret(SECRET, 7, "user", REFRESH, chrono::Duration::days(1))
                .unwrap();
        assert!(JwtUtils::decode_with_secret(SECRET, &refresh, ACCESS).is_err());
    }

    #[test]
    fn test_wrong_secret_and_expiry_are_rejected() {
        let token =
            JwtUtils::encode_with_secret(SECRET, 7, "user", ACCESS, chrono::Duration::minutes(5))
                .unwrap();
        assert!(JwtUtils::decode_with_secret("other-secret", &token, ACCESS).is_err());

        let expired =
            JwtUtils::encode_with_secret(SECRET, 7, "user", ACCESS, chrono::Duration::hours(-2))
                .unwrap();
        assert!(JwtUtils::decode_with_secret(SECRET, &expired, ACCESS).is_err());
    }
}
