use rand::{rngs::OsRng, RngCore};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Header scheme for authenticated requests: `Authorization: Token <value>`.
pub const SCHEME: &str = "Token ";

const TOKEN_BYTES: usize = 32;

/// Mint a fresh opaque token: 256 bits from the OS CSPRNG, hex-encoded.
pub fn generate() -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Pull the token value out of an Authorization header. Returns `None` for a
/// missing scheme, a different scheme, or an empty value.
pub fn parse_header(value: &str) -> Option<&str> {
    let token = value.strip_prefix(SCHEME)?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Persist `token` as the single live token for `user_id`. The upsert is
/// atomic, so concurrent re-issuance cannot leave two live tokens.
pub async fn store(db: &PgPool, user_id: Uuid, token: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO auth_tokens (user_id, token)
        VALUES ($1, $2)
        ON CONFLICT (user_id)
        DO UPDATE SET token = EXCLUDED.token, created_at = now()
        "#,
    )
    .bind(user_id)
    .bind(token)
    .execute(db)
    .await?;
    debug!(user_id = %user_id, "token issued");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_64_hex_chars() {
        let token = generate();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_tokens_do_not_repeat() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }

    #[test]
    fn parse_header_accepts_token_scheme() {
        assert_eq!(parse_header("Token abc123"), Some("abc123"));
    }

    #[test]
    fn parse_header_rejects_other_schemes() {
        assert_eq!(parse_header("Bearer abc123"), None);
        assert_eq!(parse_header("token abc123"), None);
        assert_eq!(parse_header("abc123"), None);
    }

    #[test]
    fn parse_header_rejects_empty_value() {
        assert_eq!(parse_header("Token "), None);
        assert_eq!(parse_header("Token    "), None);
    }
}
