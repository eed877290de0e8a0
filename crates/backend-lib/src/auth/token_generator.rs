// ============================
// crates/backend-lib/src/auth/token_generator.rs
// ============================
//! Random session tokens for the `auth_token` cookie.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

/// Random bytes behind each token
const SESSION_TOKEN_BYTES: usize = 32;

/// A fresh session token: 32 random bytes as unpadded URL-safe base64.
///
/// The alphabet has no `:`, so a token never breaks the `<id>:<token>`
/// cookie value.
pub fn new_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_session_tokens_are_cookie_safe() {
        let token = new_session_token();
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

        let decoded = URL_SAFE_NO_PAD.decode(&token).unwrap();
        assert_eq!(decoded.len(), SESSION_TOKEN_BYTES);
    }

    #[test]
    fn test_session_tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..64).map(|_| new_session_token()).collect();
        assert_eq!(tokens.len(), 64);
    }
}
