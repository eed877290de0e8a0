// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use rand::RngCore;
use scrypt::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};
use zeroize::Zeroize;

/// Default scrypt cost (`log2(N)`)
pub const DEFAULT_LOG_N: u8 = 15;

const SALT_BYTES: usize = 16;
const HASH_LEN: usize = 32;

/// Hash a password using scrypt with cost `2^log_n`
pub fn hash_password(plain: &str, log_n: u8) -> anyhow::Result<String> {
    let mut salt_bytes = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow::anyhow!("{e}"))?;

    let params = Params::new(log_n, 8, 1, HASH_LEN).map_err(|e| anyhow::anyhow!("{e}"))?;
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, salt.as_salt())
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a hash
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String, log_n: u8) -> anyhow::Result<String> {
    let hash = hash_password(plain, log_n);
    plain.zeroize();
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the tests fast
    const TEST_LOG_N: u8 = 4;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secret123!", TEST_LOG_N).unwrap();
        assert!(hash.starts_with("$scrypt$"));
        assert!(verify_password(&hash, "Secret123!"));
        assert!(!verify_password(&hash, "secret123!"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("Secret123!", TEST_LOG_N).unwrap();
        let second = hash_password("Secret123!", TEST_LOG_N).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }

    #[test]
    fn test_hash_password_secure_zeroizes() {
        let mut plain = "Secret123!".to_string();
        let hash = hash_password_secure(&mut plain, TEST_LOG_N).unwrap();
        assert!(plain.is_empty());
        assert!(verify_password(&hash, "Secret123!"));
    }
}
