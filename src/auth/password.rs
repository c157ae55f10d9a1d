use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

pub const MIN_PASSWORD_LEN: usize = 8;
/// Upper bound in bytes, so a huge body can't pin a worker inside argon2.
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// Admin accounts are the only thing guarding the signup list; reject
/// passwords that are short, blank or oversized before hashing.
pub fn check_password(plain: &str) -> Result<(), &'static str> {
    if plain.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters");
    }
    if plain.trim().is_empty() {
        return Err("Password cannot be blank");
    }
    if plain.len() > MAX_PASSWORD_BYTES {
        return Err("Password is too long");
    }
    Ok(())
}

fn argon2_failure(step: &'static str, e: argon2::password_hash::Error) -> anyhow::Error {
    error!(error = %e, step, "argon2 failure");
    anyhow::anyhow!("argon2 {step}: {e}")
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| argon2_failure("hash", e))
}

/// `Ok(false)` for a wrong password; `Err` only when the stored hash is
/// unreadable.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| argon2_failure("parse", e))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_blank_and_oversized_passwords_are_refused() {
        assert_eq!(check_password("seven77"), Err("Password must be at least 8 characters"));
        assert_eq!(check_password("        "), Err("Password cannot be blank"));
        assert_eq!(check_password(&"x".repeat(MAX_PASSWORD_BYTES + 1)), Err("Password is too long"));
        assert_eq!(check_password("eight888"), Ok(()));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 4 chars, 8 bytes
        assert!(check_password("éééé").is_err());
        assert!(check_password("éééééééé").is_ok());
    }

    #[test]
    fn stored_admin_hash_verifies_only_its_password() {
        let hash = hash_password("futurearc-admin").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("futurearc-admin", &hash).unwrap());
        assert!(!verify_password("futurearc-Admin", &hash).unwrap());
    }

    #[test]
    fn unreadable_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-valid-hash").is_err());
    }
}
