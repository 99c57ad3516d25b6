// Admin password hashing.
// Passwords are stretched with PBKDF2-HMAC-SHA256 and a random salt. Only the
// salt, the derived key and the iteration count are persisted; the store
// keeps them base64-encoded in the `Admins` table.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;
use sha2::Sha256;

pub const DEFAULT_ITERATIONS: u32 = 150_000;
pub const SALT_BYTES: usize = 16;
pub const KEY_LEN: usize = 32;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Salted password hash for one admin account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub salt: Vec<u8>,
    pub key: Vec<u8>,
    pub iterations: u32,
}

impl Credentials {
    /// Hash `password` with a fresh random salt.
    pub fn derive(password: &str, iterations: u32) -> Self {
        let mut salt = vec![0u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        let key = stretch(password, &salt, iterations, KEY_LEN);
        Credentials {
            salt,
            key,
            iterations,
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        if self.key.is_empty() {
            return false;
        }
        let candidate = stretch(password, &self.salt, self.iterations, self.key.len());
        constant_time_eq(&candidate, &self.key)
    }

    pub fn salt_b64(&self) -> String {
        STANDARD.encode(&self.salt)
    }

    pub fn key_b64(&self) -> String {
        STANDARD.encode(&self.key)
    }

    /// Rebuild from the stored base64 columns. `None` if either is malformed.
    pub fn from_b64(salt: &str, key: &str, iterations: u32) -> Option<Self> {
        let salt = STANDARD.decode(salt).ok()?;
        let key = STANDARD.decode(key).ok()?;
        Some(Credentials {
            salt,
            key,
            iterations,
        })
    }
}

/// Password policy applied when the admin password is set.
pub fn check_password_policy(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password too short, minimum 6 characters.");
    }
    Ok(())
}

fn stretch(password: &str, salt: &[u8], iterations: u32, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
