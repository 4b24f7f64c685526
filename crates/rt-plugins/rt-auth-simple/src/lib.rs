//! # rt-auth-simple
//!
//! Argon2-based implementation of `AuthProvider`.
//! Handles salted password hashes and opaque session tokens.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use log::{error, warn};
use rt_core::error::{AppError, Result};
use rt_core::traits::AuthProvider;

/// Random bytes behind every session token.
const TOKEN_BYTES: usize = 32;

pub struct SimpleAuthProvider {
    argon2: Argon2<'static>,
}

impl SimpleAuthProvider {
    /// Argon2id with the crate's recommended parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Argon2id with explicit cost parameters (memory in KiB, iterations, lanes).
    /// Cheap settings are useful in tests; stored hashes record their own
    /// parameters, so verification works across settings.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| AppError::Internal(format!("invalid argon2 params: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for SimpleAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for SimpleAuthProvider {
    /// Hashes with a fresh random salt, returning a PHC string
    /// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!("password hashing failed: {e}");
                AppError::Internal(format!("password hashing failed: {e}"))
            })
    }

    /// Verifies if a provided password matches a stored Argon2 hash.
    fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(e) => {
                warn!("stored password hash is not a PHC string: {e}");
                return false;
            }
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// 32 bytes from the OS RNG, base64url without padding.
    fn mint_token(&self) -> Result<String> {
        let mut bytes = [0u8; TOKEN_BYTES];
        getrandom::getrandom(&mut bytes).map_err(|e| {
            error!("no randomness for session token: {e}");
            AppError::Internal(format!("couldn't mint session token: {e}"))
        })?;

        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}
