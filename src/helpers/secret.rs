//! Token sealing for the persisted session.
//!
//! The bearer token is stored AES-256-GCM encrypted with a per-install key
//! that lives next to the session file. Sealed values are Base64 of
//! `[nonce (12 bytes)][ciphertext]`.

use crate::error::{Error, Result};
use aes_gcm::{
    Aes256Gcm, Key,
    aead::{Aead, AeadCore, KeyInit, Nonce, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use std::fs;
use std::path::Path;

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

/// Cipher bound to one install key
pub struct TokenCipher {
    cipher: Aes256Gcm,
}

impl TokenCipher {
    /// Build a cipher from raw key bytes
    pub fn from_key(key: &[u8; KEY_LEN]) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Read the key file at `path`, generating it on first use
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let encoded = fs::read_to_string(path)?;
            let bytes = BASE64.decode(encoded.trim()).map_err(|e| Error::Invalid {
                message: format!("Key file is not Base64: {e}"),
            })?;
            let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| Error::Invalid {
                message: "Key file has the wrong length".to_string(),
            })?;
            return Ok(Self::from_key(&key));
        }

        let key = Aes256Gcm::generate_key(&mut OsRng);
        fs::write(path, BASE64.encode(key.as_slice()))?;
        tracing::debug!(path = ?path, "Generated session key");
        Ok(Self {
            cipher: Aes256Gcm::new(&key),
        })
    }

    /// Encrypt `plain_text`; every call uses a fresh nonce
    pub fn seal(&self, plain_text: &str) -> Result<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plain_text.as_bytes())
            .map_err(|e| Error::Invalid {
                message: format!("Encryption failed: {e}"),
            })?;

        let mut combined = nonce.to_vec();
        combined.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(combined))
    }

    /// Decrypt a value produced by [`TokenCipher::seal`]
    pub fn open(&self, sealed: &str) -> Result<String> {
        let data = BASE64.decode(sealed).map_err(|e| Error::Invalid {
            message: format!("Base64 decode failed: {e}"),
        })?;

        if data.len() < NONCE_LEN {
            return Err(Error::Invalid {
                message: "Ciphertext too short".to_string(),
            });
        }

        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
        let nonce = Nonce::<Aes256Gcm>::from_slice(nonce_bytes);
        let plain = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| Error::Invalid {
                message: format!("Decryption failed: {e}"),
            })?;

        String::from_utf8(plain).map_err(|e| Error::Invalid {
            message: format!("UTF-8 decode failed: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open() {
        let cipher = TokenCipher::from_key(&[7u8; KEY_LEN]);
        let sealed = cipher.seal("eyJhbGciOi").unwrap();
        assert_eq!(cipher.open(&sealed).unwrap(), "eyJhbGciOi");
        // Random nonce per call
        assert_ne!(sealed, cipher.seal("eyJhbGciOi").unwrap());
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let sealed = TokenCipher::from_key(&[1u8; KEY_LEN]).seal("token").unwrap();
        assert!(TokenCipher::from_key(&[2u8; KEY_LEN]).open(&sealed).is_err());
    }

    #[test]
    fn test_open_garbage() {
        let cipher = TokenCipher::from_key(&[1u8; KEY_LEN]);
        assert!(cipher.open("not_valid_base64!!!").is_err());
        assert!(cipher.open("AQIDBA==").is_err());
    }

    #[test]
    fn test_key_file_is_reused() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.key");
        let first = TokenCipher::load_or_create(&path).unwrap();
        let sealed = first.seal("abc").unwrap();
        let second = TokenCipher::load_or_create(&path).unwrap();
        assert_eq!(second.open(&sealed).unwrap(), "abc");
    }
}
