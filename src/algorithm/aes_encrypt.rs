use crate::*;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce, aead::Aead};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

const NONCE_LEN: usize = 12;

/// Deterministic AES-256-GCM.
///
/// The key is the SHA-256 of the configured `aes-key-value`. The nonce is
/// derived from the plain text so equal inputs encrypt to equal outputs,
/// which equality predicates on the cipher column rely on. Output is
/// `base64(nonce || ciphertext)`.
#[derive(Clone)]
pub struct AesEncryptAlgorithm {
    key: [u8; 32],
}

impl std::fmt::Debug for AesEncryptAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesEncryptAlgorithm").finish_non_exhaustive()
    }
}

impl AesEncryptAlgorithm {
    pub const TYPE: &'static str = "AES";

    pub fn new(key_value: &str) -> Self {
        Self {
            key: Sha256::digest(key_value.as_bytes()).into(),
        }
    }

    pub fn from_props(props: &Props) -> Result<Self> {
        Ok(Self::new(required_prop(props, "aes-key-value", Self::TYPE)?))
    }

    /// Reverses [`EncryptAlgorithm::encrypt`]. Only used to verify stored values.
    pub fn decrypt(&self, cipher: &str) -> Result<String> {
        let bytes = STANDARD
            .decode(cipher)
            .map_err(|e| Error::Algorithm(format!("invalid AES cipher text: {e}")))?;
        if bytes.len() < NONCE_LEN {
            return Err(Error::Algorithm("AES cipher text is too short".to_string()));
        }
        let (nonce, payload) = bytes.split_at(NONCE_LEN);
        let plain = self
            .cipher()?
            .decrypt(Nonce::from_slice(nonce), payload)
            .map_err(|e| Error::Algorithm(format!("AES decrypt failed: {e}")))?;
        String::from_utf8(plain).map_err(|e| Error::Algorithm(e.to_string()))
    }

    fn cipher(&self) -> Result<Aes256Gcm> {
        Aes256Gcm::new_from_slice(&self.key).map_err(|e| Error::Algorithm(e.to_string()))
    }
}

impl EncryptAlgorithm for AesEncryptAlgorithm {
    fn algorithm_type(&self) -> &str {
        Self::TYPE
    }

    fn encrypt(&self, plain: &Value, _context: &EncryptContext<'_>) -> Result<Value> {
        if plain.is_null() {
            return Ok(Value::Null);
        }
        let text = plain.to_string();
        let digest = hmac_sha256(&self.key, text.as_bytes())?;
        let nonce = &digest[..NONCE_LEN];
        let ciphertext = self
            .cipher()?
            .encrypt(Nonce::from_slice(nonce), text.as_bytes())
            .map_err(|e| Error::Algorithm(format!("AES encrypt failed: {e}")))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(nonce);
        out.extend_from_slice(&ciphertext);
        Ok(Value::Text(STANDARD.encode(out)))
    }
}
