//! Encryption algorithms used to produce cipher, assisted query and like
//! query values.
//!
//! Algorithms are consumed through the [`EncryptAlgorithm`] trait. The
//! built-in ones are created by [`AlgorithmFactory`] from their configured
//! type name:
//!
//! - `AES`              : deterministic AES-256-GCM, base64 output.
//! - `HMAC_SHA256`      : keyed digest for equality lookups, hex output.
//! - `CHAR_DIGEST_LIKE` : per character digest that keeps `%` and `_`.
crate::reexport!(encryptor);
crate::reexport!(aes_encrypt);
crate::reexport!(hmac_digest);
crate::reexport!(char_digest_like);
crate::reexport!(factory);
