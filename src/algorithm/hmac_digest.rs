use crate::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub(crate) fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; 32]> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| Error::Algorithm(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Assisted query algorithm: a keyed SHA-256 digest rendered as lowercase hex.
///
/// Equal plain values always produce equal digests, which is what makes
/// equality predicates work against the assisted query column.
#[derive(Debug, Clone)]
pub struct HmacSha256Algorithm {
    key: Vec<u8>,
}

impl HmacSha256Algorithm {
    pub const TYPE: &'static str = "HMAC_SHA256";

    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.as_ref().to_vec(),
        }
    }

    pub fn from_props(props: &Props) -> Result<Self> {
        Ok(Self::new(required_prop(props, "key", Self::TYPE)?))
    }
}

impl EncryptAlgorithm for HmacSha256Algorithm {
    fn algorithm_type(&self) -> &str {
        Self::TYPE
    }

    fn encrypt(&self, plain: &Value, _context: &EncryptContext<'_>) -> Result<Value> {
        if plain.is_null() {
            return Ok(Value::Null);
        }
        let digest = hmac_sha256(&self.key, plain.to_string().as_bytes())?;
        Ok(Value::Text(
            digest.iter().map(|byte| format!("{byte:02x}")).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: EncryptContext<'static> = EncryptContext {
        database: "db",
        schema: "db",
        table: "t_user",
        column: "pwd",
    };

    #[test]
    fn digest_is_stable_and_keyed() {
        let first = HmacSha256Algorithm::new("k1");
        let second = HmacSha256Algorithm::new("k2");
        let plain = Value::from("secret");

        let a = first.encrypt(&plain, &CONTEXT).unwrap();
        assert_eq!(a, first.encrypt(&plain, &CONTEXT).unwrap());
        assert_ne!(a, second.encrypt(&plain, &CONTEXT).unwrap());
        assert_eq!(a.as_text().map(str::len), Some(64));
    }

    #[test]
    fn null_passes_through() {
        let algorithm = HmacSha256Algorithm::new("k");
        assert_eq!(algorithm.encrypt(&Value::Null, &CONTEXT).unwrap(), Value::Null);
    }

    #[test]
    fn key_is_required() {
        let result = HmacSha256Algorithm::from_props(&Props::new());
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
