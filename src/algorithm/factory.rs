use crate::*;
use std::sync::Arc;

pub struct AlgorithmFactory;

impl AlgorithmFactory {
    /// Creates a built-in algorithm from its type name, case insensitive.
    pub fn create(algorithm_type: &str, props: &Props) -> Result<Arc<dyn EncryptAlgorithm>> {
        let algorithm: Arc<dyn EncryptAlgorithm> = match algorithm_type.to_ascii_uppercase().as_str() {
            AesEncryptAlgorithm::TYPE => Arc::new(AesEncryptAlgorithm::from_props(props)?),
            HmacSha256Algorithm::TYPE => Arc::new(HmacSha256Algorithm::from_props(props)?),
            CharDigestLikeAlgorithm::TYPE => Arc::new(CharDigestLikeAlgorithm::from_props(props)?),
            _ => {
                return Err(Error::Config(format!(
                    "Unknown encrypt algorithm type `{algorithm_type}`"
                )));
            }
        };
        trace!("Created encrypt algorithm {algorithm:?}");
        Ok(algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AES", &[("aes-key-value", "123456")], "AES")]
    #[case("aes", &[("aes-key-value", "123456")], "AES")]
    #[case("HMAC_SHA256", &[("key", "k")], "HMAC_SHA256")]
    #[case("char_digest_like", &[], "CHAR_DIGEST_LIKE")]
    fn creates_known_types(#[case] name: &str, #[case] props: &[(&str, &str)], #[case] expected: &str) {
        let props = props
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Props>();
        let algorithm = AlgorithmFactory::create(name, &props).unwrap();
        assert_eq!(algorithm.algorithm_type(), expected);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result = AlgorithmFactory::create("RC4", &Props::new());
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("RC4")));
    }
}
