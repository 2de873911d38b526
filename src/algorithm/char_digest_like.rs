use crate::*;

const DEFAULT_DELTA: u32 = 1;
const DEFAULT_MASK: u32 = 0b1111_0111_1101;
const DEFAULT_START: u32 = 0x4e00;

/// Like query algorithm.
///
/// Every character is mapped on its own, so a `LIKE` pattern encrypted with
/// the same algorithm still lines up with the stored values. The wildcards
/// `%` and `_` are kept, and a character escaped with `\` is digested while
/// the escape itself is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharDigestLikeAlgorithm {
    delta: u32,
    mask: u32,
    start: u32,
}

impl Default for CharDigestLikeAlgorithm {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
            mask: DEFAULT_MASK,
            start: DEFAULT_START,
        }
    }
}

impl CharDigestLikeAlgorithm {
    pub const TYPE: &'static str = "CHAR_DIGEST_LIKE";

    pub fn from_props(props: &Props) -> Result<Self> {
        let parse = |key: &str, default: u32| -> Result<u32> {
            match props.get(key) {
                Some(value) => value.trim().parse().map_err(|_| {
                    Error::Config(format!("`{key}` of `{}` must be a number, got `{value}`", Self::TYPE))
                }),
                None => Ok(default),
            }
        };
        Ok(Self {
            delta: parse("delta", DEFAULT_DELTA)?,
            mask: parse("mask", DEFAULT_MASK)?,
            start: parse("start", DEFAULT_START)?,
        })
    }

    fn digest_char(&self, c: char) -> char {
        let masked = ((c as u32).wrapping_add(self.delta) & self.mask).wrapping_add(self.start);
        char::from_u32(masked).unwrap_or(c)
    }

    pub fn digest(&self, plain: &str) -> String {
        let mut out = String::with_capacity(plain.len());
        let mut escaped = false;
        for c in plain.chars() {
            match c {
                _ if escaped => {
                    out.push(self.digest_char(c));
                    escaped = false;
                }
                '\\' => {
                    out.push(c);
                    escaped = true;
                }
                '%' | '_' => out.push(c),
                _ => out.push(self.digest_char(c)),
            }
        }
        out
    }
}

impl EncryptAlgorithm for CharDigestLikeAlgorithm {
    fn algorithm_type(&self) -> &str {
        Self::TYPE
    }

    fn encrypt(&self, plain: &Value, _context: &EncryptContext<'_>) -> Result<Value> {
        if plain.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::Text(self.digest(&plain.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_survive() {
        let algorithm = CharDigestLikeAlgorithm::default();
        let digest = algorithm.digest("%ab_c%");
        let chars: Vec<char> = digest.chars().collect();
        assert_eq!(chars.len(), 6);
        assert_eq!(chars[0], '%');
        assert_eq!(chars[3], '_');
        assert_eq!(chars[5], '%');
        assert_ne!(chars[1], 'a');
    }

    #[test]
    fn pattern_lines_up_with_stored_value() {
        let algorithm = CharDigestLikeAlgorithm::default();
        let stored = algorithm.digest("hello");
        let pattern = algorithm.digest("%ell%");
        assert!(stored.contains(pattern.trim_matches('%')));
    }

    #[test]
    fn escaped_wildcard_is_digested() {
        let algorithm = CharDigestLikeAlgorithm::default();
        let digest = algorithm.digest("a\\%");
        assert!(digest.starts_with(algorithm.digest("a").as_str()));
        assert!(digest.contains('\\'));
        assert!(!digest.ends_with('%'));
    }

    #[test]
    fn props_must_be_numeric() {
        let props = Props::from([("delta".to_string(), "x".to_string())]);
        assert!(CharDigestLikeAlgorithm::from_props(&props).is_err());
    }
}
