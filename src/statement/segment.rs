use crate::*;

/// An identifier as written, without its quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierValue {
    pub value: String,
    pub quote_character: QuoteCharacter,
}

impl IdentifierValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_character: QuoteCharacter::None,
        }
    }

    pub fn quoted(value: impl Into<String>, quote_character: QuoteCharacter) -> Self {
        Self {
            value: value.into(),
            quote_character,
        }
    }

    /// Splits the quotes off a written identifier such as `` `pwd` ``.
    pub fn parse(text: &str) -> Self {
        let quote_character = QuoteCharacter::of(text);
        text.strip_prefix(quote_character.start_delimiter())
            .and_then(|rest| rest.strip_suffix(quote_character.end_delimiter()))
            .map(|value| Self::quoted(value, quote_character))
            .unwrap_or_else(|| Self::new(text))
    }
}

/// The `t` in `t.pwd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSegment {
    pub start: usize,
    pub stop: usize,
    pub identifier: IdentifierValue,
}

impl OwnerSegment {
    pub fn new(start: usize, stop: usize, identifier: IdentifierValue) -> Self {
        Self {
            start,
            stop,
            identifier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSegment {
    pub start: usize,
    pub stop: usize,
    pub identifier: IdentifierValue,
}

impl AliasSegment {
    pub fn new(start: usize, stop: usize, identifier: IdentifierValue) -> Self {
        Self {
            start,
            stop,
            identifier,
        }
    }
}

/// A column reference. The span covers the owner when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSegment {
    pub start: usize,
    pub stop: usize,
    pub identifier: IdentifierValue,
    pub owner: Option<OwnerSegment>,
    /// Original table name the binder resolved this column to.
    pub table: Option<String>,
}

impl ColumnSegment {
    pub fn new(start: usize, stop: usize, identifier: IdentifierValue) -> Self {
        Self {
            start,
            stop,
            identifier,
            owner: None,
            table: None,
        }
    }

    pub fn with_owner(mut self, owner: OwnerSegment) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn bound_to(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.identifier.value
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// `owner.name`, or just `name`.
    pub fn qualified_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{}.{}", owner.identifier.value, self.identifier.value),
            None => self.identifier.value.clone(),
        }
    }

    /// First character of the column name itself, after any `owner.`.
    pub fn name_start(&self) -> usize {
        self.owner
            .as_ref()
            .map(|owner| owner.stop + 2)
            .unwrap_or(self.start)
    }

    pub fn has_same_span(&self, other: &ColumnSegment) -> bool {
        self.start == other.start && self.stop == other.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pwd", "pwd", QuoteCharacter::None)]
    #[case("`pwd`", "pwd", QuoteCharacter::BackQuote)]
    #[case("[pwd]", "pwd", QuoteCharacter::Brackets)]
    #[case("\"pwd", "\"pwd", QuoteCharacter::None)]
    fn parses_identifiers(#[case] text: &str, #[case] value: &str, #[case] quote: QuoteCharacter) {
        let identifier = IdentifierValue::parse(text);
        assert_eq!(identifier.value, value);
        assert_eq!(identifier.quote_character, quote);
    }

    #[test]
    fn name_start_skips_owner() {
        // u.pwd
        let column = ColumnSegment::new(0, 4, IdentifierValue::new("pwd"))
            .with_owner(OwnerSegment::new(0, 0, IdentifierValue::new("u")));
        assert_eq!(column.name_start(), 2);
        assert_eq!(column.qualified_name(), "u.pwd");
    }
}
