use crate::*;
use std::sync::Arc;

pub fn shared_rule() -> Arc<EncryptRule> {
    common_init();
    Arc::new(user_rule())
}

/// Fails when two replacing tokens cover a common character.
pub fn assert_disjoint(tokens: &[SqlToken]) {
    for (index, left) in tokens.iter().enumerate() {
        for right in &tokens[index + 1..] {
            assert!(!left.overlaps(right), "{left:?} overlaps {right:?}");
        }
    }
}

/// Runs one generator and splices its tokens into `sql`.
pub fn apply_generator(generator: &dyn SqlTokenGenerator, sql: &str, context: &StatementContext) -> Result<String> {
    if !generator.is_generate_sql_token(context) {
        return Ok(sql.to_string());
    }
    let tokens = generator.generate_sql_tokens(context)?;
    assert_disjoint(&tokens);
    splice_sql(sql, &tokens)
}
