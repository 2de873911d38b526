use crate::*;

/// Builds the rewritten SQL text from sorted tokens.
///
/// Text before the first token is kept. After each token the original text
/// from just past the token's `stop` up to the next token's `start` is
/// copied, so a token inserting at `start > stop` is followed by the text
/// that came after `stop`. Offsets are character positions.
pub fn splice_sql(sql: &str, tokens: &[SqlToken]) -> Result<String> {
    let mut offsets: Vec<usize> = sql.char_indices().map(|(offset, _)| offset).collect();
    let length = offsets.len();
    offsets.push(sql.len());
    let slice = |from: usize, to: usize| -> Result<&str> {
        match (offsets.get(from), offsets.get(to)) {
            (Some(from), Some(to)) if from <= to => Ok(&sql[*from..*to]),
            _ => Err(Error::Internal(format!(
                "Token span {from}..{to} is outside of SQL with {length} characters"
            ))),
        }
    };

    let mut ordered: Vec<&SqlToken> = tokens.iter().collect();
    ordered.sort_by_key(|each| each.start());
    let Some(first) = ordered.first() else {
        return Ok(sql.to_string());
    };

    let mut result = String::with_capacity(sql.len());
    result.push_str(slice(0, first.start())?);
    for (index, token) in ordered.iter().enumerate() {
        if token.stop() >= length && !token.is_insertion() {
            return Err(Error::Internal(format!(
                "Token {}..{} is outside of SQL with {length} characters",
                token.start(),
                token.stop()
            )));
        }
        result.push_str(&token.to_string());
        let from = token.stop() + 1;
        let to = ordered.get(index + 1).map(|next| next.start()).unwrap_or(length);
        if from < to {
            result.push_str(slice(from, to)?);
        }
    }
    Ok(result)
}
