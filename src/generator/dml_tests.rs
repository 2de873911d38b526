#![cfg(test)]
use crate::*;
use rstest::rstest;

/// Spliced SQL and rewritten parameters, every encrypt generator applied.
fn rewrite(sql: &str, context: &StatementContext, parameters: &[Value]) -> Result<(String, Vec<Value>)> {
    let tokens = SqlTokenGenerators::encrypt(shared_rule(), "logic_db", "logic_db", parameters).generate(context)?;
    assert_disjoint(&tokens);
    Ok((splice_sql(sql, &tokens)?, rewrite_parameters(&tokens, parameters)?))
}

fn update(sql: &str, column: &str, value: ExpressionSegment) -> StatementContext {
    let update = UpdateStatementContext::new("t_user")
        .with_set_assignment(ColumnAssignmentSegment::new(column_at(sql, column, "t_user"), value));
    StatementContext::new(DatabaseType::MySQL, update)
}

fn on_duplicate(sql: &str, column: &str, value: ExpressionSegment) -> StatementContext {
    let (start, stop) = span_of(sql, column);
    let column = ColumnSegment::new(start, stop, IdentifierValue::parse(column)).bound_to("t_user");
    let insert = InsertStatementContext::new("t_user").with_on_duplicate_key_update(ColumnAssignmentSegment::new(column, value));
    StatementContext::new(DatabaseType::MySQL, insert)
}

fn texts(values: &[&str]) -> Vec<Value> {
    values.iter().copied().map(Value::from).collect()
}

mod assignment_testing {
    use super::*;

    #[test]
    fn parameter_assignment_carries_encrypted_values() {
        let sql = "UPDATE t_user SET pwd = ? WHERE id = 1";
        let context = update(sql, "pwd", param_nth(sql, 0));
        let parameters = texts(&["secret"]);
        let generator = EncryptAssignmentTokenGenerator::new(shared_rule(), "assign_db", "assign_schema", &parameters);
        let tokens = generator.generate_sql_tokens(&context).unwrap();
        assert_eq!(tokens.len(), 1);
        let SqlToken::Assignment(token) = &tokens[0] else {
            panic!("expected an assignment, got {tokens:?}");
        };
        assert_eq!(token.column_names(), vec!["pwd_cipher", "pwd_assisted", "pwd_like"]);
        let EncryptAssignmentToken::Parameter { values, .. } = token else {
            panic!("expected a parameter assignment, got {token:?}");
        };
        assert_eq!(values, &texts(&["enc(secret)", "assisted(secret)", "like(secret)"]));
        assert!(recorded_contexts().contains(&"assign_db.assign_schema.t_user.pwd".to_string()));
        assert_eq!(
            splice_sql(sql, &tokens).unwrap(),
            "UPDATE t_user SET pwd_cipher = ?, pwd_assisted = ?, pwd_like = ? WHERE id = 1"
        );
    }

    #[rstest]
    #[case::cipher_only("UPDATE t_user SET name = 'bob'", "name", "'bob'", "UPDATE t_user SET name_cipher = 'enc(bob)'")]
    #[case::with_assisted(
        "UPDATE t_user SET email = 'a@b' WHERE id = 1",
        "email",
        "'a@b'",
        "UPDATE t_user SET email_cipher = 'enc(a@b)', email_assisted = 'assisted(a@b)' WHERE id = 1"
    )]
    #[case::null_literal("UPDATE t_user SET name = NULL", "name", "NULL", "UPDATE t_user SET name_cipher = NULL")]
    #[case::plain_column("UPDATE t_user SET age = 3", "age", "3", "UPDATE t_user SET age = 3")]
    fn literal_assignments(#[case] sql: &str, #[case] column: &str, #[case] literal: &str, #[case] expected: &str) {
        let context = update(sql, column, literal_at(sql, literal));
        let generator = EncryptAssignmentTokenGenerator::new(shared_rule(), "logic_db", "logic_db", &[]);
        assert_eq!(apply_generator(&generator, sql, &context).unwrap(), expected);
    }

    #[rstest]
    #[case::parameter("`pwd`", "?", "`pwd_cipher` = ?, `pwd_assisted` = ?, `pwd_like` = ?")]
    #[case::literal("`email`", "'a'", "`email_cipher` = 'enc(a)', `email_assisted` = 'assisted(a)'")]
    fn quoted_column_keeps_quoting(#[case] column: &str, #[case] value: &str, #[case] expected_set: &str) {
        let sql = format!("UPDATE t_user SET {column} = {value}");
        let value = match value {
            "?" => param_nth(&sql, 0),
            literal => literal_at(&sql, literal),
        };
        let context = update(&sql, column, value);
        let (actual, _) = rewrite(&sql, &context, &texts(&["x"])).unwrap();
        assert_eq!(actual, format!("UPDATE t_user SET {expected_set}"));
    }

    #[test]
    fn function_value_is_left_as_written() {
        let sql = "UPDATE t_user SET pwd = UPPER('x')";
        let (start, stop) = span_of(sql, "UPPER('x')");
        let function = FunctionSegment {
            start,
            stop,
            name: "UPPER".to_string(),
            parameters: vec![literal_at(sql, "'x'")],
            text: "UPPER('x')".to_string(),
        };
        let context = update(sql, "pwd", function.into());
        let generator = EncryptAssignmentTokenGenerator::new(shared_rule(), "logic_db", "logic_db", &[]);
        assert!(generator.generate_sql_tokens(&context).unwrap().is_empty());
    }

    #[test]
    fn insert_set_assignment() {
        let sql = "INSERT INTO t_user SET email = ?, age = ?";
        let insert = InsertStatementContext::new("t_user")
            .with_set_assignment(ColumnAssignmentSegment::new(column_at(sql, "email", "t_user"), param_nth(sql, 0)))
            .with_set_assignment(ColumnAssignmentSegment::new(column_at(sql, "age", "t_user"), param_nth(sql, 1)));
        let context = StatementContext::new(DatabaseType::MySQL, insert);
        let (actual, parameters) = rewrite(sql, &context, &[Value::from("a@b"), Value::Int(7)]).unwrap();
        assert_eq!(actual, "INSERT INTO t_user SET email_cipher = ?, email_assisted = ?, age = ?");
        assert_eq!(
            parameters,
            vec![Value::from("enc(a@b)"), Value::from("assisted(a@b)"), Value::Int(7)]
        );
    }

    #[test]
    fn unknown_parameter_keeps_markers() {
        let sql = "UPDATE t_user SET name = ?";
        let context = update(sql, "name", param_nth(sql, 0));
        let generator = EncryptAssignmentTokenGenerator::new(shared_rule(), "logic_db", "logic_db", &[]);
        let tokens = generator.generate_sql_tokens(&context).unwrap();
        assert_eq!(splice_sql(sql, &tokens).unwrap(), "UPDATE t_user SET name_cipher = ?");
        assert!(matches!(rewrite_parameters(&tokens, &[]), Err(Error::MissingParameter(0))));
    }

    #[rstest]
    #[case::every_sub_column("UPDATE t_user SET pwd = ?", "pwd", 0, 0)]
    #[case::second_marker("UPDATE t_user SET age = ?, email = ?", "email", 1, 1)]
    fn missing_assignment_parameter_fails(
        #[case] sql: &str,
        #[case] column: &str,
        #[case] marker: usize,
        #[case] expected_index: usize,
    ) {
        let update = UpdateStatementContext::new("t_user")
            .with_set_assignment(ColumnAssignmentSegment::new(column_at(sql, column, "t_user"), param_nth(sql, marker)));
        let context = StatementContext::new(DatabaseType::MySQL, update);
        let result = rewrite(sql, &context, &texts(&["x"])[..marker]);
        assert!(
            matches!(result, Err(Error::MissingParameter(index)) if index == expected_index),
            "{result:?}"
        );
    }
}

mod on_duplicate_testing {
    use super::*;

    #[rstest]
    #[case::same_column(
        "pwd",
        "pwd",
        "pwd_cipher = VALUES(pwd_cipher), pwd_assisted = VALUES(pwd_assisted), pwd_like = VALUES(pwd_like), pwd_plain = VALUES(pwd_plain)"
    )]
    #[case::consistent_columns(
        "email",
        "mobile",
        "email_cipher = VALUES(mobile_cipher), email_assisted = VALUES(mobile_assisted), email_plain = VALUES(mobile_plain)"
    )]
    #[case::plain_columns("age", "id", "age = VALUES(id)")]
    fn values_function_pairs(#[case] column: &str, #[case] value_column: &str, #[case] expected_update: &str) {
        let sql = format!("INSERT INTO t_user (id) VALUES (1) ON DUPLICATE KEY UPDATE {column} = VALUES({value_column})");
        let context = on_duplicate(&sql, column, values_function(&sql, &format!("VALUES({value_column})"), "t_user"));
        let generator = EncryptInsertOnUpdateTokenGenerator::new(shared_rule(), "logic_db", "logic_db", &[]);
        assert_eq!(
            apply_generator(&generator, &sql, &context).unwrap(),
            format!("INSERT INTO t_user (id) VALUES (1) ON DUPLICATE KEY UPDATE {expected_update}")
        );
    }

    #[rstest]
    #[case::only_column_encrypted("email", "age")]
    #[case::only_value_encrypted("age", "email")]
    #[case::sub_columns_differ("pwd", "name")]
    fn asymmetric_values_function(#[case] column: &str, #[case] value_column: &str) {
        let sql = format!("INSERT INTO t_user SET x = 1 ON DUPLICATE KEY UPDATE {column} = VALUES({value_column})");
        let context = on_duplicate(&sql, column, values_function(&sql, &format!("VALUES({value_column})"), "t_user"));
        let generator = EncryptInsertOnUpdateTokenGenerator::new(shared_rule(), "logic_db", "logic_db", &[]);
        let result = generator.generate_sql_tokens(&context);
        let expected = format!("{column}=VALUES({value_column})");
        assert!(
            matches!(&result, Err(Error::UnsupportedEncryptSql(clause)) if *clause == expected),
            "{result:?}"
        );
    }

    #[test]
    fn parameter_value_is_an_assignment() {
        let sql = "INSERT INTO t_user SET id = 1 ON DUPLICATE KEY UPDATE name = ?";
        let context = on_duplicate(sql, "name", param_nth(sql, 0));
        let (actual, parameters) = rewrite(sql, &context, &texts(&["bob"])).unwrap();
        assert_eq!(actual, "INSERT INTO t_user SET id = 1 ON DUPLICATE KEY UPDATE name_cipher = ?");
        assert_eq!(parameters, texts(&["enc(bob)"]));
    }
}

mod predicate_testing {
    use super::*;

    fn delete(where_segment: ExpressionSegment) -> StatementContext {
        StatementContext::new(DatabaseType::MySQL, DeleteStatementContext::new("t_user").with_where(where_segment))
    }

    #[rstest]
    #[case::cipher_only("DELETE FROM t_user WHERE name = ?", "name", "=", "DELETE FROM t_user WHERE name_cipher = ?", "enc(bob)")]
    #[case::assisted("DELETE FROM t_user WHERE pwd <> ?", "pwd", "<>", "DELETE FROM t_user WHERE pwd_assisted <> ?", "assisted(bob)")]
    #[case::like("DELETE FROM t_user WHERE pwd LIKE ?", "pwd", "LIKE", "DELETE FROM t_user WHERE pwd_like LIKE ?", "like(bob)")]
    #[case::plain_preferred("DELETE FROM t_user WHERE email = ?", "email", "=", "DELETE FROM t_user WHERE email_plain = ?", "bob")]
    fn parameter_predicates(
        #[case] sql: &str,
        #[case] column: &str,
        #[case] operator: &str,
        #[case] expected_sql: &str,
        #[case] expected_parameter: &str,
    ) {
        let context = delete(binary_expr(column_at(sql, column, "t_user").into(), operator, param_nth(sql, 0)));
        let (actual, parameters) = rewrite(sql, &context, &texts(&["bob"])).unwrap();
        assert_eq!(actual, expected_sql);
        assert_eq!(parameters, texts(&[expected_parameter]));
    }

    #[test]
    fn value_before_column_is_encrypted() {
        let sql = "DELETE FROM t_user WHERE 'bob' = name OR ? = pwd";
        let context = delete(binary_expr(
            binary_expr(literal_at(sql, "'bob'"), "=", column_at(sql, "name", "t_user").into()),
            "OR",
            binary_expr(param_nth(sql, 0), "=", column_at(sql, "pwd", "t_user").into()),
        ));
        let (actual, parameters) = rewrite(sql, &context, &texts(&["secret"])).unwrap();
        assert_eq!(actual, "DELETE FROM t_user WHERE 'enc(bob)' = name_cipher OR ? = pwd_assisted");
        assert_eq!(parameters, texts(&["assisted(secret)"]));
    }

    #[test]
    fn literal_and_parameter_under_and() {
        let sql = "UPDATE t_user SET age = 1 WHERE name = 'bob' AND pwd = ?";
        let update = UpdateStatementContext::new("t_user")
            .with_set_assignment(ColumnAssignmentSegment::new(column_at(sql, "age", "t_user"), literal_at(sql, "1")))
            .with_where(binary_expr(
                binary_expr(column_at(sql, "name", "t_user").into(), "=", literal_at(sql, "'bob'")),
                "AND",
                binary_expr(column_at(sql, "pwd", "t_user").into(), "=", param_nth(sql, 0)),
            ));
        let context = StatementContext::new(DatabaseType::MySQL, update);
        let (actual, parameters) = rewrite(sql, &context, &texts(&["secret"])).unwrap();
        assert_eq!(
            actual,
            "UPDATE t_user SET age = 1 WHERE name_cipher = 'enc(bob)' AND pwd_assisted = ?"
        );
        assert_eq!(parameters, texts(&["assisted(secret)"]));
    }

    #[test]
    fn in_list_mixes_literals_and_markers() {
        let sql = "DELETE FROM t_user WHERE name IN (?, 'b', ?)";
        let context = delete(in_expr(
            sql,
            column_at(sql, "name", "t_user"),
            "(?, 'b', ?)",
            vec![param_nth(sql, 0), literal_at(sql, "'b'"), param_nth(sql, 1)],
            false,
        ));
        let (actual, parameters) = rewrite(sql, &context, &texts(&["a", "c"])).unwrap();
        assert_eq!(actual, "DELETE FROM t_user WHERE name_cipher IN (?, 'enc(b)', ?)");
        assert_eq!(parameters, texts(&["enc(a)", "enc(c)"]));
    }

    #[test]
    fn missing_parameter_fails() {
        let sql = "DELETE FROM t_user WHERE name = ?";
        let context = delete(binary_expr(column_at(sql, "name", "t_user").into(), "=", param_nth(sql, 0)));
        assert!(matches!(rewrite(sql, &context, &[]), Err(Error::MissingParameter(0))));
    }

    #[test]
    fn is_null_keeps_null() {
        let sql = "DELETE FROM t_user WHERE name IS NULL";
        let context = delete(binary_expr(column_at(sql, "name", "t_user").into(), "IS", literal_at(sql, "NULL")));
        let (actual, _) = rewrite(sql, &context, &[]).unwrap();
        assert_eq!(actual, "DELETE FROM t_user WHERE name_cipher IS NULL");
    }

    #[rstest]
    #[case::like_without_like_column("name", "LIKE")]
    #[case::range_comparison("pwd", ">")]
    fn unsupported_predicates(#[case] column: &str, #[case] operator: &str) {
        let sql = format!("DELETE FROM t_user WHERE {column} {operator} 'a'");
        let context = delete(binary_expr(
            column_at(&sql, column, "t_user").into(),
            operator,
            literal_at(&sql, "'a'"),
        ));
        let result = rewrite(&sql, &context, &[]);
        assert!(
            matches!(&result, Err(Error::UnsupportedEncryptSql(clause)) if clause == operator),
            "{result:?}"
        );
    }

    #[test]
    fn plain_table_is_untouched() {
        let sql = "DELETE FROM t_plain WHERE name = 'a'";
        let context = StatementContext::new(
            DatabaseType::MySQL,
            DeleteStatementContext::new("t_plain").with_where(binary_expr(
                column_at(sql, "name", "t_plain").into(),
                "=",
                literal_at(sql, "'a'"),
            )),
        );
        assert_eq!(rewrite(sql, &context, &[]).unwrap().0, sql);
    }
}
