//! Token generators, one per SQL construct that can reference an encrypted
//! column, and the registry running them.
//!
//! Generators only read the statement and the rule. Each returns the tokens
//! for its own construct, and [`SqlTokenGenerators`] unions them.
crate::reexport!(token_generator);
crate::reexport!(create_table);
crate::reexport!(alter_table);
crate::reexport!(assignment);
crate::reexport!(insert_on_update);
crate::reexport!(projection);
crate::reexport!(predicate_column);
crate::reexport!(predicate_right_value);
crate::reexport!(order_item);
crate::reexport!(index_column);
crate::reexport!(registry);
crate::reexport!(ddl_tests, test);
crate::reexport!(dml_tests, test);
crate::reexport!(select_tests, test);
