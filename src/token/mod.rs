//! Tokens produced by the generators.
//!
//! A token names an inclusive character span `[start, stop]` of the original
//! SQL text and renders its replacement through `Display`. A token whose
//! `start` is greater than its `stop` replaces nothing and only inserts text,
//! see [`SqlRewriteEngine`] for how the original text between tokens is
//! copied.
crate::reexport!(sql_token);
crate::reexport!(column_name);
crate::reexport!(assignment);
crate::reexport!(right_value);
