//! Rewrites SQL that touches logically encrypted columns so it addresses the
//! physical cipher, assisted query, like query and plain columns instead.
//!
//! The crate consumes an already bound statement (see [`StatementContext`])
//! and an [`EncryptRule`], runs every registered token generator over it and
//! splices the resulting [`SqlToken`]s into the original SQL text.
//!
//! ```rust,ignore
//! let rule = Arc::new(EncryptRule::from_yaml_file("encrypt.yaml")?);
//! let engine = SqlRewriteEngine::new(rule, "logic_db", "logic_db");
//! let RewriteResult { sql, parameters } = engine.rewrite(sql, &context, &params)?;
//! ```

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}

reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(value);
reexport!(algorithm);
reexport!(rule);
reexport!(statement);
reexport!(condition);
reexport!(token);
reexport!(generator);
reexport!(rewrite);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};
