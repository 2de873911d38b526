//! Bound statement model consumed by the token generators.
//!
//! A parser and binder outside this crate produce these values. Every
//! segment carries inclusive character offsets (`start`, `stop`) into the
//! original SQL text, and every column segment may carry the original table
//! it was bound to.
//!
//! Modules:
//! - `dialect`    : `DatabaseType` and identifier quoting.
//! - `segment`    : identifiers, owners, columns, aliases.
//! - `expression` : expression tree used in predicates and assignments.
//! - `projection` : select list items.
//! - `order`      : ORDER BY / GROUP BY items.
//! - `ddl`        : column definitions of CREATE / ALTER TABLE.
//! - `context`    : per statement contexts and the `StatementContext` wrapper.
crate::reexport!(dialect);
crate::reexport!(segment);
crate::reexport!(expression);
crate::reexport!(projection);
crate::reexport!(order);
crate::reexport!(ddl);
crate::reexport!(context);
