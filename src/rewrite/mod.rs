//! Applies tokens to the original SQL text and to the parameter list.
crate::reexport!(splice);
crate::reexport!(parameter);
crate::reexport!(engine);
