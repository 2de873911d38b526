//! Extraction of the WHERE conditions whose right hand values must be
//! encrypted before they are compared with a cipher or assisted query column.
crate::reexport!(encrypt_condition);
crate::reexport!(engine);
