crate::reexport!(column);
crate::reexport!(table);
crate::reexport!(encrypt_rule);
crate::reexport!(yaml);
crate::reexport!(snapshot);
