crate::reexport!(pragma);
crate::reexport!(verdict);
crate::reexport!(validator);
