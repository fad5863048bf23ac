//! Read-only execution against an analyst's SQLite file.
crate::reexport!(value);
crate::reexport!(record);
crate::reexport!(functions);
crate::reexport!(executor);
crate::reexport!(search);
