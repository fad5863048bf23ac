//! Schema introspection of the loaded database.
//!
//! Everything here reads through [`open_read_only`], so introspection obeys the
//! same guarantees as analyst queries.
crate::reexport!(column);
crate::reexport!(foreign_key);
crate::reexport!(table);
crate::reexport!(context);
crate::reexport!(diagram);
crate::reexport!(cache);

use crate::*;
use rusqlite::Connection;
use serde::Serialize;
use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::Arc,
};
