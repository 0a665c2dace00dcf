//! Loading the SQL DDL script that materializes the tables.
//!
//! The script lives outside the binary (`database.schema_path`, default
//! `db_schema.sql`) and is expected to guard every statement with
//! `IF NOT EXISTS` so it can be re-applied.

use crate::error::HubError;
use std::fs;
use std::path::Path;

/// Read the whole schema script as text.
pub fn read_script(path: &Path) -> Result<String, HubError> {
    fs::read_to_string(path).map_err(|source| HubError::SchemaRead {
        path: path.to_path_buf(),
        source,
    })
}
