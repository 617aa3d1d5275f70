//! Custom SQL functions registered on every catalog connection.
//!
//! SQLite's built-in `lower()` and `LIKE` fold ASCII only; product search
//! must ignore case for any script, so it uses `catalog_lower` instead.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// Unicode lowercase of a text argument; `NULL` stays `NULL`.
pub const CATALOG_LOWER_FN: &str = "catalog_lower";

/// Registers the catalog SQL functions on `conn`.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        CATALOG_LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.map(|text| text.to_lowercase()))
        },
    )
}
