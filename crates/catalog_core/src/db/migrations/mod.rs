//! Versioned schema scripts for the catalog database.
//!
//! The applied version lives in `PRAGMA user_version`. All pending scripts
//! run inside one transaction: a database is either fully upgraded or left
//! at its previous version.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, script)` pairs; versions start at 1 and increase by one.
const SCHEMA_SCRIPTS: &[(u32, &str)] = &[(1, include_str!("0001_products.sql"))];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_SCRIPTS.last().map_or(0, |(version, _)| *version)
}

/// Upgrades `conn` to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is ahead of this build.
/// - `Migration` naming the first script that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let supported = latest_version();

    if found > supported {
        return Err(DbError::UnsupportedSchemaVersion { found, supported });
    }

    let pending: Vec<_> = SCHEMA_SCRIPTS
        .iter()
        .filter(|(version, _)| *version > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for &&(version, script) in &pending {
        tx.execute_batch(script)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration { version, source })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={found} to_version={supported} applied={}",
        pending.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version};
    use rusqlite::Connection;

    fn user_version(conn: &Connection) -> u32 {
        conn.pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn reapplying_on_current_schema_is_a_noop() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn.execute(
            "INSERT INTO products (name, price) VALUES ('kept', '1');",
            [],
        )
        .unwrap();

        apply_migrations(&mut conn).unwrap();

        assert_eq!(user_version(&conn), latest_version());
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM products;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
