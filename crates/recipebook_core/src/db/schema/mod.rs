//! Forward-only schema steps for the slot table.
//!
//! Existing slots, the `starredRecipes` array included, are carried through
//! every step unchanged; steps only add structure around them.

use crate::storage::{StorageError, StorageResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "local_storage",
        sql: include_str!("0001_local_storage.sql"),
    },
    SchemaStep {
        version: 2,
        name: "slot_updated_at",
        sql: include_str!("0002_slot_updated_at.sql"),
    },
];

/// Highest schema level this build can open.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 2;

/// Schema level before and after one `upgrade_schema` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaUpgrade {
    pub from: u32,
    pub to: u32,
}

impl SchemaUpgrade {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Reads the schema level recorded in the file.
pub fn schema_version(conn: &Connection) -> StorageResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Brings the slot table up to `SUPPORTED_SCHEMA_VERSION` in one transaction.
///
/// A file from a newer build is refused before any statement runs.
pub fn upgrade_schema(conn: &mut Connection) -> StorageResult<SchemaUpgrade> {
    let from = schema_version(conn)?;
    if from > SUPPORTED_SCHEMA_VERSION {
        return Err(StorageError::SchemaTooNew {
            found: from,
            supported: SUPPORTED_SCHEMA_VERSION,
        });
    }

    let pending = STEPS.iter().filter(|step| step.version > from);
    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=schema_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    let upgrade = SchemaUpgrade {
        from,
        to: SUPPORTED_SCHEMA_VERSION,
    };
    if !upgrade.is_noop() {
        info!(
            "event=schema_upgrade module=db status=ok from={} to={}",
            upgrade.from, upgrade.to
        );
    }
    Ok(upgrade)
}

#[cfg(test)]
mod tests {
    use super::{schema_version, upgrade_schema, STEPS, SUPPORTED_SCHEMA_VERSION};
    use rusqlite::Connection;

    #[test]
    fn steps_are_contiguous_and_end_at_supported_version() {
        for (index, step) in STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "step {}", step.name);
        }
        assert_eq!(
            STEPS.last().map(|step| step.version),
            Some(SUPPORTED_SCHEMA_VERSION)
        );
    }

    #[test]
    fn second_upgrade_is_a_noop() {
        let mut conn = Connection::open_in_memory().unwrap();

        let first = upgrade_schema(&mut conn).unwrap();
        assert_eq!((first.from, first.to), (0, SUPPORTED_SCHEMA_VERSION));

        let second = upgrade_schema(&mut conn).unwrap();
        assert!(second.is_noop());
        assert_eq!(schema_version(&conn).unwrap(), SUPPORTED_SCHEMA_VERSION);
    }
}
