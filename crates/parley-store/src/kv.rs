//! Key/value access shared by the settings and theme tables.

use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Settings,
    Themes,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Table::Settings => "settings",
            Table::Themes => "theme_store",
        }
    }
}

impl Database {
    pub(crate) fn kv_get(&self, table: Table, key: &str) -> Result<Option<String>> {
        let value = self
            .conn()
            .query_row(
                &format!("SELECT value FROM {} WHERE key = ?1", table.name()),
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub(crate) fn kv_put(&self, table: Table, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            &format!(
                "INSERT INTO {} (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                table.name()
            ),
            params![key, value],
        )?;
        Ok(())
    }

    pub(crate) fn kv_remove(&self, table: Table, key: &str) -> Result<bool> {
        let affected = self.conn().execute(
            &format!("DELETE FROM {} WHERE key = ?1", table.name()),
            params![key],
        )?;
        Ok(affected > 0)
    }

    /// Read-modify-write one key inside a transaction.
    ///
    /// `f` receives the stored value and returns the value to write (`None`
    /// leaves the row as it is) plus a result for the caller. If `f` fails
    /// the transaction rolls back.
    pub(crate) fn kv_edit<T, F>(&self, table: Table, key: &str, f: F) -> Result<T>
    where
        F: FnOnce(Option<String>) -> Result<(Option<String>, T)>,
    {
        let tx = self.conn().unchecked_transaction()?;
        let current = self.kv_get(table, key)?;
        let (next, out) = f(current)?;
        if let Some(next) = next {
            self.kv_put(table, key, &next)?;
        }
        tx.commit()?;
        Ok(out)
    }
}
