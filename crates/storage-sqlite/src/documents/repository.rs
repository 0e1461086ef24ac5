use chrono::{SecondsFormat, Utc};
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::AppDocumentDB;
use crate::db::{get_connection, DbPool};
use crate::errors::{IntoCoreWrite, StorageError};
use crate::schema::app_documents::dsl::*;
use secondbrain_core::errors::Result;
use secondbrain_core::state::StateStorage;

/// Whole-document key/value storage backed by the `app_documents` table.
pub struct DocumentRepository {
    pool: Arc<DbPool>,
}

impl DocumentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        DocumentRepository { pool }
    }

    /// Last write time of `key`, as stored.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let stamp = app_documents
            .filter(doc_key.eq(key))
            .select(updated_at)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(stamp)
    }
}

impl StateStorage for DocumentRepository {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let value = app_documents
            .filter(doc_key.eq(key))
            .select(doc_value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        let row = AppDocumentDB {
            doc_key: key.to_string(),
            doc_value: value.to_string(),
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        diesel::replace_into(app_documents)
            .values(&row)
            .execute(&mut conn)
            .into_core_write()?;
        debug!("Wrote document '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::delete(app_documents.filter(doc_key.eq(key)))
            .execute(&mut conn)
            .into_core_write()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use secondbrain_core::constants::STORAGE_KEY;
    use secondbrain_core::notes::Note;
    use secondbrain_core::{Action, AppState, Store};
    use tempfile::TempDir;

    fn open_repo(dir: &TempDir) -> DocumentRepository {
        let path = dir.path().join("nested").join("secondbrain.db");
        let pool = db::open(path.to_str().unwrap()).unwrap();
        DocumentRepository::new(pool)
    }

    #[test]
    fn test_write_read_remove() {
        let dir = TempDir::new().unwrap();
        let repo = open_repo(&dir);

        assert!(repo.read("missing").unwrap().is_none());
        repo.write("doc", r#"{"a":1}"#).unwrap();
        repo.write("doc", r#"{"a":2}"#).unwrap();
        assert_eq!(repo.read("doc").unwrap().as_deref(), Some(r#"{"a":2}"#));
        assert!(repo.updated_at("doc").unwrap().is_some());

        repo.remove("doc").unwrap();
        assert!(repo.read("doc").unwrap().is_none());
        repo.remove("doc").unwrap();
    }

    #[test]
    fn test_store_survives_restart() {
        let dir = TempDir::new().unwrap();
        {
            let store = Store::new(Arc::new(open_repo(&dir)));
            store.initialize();
            store.dispatch(Action::Login {
                name: "Ada".into(),
                email: None,
            });
            store.dispatch(Action::AddNote(Note {
                id: "n1".into(),
                title: "Persisted".into(),
                ..Default::default()
            }));
        }

        let repo = Arc::new(open_repo(&dir));
        let raw = repo.read(STORAGE_KEY).unwrap().unwrap();
        let saved: AppState = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved.notes[0].title, "Persisted");

        let store = Store::new(repo);
        store.initialize();
        let state = store.snapshot();
        assert_eq!(state.user_profile.name, "Ada");
        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.chat_history.len(), 1);
    }
}
