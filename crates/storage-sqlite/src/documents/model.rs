use diesel::prelude::*;

/// One persisted document row.
#[derive(Queryable, Insertable, Selectable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::app_documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AppDocumentDB {
    pub doc_key: String,
    pub doc_value: String,
    pub updated_at: String,
}
