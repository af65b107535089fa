//! Record store backed by an embedded SurrealDB engine.

use async_trait::async_trait;
use booklist_log::debug;
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};

use crate::{
    Collection, Document, Filter, ID_FIELD, Record, RecordId, RecordStore, Result, StoreError,
};

const NAMESPACE: &str = "booklist";
const DATABASE: &str = "booklist";

/// Row projection with the record key flattened to a plain string `id`.
const SELECT_ROWS: &str = "SELECT *, record::id(id) AS id";

/// [`RecordStore`] over a SurrealDB connection.
///
/// Collections map to tables and identifiers to record keys. Any engine
/// address `surrealdb::engine::any` understands works; the service uses
/// `mem://` and `surrealkv://<dir>`.
#[derive(Clone)]
pub struct SurrealStore {
    db: Surreal<Any>,
    backend: &'static str,
}

impl SurrealStore {
    /// Open `address` and select the Booklist namespace and database.
    pub async fn open(address: &str) -> Result<Self> {
        let db = any::connect(address).await?;
        db.use_ns(NAMESPACE).use_db(DATABASE).await?;

        let backend = match address.split_once("://") {
            Some(("mem" | "memory", _)) => "memory",
            Some(("surrealkv", _)) => "surrealkv",
            _ => "surrealdb",
        };
        debug!(target: "booklist::store", "opened {} engine", backend);

        Ok(Self { db, backend })
    }

    /// Fresh in-memory database.
    pub async fn memory() -> Result<Self> {
        Self::open("mem://").await
    }

    /// Number of records in `collection`.
    pub async fn count(&self, collection: Collection) -> Result<usize> {
        let mut response = self
            .db
            .query("SELECT count() FROM type::table($table) GROUP ALL")
            .bind(("table", collection.name()))
            .await?;
        let count: Option<usize> = response.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    async fn select(
        &self,
        collection: Collection,
        query: String,
        bindings: Document,
    ) -> Result<Vec<Record>> {
        let mut response = self.db.query(query).bind(bindings).await?;
        let rows: Vec<Document> = response.take(0)?;
        rows.into_iter().map(|row| decode(collection, row)).collect()
    }
}

#[async_trait]
impl RecordStore for SurrealStore {
    async fn find_by_id(&self, collection: Collection, id: &RecordId) -> Result<Option<Record>> {
        let mut bindings = table_binding(collection);
        bindings.insert("id".to_string(), Value::String(id.to_string()));

        let query = format!("{SELECT_ROWS} FROM type::thing($table, $id)");
        let mut records = self.select(collection, query, bindings).await?;
        Ok(records.pop())
    }

    async fn find_where(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>> {
        let mut bindings = table_binding(collection);
        let mut query = format!("{SELECT_ROWS} FROM type::table($table)");

        let mut conditions = Vec::with_capacity(filter.terms().len());
        for (index, (field, value)) in filter.terms().iter().enumerate() {
            let param = format!("p{index}");
            conditions.push(format!("{} = ${param}", field_expr(field)?));
            bindings.insert(param, value.clone());
        }
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY id");

        self.select(collection, query, bindings).await
    }

    async fn insert(&self, collection: Collection, fields: Document) -> Result<Record> {
        let record = Record::new(RecordId::generate(), fields);

        self.db
            .query("CREATE type::thing($table, $id) CONTENT $fields RETURN NONE")
            .bind(("table", collection.name()))
            .bind(("id", record.id.to_string()))
            .bind(("fields", record.fields.clone()))
            .await?
            .check()?;

        Ok(record)
    }

    async fn ping(&self) -> Result<()> {
        self.db.health().await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        self.backend
    }
}

fn table_binding(collection: Collection) -> Document {
    let mut bindings = Document::new();
    bindings.insert(
        "table".to_string(),
        Value::String(collection.name().to_string()),
    );
    bindings
}

/// Field reference for a filter term. Names are restricted to identifier
/// characters; `id` compares against the record key.
fn field_expr(field: &str) -> Result<String> {
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StoreError::InvalidField(field.to_string()));
    }
    if field == ID_FIELD {
        return Ok("record::id(id)".to_string());
    }
    Ok(format!("`{field}`"))
}

fn decode(collection: Collection, mut row: Document) -> Result<Record> {
    match row.remove(ID_FIELD) {
        Some(Value::String(id)) => Ok(Record::new(RecordId::from(id), row)),
        other => Err(StoreError::Malformed {
            collection: collection.to_string(),
            reason: format!("expected a string key, found {other:?}"),
        }),
    }
}
