use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    /// Unique index violation; carries the conflicting key as JSON, e.g. `{"name":"pikachu"}`.
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

/// Map a write failure to `Conflict` when a unique index rejected it.
pub fn classify(err: DbErr, name: Option<&str>, no: Option<i32>) -> ModelError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => ModelError::Conflict(conflict_key(&detail, name, no)),
        _ => ModelError::Db(err.to_string()),
    }
}

/// Render the conflicting field(s) from the violated index name.
/// Falls back to every known value when the index cannot be identified,
/// and to the index name alone when no value is known (bulk loads).
pub fn conflict_key(detail: &str, name: Option<&str>, no: Option<i32>) -> String {
    let on_name = detail.contains("idx_pokemon_name");
    let on_no = detail.contains("idx_pokemon_no");
    let mut key = serde_json::Map::new();
    if let Some(n) = name.filter(|_| on_name || !on_no) {
        key.insert("name".into(), serde_json::Value::from(n));
    }
    if let Some(n) = no.filter(|_| on_no || !on_name) {
        key.insert("no".into(), serde_json::Value::from(n));
    }
    if key.is_empty() {
        let index = match (on_name, on_no) {
            (true, _) => "idx_pokemon_name",
            (_, true) => "idx_pokemon_no",
            _ => "unknown",
        };
        return serde_json::json!({ "index": index }).to_string();
    }
    serde_json::Value::Object(key).to_string()
}
