use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, FromQueryResult, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

pub const MAX_NAME_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pokemon")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub no: i32,
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// List projection: the record without revision and timestamp metadata.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: Uuid,
    pub name: String,
    pub no: i32,
}

impl From<Model> for PokemonSummary {
    fn from(m: Model) -> Self {
        Self { id: m.id, name: m.name, no: m.no }
    }
}

/// Creation payload; also one row of a bulk load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPokemon {
    pub name: String,
    pub no: i32,
}

impl NewPokemon {
    pub fn new(name: impl Into<String>, no: i32) -> Self { Self { name: name.into(), no } }
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PokemonPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub no: Option<i32>,
}

impl PokemonPatch {
    pub fn is_empty(&self) -> bool { self.name.is_none() && self.no.is_none() }

    /// Overlay the patch on `current`, producing the record as it reads after the write.
    pub fn merged_into(&self, current: &Model) -> Model {
        let mut next = current.clone();
        if let Some(n) = &self.name { next.name = n.clone(); }
        if let Some(no) = self.no { next.no = no; }
        next
    }
}

/// Names are stored lowercase regardless of input casing.
pub fn normalize_name(name: &str) -> String { name.to_lowercase() }

/// Lookup key for name searches: lowercased and trimmed.
pub fn search_key(term: &str) -> String { term.to_lowercase().trim().to_string() }

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ModelError::Validation(format!("name longer than {MAX_NAME_LEN} characters")));
    }
    Ok(())
}

pub fn validate_no(no: i32) -> Result<(), ModelError> {
    if no < 1 {
        return Err(ModelError::Validation("no must be a positive integer".into()));
    }
    Ok(())
}

/// Whether `s` is syntactically a store identifier.
pub fn is_valid_id(s: &str) -> bool { parse_id(s).is_some() }

pub fn parse_id(s: &str) -> Option<Uuid> { Uuid::parse_str(s).ok() }

/// Catalog number lookups apply to terms that read as a whole number once
/// trimmed: `25`, ` 25 `, `025`, `+25` and `25.0` all give 25.
pub fn parse_no(s: &str) -> Option<i32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let n = s.parse::<f64>().ok()?;
    if !n.is_finite() || n.fract() != 0.0 || n < f64::from(i32::MIN) || n > f64::from(i32::MAX) {
        return None;
    }
    Some(n as i32)
}

pub async fn create(db: &DatabaseConnection, name: &str, no: i32) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_no(no)?;
    let name = normalize_name(name);

    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.clone()),
        no: Set(no),
        version: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::classify(e, Some(&name), Some(no)))
}

/// Single batched insert. Returns the number of rows written.
pub async fn insert_many(db: &DatabaseConnection, rows: &[NewPokemon]) -> Result<u64, ModelError> {
    if rows.is_empty() {
        return Ok(0);
    }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let models = rows.iter().map(|row| ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(normalize_name(&row.name)),
        no: Set(row.no),
        version: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    });
    Entity::insert_many(models)
        .exec_without_returning(db)
        .await
        .map_err(|e| errors::classify(e, None, None))
}

/// Apply `patch` to the record `id`, bumping its revision.
/// Returns `None` when the record no longer exists.
pub async fn update(db: &DatabaseConnection, id: Uuid, patch: &PokemonPatch) -> Result<Option<Model>, ModelError> {
    let Some(existing) = Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::Db(e.to_string()))? else {
        return Ok(None);
    };
    let version = existing.version;
    let mut am: ActiveModel = existing.into();
    if let Some(n) = &patch.name {
        validate_name(n)?;
        am.name = Set(normalize_name(n));
    }
    if let Some(no) = patch.no {
        validate_no(no)?;
        am.no = Set(no);
    }
    am.version = Set(version + 1);
    am.updated_at = Set(Utc::now().into());
    let updated = am
        .update(db)
        .await
        .map_err(|e| errors::classify(e, patch.name.as_deref(), patch.no))?;
    Ok(Some(updated))
}

pub async fn delete_all(db: &DatabaseConnection) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn sample() -> Model {
        let now: DateTimeWithTimeZone = Utc::now().into();
        Model { id: Uuid::new_v4(), name: "pikachu".into(), no: 25, version: 0, created_at: now, updated_at: now }
    }

    #[test]
    fn search_key_lowercases_and_trims() {
        assert_eq!(search_key(" PikaChu "), "pikachu");
    }

    #[test]
    fn numeric_terms_only() {
        assert_eq!(parse_no("25"), Some(25));
        assert_eq!(parse_no("25a"), None);
        assert_eq!(parse_no(" 25 "), Some(25));
        assert_eq!(parse_no("25.0"), Some(25));
        assert_eq!(parse_no("+25"), Some(25));
        assert_eq!(parse_no("025"), Some(25));
        assert_eq!(parse_no("25.5"), None);
        assert_eq!(parse_no("inf"), None);
        assert_eq!(parse_no("NaN"), None);
        assert_eq!(parse_no("3000000000"), None);
        assert_eq!(parse_no("   "), None);
        assert_eq!(parse_no(""), None);
    }

    #[test]
    fn id_predicate_accepts_uuid_only() {
        assert!(is_valid_id(&Uuid::new_v4().to_string()));
        assert!(!is_valid_id("pikachu"));
        assert!(!is_valid_id("25"));
    }

    #[test]
    fn validation_rejects_blank_name_and_non_positive_no() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN + 1)).is_err());
        assert!(validate_no(0).is_err());
        assert!(validate_no(-3).is_err());
        assert!(validate_no(1).is_ok());
    }

    #[test]
    fn patch_merge_overlays_present_fields() {
        let current = sample();
        let patch = PokemonPatch { name: None, no: Some(26) };
        let next = patch.merged_into(&current);
        assert_eq!(next.name, "pikachu");
        assert_eq!(next.no, 26);
        assert_eq!(next.id, current.id);
        assert!(PokemonPatch::default().is_empty());
    }

    #[test]
    fn summary_drops_metadata() {
        let m = sample();
        let s = PokemonSummary::from(m.clone());
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json, serde_json::json!({"id": m.id, "name": "pikachu", "no": 25}));
    }
}
