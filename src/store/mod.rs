//! SQLite-backed colleague store.
//!
//! A single `colleagues` table. Descriptions persist as a JSON array in a
//! text column and decode with a typed fallback, so malformed stored JSON
//! never propagates past this boundary. The pool is constructed explicitly
//! at startup and injected into whoever needs it; there is no ambient
//! connection state.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{info, warn};

use crate::core::{Colleague, ColleagueDraft, ColleagueId};

/// Starter roster inserted into an empty table so the game is playable
/// before anyone opens the editor.
const DEMO_ROSTER: &[(&str, &[&str])] = &[
    (
        "Alex",
        &[
            "Keeps a sourdough starter alive on the office windowsill",
            "Reviews pull requests before the first coffee",
            "Once cycled to a customer site to debug a printer",
        ],
    ),
    (
        "Sam",
        &[
            "Collects mechanical keyboards",
            "Maintains the build server nobody else dares touch",
            "Quotes release notes from memory",
        ],
    ),
    (
        "Robin",
        &[
            "Joined as an intern and now runs the on-call rota",
            "Brings a plant to every desk move",
        ],
    ),
];

/// Handle to the colleague table.
///
/// Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct ColleagueStore {
    pool: SqlitePool,
}

impl ColleagueStore {
    /// Open a pool against `url` and create the schema if absent.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        Self::with_pool(pool).await
    }

    /// Wrap an existing pool. Tests use this with an in-memory database.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS colleagues (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                photo TEXT,
                descriptions TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All colleague records, in id order.
    pub async fn list(&self) -> Result<Vec<Colleague>, sqlx::Error> {
        let rows = sqlx::query("SELECT id, name, photo, descriptions FROM colleagues ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let id: i64 = row.get("id");
                Colleague {
                    id: ColleagueId::new(id),
                    name: row.get("name"),
                    photo: row.get::<Option<String>, _>("photo").unwrap_or_default(),
                    descriptions: decode_descriptions(id, row.get("descriptions")),
                }
            })
            .collect())
    }

    /// Insert a record; the store assigns the id.
    pub async fn create(&self, draft: &ColleagueDraft) -> Result<Colleague, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO colleagues (name, photo, descriptions) VALUES (?, ?, ?)")
                .bind(&draft.name)
                .bind(&draft.photo)
                .bind(encode_descriptions(&draft.descriptions))
                .execute(&self.pool)
                .await?;

        Ok(Colleague {
            id: ColleagueId::new(result.last_insert_rowid()),
            name: draft.name.clone(),
            photo: draft.photo.clone(),
            descriptions: draft.descriptions.clone(),
        })
    }

    /// Full replace of name/photo/descriptions for `id`.
    ///
    /// Echoes the updated record; updating an unknown id is not an error.
    pub async fn update(
        &self,
        id: ColleagueId,
        draft: &ColleagueDraft,
    ) -> Result<Colleague, sqlx::Error> {
        sqlx::query("UPDATE colleagues SET name = ?, photo = ?, descriptions = ? WHERE id = ?")
            .bind(&draft.name)
            .bind(&draft.photo)
            .bind(encode_descriptions(&draft.descriptions))
            .bind(id.raw())
            .execute(&self.pool)
            .await?;

        Ok(Colleague {
            id,
            name: draft.name.clone(),
            photo: draft.photo.clone(),
            descriptions: draft.descriptions.clone(),
        })
    }

    /// Delete by id. Unknown ids are a no-op.
    pub async fn delete(&self, id: ColleagueId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM colleagues WHERE id = ?")
            .bind(id.raw())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Seed the demo roster when the table is empty.
    pub async fn seed_if_empty(&self) -> Result<(), sqlx::Error> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM colleagues")
            .fetch_one(&self.pool)
            .await?
            .get("count");
        if count > 0 {
            return Ok(());
        }

        for (name, descriptions) in DEMO_ROSTER {
            let draft = ColleagueDraft {
                name: (*name).to_string(),
                photo: String::new(),
                descriptions: descriptions.iter().map(|d| (*d).to_string()).collect(),
            };
            self.create(&draft).await?;
        }
        info!("seeded {} demo colleagues", DEMO_ROSTER.len());
        Ok(())
    }
}

fn encode_descriptions(descriptions: &[String]) -> String {
    // Serializing a list of strings cannot fail; the fallback keeps the
    // column well-formed regardless.
    serde_json::to_string(descriptions).unwrap_or_else(|_| "[]".to_string())
}

/// Decode the JSON column, substituting an empty list for anything that is
/// not a JSON array of strings.
fn decode_descriptions(id: i64, raw: String) -> Vec<String> {
    match serde_json::from_str(&raw) {
        Ok(descriptions) => descriptions,
        Err(err) => {
            warn!(colleague = id, %err, "malformed descriptions column, treating as empty");
            Vec::new()
        }
    }
}
