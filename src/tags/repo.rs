use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::ownership::Owned;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
}

impl Owned for Tag {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Tag {
    /// Owner-scoped listing, name descending. `assigned_only` keeps only tags
    /// linked to at least one plant.
    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        assigned_only: bool,
    ) -> anyhow::Result<Vec<Tag>> {
        let rows = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.user_id, t.name
            FROM tags t
            WHERE t.user_id = $1
              AND ($2 = false OR EXISTS (
                    SELECT 1 FROM plant_tags pt WHERE pt.tag_id = t.id))
            ORDER BY t.name DESC
            "#,
        )
        .bind(user_id)
        .bind(assigned_only)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn get(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Tag>> {
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT id, user_id, name FROM tags WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(tag)
    }

    /// Idempotent create-by-name under one owner; the upsert always returns
    /// the surviving row.
    pub async fn get_or_create(
        conn: &mut PgConnection,
        user_id: Uuid,
        name: &str,
    ) -> anyhow::Result<Tag> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (user_id, name)
            VALUES ($1, $2)
            ON CONFLICT (user_id, name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, user_id, name
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(conn)
        .await?;
        Ok(tag)
    }

    /// Returns the raw sqlx error so callers keep the unique-violation
    /// (duplicate name per owner) distinguishable from other failures.
    pub async fn rename(db: &PgPool, id: Uuid, name: &str) -> Result<Tag, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $2 WHERE id = $1 RETURNING id, user_id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
