use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::ownership::Owned;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareTip {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
}

impl Owned for CareTip {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl CareTip {
    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        assigned_only: bool,
    ) -> anyhow::Result<Vec<CareTip>> {
        let rows = sqlx::query_as::<_, CareTip>(
            r#"
            SELECT c.id, c.user_id, c.name
            FROM care_tips c
            WHERE c.user_id = $1
              AND ($2 = false OR EXISTS (
                    SELECT 1 FROM plant_care_tips pc WHERE pc.care_tip_id = c.id))
            ORDER BY c.name DESC
            "#,
        )
        .bind(user_id)
        .bind(assigned_only)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn get(db: &PgPool, id: Uuid) -> anyhow::Result<Option<CareTip>> {
        let tip = sqlx::query_as::<_, CareTip>(
            "SELECT id, user_id, name FROM care_tips WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(tip)
    }

    pub async fn get_or_create(
        conn: &mut PgConnection,
        user_id: Uuid,
        name: &str,
    ) -> anyhow::Result<CareTip> {
        let tip = sqlx::query_as::<_, CareTip>(
            r#"
            INSERT INTO care_tips (user_id, name)
            VALUES ($1, $2)
            ON CONFLICT (user_id, name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, user_id, name
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(conn)
        .await?;
        Ok(tip)
    }

    /// Returns the raw sqlx error so callers keep the unique-violation
    /// (duplicate name per owner) distinguishable from other failures.
    pub async fn rename(db: &PgPool, id: Uuid, name: &str) -> Result<CareTip, sqlx::Error> {
        sqlx::query_as::<_, CareTip>(
            "UPDATE care_tips SET name = $2 WHERE id = $1 RETURNING id, user_id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM care_tips WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
