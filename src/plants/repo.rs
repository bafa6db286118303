use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::care_tips::repo::CareTip;
use crate::ownership::Owned;
use crate::tags::repo::Tag;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub link: String,
    pub image_key: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Owned for Plant {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// Attribute changes applied alongside a plant create/update.
pub struct PlantAttrs<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: Decimal,
    pub link: &'a str,
}

impl Plant {
    /// Owner-scoped listing, newest first. Non-empty `tag_ids` /
    /// `care_tip_ids` narrow to plants linked to any of those attributes;
    /// empty slices are no-ops so one static query covers every case.
    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        tag_ids: &[Uuid],
        care_tip_ids: &[Uuid],
    ) -> anyhow::Result<Vec<Plant>> {
        let rows = sqlx::query_as::<_, Plant>(
            r#"
            SELECT id, user_id, title, description, price, link, image_key, created_at
            FROM plants p
            WHERE p.user_id = $1
              AND (cardinality($2::uuid[]) = 0 OR EXISTS (
                    SELECT 1 FROM plant_tags pt
                    WHERE pt.plant_id = p.id AND pt.tag_id = ANY($2)))
              AND (cardinality($3::uuid[]) = 0 OR EXISTS (
                    SELECT 1 FROM plant_care_tips pc
                    WHERE pc.plant_id = p.id AND pc.care_tip_id = ANY($3)))
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(tag_ids)
        .bind(care_tip_ids)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn get(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Plant>> {
        let plant = sqlx::query_as::<_, Plant>(
            r#"
            SELECT id, user_id, title, description, price, link, image_key, created_at
            FROM plants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(plant)
    }

    pub async fn insert(
        conn: &mut PgConnection,
        user_id: Uuid,
        attrs: &PlantAttrs<'_>,
    ) -> anyhow::Result<Plant> {
        let plant = sqlx::query_as::<_, Plant>(
            r#"
            INSERT INTO plants (user_id, title, description, price, link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, price, link, image_key, created_at
            "#,
        )
        .bind(user_id)
        .bind(attrs.title)
        .bind(attrs.description)
        .bind(attrs.price)
        .bind(attrs.link)
        .fetch_one(conn)
        .await?;
        Ok(plant)
    }

    pub async fn update_fields(
        conn: &mut PgConnection,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        price: Option<Decimal>,
        link: Option<&str>,
    ) -> anyhow::Result<Plant> {
        let plant = sqlx::query_as::<_, Plant>(
            r#"
            UPDATE plants
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                link = COALESCE($5, link)
            WHERE id = $1
            RETURNING id, user_id, title, description, price, link, image_key, created_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(link)
        .fetch_one(conn)
        .await?;
        Ok(plant)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM plants WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn set_image_key(db: &PgPool, id: Uuid, key: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE plants SET image_key = $2 WHERE id = $1")
            .bind(id)
            .bind(key)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn tags(&self, db: &PgPool) -> anyhow::Result<Vec<Tag>> {
        let rows = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.user_id, t.name
            FROM tags t
            JOIN plant_tags pt ON pt.tag_id = t.id
            WHERE pt.plant_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(self.id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn care_tips(&self, db: &PgPool) -> anyhow::Result<Vec<CareTip>> {
        let rows = sqlx::query_as::<_, CareTip>(
            r#"
            SELECT c.id, c.user_id, c.name
            FROM care_tips c
            JOIN plant_care_tips pc ON pc.care_tip_id = c.id
            WHERE pc.plant_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(self.id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

pub async fn link_tag(conn: &mut PgConnection, plant_id: Uuid, tag_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO plant_tags (plant_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(plant_id)
    .bind(tag_id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn link_care_tip(
    conn: &mut PgConnection,
    plant_id: Uuid,
    care_tip_id: Uuid,
) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO plant_care_tips (plant_id, care_tip_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(plant_id)
    .bind(care_tip_id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn clear_tags(conn: &mut PgConnection, plant_id: Uuid) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM plant_tags WHERE plant_id = $1")
        .bind(plant_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn clear_care_tips(conn: &mut PgConnection, plant_id: Uuid) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM plant_care_tips WHERE plant_id = $1")
        .bind(plant_id)
        .execute(conn)
        .await?;
    Ok(())
}
