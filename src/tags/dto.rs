use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AttrPayload {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AttrListQuery {
    /// `?assigned_only=1` restricts to attributes linked to a plant.
    #[serde(default)]
    pub assigned_only: u8,
}

#[derive(Debug, Serialize)]
pub struct TagOut {
    pub id: Uuid,
    pub name: String,
}
