use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CareTipOut {
    pub id: Uuid,
    pub name: String,
}
