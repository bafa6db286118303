use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// Nested attribute reference: tags and care tips are created-or-fetched by
/// name under the requesting user.
#[derive(Debug, Deserialize)]
pub struct AttrName {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AttrOut {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlantRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub tags: Vec<AttrName>,
    #[serde(default)]
    pub care_tips: Vec<AttrName>,
}

/// PATCH body; absent fields are untouched, present `tags` / `care_tips`
/// replace the whole link set.
#[derive(Debug, Deserialize)]
pub struct UpdatePlantRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub link: Option<String>,
    pub tags: Option<Vec<AttrName>>,
    pub care_tips: Option<Vec<AttrName>>,
}

#[derive(Debug, Deserialize)]
pub struct PlantListQuery {
    pub tags: Option<String>,
    pub care_tips: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlantListItem {
    pub id: Uuid,
    pub title: String,
    pub price: Decimal,
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct PlantDetails {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<AttrOut>,
    pub care_tips: Vec<AttrOut>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlantImageResponse {
    pub id: Uuid,
    pub image: String,
}

/// Parse a comma-separated id list query param (`?tags=<id>,<id>`).
pub fn parse_id_list(raw: Option<&str>) -> Result<Vec<Uuid>, ApiError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Uuid::parse_str(s).map_err(|_| ApiError::Validation(format!("invalid id: {s}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_list_handles_absent_and_empty() {
        assert!(parse_id_list(None).unwrap().is_empty());
        assert!(parse_id_list(Some("")).unwrap().is_empty());
        assert!(parse_id_list(Some(" , ")).unwrap().is_empty());
    }

    #[test]
    fn parse_id_list_parses_uuids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let parsed = parse_id_list(Some(&format!("{a}, {b}"))).unwrap();
        assert_eq!(parsed, vec![a, b]);
    }

    #[test]
    fn parse_id_list_rejects_garbage() {
        let err = parse_id_list(Some("not-a-uuid")).unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn create_request_ignores_owner_fields() {
        // Owner always comes from the authenticated identity; a client-sent
        // user_id must not even deserialize into the payload.
        let body = r#"{"title":"Fern","price":"5.25","user_id":"someone-else"}"#;
        let req: CreatePlantRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.title, "Fern");
        assert!(req.tags.is_empty());
    }

    #[test]
    fn price_accepts_string_and_number() {
        let from_string: CreatePlantRequest =
            serde_json::from_str(r#"{"title":"A","price":"5.25"}"#).unwrap();
        let from_number: CreatePlantRequest =
            serde_json::from_str(r#"{"title":"A","price":5.25}"#).unwrap();
        assert_eq!(from_string.price, from_number.price);
    }
}
