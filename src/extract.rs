use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Drop-in replacements for axum's `Json` / `Path` / `Query` whose rejections
/// go through [`ApiError`], so malformed bodies and unparseable params get
/// the same `{code, message}` envelope as every other failure instead of
/// axum's plain-text defaults.
#[derive(Debug)]
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rej) => Err(ApiError::Validation(rej.body_text())),
        }
    }
}

impl<T: serde::Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

pub struct Path<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Path(value)),
            Err(rej) => Err(ApiError::Validation(rej.body_text())),
        }
    }
}

#[derive(Debug)]
pub struct Query<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Query(value)),
            Err(rej) => Err(ApiError::Validation(rej.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    #[tokio::test]
    async fn malformed_json_body_maps_to_validation_error() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let err = Json::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.code(), "validation_error");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_json_content_type_maps_to_validation_error() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "text/plain")
            .body(Body::from(r#"{"name":"Fern"}"#))
            .unwrap();
        let err = Json::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }

    #[tokio::test]
    async fn unparseable_query_param_maps_to_validation_error() {
        #[derive(Debug, Deserialize)]
        struct Q {
            #[allow(dead_code)]
            assigned_only: u8,
        }

        let (mut parts, _) = Request::builder()
            .uri("/plant/tags?assigned_only=banana")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let err = Query::<Q>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "validation_error");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
