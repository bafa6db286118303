use axum::Router;

use crate::state::AppState;

mod dto;
pub(crate) mod extractor;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod token;

pub use extractor::CurrentUser;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
