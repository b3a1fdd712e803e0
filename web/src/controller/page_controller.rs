use crate::extractors::session_token::SessionToken;
use crate::fragment;
use crate::response::Outcome;
use crate::AppState;

use axum::extract::State;
use domain::jwt;

/// GET /
///
/// Shows the decoded access token when the browser holds one, the bare shell otherwise.
pub async fn index(
    State(app_state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Outcome {
    let content = token
        .map(|token| fragment::token_inspection(&jwt::inspect(&token)))
        .unwrap_or_default();

    Outcome::Rendered(app_state.page_shell.render(&content))
}

/// Any path that is not one of the five routes.
pub async fn not_found() -> Outcome {
    Outcome::NotFound
}
