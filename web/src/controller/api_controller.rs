use crate::extractors::session_token::SessionToken;
use crate::fragment::{self, Notice};
use crate::response::Outcome;
use crate::AppState;

use axum::extract::State;
use domain::protected_api;
use log::*;

/// GET /api
///
/// Calls the protected API with the token from the session cookie and shows the raw answer.
pub async fn call(
    State(app_state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Outcome {
    let Some(token) = token else {
        debug!("API call requested without a session token");
        return Outcome::Rendered(
            app_state
                .page_shell
                .render(&Notice::MissingSessionToken.to_html()),
        );
    };

    let api_call = protected_api::call(app_state.http_client(), app_state.config(), &token).await;

    Outcome::Rendered(
        app_state
            .page_shell
            .render(&fragment::api_result(&api_call, &token)),
    )
}
