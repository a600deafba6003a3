//! Authentication gating for the admin route subtree.
//!
//! The collaborator owns the admin session (it lives in the API client's
//! cookie store); this extractor only consults the cached check-auth answer
//! held in application state.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

use crate::state::AppState;

/// Extractor that requires an authenticated admin session.
///
/// If the console is not authenticated, browser requests are redirected to
/// the login page and API requests get a bare 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     _auth: RequireAuth,
///     State(state): State<AppState>,
/// ) -> impl IntoResponse {
///     // only reached when authenticated
/// }
/// ```
#[derive(Debug)]
pub struct RequireAuth;

/// Error returned when authentication is required but absent.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.is_authenticated() {
            return Ok(Self);
        }

        if parts.uri.path().starts_with("/api/") {
            Err(AuthRejection::Unauthorized)
        } else {
            Err(AuthRejection::RedirectToLogin)
        }
    }
}
