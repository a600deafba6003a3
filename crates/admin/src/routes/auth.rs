//! Login and logout against the collaborator.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::api::AdminApiError;
use crate::filters;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Display the login page.
#[instrument(skip(state))]
pub async fn login_page(State(state): State<AppState>) -> Response {
    if state.is_authenticated() {
        return Redirect::to("/").into_response();
    }
    LoginTemplate { error: None }.into_response()
}

/// Log in against the collaborator.
///
/// A successful login leaves the collaborator's session cookie in the API
/// client and flips the cached auth flag that gates the admin routes.
#[instrument(skip(state, form))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.api().login(&form.username, &form.password).await {
        Ok(()) => {
            state.set_authenticated(true);
            tracing::info!("admin login succeeded");
            Redirect::to("/").into_response()
        }
        Err(AdminApiError::Unauthorized(_)) => LoginTemplate {
            error: Some("Invalid credentials".to_string()),
        }
        .into_response(),
        Err(e) => {
            tracing::error!("Login against collaborator failed: {e}");
            LoginTemplate {
                error: Some(e.to_string()),
            }
            .into_response()
        }
    }
}

/// Log out and drop the collaborator session.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.api().logout().await {
        // The local flag is cleared regardless; a dangling collaborator
        // session only means the next login replaces it.
        tracing::warn!("Logout against collaborator failed: {e}");
    }
    state.set_authenticated(false);
    Redirect::to("/login")
}
