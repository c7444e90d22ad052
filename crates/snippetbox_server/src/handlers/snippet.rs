//! Snippet page handlers.

use crate::{error::HttpError, AppError, AppState};
use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use snippetbox_core::{
    models::{
        snippet::{CreateSnippetForm, ShowSnippetQuery},
        view::TemplateData,
    },
    view::{HOME_VIEW, SHOW_VIEW},
};

fn page_data(state: &AppState) -> TemplateData {
    TemplateData::new(state.clock.now())
}

fn render_page(
    state: &AppState,
    view: &str,
    data: &TemplateData,
) -> Result<Html<Vec<u8>>, HttpError> {
    let body = state.renderer.render(view, data)?;
    Ok(Html(body))
}

/// Render the home page with the latest visible snippets.
///
/// # Errors
/// Storage or rendering failures become a 500.
pub async fn home(State(state): State<AppState>) -> Result<Html<Vec<u8>>, HttpError> {
    let snippets = state.service.list()?;
    render_page(&state, HOME_VIEW, &page_data(&state).with_snippets(snippets))
}

/// Render a single snippet chosen by the `id` query parameter.
///
/// # Errors
/// Missing, malformed, non-positive, unknown and expired ids all yield 404,
/// as does a query string that fails to decode.
pub async fn show_snippet(
    State(state): State<AppState>,
    query: Result<Query<ShowSnippetQuery>, QueryRejection>,
) -> Result<Html<Vec<u8>>, HttpError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!("Rejected show query: {}", rejection.body_text());
        HttpError(AppError::NotFound)
    })?;
    let raw_id = query.id.as_deref().unwrap_or_default();
    let snippet = state
        .service
        .show(raw_id)
        .map_err(HttpError::from_lookup)?;
    render_page(&state, SHOW_VIEW, &page_data(&state).with_snippet(snippet))
}

/// Create a snippet from a submitted form and redirect to it.
///
/// # Returns
/// `303 See Other` pointing at the new snippet.
///
/// # Errors
/// Validation failures, including a body that is not a decodable form,
/// yield 400 with the reason; storage failures a 500. An oversized body
/// keeps its 413.
pub async fn create_snippet(
    State(state): State<AppState>,
    form: Result<Form<CreateSnippetForm>, FormRejection>,
) -> Result<Response, HttpError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Ok(rejection.into_response());
        }
        Err(rejection) => return Err(AppError::Validation(rejection.body_text()).into()),
    };
    let id = state
        .service
        .create(&form.title, &form.content, &form.expires)?;
    tracing::info!(id, "snippet created");
    Ok(Redirect::to(&format!("/snippet?id={}", id)).into_response())
}

/// Fallback for paths that match no route.
pub async fn not_found() -> Response {
    HttpError(AppError::NotFound).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn not_found_fallback_is_plain_404() {
        let response = not_found().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
