//! Request handlers for the entrybook page and its three forms.
//!
//! Each form submission validates its input, performs exactly one storage
//! operation, and answers with `303 See Other` back to `/`. The browser then
//! re-fetches the page, which re-queries every record, so the table and the
//! pickers always reflect the latest committed state. Validation failures
//! re-render the page directly with status 422 and never touch storage.

use crate::render::{self, Banner, EditDraft, PageView};
use crate::AppState;
use axum::{
    extract::{Extension, Form, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use entrybook_entries::{parse_age_input, EntryError, EntryFields, ValidationError};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors that abort a request with a 500 page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("storage error: {0}")]
    Storage(#[from] EntryError),
    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render::error_page(&self.to_string())),
        )
            .into_response()
    }
}

/// Outcome of the previous mutation, carried through the redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Added,
    Updated,
    Deleted,
}

impl Notice {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "added" => Some(Notice::Added),
            "updated" => Some(Notice::Updated),
            "deleted" => Some(Notice::Deleted),
            _ => None,
        }
    }

    fn message(self, id: Option<i64>) -> String {
        match (self, id) {
            (Notice::Added, Some(id)) => format!("Added entry (id={id})."),
            (Notice::Added, None) => "Added entry.".to_string(),
            (Notice::Updated, _) => "Record updated.".to_string(),
            (Notice::Deleted, _) => "Record deleted.".to_string(),
        }
    }
}

/// Query string accepted by `GET /`.
///
/// Fields are kept as text so a hand-edited URL still renders the page;
/// values that do not parse are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Record to load into the update form.
    pub edit: Option<String>,
    pub notice: Option<String>,
    /// Id reported by the `added` notice.
    pub id: Option<String>,
}

impl PageQuery {
    fn edit_id(&self) -> Option<i64> {
        self.edit.as_deref().and_then(|v| v.trim().parse().ok())
    }

    fn banner(&self) -> Option<Banner> {
        let notice = self.notice.as_deref().and_then(Notice::parse)?;
        let id = self.id.as_deref().and_then(|v| v.trim().parse().ok());
        Some(Banner::Success(notice.message(id)))
    }
}

#[derive(Debug, Deserialize)]
pub struct AddEntryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntryForm {
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteEntryForm {
    pub id: Option<i64>,
    /// Present only when the confirmation checkbox is ticked.
    pub confirm: Option<String>,
}

/// Runs a blocking storage call off the async runtime.
async fn run_blocking<T, F>(f: F) -> Result<T, PageError>
where
    F: FnOnce() -> Result<T, EntryError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

/// Queries the records and the selected edit target for a fresh render.
///
/// A missing or stale `edit` id falls back to the newest record.
async fn load_view(
    state: &AppState,
    edit: Option<i64>,
    delete_selected: Option<i64>,
    banner: Option<Banner>,
) -> Result<PageView, PageError> {
    let store = state.store.clone();
    let entries = run_blocking(move || store.list()).await?;

    let selected_id = edit
        .filter(|id| entries.iter().any(|e| e.id == *id))
        .or_else(|| entries.first().map(|e| e.id));

    let editing = match selected_id {
        Some(id) => {
            let store = state.store.clone();
            run_blocking(move || store.get(id)).await?
        }
        None => None,
    };

    Ok(PageView {
        entries,
        editing,
        delete_selected,
        banner,
        draft: None,
    })
}

/// Re-renders the page with an inline validation message.
///
/// A `draft` is echoed back into the update form so typed edits survive.
async fn rejected(
    state: &AppState,
    error: ValidationError,
    delete_selected: Option<i64>,
    draft: Option<EditDraft>,
) -> Result<Response, PageError> {
    tracing::debug!(error = %error, "form input rejected");
    let mut view = load_view(
        state,
        draft.as_ref().map(|d| d.id),
        delete_selected,
        Some(Banner::Error(error.to_string())),
    )
    .await?;
    view.draft = draft;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(render::page(&view))).into_response())
}

fn parse_fields(name: &str, age: &str, email: &str) -> Result<EntryFields, ValidationError> {
    let age = parse_age_input(age)?;
    EntryFields::parse(name, age, email)
}

/// GET /
pub async fn index_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, PageError> {
    let view = load_view(&state, query.edit_id(), None, query.banner()).await?;
    Ok(Html(render::page(&view)))
}

/// POST /entries
pub async fn add_entry_handler(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<AddEntryForm>,
) -> Result<Response, PageError> {
    let fields = match parse_fields(&form.name, &form.age, &form.email) {
        Ok(fields) => fields,
        Err(e) => return rejected(&state, e, None, None).await,
    };

    let store = state.store.clone();
    let id = run_blocking(move || store.create(&fields)).await?;

    Ok(Redirect::to(&format!("/?notice=added&id={id}")).into_response())
}

/// POST /entries/update
pub async fn update_entry_handler(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<UpdateEntryForm>,
) -> Result<Response, PageError> {
    let Some(id) = form.id else {
        return rejected(&state, ValidationError::NoRecordSelected, None, None).await;
    };
    let fields = match parse_fields(&form.name, &form.age, &form.email) {
        Ok(fields) => fields,
        Err(e) => {
            let draft = EditDraft {
                id,
                name: form.name,
                age: form.age,
                email: form.email,
            };
            return rejected(&state, e, None, Some(draft)).await;
        }
    };

    let store = state.store.clone();
    run_blocking(move || store.update(id, &fields)).await?;

    Ok(Redirect::to(&format!("/?notice=updated&edit={id}")).into_response())
}

/// POST /entries/delete
pub async fn delete_entry_handler(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<DeleteEntryForm>,
) -> Result<Response, PageError> {
    if form.confirm.is_none() {
        return rejected(&state, ValidationError::MissingConfirmation, form.id, None).await;
    }
    let Some(id) = form.id else {
        return rejected(&state, ValidationError::NoRecordSelected, None, None).await;
    };

    let store = state.store.clone();
    run_blocking(move || store.delete(id)).await?;

    Ok(Redirect::to("/?notice=deleted").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_messages() {
        assert_eq!(Notice::Added.message(Some(7)), "Added entry (id=7).");
        assert_eq!(Notice::Updated.message(None), "Record updated.");
        assert_eq!(Notice::Deleted.message(Some(3)), "Record deleted.");
    }

    #[test]
    fn page_query_ignores_unparsable_values() {
        let query = PageQuery {
            edit: Some("abc".to_string()),
            notice: Some("bogus".to_string()),
            id: Some("7".to_string()),
        };
        assert_eq!(query.edit_id(), None);
        assert_eq!(query.banner(), None);

        let query = PageQuery {
            edit: Some(" 12 ".to_string()),
            notice: Some("added".to_string()),
            id: Some("x".to_string()),
        };
        assert_eq!(query.edit_id(), Some(12));
        assert_eq!(
            query.banner(),
            Some(Banner::Success("Added entry.".to_string()))
        );
    }

    #[test]
    fn parse_fields_reports_bad_age_before_name() {
        assert_eq!(
            parse_fields("", "abc", "").unwrap_err(),
            ValidationError::InvalidAge("abc".to_string())
        );
        assert_eq!(
            parse_fields("", "3", "").unwrap_err(),
            ValidationError::EmptyName
        );
        let fields = parse_fields(" Ann ", "", " ann@x.com ").unwrap();
        assert_eq!(fields.name(), "Ann");
        assert_eq!(fields.age(), None);
        assert_eq!(fields.email(), "ann@x.com");
    }
}
