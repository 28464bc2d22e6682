//! Book copy endpoints (server-rendered HTML)

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::{
    error::AppResult,
    models::{copy::COPY_LIST_PATH, CopyDraft, CopyForm, DeleteCopyForm},
    services::copies::{RejectedForm, Submission},
    views, AppState,
};

const CREATE_TITLE: &str = "Create Copy";
const UPDATE_TITLE: &str = "Update Copy";

fn submission_response(title: &str, submission: Submission) -> AppResult<Response> {
    match submission {
        Submission::Saved(copy) => Ok(views::redirect(&copy.url())),
        Submission::Rejected(RejectedForm {
            draft,
            errors,
            books,
        }) => Ok(views::copy_form(title, &books, &draft, &errors)?.into_response()),
    }
}

/// List all copies
#[utoipa::path(
    get,
    path = "/catalog/copies",
    tag = "copies",
    responses(
        (status = 200, description = "Copy list page", content_type = "text/html", body = String)
    )
)]
pub async fn list_copies(State(state): State<AppState>) -> AppResult<Html<String>> {
    let copies = state.services.copies.list().await?;
    views::copy_list(&copies)
}

/// Copy detail page
#[utoipa::path(
    get,
    path = "/catalog/copies/{id}",
    tag = "copies",
    params(("id" = String, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy detail page", content_type = "text/html", body = String),
        (status = 404, description = "Book copy not found")
    )
)]
pub async fn copy_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let copy = state.services.copies.get(&id).await?;
    views::copy_detail(&copy)
}

/// Empty create form
#[utoipa::path(
    get,
    path = "/catalog/copies/create",
    tag = "copies",
    responses(
        (status = 200, description = "Create form", content_type = "text/html", body = String)
    )
)]
pub async fn create_copy_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.copies.book_titles().await?;
    views::copy_form(CREATE_TITLE, &books, &CopyDraft::default(), &[])
}

/// Create a copy
#[utoipa::path(
    post,
    path = "/catalog/copies/create",
    tag = "copies",
    request_body(content = CopyForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Created, redirect to the copy"),
        (status = 200, description = "Form with validation errors", content_type = "text/html", body = String)
    )
)]
pub async fn create_copy(
    State(state): State<AppState>,
    Form(form): Form<CopyForm>,
) -> AppResult<Response> {
    let submission = state.services.copies.create(form).await?;
    submission_response(CREATE_TITLE, submission)
}

/// Delete confirmation page
#[utoipa::path(
    get,
    path = "/catalog/copies/{id}/delete",
    tag = "copies",
    params(("id" = String, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Delete confirmation", content_type = "text/html", body = String),
        (status = 302, description = "Copy not found, redirect to the list")
    )
)]
pub async fn delete_copy_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(copy) = state.services.copies.find(&id).await? else {
        return Ok(views::redirect(COPY_LIST_PATH));
    };
    Ok(views::copy_delete(&copy)?.into_response())
}

/// Delete a copy; the id comes from the form body
#[utoipa::path(
    post,
    path = "/catalog/copies/{id}/delete",
    tag = "copies",
    params(("id" = String, Path, description = "Copy ID (ignored, the body id is used)")),
    request_body(content = DeleteCopyForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Deleted, redirect to the list")
    )
)]
pub async fn delete_copy(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    Form(form): Form<DeleteCopyForm>,
) -> AppResult<Response> {
    state.services.copies.delete(&form.id).await?;
    Ok(views::redirect(COPY_LIST_PATH))
}

/// Update form pre-filled with the current values
#[utoipa::path(
    get,
    path = "/catalog/copies/{id}/update",
    tag = "copies",
    params(("id" = String, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Update form", content_type = "text/html", body = String),
        (status = 404, description = "Book copy not found")
    )
)]
pub async fn update_copy_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let (copy, books) = state.services.copies.edit(&id).await?;
    views::copy_form(UPDATE_TITLE, &books, &CopyDraft::from(&copy), &[])
}

/// Update a copy
#[utoipa::path(
    post,
    path = "/catalog/copies/{id}/update",
    tag = "copies",
    params(("id" = String, Path, description = "Copy ID")),
    request_body(content = CopyForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Updated, redirect to the copy"),
        (status = 200, description = "Form with validation errors", content_type = "text/html", body = String),
        (status = 404, description = "Book copy not found")
    )
)]
pub async fn update_copy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CopyForm>,
) -> AppResult<Response> {
    let submission = state.services.copies.update(&id, form).await?;
    submission_response(UPDATE_TITLE, submission)
}
