//! Server-side HTML views.
//!
//! Templates are compiled into the binary and loaded on first use.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{copy::COPY_LIST_PATH, BookCopy, BookTitle, CopyDraft, CopyStatus},
    validation::FieldError,
};

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_loader(embedded_template);
    env
});

fn embedded_template(name: &str) -> Result<Option<String>, minijinja::Error> {
    let source = match name {
        "layout.html" => include_str!("../templates/layout.html"),
        "copy_list.html" => include_str!("../templates/copy_list.html"),
        "copy_detail.html" => include_str!("../templates/copy_detail.html"),
        "copy_form.html" => include_str!("../templates/copy_form.html"),
        "copy_delete.html" => include_str!("../templates/copy_delete.html"),
        "error.html" => include_str!("../templates/error.html"),
        _ => return Ok(None),
    };
    Ok(Some(source.to_string()))
}

pub fn render(name: &str, ctx: minijinja::Value) -> AppResult<Html<String>> {
    let template = TEMPLATES.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

/// 302 Found with a Location header
pub fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Error page used by `AppError`; falls back to plain text if rendering fails.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let ctx = context! {
        title => message,
        message => message,
        status => status.as_u16(),
    };
    match render("error.html", ctx) {
        Ok(html) => (status, html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            (status, message.to_string()).into_response()
        }
    }
}

/// Copy as shown in list, detail and delete views
#[derive(Debug, Serialize)]
pub struct CopyView {
    pub id: String,
    pub url: String,
    pub book_id: String,
    pub book_title: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<String>,
    pub due_back_formatted: String,
}

impl From<&BookCopy> for CopyView {
    fn from(copy: &BookCopy) -> Self {
        Self {
            id: copy.id.to_string(),
            url: copy.url(),
            book_id: copy.book_id.to_string(),
            book_title: copy.book_title.clone(),
            imprint: copy.imprint.clone(),
            status: copy.status.clone(),
            due_back: copy.due_back.map(|d| d.format("%Y-%m-%d").to_string()),
            due_back_formatted: copy.due_back_formatted(),
        }
    }
}

pub fn copy_list(copies: &[BookCopy]) -> AppResult<Html<String>> {
    let copies: Vec<CopyView> = copies.iter().map(CopyView::from).collect();
    render(
        "copy_list.html",
        context! { title => "Book Copy List", copies => copies },
    )
}

pub fn copy_detail(copy: &BookCopy) -> AppResult<Html<String>> {
    render(
        "copy_detail.html",
        context! {
            title => format!("Copy: {}", copy.book_title),
            copy => CopyView::from(copy),
        },
    )
}

pub fn copy_delete(copy: &BookCopy) -> AppResult<Html<String>> {
    render(
        "copy_delete.html",
        context! {
            title => "Delete Copy",
            copy => CopyView::from(copy),
            list_url => COPY_LIST_PATH,
        },
    )
}

/// Create/update form, optionally with field errors from a rejected submission
pub fn copy_form(
    title: &str,
    books: &[BookTitle],
    draft: &CopyDraft,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let statuses: Vec<&str> = CopyStatus::ALL.iter().map(|s| s.as_str()).collect();
    render(
        "copy_form.html",
        context! {
            title => title,
            books => books,
            selected_book => &draft.book,
            copy => draft,
            statuses => statuses,
            errors => errors,
        },
    )
}
