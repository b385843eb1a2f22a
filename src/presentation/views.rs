//! Public view models and template plumbing.

use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::{ErrorReport, HttpError};
use crate::application::site::LandingContent;
use crate::domain::entities::PortfolioItemRecord;
use crate::domain::types::MediaCategory;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response() -> Response {
    let mut response = render_template_response(
        ErrorTemplate {
            title: "Page not found".to_string(),
            message: "The page you are looking for does not exist.".to_string(),
        },
        StatusCode::NOT_FOUND,
    );
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

/// Banner shown after a contact-form submit. Empty kind means no banner.
#[derive(Clone, Default)]
pub struct NoticeView {
    pub kind: String,
    pub text: String,
}

impl NoticeView {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: "success".to_string(),
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: "error".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub landing: LandingContent,
    pub notice: NoticeView,
}

#[derive(Clone)]
pub struct WorkTabView {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// One gallery card; optional fields are empty strings when absent.
#[derive(Clone)]
pub struct WorkItemView {
    pub title: String,
    pub description: String,
    pub kind: &'static str,
    pub media_url: String,
    pub embed_url: String,
    pub thumbnail_url: String,
}

impl From<&PortfolioItemRecord> for WorkItemView {
    fn from(record: &PortfolioItemRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone().unwrap_or_default(),
            kind: record.media_kind.as_str(),
            media_url: record.media_url.clone(),
            embed_url: record.embed_url.clone().unwrap_or_default(),
            thumbnail_url: record.thumbnail_url.clone().unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "work.html")]
pub struct WorkTemplate {
    pub category_label: &'static str,
    pub tabs: Vec<WorkTabView>,
    pub items: Vec<WorkItemView>,
}

impl WorkTemplate {
    pub fn new(category: MediaCategory, items: Vec<WorkItemView>) -> Self {
        let tabs = MediaCategory::ALL
            .iter()
            .map(|tab| WorkTabView {
                label: tab.label(),
                href: format!("/work/{}", tab.as_str()),
                active: *tab == category,
            })
            .collect();
        Self {
            category_label: category.label(),
            tabs,
            items,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}
