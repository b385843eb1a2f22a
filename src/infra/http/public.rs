use std::{io::ErrorKind, sync::Arc};

use axum::{
    Form, Router,
    body::Body,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{
        HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, LOCATION},
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::error;

use crate::{
    application::{
        error::HttpError,
        inquiries::{ContactForm, InquiryService},
        repos::PortfolioRepo,
        site::SiteContentService,
    },
    domain::types::MediaCategory,
    infra::{
        db::PostgresRepositories,
        media::{MediaStorage, MediaStorageError},
    },
    presentation::views::{
        IndexTemplate, NoticeView, WorkItemView, WorkTemplate, render_not_found_response,
        render_template_response,
    },
};

use super::{
    db_health_response,
    middleware::{log_responses, set_request_context},
};

const CONTACT_FORM_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone)]
pub struct HttpState {
    pub site: Arc<SiteContentService>,
    pub inquiries: Arc<InquiryService>,
    pub portfolio: Arc<dyn PortfolioRepo>,
    pub media: Arc<MediaStorage>,
    pub db: Arc<PostgresRepositories>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/work/{category}", get(work_gallery))
        .route(
            "/contact",
            post(submit_contact).layer(DefaultBodyLimit::max(CONTACT_FORM_BODY_LIMIT)),
        )
        .route("/media/{*path}", get(serve_media))
        .route("/static/{*path}", get(crate::infra::assets::serve_public))
        .route("/_health/db", get(public_health))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NoticeQuery {
    notice: Option<String>,
}

async fn index(State(state): State<HttpState>, Query(query): Query<NoticeQuery>) -> Response {
    let notice = match query.notice.as_deref() {
        Some("sent") => NoticeView::success("Thanks! We received your inquiry and will reply soon."),
        Some(other) if !other.is_empty() => NoticeView::error(notice_text(other)),
        _ => NoticeView::default(),
    };

    let landing = state.site.landing();
    render_template_response(IndexTemplate { landing, notice }, StatusCode::OK)
}

// Error notices round-trip through the redirect query as short codes.
fn notice_text(code: &str) -> String {
    match code {
        "missing-name" => "Please tell us your name.".to_string(),
        "missing-service" => "Please pick a service.".to_string(),
        "missing-description" => "Please describe your project.".to_string(),
        "missing-contact" => "Leave an email address or a phone number so we can reach you."
            .to_string(),
        "failed" => "Something went wrong while sending your inquiry. Please try again.".to_string(),
        _ => "Your inquiry could not be sent.".to_string(),
    }
}

async fn work_gallery(State(state): State<HttpState>, Path(category): Path<String>) -> Response {
    let category = match MediaCategory::try_from(category.as_str()) {
        Ok(category) => category,
        Err(_) => return render_not_found_response(),
    };

    match state.portfolio.list_by_category(category).await {
        Ok(records) => {
            let items = records.iter().map(WorkItemView::from).collect();
            render_template_response(WorkTemplate::new(category, items), StatusCode::OK)
        }
        Err(err) => super::repo_error_to_http("infra::http::public::work_gallery", err)
            .into_response(),
    }
}

async fn submit_contact(
    State(state): State<HttpState>,
    Form(form): Form<ContactForm>,
) -> Response {
    use crate::application::inquiries::IntakeError;

    let notice = match state.inquiries.submit(form).await {
        Ok(_) => "sent",
        Err(IntakeError::MissingField("name")) => "missing-name",
        Err(IntakeError::MissingField("service")) => "missing-service",
        Err(IntakeError::MissingField(_)) => "missing-description",
        Err(IntakeError::MissingContactMethod) => "missing-contact",
        Err(IntakeError::Repo(err)) => {
            error!(
                target = "kadro::http::contact",
                error = %err,
                "failed to store contact submission"
            );
            "failed"
        }
    };

    redirect_see_other(&format!("/?notice={notice}#contact"))
}

fn redirect_see_other(location: &str) -> Response {
    let mut response = StatusCode::SEE_OTHER.into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(LOCATION, value);
    }
    response
}

async fn serve_media(State(state): State<HttpState>, Path(path): Path<String>) -> Response {
    const SOURCE: &str = "infra::http::public::serve_media";

    let absolute = match state.media.absolute_path(&path) {
        Ok(absolute) => absolute,
        Err(MediaStorageError::InvalidPath) => return media_not_found(SOURCE),
        Err(err) => return media_read_failure(SOURCE, &path, err),
    };

    match tokio::fs::read(&absolute).await {
        Ok(bytes) => build_media_response(&path, Bytes::from(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => media_not_found(SOURCE),
        Err(err) => media_read_failure(SOURCE, &path, MediaStorageError::Io(err)),
    }
}

fn media_not_found(source: &'static str) -> Response {
    HttpError::new(
        source,
        StatusCode::NOT_FOUND,
        "Media not found",
        "The requested media file is not available",
    )
    .into_response()
}

fn media_read_failure(source: &'static str, path: &str, err: MediaStorageError) -> Response {
    error!(
        target = source,
        path = %path,
        error = %err,
        "failed to read stored media"
    );
    HttpError::new(
        source,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to read media file",
        err.to_string(),
    )
    .into_response()
}

fn build_media_response(path: &str, bytes: Bytes) -> Response {
    let mut response = Response::new(Body::from(bytes.clone()));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&bytes.len().to_string()) {
        headers.insert(CONTENT_LENGTH, value);
    }
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );

    response
}

async fn public_health(State(state): State<HttpState>) -> Response {
    db_health_response(state.db.health_check().await)
}

async fn fallback() -> Response {
    render_not_found_response()
}
