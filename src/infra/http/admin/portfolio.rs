//! Admin portfolio handlers.
//!
//! The create and edit forms post regular multipart bodies (file uploads
//! do not round-trip through Datastar) and come back via redirect with a
//! notice query. Text fields must precede the file part so the upload
//! can be streamed into category-scoped storage as it arrives.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Multipart;
use axum_extra::extract::multipart::MultipartError;
use serde::Deserialize;
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::admin::portfolio::{PortfolioAdminError, PortfolioItemDraft};
use crate::application::error::HttpError;
use crate::domain::entities::PortfolioItemRecord;
use crate::domain::types::{MediaCategory, MediaKind};
use crate::infra::media::MediaStorageError;
use crate::presentation::{
    admin::views as admin_views,
    admin::views::admin_chrome,
    views::render_template_response,
};

use super::AdminState;
use super::shared::render_partial;

const SOURCE_BASE: &str = "kadro::http::admin::portfolio";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PortfolioQuery {
    category: Option<String>,
    notice: Option<String>,
}

pub(super) async fn admin_portfolio(
    State(state): State<AdminState>,
    Query(query): Query<PortfolioQuery>,
) -> Response {
    let category = query
        .category
        .as_deref()
        .and_then(|raw| MediaCategory::try_from(raw).ok())
        .unwrap_or_default();

    let form = empty_form_view(category);
    render_portfolio_page(&state, category, form, query.notice.unwrap_or_default()).await
}

pub(super) async fn admin_portfolio_edit(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    let record = match state.portfolio.find(id).await {
        Ok(record) => record,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let form = admin_views::AdminPortfolioFormView {
        heading: format!("Edit `{}`", record.title),
        action: format!("/portfolio/{}/update", record.id),
        category: record.category.as_str(),
        title: record.title.clone(),
        description: record.description.clone().unwrap_or_default(),
        media_kind: record.media_kind.as_str(),
        reference_url: record.embed_url.clone().unwrap_or_default(),
        current_media: record.media_url.clone(),
        sort_order: record.sort_order.to_string(),
        error: String::new(),
    };
    render_portfolio_page(&state, record.category, form, String::new()).await
}

pub(super) async fn admin_portfolio_create(
    State(state): State<AdminState>,
    mut multipart: Multipart,
) -> Response {
    let draft = match read_portfolio_draft(&state, &mut multipart).await {
        Ok(draft) => draft,
        Err(response) => return *response,
    };
    let category = draft.category;

    match state.portfolio.create(draft).await {
        Ok(_) => redirect_to_panel(category, "Portfolio item created"),
        Err(PortfolioAdminError::Validation(message)) => redirect_to_panel(category, &message),
        Err(err) => HttpError::from(err).into_response(),
    }
}

pub(super) async fn admin_portfolio_update(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Response {
    let draft = match read_portfolio_draft(&state, &mut multipart).await {
        Ok(draft) => draft,
        Err(response) => return *response,
    };
    let category = draft.category;

    match state.portfolio.update(id, draft).await {
        Ok(_) => redirect_to_panel(category, "Portfolio item updated"),
        Err(PortfolioAdminError::Validation(message)) => redirect_to_panel(category, &message),
        Err(err) => HttpError::from(err).into_response(),
    }
}

pub(super) async fn admin_portfolio_delete(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.portfolio.delete(id).await {
        Ok(record) => {
            // Uploaded files live under /media/; embeds have nothing stored.
            if let Some(stored_path) = record.media_url.strip_prefix("/media/")
                && let Err(err) = state.media.delete(stored_path).await
            {
                warn!(
                    target = SOURCE_BASE,
                    item_id = %record.id,
                    error = %err,
                    "failed to remove stored media during delete"
                );
            }
            redirect_to_panel(record.category, "Portfolio item deleted")
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn render_portfolio_page(
    state: &AdminState,
    category: MediaCategory,
    form: admin_views::AdminPortfolioFormView,
    notice: String,
) -> Response {
    let items = match state.portfolio.list_by_category(category).await {
        Ok(items) => items,
        Err(err) => return HttpError::from(err).into_response(),
    };
    let counts = match state.portfolio.counts().await {
        Ok(counts) => counts,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let panel = admin_views::AdminPortfolioPanelView {
        category: category.as_str(),
        items: items.iter().map(item_view).collect(),
    };
    let panel_html = match render_partial(
        "infra::http::admin_portfolio",
        &admin_views::AdminPortfolioPanelTemplate { view: panel },
    ) {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };
    let form_html = match render_partial(
        "infra::http::admin_portfolio",
        &admin_views::AdminPortfolioFormTemplate { view: form },
    ) {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };

    let tabs = MediaCategory::ALL
        .iter()
        .map(|tab| admin_views::AdminCategoryTabView {
            label: tab.label(),
            href: format!("/portfolio?category={}", tab.as_str()),
            active: *tab == category,
            count: counts.get(tab).copied().unwrap_or(0),
        })
        .collect();

    let view = admin_views::AdminLayout::new(
        admin_chrome("/portfolio", "Portfolio"),
        admin_views::AdminPortfolioPageView {
            tabs,
            panel_html,
            form_html,
            notice,
        },
    );
    render_template_response(admin_views::AdminPortfolioTemplate { view }, StatusCode::OK)
}

fn item_view(record: &PortfolioItemRecord) -> admin_views::AdminPortfolioItemView {
    admin_views::AdminPortfolioItemView {
        id: record.id.to_string(),
        title: record.title.clone(),
        kind_label: record.media_kind.label(),
        media_url: record.media_url.clone(),
        thumbnail_url: record.thumbnail_url.clone().unwrap_or_default(),
        edit_href: format!("/portfolio/{}/edit", record.id),
        delete_action: format!("/portfolio/{}/delete", record.id),
    }
}

fn empty_form_view(category: MediaCategory) -> admin_views::AdminPortfolioFormView {
    let media_kind = if category.defaults_to_embed() {
        MediaKind::Embed
    } else {
        MediaKind::Image
    };
    admin_views::AdminPortfolioFormView {
        heading: "New portfolio item".to_string(),
        action: "/portfolio/create".to_string(),
        category: category.as_str(),
        title: String::new(),
        description: String::new(),
        media_kind: media_kind.as_str(),
        reference_url: String::new(),
        current_media: String::new(),
        sort_order: "0".to_string(),
        error: String::new(),
    }
}

fn redirect_to_panel(category: MediaCategory, notice: &str) -> Response {
    let encoded: String = notice
        .chars()
        .map(|c| if c == '&' || c == '#' || c == '?' { ' ' } else { c })
        .collect();
    let location = format!(
        "/portfolio?category={}&notice={}",
        category.as_str(),
        encoded.replace(' ', "+")
    );
    let mut response = StatusCode::SEE_OTHER.into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(LOCATION, value);
    }
    response
}

/// Pull the draft out of a multipart body, streaming an attached file
/// into media storage. Returns a ready response on failure.
async fn read_portfolio_draft(
    state: &AdminState,
    multipart: &mut Multipart,
) -> Result<PortfolioItemDraft, Box<Response>> {
    use futures::StreamExt;

    let mut draft = PortfolioItemDraft::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return Err(Box::new(multipart_error_response(err))),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "category" => {
                let raw = read_text_field(field).await?;
                draft.category = MediaCategory::try_from(raw.as_str()).unwrap_or_default();
            }
            "title" => draft.title = read_text_field(field).await?,
            "description" => draft.description = read_text_field(field).await?,
            "media_kind" => {
                let raw = read_text_field(field).await?;
                draft.media_kind = MediaKind::try_from(raw.as_str()).unwrap_or_default();
            }
            "reference_url" => {
                let raw = read_text_field(field).await?;
                if !raw.trim().is_empty() {
                    draft.reference_url = Some(raw);
                }
            }
            "sort_order" => {
                let raw = read_text_field(field).await?;
                draft.sort_order = raw.trim().parse().unwrap_or(0);
            }
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    // Browsers always post the part; skip it when no file
                    // was chosen.
                    let _ = field.bytes().await;
                    continue;
                }

                let stream = field.map(|result| {
                    result.map_err(|err| {
                        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
                            MediaStorageError::PayloadTooLarge {
                                source: Box::new(err),
                            }
                        } else {
                            MediaStorageError::PayloadStream {
                                source: Box::new(err),
                            }
                        }
                    })
                });

                match state.media.store_stream(draft.category, &filename, stream).await {
                    Ok(stored) => draft.media_url = Some(stored.public_url()),
                    Err(MediaStorageError::EmptyPayload) => {
                        return Err(Box::new(redirect_to_panel(
                            draft.category,
                            "Uploaded file is empty",
                        )));
                    }
                    Err(MediaStorageError::PayloadTooLarge { source }) => {
                        let limit_mib = state.upload_limit_bytes.div_ceil(1_048_576);
                        error!(
                            target = SOURCE_BASE,
                            error = %source,
                            limit_bytes = state.upload_limit_bytes,
                            "upload request exceeded configured body limit"
                        );
                        return Err(Box::new(redirect_to_panel(
                            draft.category,
                            &format!("File is too large (limit is {limit_mib} MiB)"),
                        )));
                    }
                    Err(err) => {
                        error!(
                            target = SOURCE_BASE,
                            error = %err,
                            "failed to persist uploaded media"
                        );
                        return Err(Box::new(redirect_to_panel(
                            draft.category,
                            "Could not store the uploaded file, please retry",
                        )));
                    }
                }
            }
            _ => {
                let _ = field.bytes().await;
            }
        }
    }

    Ok(draft)
}

async fn read_text_field(
    field: axum_extra::extract::multipart::Field,
) -> Result<String, Box<Response>> {
    field
        .text()
        .await
        .map_err(|err| Box::new(multipart_error_response(err)))
}

fn multipart_error_response(err: MultipartError) -> Response {
    HttpError::new(
        "infra::http::admin_portfolio",
        StatusCode::BAD_REQUEST,
        "Invalid upload form data",
        err.to_string(),
    )
    .into_response()
}
