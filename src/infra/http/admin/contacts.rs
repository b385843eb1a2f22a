//! Admin contact-inbox handlers. Status changes and deletes round-trip
//! through Datastar and patch the panel in place.

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::admin::contacts::ContactsAdminError;
use crate::application::error::HttpError;
use crate::application::stream::StreamBuilder;
use crate::domain::entities::ContactSubmissionRecord;
use crate::domain::types::SubmissionStatus;
use crate::presentation::{
    admin::views as admin_views,
    admin::views::admin_chrome,
    views::render_template_response,
};

use super::AdminState;
use super::selectors::CONTACTS_PANEL;
use super::shared::{Toast, push_toasts, render_partial};

pub(super) async fn admin_contacts(State(state): State<AdminState>) -> Response {
    let panel_html = match render_panel(&state).await {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };
    let new_count = match state.contacts.new_count().await {
        Ok(count) => count,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let view = admin_views::AdminLayout::new(
        admin_chrome("/contacts", "Contacts"),
        admin_views::AdminContactsPageView {
            panel_html,
            new_count,
        },
    );
    render_template_response(admin_views::AdminContactsTemplate { view }, StatusCode::OK)
}

#[derive(Debug, Deserialize)]
pub(super) struct StatusForm {
    status: String,
}

pub(super) async fn admin_contact_status(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    Form(form): Form<StatusForm>,
) -> Response {
    let status = match SubmissionStatus::try_from(form.status.as_str()) {
        Ok(status) => status,
        Err(_) => {
            return HttpError::new(
                "infra::http::admin_contact_status",
                StatusCode::BAD_REQUEST,
                "Invalid status",
                format!("unsupported submission status `{}`", form.status),
            )
            .into_response();
        }
    };

    match state.contacts.set_status(id, status).await {
        Ok(record) => {
            respond_with_panel(
                &state,
                &[Toast::success(format!(
                    "Marked `{}` as {}",
                    record.name,
                    status.label()
                ))],
            )
            .await
        }
        Err(ContactsAdminError::NotFound) => {
            respond_with_panel(&state, &[Toast::error("Submission no longer exists")]).await
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

pub(super) async fn admin_contact_delete(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.contacts.delete(id).await {
        Ok(()) => respond_with_panel(&state, &[Toast::success("Submission deleted")]).await,
        Err(ContactsAdminError::NotFound) => {
            respond_with_panel(&state, &[Toast::error("Submission no longer exists")]).await
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn respond_with_panel(state: &AdminState, toasts: &[Toast]) -> Response {
    let html = match render_panel(state).await {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };

    let mut stream = StreamBuilder::new();
    stream.push_patch(html, CONTACTS_PANEL, datastar::prelude::ElementPatchMode::Replace);
    if let Err(err) = push_toasts(&mut stream, toasts) {
        return err.into_response();
    }
    stream.into_response()
}

async fn render_panel(state: &AdminState) -> Result<String, HttpError> {
    let records = state.contacts.list().await?;
    let rows = records.iter().map(row_view).collect();
    render_partial(
        "infra::http::admin_contacts",
        &admin_views::AdminContactsPanelTemplate {
            view: admin_views::AdminContactsPanelView { rows },
        },
    )
}

fn row_view(record: &ContactSubmissionRecord) -> admin_views::AdminContactRowView {
    admin_views::AdminContactRowView {
        id: record.id.to_string(),
        name: record.name.clone(),
        email: record.email.clone().unwrap_or_default(),
        phone: record.phone.clone().unwrap_or_default(),
        project: record.project.clone().unwrap_or_default(),
        service: record.service.clone(),
        description: record.description.clone(),
        status: record.status.as_str(),
        status_label: record.status.label(),
        received: record
            .created_at
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        status_action: format!("/contacts/{}/status", record.id),
        delete_action: format!("/contacts/{}/delete", record.id),
    }
}
