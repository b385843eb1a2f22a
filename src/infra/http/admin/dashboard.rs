use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::error::HttpError;
use crate::domain::types::MediaCategory;
use crate::presentation::{
    admin::views as admin_views,
    admin::views::admin_chrome,
    views::render_template_response,
};

use super::AdminState;

pub(super) async fn admin_dashboard(State(state): State<AdminState>) -> Response {
    let counts = match state.portfolio.counts().await {
        Ok(counts) => counts,
        Err(err) => return HttpError::from(err).into_response(),
    };
    let new_contacts = match state.contacts.new_count().await {
        Ok(count) => count,
        Err(err) => return HttpError::from(err).into_response(),
    };
    let sections = match state.content.list_sections().await {
        Ok(sections) => sections,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let portfolio_metrics = MediaCategory::ALL
        .iter()
        .map(|category| admin_views::AdminMetricView {
            label: category.label().to_string(),
            value: counts.get(category).copied().unwrap_or(0),
        })
        .collect();

    let content = admin_views::AdminDashboardView {
        portfolio_metrics,
        new_contacts,
        customized_sections: sections.iter().filter(|s| s.customized).count(),
        total_sections: sections.len(),
    };

    let view = admin_views::AdminLayout::new(admin_chrome("/", "Dashboard"), content);
    render_template_response(admin_views::AdminDashboardTemplate { view }, StatusCode::OK)
}
