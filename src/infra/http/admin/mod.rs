mod contacts;
mod content;
mod dashboard;
mod health;
mod portfolio;
mod selectors;
mod session;
mod shared;
mod state;
mod toasts;

pub use state::AdminState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::infra::assets;

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState, upload_body_limit: usize) -> Router {
    let protected = Router::new()
        .route("/", get(dashboard::admin_dashboard))
        .route("/content", get(content::admin_content))
        .route("/content/{key}/edit", get(content::admin_content_edit))
        .route("/content/{key}/save", post(content::admin_content_save))
        .route(
            "/content/{key}/rows/add",
            post(content::admin_content_rows_add),
        )
        .route(
            "/content/{key}/rows/remove",
            post(content::admin_content_rows_remove),
        )
        .route(
            "/content/pricing/plan/save",
            post(content::admin_pricing_plan_save),
        )
        .route("/portfolio", get(portfolio::admin_portfolio))
        .route(
            "/portfolio/create",
            post(portfolio::admin_portfolio_create)
                .layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/portfolio/{id}/edit", get(portfolio::admin_portfolio_edit))
        .route(
            "/portfolio/{id}/update",
            post(portfolio::admin_portfolio_update)
                .layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route(
            "/portfolio/{id}/delete",
            post(portfolio::admin_portfolio_delete),
        )
        .route("/contacts", get(contacts::admin_contacts))
        .route("/contacts/{id}/status", post(contacts::admin_contact_status))
        .route("/contacts/{id}/delete", post(contacts::admin_contact_delete))
        .route("/toasts", post(toasts::admin_toast))
        .route("/logout", post(session::admin_logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ));

    let open = Router::new()
        .route(
            "/login",
            get(session::admin_login_page).post(session::admin_login),
        )
        .route("/_health/db", get(health::admin_health))
        .route("/static/admin/{*path}", get(assets::serve_admin));

    protected
        .merge(open)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}
