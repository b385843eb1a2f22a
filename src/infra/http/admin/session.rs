use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::application::auth::SESSION_COOKIE;
use crate::application::error::ErrorReport;
use crate::presentation::admin::views as admin_views;
use crate::presentation::views::render_template_response;

use super::AdminState;

/// Gate for every admin route except the login pair. Browsers get sent
/// to the login form; non-GET requests get a bare 401.
pub(super) async fn require_session(
    State(state): State<AdminState>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Response {
    let authenticated = jar
        .get(SESSION_COOKIE)
        .map(|cookie| state.auth.validate_session(cookie.value()))
        .unwrap_or(false);

    if authenticated {
        return next.run(request).await;
    }

    if request.method() == Method::GET {
        Redirect::to("/login").into_response()
    } else {
        let mut response = StatusCode::UNAUTHORIZED.into_response();
        ErrorReport::from_message(
            "infra::http::admin::require_session",
            StatusCode::UNAUTHORIZED,
            "Missing or expired admin session",
        )
        .attach(&mut response);
        response
    }
}

pub(super) async fn admin_login_page(State(state): State<AdminState>, jar: CookieJar) -> Response {
    let already_authed = jar
        .get(SESSION_COOKIE)
        .map(|cookie| state.auth.validate_session(cookie.value()))
        .unwrap_or(false);
    if already_authed {
        return Redirect::to("/").into_response();
    }

    render_template_response(
        admin_views::AdminLoginTemplate {
            error: String::new(),
        },
        StatusCode::OK,
    )
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginForm {
    username: String,
    password: String,
}

pub(super) async fn admin_login(
    State(state): State<AdminState>,
    jar: CookieJar,
    axum::extract::Form(form): axum::extract::Form<LoginForm>,
) -> Response {
    match state.auth.login(&form.username, &form.password) {
        Some(token) => {
            let cookie = Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();
            (jar.add(cookie), Redirect::to("/")).into_response()
        }
        None => {
            let mut response = render_template_response(
                admin_views::AdminLoginTemplate {
                    error: "Invalid username or password.".to_string(),
                },
                StatusCode::UNAUTHORIZED,
            );
            ErrorReport::from_message(
                "infra::http::admin::admin_login",
                StatusCode::UNAUTHORIZED,
                "Admin login rejected",
            )
            .attach(&mut response);
            response
        }
    }
}

pub(super) async fn admin_logout(State(state): State<AdminState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.auth.logout(cookie.value());
    }
    let jar = jar.remove(Cookie::from(SESSION_COOKIE));
    (jar, Redirect::to("/login")).into_response()
}
