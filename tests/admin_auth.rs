use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use sqlx::postgres::PgPoolOptions;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

use kadro::application::admin::{
    contacts::ContactsAdminService, content::ContentAdminService, portfolio::PortfolioAdminService,
};
use kadro::application::auth::{AdminAuthService, password_digest};
use kadro::application::content_cache::ContentCache;
use kadro::application::repos::{
    AuditEntry, AuditRepo, ContactRepo, ContentRepo, CreatePortfolioItemParams,
    NewSubmissionParams, PortfolioRepo, RepoError, UpdatePortfolioItemParams, UpsertSectionParams,
};
use kadro::domain::entities::{
    AuditLogRecord, ContactSubmissionRecord, PortfolioItemRecord, SiteContentRecord,
};
use kadro::domain::types::{MediaCategory, SubmissionStatus};
use kadro::infra::db::PostgresRepositories;
use kadro::infra::http::{AdminState, build_admin_router};
use kadro::infra::media::MediaStorage;

struct EmptyContentRepo;

#[async_trait]
impl ContentRepo for EmptyContentRepo {
    async fn list_sections(&self) -> Result<Vec<SiteContentRecord>, RepoError> {
        Ok(Vec::new())
    }

    async fn find_section(&self, _key: &str) -> Result<Option<SiteContentRecord>, RepoError> {
        Ok(None)
    }

    async fn upsert_section(
        &self,
        _params: UpsertSectionParams,
    ) -> Result<SiteContentRecord, RepoError> {
        unimplemented!("not exercised")
    }
}

struct EmptyPortfolioRepo;

#[async_trait]
impl PortfolioRepo for EmptyPortfolioRepo {
    async fn list_items(&self) -> Result<Vec<PortfolioItemRecord>, RepoError> {
        Ok(Vec::new())
    }

    async fn list_by_category(
        &self,
        _category: MediaCategory,
    ) -> Result<Vec<PortfolioItemRecord>, RepoError> {
        Ok(Vec::new())
    }

    async fn find_item(&self, _id: Uuid) -> Result<Option<PortfolioItemRecord>, RepoError> {
        Ok(None)
    }

    async fn create_item(
        &self,
        _params: CreatePortfolioItemParams,
    ) -> Result<PortfolioItemRecord, RepoError> {
        unimplemented!("not exercised")
    }

    async fn update_item(
        &self,
        _params: UpdatePortfolioItemParams,
    ) -> Result<PortfolioItemRecord, RepoError> {
        unimplemented!("not exercised")
    }

    async fn delete_item(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(RepoError::NotFound)
    }

    async fn count_by_category(&self) -> Result<Vec<(MediaCategory, i64)>, RepoError> {
        Ok(MediaCategory::ALL
            .iter()
            .map(|category| (*category, 0))
            .collect())
    }
}

struct EmptyContactRepo;

#[async_trait]
impl ContactRepo for EmptyContactRepo {
    async fn insert_submission(
        &self,
        _params: NewSubmissionParams,
    ) -> Result<ContactSubmissionRecord, RepoError> {
        unimplemented!("not exercised")
    }

    async fn list_submissions(&self) -> Result<Vec<ContactSubmissionRecord>, RepoError> {
        Ok(Vec::new())
    }

    async fn find_submission(
        &self,
        _id: Uuid,
    ) -> Result<Option<ContactSubmissionRecord>, RepoError> {
        Ok(None)
    }

    async fn set_status(
        &self,
        _id: Uuid,
        _status: SubmissionStatus,
    ) -> Result<ContactSubmissionRecord, RepoError> {
        Err(RepoError::NotFound)
    }

    async fn delete_submission(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(RepoError::NotFound)
    }

    async fn count_with_status(&self, _status: SubmissionStatus) -> Result<i64, RepoError> {
        Ok(0)
    }
}

struct DiscardAuditRepo;

#[async_trait]
impl AuditRepo for DiscardAuditRepo {
    async fn append(&self, _entry: AuditEntry) -> Result<(), RepoError> {
        Ok(())
    }

    async fn recent(&self, _limit: i64) -> Result<Vec<AuditLogRecord>, RepoError> {
        Ok(Vec::new())
    }
}

async fn build_admin(password: &str) -> Router {
    let content: Arc<dyn ContentRepo> = Arc::new(EmptyContentRepo);
    let portfolio: Arc<dyn PortfolioRepo> = Arc::new(EmptyPortfolioRepo);
    let contacts: Arc<dyn ContactRepo> = Arc::new(EmptyContactRepo);
    let audit: Arc<dyn AuditRepo> = Arc::new(DiscardAuditRepo);

    let cache = ContentCache::new(content.clone());
    cache.load_all().await.unwrap();

    let auth = Arc::new(AdminAuthService::new(
        "admin".to_string(),
        &password_digest(password),
        time::Duration::hours(1),
    ));

    let media_dir = tempfile::tempdir().unwrap();
    let media = Arc::new(MediaStorage::new(media_dir.keep()).unwrap());

    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://kadro@localhost/kadro_test")
        .unwrap();

    let actor = "admin".to_string();
    let state = AdminState {
        db: Arc::new(PostgresRepositories::new(pool)),
        auth,
        content: Arc::new(ContentAdminService::new(
            content,
            audit.clone(),
            cache,
            actor.clone(),
        )),
        portfolio: Arc::new(PortfolioAdminService::new(
            portfolio,
            audit.clone(),
            actor.clone(),
        )),
        contacts: Arc::new(ContactsAdminService::new(contacts, audit, actor)),
        media,
        upload_limit_bytes: 1024 * 1024,
    };

    build_admin_router(state, 1024 * 1024)
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn unauthenticated_page_requests_redirect_to_login() {
    let router = build_admin("correct horse").await;

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn unauthenticated_mutations_are_unauthorized() {
    let router = build_admin("correct horse").await;

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/toasts")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("kind=success&message=hi"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_page_is_reachable_without_a_session() {
    let router = build_admin("correct horse").await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let router = build_admin("correct horse").await;

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=admin&password=battery+staple"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn successful_login_opens_the_dashboard() {
    let router = build_admin("correct horse").await;

    let login = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=admin&password=correct+horse"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(login.status(), StatusCode::SEE_OTHER);
    assert_eq!(login.headers()[header::LOCATION], "/");
    let cookie = session_cookie(&login);
    assert!(cookie.starts_with("kadro_admin_session="));

    let dashboard = router
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(dashboard.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let router = build_admin("correct horse").await;

    let login = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=admin&password=correct+horse"))
                .unwrap(),
        )
        .await
        .unwrap();
    let cookie = session_cookie(&login);

    let logout = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::SEE_OTHER);

    let after = router
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::SEE_OTHER);
    assert_eq!(after.headers()[header::LOCATION], "/login");
}
