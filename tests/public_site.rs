use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use kadro::application::content_cache::ContentCache;
use kadro::application::inquiries::InquiryService;
use kadro::application::repos::{
    ContactRepo, ContentRepo, CreatePortfolioItemParams, NewSubmissionParams, PortfolioRepo,
    RepoError, UpdatePortfolioItemParams, UpsertSectionParams,
};
use kadro::application::site::SiteContentService;
use kadro::domain::entities::{ContactSubmissionRecord, PortfolioItemRecord, SiteContentRecord};
use kadro::domain::types::{MediaCategory, MediaKind, SubmissionStatus};
use kadro::infra::db::PostgresRepositories;
use kadro::infra::http::{HttpState, build_router};
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

struct FixedPortfolioRepo {
    items: Vec<PortfolioItemRecord>,
}

#[async_trait]
impl PortfolioRepo for FixedPortfolioRepo {
    async fn list_items(&self) -> Result<Vec<PortfolioItemRecord>, RepoError> {
        Ok(self.items.clone())
    }

    async fn list_by_category(
        &self,
        category: MediaCategory,
    ) -> Result<Vec<PortfolioItemRecord>, RepoError> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect())
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<PortfolioItemRecord>, RepoError> {
        Ok(self.items.iter().find(|item| item.id == id).cloned())
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
        unimplemented!("not exercised")
    }

    async fn count_by_category(&self) -> Result<Vec<(MediaCategory, i64)>, RepoError> {
        Ok(MediaCategory::ALL
            .iter()
            .map(|category| {
                let count = self
                    .items
                    .iter()
                    .filter(|item| item.category == *category)
                    .count() as i64;
                (*category, count)
            })
            .collect())
    }
}

#[derive(Default)]
struct RecordingContactRepo {
    submissions: Mutex<Vec<ContactSubmissionRecord>>,
}

#[async_trait]
impl ContactRepo for RecordingContactRepo {
    async fn insert_submission(
        &self,
        params: NewSubmissionParams,
    ) -> Result<ContactSubmissionRecord, RepoError> {
        let record = ContactSubmissionRecord {
            id: Uuid::new_v4(),
            name: params.name,
            email: params.email,
            phone: params.phone,
            project: params.project,
            service: params.service,
            description: params.description,
            status: SubmissionStatus::New,
            created_at: OffsetDateTime::now_utc(),
        };
        self.submissions.lock().await.push(record.clone());
        Ok(record)
    }

    async fn list_submissions(&self) -> Result<Vec<ContactSubmissionRecord>, RepoError> {
        Ok(self.submissions.lock().await.clone())
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

    async fn count_with_status(&self, status: SubmissionStatus) -> Result<i64, RepoError> {
        Ok(self
            .submissions
            .lock()
            .await
            .iter()
            .filter(|record| record.status == status)
            .count() as i64)
    }
}

fn portfolio_item(category: MediaCategory, title: &str) -> PortfolioItemRecord {
    PortfolioItemRecord {
        id: Uuid::new_v4(),
        category,
        title: title.to_string(),
        description: Some("A sample deliverable".to_string()),
        media_url: "/media/logos/sample.png".to_string(),
        media_kind: MediaKind::Image,
        embed_url: None,
        thumbnail_url: None,
        sort_order: 0,
        created_at: OffsetDateTime::now_utc(),
        updated_at: OffsetDateTime::now_utc(),
    }
}

async fn build_public_router(contacts: Arc<RecordingContactRepo>) -> Router {
    let content: Arc<dyn ContentRepo> = Arc::new(EmptyContentRepo);
    let cache = ContentCache::new(content);
    cache.load_all().await.unwrap();

    let portfolio: Arc<dyn PortfolioRepo> = Arc::new(FixedPortfolioRepo {
        items: vec![
            portfolio_item(MediaCategory::Logos, "Northlight logo"),
            portfolio_item(MediaCategory::Posters, "Festival poster"),
        ],
    });

    let media_dir = tempfile::tempdir().unwrap();
    let media = Arc::new(MediaStorage::new(media_dir.keep()).unwrap());

    // Lazy pool so the state can be built without a running database.
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://kadro@localhost/kadro_test")
        .unwrap();

    build_router(HttpState {
        site: Arc::new(SiteContentService::new(cache)),
        inquiries: Arc::new(InquiryService::new(contacts)),
        portfolio,
        media,
        db: Arc::new(PostgresRepositories::new(pool)),
    })
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn index_renders_default_content_without_a_database() {
    let router = build_public_router(Arc::new(RecordingContactRepo::default())).await;

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Video editing"));
    assert!(body.contains("Start a project"));
    assert!(body.contains("name=\"service\""));
}

#[tokio::test]
async fn work_page_lists_items_for_the_requested_category() {
    let router = build_public_router(Arc::new(RecordingContactRepo::default())).await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/work/logos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Northlight logo"));
    assert!(!body.contains("Festival poster"));
}

#[tokio::test]
async fn unknown_work_category_is_not_found() {
    let router = build_public_router(Arc::new(RecordingContactRepo::default())).await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/work/watercolors")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stylesheet_is_served_from_the_embedded_bundle() {
    let router = build_public_router(Arc::new(RecordingContactRepo::default())).await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/static/site.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_path_falls_back_to_not_found_page() {
    let router = build_public_router(Arc::new(RecordingContactRepo::default())).await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/definitely-not-a-page")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("Page not found"));
}

#[tokio::test]
async fn valid_contact_submission_redirects_with_sent_notice() {
    let contacts = Arc::new(RecordingContactRepo::default());
    let router = build_public_router(contacts.clone()).await;

    let form = "name=Mara&email=mara%40example.com&phone=&project=&service=short-form\
                &description=Weekly+shorts+for+our+channel";
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/contact")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert_eq!(location, "/?notice=sent#contact");

    let stored = contacts.submissions.lock().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email.as_deref(), Some("mara@example.com"));
    assert_eq!(stored[0].phone, None);
}

#[tokio::test]
async fn contact_submission_without_reachable_detail_is_rejected() {
    let contacts = Arc::new(RecordingContactRepo::default());
    let router = build_public_router(contacts.clone()).await;

    let form = "name=Mara&email=&phone=&project=&service=short-form&description=Some+project";
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/contact")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert_eq!(location, "/?notice=missing-contact#contact");
    assert!(contacts.submissions.lock().await.is_empty());
}
