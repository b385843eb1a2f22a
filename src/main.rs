use std::{process, sync::Arc};

use clap::Parser;
use kadro::{
    application::{
        admin::{
            contacts::ContactsAdminService, content::ContentAdminService,
            portfolio::PortfolioAdminService,
        },
        auth::{AdminAuthService, password_digest},
        content_cache::ContentCache,
        error::AppError,
        inquiries::InquiryService,
        repos::{AuditRepo, ContactRepo, ContentRepo, PortfolioRepo},
        site::SiteContentService,
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState, HttpState},
        media::MediaStorage,
        telemetry,
    },
};
use tokio::try_join;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let cli = config::CliArgs::parse();
    let command = cli
        .command
        .clone()
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    // Hashing a password needs no settings and must work before any exist.
    if let config::Command::HashPassword(args) = &command {
        println!("{}", password_digest(&args.password));
        return Ok(());
    }

    let settings = config::load(&cli)
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    run_serve(settings).await
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let database_url = settings
        .database
        .url
        .clone()
        .ok_or_else(|| AppError::from(InfraError::configuration("database.url must be set")))?;

    let pool =
        PostgresRepositories::connect(&database_url, settings.database.max_connections.get())
            .await
            .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;
    let repositories = Arc::new(PostgresRepositories::new(pool));

    let media = Arc::new(
        MediaStorage::new(settings.media.directory.clone())
            .map_err(|err| AppError::from(InfraError::from(err)))?,
    );

    let content_repo: Arc<dyn ContentRepo> = repositories.clone();
    let portfolio_repo: Arc<dyn PortfolioRepo> = repositories.clone();
    let contact_repo: Arc<dyn ContactRepo> = repositories.clone();
    let audit_repo: Arc<dyn AuditRepo> = repositories.clone();

    let cache = ContentCache::new(content_repo.clone());
    if let Err(err) = cache.load_all().await {
        warn!(
            target = "kadro::startup",
            error = %err,
            "initial content load failed, serving defaults until the database recovers"
        );
    }

    let site = Arc::new(SiteContentService::new(cache.clone()));
    let inquiries = Arc::new(InquiryService::new(contact_repo.clone()));

    let session_ttl = time::Duration::seconds(settings.auth.session_ttl.as_secs() as i64);
    let auth = Arc::new(AdminAuthService::new(
        settings.auth.username.clone(),
        &settings.auth.password_sha256,
        session_ttl,
    ));

    let actor = settings.auth.username.clone();
    let content_admin = Arc::new(ContentAdminService::new(
        content_repo,
        audit_repo.clone(),
        cache.clone(),
        actor.clone(),
    ));
    let portfolio_admin = Arc::new(PortfolioAdminService::new(
        portfolio_repo.clone(),
        audit_repo.clone(),
        actor.clone(),
    ));
    let contacts_admin = Arc::new(ContactsAdminService::new(contact_repo, audit_repo, actor));

    let http_state = HttpState {
        site,
        inquiries,
        portfolio: portfolio_repo,
        media: media.clone(),
        db: repositories.clone(),
    };
    let admin_state = AdminState {
        db: repositories,
        auth,
        content: content_admin,
        portfolio: portfolio_admin,
        contacts: contacts_admin,
        media,
        upload_limit_bytes: settings.media.max_request_bytes.get(),
    };

    serve_http(&settings, http_state, admin_state).await
}

async fn serve_http(
    settings: &config::Settings,
    http_state: HttpState,
    admin_state: AdminState,
) -> Result<(), AppError> {
    let public_router = http::build_router(http_state);
    let upload_body_limit = settings.media.max_request_bytes.get() as usize;
    let admin_router = http::build_admin_router(admin_state, upload_body_limit);

    let public_listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let admin_listener = tokio::net::TcpListener::bind(settings.server.admin_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "kadro::startup",
        public_addr = %settings.server.public_addr,
        admin_addr = %settings.server.admin_addr,
        "listening"
    );

    let public_server = axum::serve(public_listener, public_router.into_make_service());
    let admin_server = axum::serve(admin_listener, admin_router.into_make_service());

    try_join!(public_server, admin_server)
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}
