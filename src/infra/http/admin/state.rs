use std::sync::Arc;

use crate::application::admin::{
    contacts::ContactsAdminService, content::ContentAdminService, portfolio::PortfolioAdminService,
};
use crate::application::auth::AdminAuthService;
use crate::infra::{db::PostgresRepositories, media::MediaStorage};

#[derive(Clone)]
pub struct AdminState {
    pub db: Arc<PostgresRepositories>,
    pub auth: Arc<AdminAuthService>,
    pub content: Arc<ContentAdminService>,
    pub portfolio: Arc<PortfolioAdminService>,
    pub contacts: Arc<ContactsAdminService>,
    pub media: Arc<MediaStorage>,
    pub upload_limit_bytes: u64,
}
