pub mod admin;
pub mod auth;
pub mod content_cache;
pub mod error;
pub mod inquiries;
pub mod repos;
pub mod site;
pub mod stream;
