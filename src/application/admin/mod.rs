pub mod contacts;
pub mod content;
pub mod portfolio;
