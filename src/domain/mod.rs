pub mod content;
pub mod entities;
pub mod error;
pub mod sections;
pub mod types;
pub mod video;
