//! Shared domain enumerations aligned with persisted database enums.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "media_category", rename_all = "lowercase")]
pub enum MediaCategory {
    #[default]
    Logos,
    Posters,
    Shorts,
    LongVideos,
    AiVideos,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 5] = [
        MediaCategory::Logos,
        MediaCategory::Posters,
        MediaCategory::Shorts,
        MediaCategory::LongVideos,
        MediaCategory::AiVideos,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MediaCategory::Logos => "logos",
            MediaCategory::Posters => "posters",
            MediaCategory::Shorts => "shorts",
            MediaCategory::LongVideos => "longvideos",
            MediaCategory::AiVideos => "aivideos",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaCategory::Logos => "Logos",
            MediaCategory::Posters => "Posters",
            MediaCategory::Shorts => "Shorts",
            MediaCategory::LongVideos => "Long Videos",
            MediaCategory::AiVideos => "AI Videos",
        }
    }

    /// Motion categories default to an embedded external reference.
    pub fn defaults_to_embed(self) -> bool {
        matches!(
            self,
            MediaCategory::Shorts | MediaCategory::LongVideos | MediaCategory::AiVideos
        )
    }
}

impl TryFrom<&str> for MediaCategory {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "logos" => Ok(MediaCategory::Logos),
            "posters" => Ok(MediaCategory::Posters),
            "shorts" => Ok(MediaCategory::Shorts),
            "longvideos" => Ok(MediaCategory::LongVideos),
            "aivideos" => Ok(MediaCategory::AiVideos),
            other => Err(DomainError::validation(
                "category",
                format!("unrecognized category `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
    Embed,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Embed => "embed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
            MediaKind::Embed => "Embedded",
        }
    }
}

impl TryFrom<&str> for MediaKind {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            "embed" => Ok(MediaKind::Embed),
            other => Err(DomainError::validation(
                "media_kind",
                format!("unrecognized media kind `{other}`"),
            )),
        }
    }
}

/// Triage state of a contact submission (mirrors Postgres enum `submission_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "submission_status", rename_all = "lowercase")]
pub enum SubmissionStatus {
    New,
    Pending,
    Replied,
    Archived,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::New,
        SubmissionStatus::Pending,
        SubmissionStatus::Replied,
        SubmissionStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Replied => "replied",
            SubmissionStatus::Archived => "archived",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubmissionStatus::New => "New",
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::Replied => "Replied",
            SubmissionStatus::Archived => "Archived",
        }
    }
}

impl TryFrom<&str> for SubmissionStatus {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "new" => Ok(SubmissionStatus::New),
            "pending" => Ok(SubmissionStatus::Pending),
            "replied" => Ok(SubmissionStatus::Replied),
            "archived" => Ok(SubmissionStatus::Archived),
            other => Err(DomainError::validation(
                "status",
                format!("unrecognized status `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingAudience {
    Creators,
    Agencies,
}

impl PricingAudience {
    pub const ALL: [PricingAudience; 2] = [PricingAudience::Creators, PricingAudience::Agencies];

    pub fn as_str(self) -> &'static str {
        match self {
            PricingAudience::Creators => "creators",
            PricingAudience::Agencies => "agencies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PricingAudience::Creators => "For Creators",
            PricingAudience::Agencies => "For Agencies",
        }
    }
}

impl TryFrom<&str> for PricingAudience {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "creators" => Ok(PricingAudience::Creators),
            "agencies" => Ok(PricingAudience::Agencies),
            other => Err(DomainError::validation(
                "audience",
                format!("unrecognized audience `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    Basic,
    Standard,
    Premium,
}

impl PricingTier {
    pub const ALL: [PricingTier; 3] = [
        PricingTier::Basic,
        PricingTier::Standard,
        PricingTier::Premium,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PricingTier::Basic => "basic",
            PricingTier::Standard => "standard",
            PricingTier::Premium => "premium",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PricingTier::Basic => "Basic",
            PricingTier::Standard => "Standard",
            PricingTier::Premium => "Premium",
        }
    }
}

impl TryFrom<&str> for PricingTier {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "basic" => Ok(PricingTier::Basic),
            "standard" => Ok(PricingTier::Standard),
            "premium" => Ok(PricingTier::Premium),
            other => Err(DomainError::validation(
                "tier",
                format!("unrecognized tier `{other}`"),
            )),
        }
    }
}
