//! The section schema table.
//!
//! Every editable site section has a key, a human label, and a schema
//! describing the shape of its structured `content` payload. Both the
//! public renderers and the admin editor consult the same table, so a
//! section renders with exactly the fields the editor writes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Hero,
    Services,
    Features,
    Faq,
    Process,
    Pricing,
    Testimonials,
    FeaturedVideo,
    AiVideos,
    Contact,
    Footer,
}

impl SectionKey {
    pub const ALL: [SectionKey; 11] = [
        SectionKey::Hero,
        SectionKey::Services,
        SectionKey::Features,
        SectionKey::Faq,
        SectionKey::Process,
        SectionKey::Pricing,
        SectionKey::Testimonials,
        SectionKey::FeaturedVideo,
        SectionKey::AiVideos,
        SectionKey::Contact,
        SectionKey::Footer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Hero => "hero",
            SectionKey::Services => "services",
            SectionKey::Features => "features",
            SectionKey::Faq => "faq",
            SectionKey::Process => "process",
            SectionKey::Pricing => "pricing",
            SectionKey::Testimonials => "testimonials",
            SectionKey::FeaturedVideo => "featured_video",
            SectionKey::AiVideos => "ai_videos",
            SectionKey::Contact => "contact",
            SectionKey::Footer => "footer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionKey::Hero => "Hero",
            SectionKey::Services => "Services",
            SectionKey::Features => "Why Choose Us",
            SectionKey::Faq => "FAQ",
            SectionKey::Process => "Process",
            SectionKey::Pricing => "Pricing",
            SectionKey::Testimonials => "Testimonials",
            SectionKey::FeaturedVideo => "Featured Video",
            SectionKey::AiVideos => "AI Videos",
            SectionKey::Contact => "Contact",
            SectionKey::Footer => "Footer",
        }
    }

    /// Structured-content schema for this section, if it has one.
    /// `Footer` carries only the plain title/subtitle/description fields.
    pub fn schema(self) -> Option<&'static SectionSchema> {
        match self {
            SectionKey::Hero => Some(&HERO_SCHEMA),
            SectionKey::Services => Some(&SERVICES_SCHEMA),
            SectionKey::Features => Some(&FEATURES_SCHEMA),
            SectionKey::Faq => Some(&FAQ_SCHEMA),
            SectionKey::Process => Some(&PROCESS_SCHEMA),
            SectionKey::Pricing => Some(&PRICING_SCHEMA),
            SectionKey::Testimonials => Some(&TESTIMONIALS_SCHEMA),
            SectionKey::FeaturedVideo => Some(&FEATURED_VIDEO_SCHEMA),
            SectionKey::AiVideos => Some(&AI_VIDEOS_SCHEMA),
            SectionKey::Contact => Some(&CONTACT_SCHEMA),
            SectionKey::Footer => None,
        }
    }
}

impl TryFrom<&str> for SectionKey {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "hero" => Ok(SectionKey::Hero),
            "services" => Ok(SectionKey::Services),
            "features" => Ok(SectionKey::Features),
            "faq" => Ok(SectionKey::Faq),
            "process" => Ok(SectionKey::Process),
            "pricing" => Ok(SectionKey::Pricing),
            "testimonials" => Ok(SectionKey::Testimonials),
            "featured_video" => Ok(SectionKey::FeaturedVideo),
            "ai_videos" => Ok(SectionKey::AiVideos),
            "contact" => Ok(SectionKey::Contact),
            "footer" => Ok(SectionKey::Footer),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// Comma-separated list rendered as one input, stored as a JSON array.
    TagList,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn text(key: &'static str, label: &'static str) -> Self {
        FieldSpec {
            key,
            label,
            kind: FieldKind::Text,
        }
    }

    const fn multiline(key: &'static str, label: &'static str) -> Self {
        FieldSpec {
            key,
            label,
            kind: FieldKind::Multiline,
        }
    }

    const fn tags(key: &'static str, label: &'static str) -> Self {
        FieldSpec {
            key,
            label,
            kind: FieldKind::TagList,
        }
    }
}

/// How a section's structured content is shaped and edited.
#[derive(Debug, Clone, Copy)]
pub enum SectionSchema {
    /// A homogeneous sequence of items, each with the listed fields,
    /// stored as a JSON array under `content_key`.
    List {
        content_key: &'static str,
        item_label: &'static str,
        fields: &'static [FieldSpec],
    },
    /// The fixed audience x tier plan tree, stored under `content_key`.
    Pricing { content_key: &'static str },
    /// A single object with the listed fields under `content_key`.
    Simple {
        content_key: &'static str,
        fields: &'static [FieldSpec],
    },
}

impl SectionSchema {
    pub fn content_key(&self) -> &'static str {
        match self {
            SectionSchema::List { content_key, .. } => content_key,
            SectionSchema::Pricing { content_key } => content_key,
            SectionSchema::Simple { content_key, .. } => content_key,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, SectionSchema::List { .. })
    }
}

static HERO_SCHEMA: SectionSchema = SectionSchema::Simple {
    content_key: "hero",
    fields: &[
        FieldSpec::text("badge", "Badge text"),
        FieldSpec::text("heading_line1", "Heading line 1"),
        FieldSpec::text("heading_highlight", "Highlighted text"),
        FieldSpec::text("heading_line2", "Heading line 2"),
        FieldSpec::text("cta_primary", "Primary CTA text"),
        FieldSpec::text("cta_secondary", "Secondary CTA text"),
    ],
};

static SERVICES_SCHEMA: SectionSchema = SectionSchema::List {
    content_key: "services",
    item_label: "service",
    fields: &[
        FieldSpec::text("title", "Title"),
        FieldSpec::multiline("description", "Description"),
        FieldSpec::tags("features", "Features (comma separated)"),
    ],
};

static FEATURES_SCHEMA: SectionSchema = SectionSchema::List {
    content_key: "features",
    item_label: "feature",
    fields: &[
        FieldSpec::text("title", "Title"),
        FieldSpec::multiline("description", "Description"),
    ],
};

static FAQ_SCHEMA: SectionSchema = SectionSchema::List {
    content_key: "faqs",
    item_label: "question",
    fields: &[
        FieldSpec::text("question", "Question"),
        FieldSpec::multiline("answer", "Answer"),
    ],
};

static PROCESS_SCHEMA: SectionSchema = SectionSchema::List {
    content_key: "steps",
    item_label: "step",
    fields: &[
        FieldSpec::text("number", "Step number"),
        FieldSpec::text("title", "Title"),
        FieldSpec::multiline("description", "Description"),
    ],
};

static PRICING_SCHEMA: SectionSchema = SectionSchema::Pricing {
    content_key: "pricing",
};

static TESTIMONIALS_SCHEMA: SectionSchema = SectionSchema::List {
    content_key: "testimonials",
    item_label: "testimonial",
    fields: &[
        FieldSpec::text("client_name", "Client name"),
        FieldSpec::text("client_role", "Client role"),
        FieldSpec::text("client_avatar", "Avatar URL"),
        FieldSpec::text("rating", "Rating (1-5)"),
        FieldSpec::multiline("review", "Review"),
    ],
};

static FEATURED_VIDEO_SCHEMA: SectionSchema = SectionSchema::Simple {
    content_key: "featured_video",
    fields: &[FieldSpec::text("youtube_url", "YouTube URL")],
};

static AI_VIDEOS_SCHEMA: SectionSchema = SectionSchema::Simple {
    content_key: "ai_videos",
    fields: &[FieldSpec::text("display_size", "Display size (reel or video)")],
};

static CONTACT_SCHEMA: SectionSchema = SectionSchema::List {
    content_key: "service_options",
    item_label: "service option",
    fields: &[
        FieldSpec::text("value", "Value"),
        FieldSpec::text("label", "Label"),
    ],
};
