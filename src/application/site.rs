//! Public site content assembly.
//!
//! Every landing-page section resolves through the content cache with a
//! compiled-in default, so the site renders fully before the first
//! database load and whenever a section row is missing a field.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::{Value, json};

use crate::application::content_cache::ContentCache;
use crate::domain::content::{ResolvedSection, SectionDefaults};
use crate::domain::sections::SectionKey;
use crate::domain::types::{PricingAudience, PricingTier};
use crate::domain::video;

#[derive(Debug, Clone)]
pub struct SectionHeading {
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

impl From<&ResolvedSection> for SectionHeading {
    fn from(resolved: &ResolvedSection) -> Self {
        Self {
            title: resolved.title.clone(),
            subtitle: resolved.subtitle.clone(),
            description: resolved.description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeroView {
    pub heading: SectionHeading,
    pub badge: String,
    pub heading_line1: String,
    pub heading_highlight: String,
    pub heading_line2: String,
    pub cta_primary: String,
    pub cta_secondary: String,
}

#[derive(Debug, Clone)]
pub struct ServiceCard {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FeatureCard {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone)]
pub struct ProcessStep {
    pub number: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct Testimonial {
    pub client_name: String,
    pub client_role: String,
    pub client_avatar: String,
    pub rating: u8,
    pub review: String,
}

#[derive(Debug, Clone)]
pub struct PricingPlanView {
    pub tier_label: String,
    pub title: String,
    pub price: String,
    pub price_note: String,
    pub description: Vec<String>,
    pub features: Vec<String>,
    pub cta: String,
    pub discount: Option<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone)]
pub struct PricingGroupView {
    pub audience_label: String,
    pub plans: Vec<PricingPlanView>,
}

#[derive(Debug, Clone)]
pub struct ServiceOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct FeaturedVideoView {
    pub heading: SectionHeading,
    pub embed_url: String,
}

#[derive(Debug, Clone)]
pub struct LandingContent {
    pub hero: HeroView,
    pub services_heading: SectionHeading,
    pub services: Vec<ServiceCard>,
    pub features_heading: SectionHeading,
    pub features: Vec<FeatureCard>,
    pub process_heading: SectionHeading,
    pub steps: Vec<ProcessStep>,
    pub pricing_heading: SectionHeading,
    pub pricing_groups: Vec<PricingGroupView>,
    pub testimonials_heading: SectionHeading,
    pub testimonials: Vec<Testimonial>,
    pub featured_video: FeaturedVideoView,
    pub ai_videos_heading: SectionHeading,
    pub ai_videos_display_size: String,
    pub faq_heading: SectionHeading,
    pub faqs: Vec<FaqEntry>,
    pub contact_heading: SectionHeading,
    pub service_options: Vec<ServiceOption>,
    pub footer_heading: SectionHeading,
}

pub struct SiteContentService {
    cache: Arc<ContentCache>,
}

impl SiteContentService {
    pub fn new(cache: Arc<ContentCache>) -> Self {
        Self { cache }
    }

    pub fn landing(&self) -> LandingContent {
        let hero = self.cache.resolve("hero", &HERO_DEFAULTS);
        let services = self.cache.resolve("services", &SERVICES_DEFAULTS);
        let features = self.cache.resolve("features", &FEATURES_DEFAULTS);
        let process = self.cache.resolve("process", &PROCESS_DEFAULTS);
        let pricing = self.cache.resolve("pricing", &PRICING_DEFAULTS);
        let testimonials = self.cache.resolve("testimonials", &TESTIMONIALS_DEFAULTS);
        let featured = self.cache.resolve("featured_video", &FEATURED_VIDEO_DEFAULTS);
        let ai_videos = self.cache.resolve("ai_videos", &AI_VIDEOS_DEFAULTS);
        let faq = self.cache.resolve("faq", &FAQ_DEFAULTS);
        let contact = self.cache.resolve("contact", &CONTACT_DEFAULTS);
        let footer = self.cache.resolve("footer", &FOOTER_DEFAULTS);

        let hero_payload = sub_key(&hero, "hero");
        let featured_payload = sub_key(&featured, "featured_video");
        let ai_payload = sub_key(&ai_videos, "ai_videos");
        let reference = field_str(&featured_payload, "youtube_url");

        LandingContent {
            hero: HeroView {
                heading: SectionHeading::from(&hero),
                badge: field_str(&hero_payload, "badge"),
                heading_line1: field_str(&hero_payload, "heading_line1"),
                heading_highlight: field_str(&hero_payload, "heading_highlight"),
                heading_line2: field_str(&hero_payload, "heading_line2"),
                cta_primary: field_str(&hero_payload, "cta_primary"),
                cta_secondary: field_str(&hero_payload, "cta_secondary"),
            },
            services_heading: SectionHeading::from(&services),
            services: items(&services, "services")
                .iter()
                .map(|item| ServiceCard {
                    title: field_str(item, "title"),
                    description: field_str(item, "description"),
                    features: field_list(item, "features"),
                })
                .collect(),
            features_heading: SectionHeading::from(&features),
            features: items(&features, "features")
                .iter()
                .map(|item| FeatureCard {
                    title: field_str(item, "title"),
                    description: field_str(item, "description"),
                })
                .collect(),
            process_heading: SectionHeading::from(&process),
            steps: items(&process, "steps")
                .iter()
                .map(|item| ProcessStep {
                    number: field_str(item, "number"),
                    title: field_str(item, "title"),
                    description: field_str(item, "description"),
                })
                .collect(),
            pricing_heading: SectionHeading::from(&pricing),
            pricing_groups: PricingAudience::ALL
                .iter()
                .map(|audience| pricing_group(&pricing, *audience))
                .collect(),
            testimonials_heading: SectionHeading::from(&testimonials),
            testimonials: items(&testimonials, "testimonials")
                .iter()
                .map(|item| Testimonial {
                    client_name: field_str(item, "client_name"),
                    client_role: field_str(item, "client_role"),
                    client_avatar: field_str(item, "client_avatar"),
                    rating: field_rating(item),
                    review: field_str(item, "review"),
                })
                .collect(),
            featured_video: FeaturedVideoView {
                heading: SectionHeading::from(&featured),
                embed_url: video::embed_url(&reference),
            },
            ai_videos_heading: SectionHeading::from(&ai_videos),
            ai_videos_display_size: {
                let size = field_str(&ai_payload, "display_size");
                if size.is_empty() { "reel".to_string() } else { size }
            },
            faq_heading: SectionHeading::from(&faq),
            faqs: items(&faq, "faqs")
                .iter()
                .map(|item| FaqEntry {
                    question: field_str(item, "question"),
                    answer: field_str(item, "answer"),
                })
                .collect(),
            contact_heading: SectionHeading::from(&contact),
            service_options: items(&contact, "service_options")
                .iter()
                .map(|item| ServiceOption {
                    value: field_str(item, "value"),
                    label: field_str(item, "label"),
                })
                .collect(),
            footer_heading: SectionHeading::from(&footer),
        }
    }
}

fn pricing_group(resolved: &ResolvedSection, audience: PricingAudience) -> PricingGroupView {
    let tree = sub_key(resolved, "pricing");
    let plans = PricingTier::ALL
        .iter()
        .map(|tier| {
            let plan = tree
                .get(audience.as_str())
                .and_then(|group| group.get(tier.as_str()))
                .cloned()
                .unwrap_or(Value::Null);
            PricingPlanView {
                tier_label: tier.label().to_string(),
                title: field_str(&plan, "title"),
                price: field_str(&plan, "price"),
                price_note: field_str(&plan, "price_note"),
                description: field_list(&plan, "description"),
                features: field_list(&plan, "features"),
                cta: field_str(&plan, "cta"),
                discount: field_str_opt(&plan, "discount"),
                highlighted: *tier == PricingTier::Standard,
            }
        })
        .collect();
    PricingGroupView {
        audience_label: audience.label().to_string(),
        plans,
    }
}

fn sub_key(resolved: &ResolvedSection, key: &str) -> Value {
    resolved
        .content
        .as_ref()
        .and_then(|content| content.get(key))
        .cloned()
        .unwrap_or(Value::Null)
}

fn items(resolved: &ResolvedSection, key: &str) -> Vec<Value> {
    match sub_key(resolved, key) {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

fn field_str(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn field_str_opt(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Accepts a JSON array of strings or a single comma-separated string.
fn field_list(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Ratings arrive as a number or a numeric string; clamp to 1..=5.
fn field_rating(value: &Value) -> u8 {
    let raw = match value.get("rating") {
        Some(Value::Number(number)) => number.as_u64().unwrap_or(5),
        Some(Value::String(text)) => text.trim().parse::<u64>().unwrap_or(5),
        _ => 5,
    };
    raw.clamp(1, 5) as u8
}

static HERO_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "hero": {
            "badge": "Post-production studio",
            "heading_line1": "Video editing",
            "heading_highlight": "that converts",
            "heading_line2": "viewers into fans",
            "cta_primary": "Start a project",
            "cta_secondary": "See our work"
        }
    })
});

static HERO_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "Video editing",
    subtitle: "for brands and creators",
    description: "We turn raw footage into stories your audience remembers. \
                  Editing, motion design and publishing support under one roof.",
    content: Some(&HERO_CONTENT),
});

static SERVICES_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "services": [
            {
                "title": "Short-form editing",
                "description": "Vertical cuts built for retention, hooks first.",
                "features": ["Shorts & Reels", "Captions", "Sound design"]
            },
            {
                "title": "Long-form editing",
                "description": "Documentary-style narratives for YouTube and beyond.",
                "features": ["Story structure", "Color grading", "Thumbnails"]
            },
            {
                "title": "Brand design",
                "description": "Logos, posters and channel art in one visual language.",
                "features": ["Logo systems", "Poster design", "Channel kits"]
            }
        ]
    })
});

static SERVICES_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "Services",
    subtitle: "What we do",
    description: "Everything a publishing pipeline needs, from first cut to upload.",
    content: Some(&SERVICES_CONTENT),
});

static FEATURES_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "features": [
            {
                "title": "Fast turnaround",
                "description": "First cut within 48 hours on standard projects."
            },
            {
                "title": "Unlimited revisions",
                "description": "We iterate until the cut matches the brief."
            },
            {
                "title": "Dedicated editor",
                "description": "One editor owns your channel's look end to end."
            }
        ]
    })
});

static FEATURES_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "Why choose us",
    subtitle: "",
    description: "",
    content: Some(&FEATURES_CONTENT),
});

static PROCESS_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "steps": [
            {"number": "01", "title": "Brief", "description": "Share footage, references and goals."},
            {"number": "02", "title": "Cut", "description": "We edit, grade and mix the first version."},
            {"number": "03", "title": "Refine", "description": "Feedback rounds until it lands."},
            {"number": "04", "title": "Deliver", "description": "Final exports sized for every platform."}
        ]
    })
});

static PROCESS_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "How it works",
    subtitle: "",
    description: "Four steps from raw footage to published video.",
    content: Some(&PROCESS_CONTENT),
});

static PRICING_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "pricing": {
            "creators": {
                "basic": {
                    "title": "Starter",
                    "price": "$390",
                    "price_note": "per month",
                    "description": ["For channels finding their rhythm."],
                    "features": ["4 short-form edits", "Captions included", "72h turnaround"],
                    "cta": "Get started"
                },
                "standard": {
                    "title": "Creator",
                    "price": "$790",
                    "price_note": "per month",
                    "description": ["Our most popular plan for solo creators."],
                    "features": ["8 short-form edits", "2 long-form edits", "Thumbnails", "48h turnaround"],
                    "cta": "Get started",
                    "discount": "Most popular"
                },
                "premium": {
                    "title": "Channel",
                    "price": "$1,490",
                    "price_note": "per month",
                    "description": ["Full channel management for growing creators."],
                    "features": ["Unlimited shorts", "4 long-form edits", "Channel art", "Priority queue"],
                    "cta": "Get started"
                }
            },
            "agencies": {
                "basic": {
                    "title": "Studio",
                    "price": "$1,900",
                    "price_note": "per month",
                    "description": ["White-label editing for small agencies."],
                    "features": ["20 deliverables", "Brand guidelines", "Dedicated editor"],
                    "cta": "Book a call"
                },
                "standard": {
                    "title": "Agency",
                    "price": "$3,400",
                    "price_note": "per month",
                    "description": ["Multi-client pipelines with a two-editor pod."],
                    "features": ["45 deliverables", "Two editors", "Motion design", "Same-week delivery"],
                    "cta": "Book a call",
                    "discount": "Best value"
                },
                "premium": {
                    "title": "Partner",
                    "price": "Custom",
                    "price_note": "",
                    "description": ["Embedded post-production team at your scale."],
                    "features": ["Unlimited volume", "Editor pod", "On-call revisions", "Quarterly strategy"],
                    "cta": "Book a call"
                }
            }
        }
    })
});

static PRICING_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "Pricing",
    subtitle: "Plans for every stage",
    description: "Flat monthly plans. Pause or cancel any time.",
    content: Some(&PRICING_CONTENT),
});

static TESTIMONIALS_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "testimonials": [
            {
                "client_name": "Mara Lindgren",
                "client_role": "Creator, 420k subscribers",
                "client_avatar": "",
                "rating": 5,
                "review": "Retention on our shorts doubled within two months of handing over the edit."
            },
            {
                "client_name": "Jonas Petersen",
                "client_role": "Head of Content, Northlight Media",
                "client_avatar": "",
                "rating": 5,
                "review": "The only external team that actually kept our brand language consistent."
            }
        ]
    })
});

static TESTIMONIALS_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "What clients say",
    subtitle: "",
    description: "",
    content: Some(&TESTIMONIALS_CONTENT),
});

static FEATURED_VIDEO_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "featured_video": {
            "youtube_url": ""
        }
    })
});

static FEATURED_VIDEO_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "Featured work",
    subtitle: "",
    description: "A recent cut we are proud of.",
    content: Some(&FEATURED_VIDEO_CONTENT),
});

static AI_VIDEOS_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "ai_videos": {
            "display_size": "reel"
        }
    })
});

static AI_VIDEOS_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "AI videos",
    subtitle: "Generated, then crafted",
    description: "Experiments where generative footage meets a human edit.",
    content: Some(&AI_VIDEOS_CONTENT),
});

static FAQ_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "faqs": [
            {
                "question": "How fast is a typical edit?",
                "answer": "Standard projects get a first cut within 48 hours; rush delivery is available on every plan."
            },
            {
                "question": "Do you work with raw footage only?",
                "answer": "We take anything from phone clips to multicam RAW. Send a drive link and we sort the rest."
            },
            {
                "question": "Can I pause my plan?",
                "answer": "Yes. Plans are month to month and unused days roll over when you pause."
            }
        ]
    })
});

static FAQ_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "Frequently asked questions",
    subtitle: "",
    description: "",
    content: Some(&FAQ_CONTENT),
});

static CONTACT_CONTENT: Lazy<Value> = Lazy::new(|| {
    json!({
        "service_options": [
            {"value": "short-form", "label": "Short-form editing"},
            {"value": "long-form", "label": "Long-form editing"},
            {"value": "brand-design", "label": "Brand design"},
            {"value": "other", "label": "Something else"}
        ]
    })
});

static CONTACT_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "Start a project",
    subtitle: "Tell us about your footage",
    description: "We reply within one business day.",
    content: Some(&CONTACT_CONTENT),
});

static FOOTER_DEFAULTS: Lazy<SectionDefaults> = Lazy::new(|| SectionDefaults {
    title: "kadro studio",
    subtitle: "Video editing for brands and creators",
    description: "Remote-first post-production studio.",
    content: None,
});

/// Defaults keyed for the admin editor, which seeds empty sections from
/// the same copy the public site falls back to.
pub fn defaults_for(key: SectionKey) -> &'static SectionDefaults {
    match key {
        SectionKey::Hero => &HERO_DEFAULTS,
        SectionKey::Services => &SERVICES_DEFAULTS,
        SectionKey::Features => &FEATURES_DEFAULTS,
        SectionKey::Faq => &FAQ_DEFAULTS,
        SectionKey::Process => &PROCESS_DEFAULTS,
        SectionKey::Pricing => &PRICING_DEFAULTS,
        SectionKey::Testimonials => &TESTIMONIALS_DEFAULTS,
        SectionKey::FeaturedVideo => &FEATURED_VIDEO_DEFAULTS,
        SectionKey::AiVideos => &AI_VIDEOS_DEFAULTS,
        SectionKey::Contact => &CONTACT_DEFAULTS,
        SectionKey::Footer => &FOOTER_DEFAULTS,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::application::repos::{ContentRepo, RepoError, UpsertSectionParams};
    use crate::domain::entities::SiteContentRecord;

    struct StubContentRepo {
        rows: Vec<SiteContentRecord>,
    }

    #[async_trait]
    impl ContentRepo for StubContentRepo {
        async fn list_sections(&self) -> Result<Vec<SiteContentRecord>, RepoError> {
            Ok(self.rows.clone())
        }

        async fn find_section(
            &self,
            section_key: &str,
        ) -> Result<Option<SiteContentRecord>, RepoError> {
            Ok(self
                .rows
                .iter()
                .find(|row| row.section_key == section_key)
                .cloned())
        }

        async fn upsert_section(
            &self,
            _params: UpsertSectionParams,
        ) -> Result<SiteContentRecord, RepoError> {
            unimplemented!("not exercised")
        }
    }

    #[tokio::test]
    async fn cold_cache_renders_complete_defaults() {
        let cache = ContentCache::new(Arc::new(StubContentRepo { rows: vec![] }));
        let landing = SiteContentService::new(cache).landing();

        assert_eq!(landing.hero.heading.title, "Video editing");
        assert!(!landing.hero.badge.is_empty());
        assert_eq!(landing.hero.cta_primary, "Start a project");
        assert_eq!(landing.ai_videos_display_size, "reel");
        assert_eq!(landing.services.len(), 3);
        assert_eq!(landing.steps.len(), 4);
        assert_eq!(landing.pricing_groups.len(), 2);
        for group in &landing.pricing_groups {
            assert_eq!(group.plans.len(), 3);
            assert!(group.plans[1].highlighted);
        }
        assert!(!landing.faqs.is_empty());
        assert!(!landing.service_options.is_empty());
    }

    #[tokio::test]
    async fn cached_section_overrides_only_its_own_fields() {
        let cache = ContentCache::new(Arc::new(StubContentRepo {
            rows: vec![SiteContentRecord {
                id: Uuid::new_v4(),
                section_key: "faq".to_string(),
                title: Some("Questions, answered".to_string()),
                subtitle: None,
                description: None,
                content: json!({"faqs": [{"question": "Only one?", "answer": "Yes."}]}),
                updated_at: OffsetDateTime::UNIX_EPOCH,
            }],
        }));
        cache.load_all().await.unwrap();
        let landing = SiteContentService::new(cache).landing();

        assert_eq!(landing.faq_heading.title, "Questions, answered");
        assert_eq!(landing.faqs.len(), 1);
        assert_eq!(landing.faqs[0].question, "Only one?");
        // untouched sections keep their defaults
        assert_eq!(landing.services.len(), 3);
    }

    #[tokio::test]
    async fn featured_video_reference_normalizes_to_embed_form() {
        let cache = ContentCache::new(Arc::new(StubContentRepo {
            rows: vec![SiteContentRecord {
                id: Uuid::new_v4(),
                section_key: "featured_video".to_string(),
                title: None,
                subtitle: None,
                description: None,
                content: json!({"featured_video": {"youtube_url": "https://youtu.be/dQw4w9WgXcQ"}}),
                updated_at: OffsetDateTime::UNIX_EPOCH,
            }],
        }));
        cache.load_all().await.unwrap();
        let landing = SiteContentService::new(cache).landing();
        assert_eq!(
            landing.featured_video.embed_url,
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[tokio::test]
    async fn stored_hero_row_drives_every_editable_field() {
        let cache = ContentCache::new(Arc::new(StubContentRepo {
            rows: vec![SiteContentRecord {
                id: Uuid::new_v4(),
                section_key: "hero".to_string(),
                title: Some("Grow your brand".to_string()),
                subtitle: None,
                description: None,
                content: json!({"hero": {
                    "badge": "Creative partner",
                    "heading_line1": "Stories",
                    "heading_highlight": "that stick",
                    "heading_line2": "with your audience",
                    "cta_primary": "View my work",
                    "cta_secondary": "Let's talk"
                }}),
                updated_at: OffsetDateTime::UNIX_EPOCH,
            }],
        }));
        cache.load_all().await.unwrap();
        let landing = SiteContentService::new(cache).landing();

        assert_eq!(landing.hero.heading.title, "Grow your brand");
        assert_eq!(landing.hero.badge, "Creative partner");
        assert_eq!(landing.hero.heading_line1, "Stories");
        assert_eq!(landing.hero.heading_highlight, "that stick");
        assert_eq!(landing.hero.heading_line2, "with your audience");
        assert_eq!(landing.hero.cta_primary, "View my work");
        assert_eq!(landing.hero.cta_secondary, "Let's talk");
    }

    #[test]
    fn comma_separated_feature_lists_parse_like_arrays() {
        let item = json!({"features": "Captions, Sound design , "});
        assert_eq!(field_list(&item, "features"), vec!["Captions", "Sound design"]);
    }

    #[test]
    fn ratings_clamp_to_the_star_range() {
        assert_eq!(field_rating(&json!({"rating": "4"})), 4);
        assert_eq!(field_rating(&json!({"rating": 9})), 5);
        assert_eq!(field_rating(&json!({})), 5);
    }
}
