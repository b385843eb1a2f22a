//! Pure section-content resolution and the save-time merge.
//!
//! Resolution never fails and never blocks: a missing or empty cached
//! field falls back to the caller's default, field by field.

use serde_json::Value;

use crate::domain::entities::SiteContentRecord;
use crate::domain::sections::SectionSchema;

/// Caller-supplied fallback copy for one section.
#[derive(Debug, Clone, Default)]
pub struct SectionDefaults {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub content: Option<&'static Value>,
}

/// What a renderer actually consumes after the cache merge.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSection {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub content: Option<Value>,
}

/// Merge one cached record over its defaults. Each field resolves to the
/// cached value when present and non-empty, else to the default.
pub fn resolve(cached: Option<&SiteContentRecord>, defaults: &SectionDefaults) -> ResolvedSection {
    let text = |value: Option<&String>, fallback: &'static str| -> String {
        match value {
            Some(text) if !text.is_empty() => text.clone(),
            _ => fallback.to_string(),
        }
    };

    let content = cached
        .map(|record| &record.content)
        .filter(|content| !content.is_null())
        .cloned()
        .or_else(|| defaults.content.cloned());

    ResolvedSection {
        title: text(cached.and_then(|r| r.title.as_ref()), defaults.title),
        subtitle: text(cached.and_then(|r| r.subtitle.as_ref()), defaults.subtitle),
        description: text(
            cached.and_then(|r| r.description.as_ref()),
            defaults.description,
        ),
        content,
    }
}

/// Fold an edited payload into a section's existing `content` object.
///
/// The edited value lands under the schema's content key. For `List`
/// schemas an empty edited sequence leaves the stored sub-key untouched,
/// so a save that never loaded its items cannot wipe them.
pub fn merge_section_content(
    existing: &Value,
    schema: &SectionSchema,
    edited: Value,
) -> Value {
    let mut merged = match existing {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };

    let keep = match schema {
        SectionSchema::List { .. } => match &edited {
            Value::Array(items) => !items.is_empty(),
            _ => false,
        },
        SectionSchema::Pricing { .. } | SectionSchema::Simple { .. } => !edited.is_null(),
    };

    if keep {
        merged.insert(schema.content_key().to_string(), edited);
    }

    Value::Object(merged)
}
