//! Admin site-content handlers.
//!
//! The editor round-trips its whole form through Datastar: row add and
//! remove re-render the panel from the posted values, a save merges the
//! payload into the stored row. List rows post repeated `item__*` keys
//! grouped back into objects in arrival order.

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::application::admin::content::{EditorSnapshot, SaveSectionParams};
use crate::application::error::HttpError;
use crate::application::stream::StreamBuilder;
use crate::domain::sections::{FieldKind, FieldSpec, SectionKey, SectionSchema};
use crate::domain::types::{PricingAudience, PricingTier};
use crate::presentation::{
    admin::views as admin_views,
    admin::views::admin_chrome,
    views::render_template_response,
};

use super::AdminState;
use super::selectors::PANEL;
use super::shared::{Toast, datastar_replace, push_toasts, render_partial};

pub(super) async fn admin_content(State(state): State<AdminState>) -> Response {
    let summaries = match state.content.list_sections().await {
        Ok(summaries) => summaries,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let sections = summaries
        .iter()
        .map(|summary| admin_views::AdminSectionRowView {
            label: summary.label,
            key: summary.key.as_str(),
            edit_href: format!("/content/{}/edit", summary.key.as_str()),
            item_count: summary
                .item_count
                .map(|count| count.to_string())
                .unwrap_or_default(),
            status: if summary.customized {
                "customized"
            } else {
                "defaults"
            },
            updated: summary
                .updated_at
                .and_then(|at| at.format(&time::format_description::well_known::Rfc3339).ok())
                .unwrap_or_default(),
        })
        .collect();

    let view = admin_views::AdminLayout::new(
        admin_chrome("/content", "Site content"),
        admin_views::AdminContentView { sections },
    );
    render_template_response(admin_views::AdminContentTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_content_edit(
    State(state): State<AdminState>,
    Path(key): Path<String>,
) -> Response {
    let key = match crate::application::admin::content::ContentAdminService::parse_key(&key) {
        Ok(key) => key,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let snapshot = match state.content.editor_snapshot(key).await {
        Ok(snapshot) => snapshot,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let editor = build_editor_view(&snapshot, String::new());
    let editor_html = match render_partial(
        "infra::http::admin_content_edit",
        &admin_views::AdminContentEditorTemplate { view: editor },
    ) {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };

    let view = admin_views::AdminLayout::new(
        admin_chrome("/content", key.label()),
        admin_views::AdminContentEditPageView {
            section_label: key.label(),
            editor_html,
        },
    );
    render_template_response(admin_views::AdminContentEditTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_content_save(
    State(state): State<AdminState>,
    Path(key): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let key = match crate::application::admin::content::ContentAdminService::parse_key(&key) {
        Ok(key) => key,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let form = parse_editor_form(&pairs);
    let edited = edited_payload(key, &form);

    let result = state
        .content
        .save_section(SaveSectionParams {
            key,
            title: form.title.clone(),
            subtitle: form.subtitle.clone(),
            description: form.description.clone(),
            edited,
        })
        .await;

    if let Err(err) = result {
        return HttpError::from(err).into_response();
    }

    // Re-snapshot so the form reflects the merged row, not the raw post.
    let snapshot = match state.content.editor_snapshot(key).await {
        Ok(snapshot) => snapshot,
        Err(err) => return HttpError::from(err).into_response(),
    };

    respond_with_editor(
        &snapshot,
        &[Toast::success(format!("{} saved", key.label()))],
        "infra::http::admin_content_save",
    )
}

pub(super) async fn admin_content_rows_add(
    Path(key): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    rows_mutation(&key, &pairs, RowMutation::Add)
}

pub(super) async fn admin_content_rows_remove(
    Path(key): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    rows_mutation(&key, &pairs, RowMutation::Remove)
}

enum RowMutation {
    Add,
    Remove,
}

/// Row edits never touch the database; they re-render the panel from
/// the posted form with one row appended or dropped.
fn rows_mutation(key: &str, pairs: &[(String, String)], mutation: RowMutation) -> Response {
    let key = match crate::application::admin::content::ContentAdminService::parse_key(key) {
        Ok(key) => key,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let Some(SectionSchema::List { fields, .. }) = key.schema() else {
        return HttpError::new(
            "infra::http::admin_content_rows",
            StatusCode::BAD_REQUEST,
            "Not a list section",
            format!("section `{}` has no editable rows", key.as_str()),
        )
        .into_response();
    };

    let form = parse_editor_form(pairs);
    let mut rows = form_rows_to_value(fields, &form.rows, true);

    match mutation {
        RowMutation::Add => {
            if let Value::Array(items) = &mut rows {
                items.push(json!({}));
            }
        }
        RowMutation::Remove => {
            if let (Value::Array(items), Some(index)) = (&mut rows, form.remove) {
                if index < items.len() {
                    items.remove(index);
                }
            }
        }
    }

    let snapshot = EditorSnapshot {
        key,
        title: form.title,
        subtitle: form.subtitle,
        description: form.description,
        payload: rows,
    };

    let editor = build_editor_view(&snapshot, String::new());
    match render_partial(
        "infra::http::admin_content_rows",
        &admin_views::AdminContentEditorTemplate { view: editor },
    ) {
        Ok(html) => datastar_replace(PANEL, html).into_response(),
        Err(err) => err.into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PricingPlanForm {
    audience: String,
    tier: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    price_note: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    features: String,
    #[serde(default)]
    cta: String,
    #[serde(default)]
    discount: String,
}

/// Save a single audience x tier plan, leaving the rest of the tree as
/// stored.
pub(super) async fn admin_pricing_plan_save(
    State(state): State<AdminState>,
    Form(form): Form<PricingPlanForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_pricing_plan_save";

    let (Ok(audience), Ok(tier)) = (
        PricingAudience::try_from(form.audience.as_str()),
        PricingTier::try_from(form.tier.as_str()),
    ) else {
        return HttpError::new(
            SOURCE,
            StatusCode::BAD_REQUEST,
            "Unknown pricing plan",
            format!("no plan at `{}`/`{}`", form.audience, form.tier),
        )
        .into_response();
    };

    let snapshot = match state.content.editor_snapshot(SectionKey::Pricing).await {
        Ok(snapshot) => snapshot,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let mut tree = snapshot.payload.clone();
    splice_plan(
        &mut tree,
        audience,
        tier,
        json!({
            "title": form.title.trim(),
            "price": form.price.trim(),
            "price_note": form.price_note.trim(),
            "description": lines_to_array(&form.description),
            "features": lines_to_array(&form.features),
            "cta": form.cta.trim(),
            "discount": blank_to_null(&form.discount),
        }),
    );

    let result = state
        .content
        .save_section(SaveSectionParams {
            key: SectionKey::Pricing,
            title: snapshot.title.clone(),
            subtitle: snapshot.subtitle.clone(),
            description: snapshot.description.clone(),
            edited: tree,
        })
        .await;

    if let Err(err) = result {
        return HttpError::from(err).into_response();
    }

    let snapshot = match state.content.editor_snapshot(SectionKey::Pricing).await {
        Ok(snapshot) => snapshot,
        Err(err) => return HttpError::from(err).into_response(),
    };

    respond_with_editor(
        &snapshot,
        &[Toast::success(format!(
            "{} / {} plan saved",
            audience.label(),
            tier.label()
        ))],
        SOURCE,
    )
}

fn respond_with_editor(snapshot: &EditorSnapshot, toasts: &[Toast], source: &'static str) -> Response {
    let editor = build_editor_view(snapshot, String::new());
    let html = match render_partial(source, &admin_views::AdminContentEditorTemplate { view: editor })
    {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };

    let mut stream = StreamBuilder::new();
    stream.push_patch(html, PANEL, datastar::prelude::ElementPatchMode::Replace);
    if let Err(err) = push_toasts(&mut stream, toasts) {
        return err.into_response();
    }
    stream.into_response()
}

#[derive(Debug, Default)]
struct EditorFormData {
    title: String,
    subtitle: String,
    description: String,
    /// Row fields in arrival order, already grouped into per-row chunks.
    rows: Vec<Vec<(String, String)>>,
    simple: Vec<(String, String)>,
    remove: Option<usize>,
}

fn parse_editor_form(pairs: &[(String, String)]) -> EditorFormData {
    let mut form = EditorFormData::default();
    let mut current: Vec<(String, String)> = Vec::new();

    for (name, value) in pairs {
        if let Some(field) = name.strip_prefix("item__") {
            // A repeated field key marks the start of the next row.
            if current.iter().any(|(key, _)| key == field) {
                form.rows.push(std::mem::take(&mut current));
            }
            current.push((field.to_string(), value.clone()));
        } else if let Some(field) = name.strip_prefix("field__") {
            form.simple.push((field.to_string(), value.clone()));
        } else {
            match name.as_str() {
                "title" => form.title = value.clone(),
                "subtitle" => form.subtitle = value.clone(),
                "description" => form.description = value.clone(),
                "remove" => form.remove = value.parse().ok(),
                _ => {}
            }
        }
    }
    if !current.is_empty() {
        form.rows.push(current);
    }
    form
}

fn edited_payload(key: SectionKey, form: &EditorFormData) -> Value {
    match key.schema() {
        Some(SectionSchema::List { fields, .. }) => form_rows_to_value(fields, &form.rows, false),
        Some(SectionSchema::Simple { fields, .. }) => {
            if form.simple.is_empty() {
                return Value::Null;
            }
            let mut object = Map::new();
            for spec in fields.iter() {
                let value = form
                    .simple
                    .iter()
                    .find(|(field, _)| field == spec.key)
                    .map(|(_, value)| value.trim().to_string())
                    .unwrap_or_default();
                object.insert(spec.key.to_string(), Value::String(value));
            }
            Value::Object(object)
        }
        // The plan tree is edited through its dedicated route.
        Some(SectionSchema::Pricing { .. }) | None => Value::Null,
    }
}

/// Convert grouped form rows into a JSON array. `keep_blank` preserves
/// all-empty rows so in-flight edits survive a row add or remove.
fn form_rows_to_value(
    fields: &[FieldSpec],
    rows: &[Vec<(String, String)>],
    keep_blank: bool,
) -> Value {
    let items = rows
        .iter()
        .filter_map(|row| {
            let mut object = Map::new();
            let mut any_value = false;
            for spec in fields.iter() {
                let raw = row
                    .iter()
                    .find(|(key, _)| key == spec.key)
                    .map(|(_, value)| value.as_str())
                    .unwrap_or("");
                if !raw.trim().is_empty() {
                    any_value = true;
                }
                let value = match spec.kind {
                    FieldKind::TagList => Value::Array(
                        raw.split(',')
                            .map(str::trim)
                            .filter(|tag| !tag.is_empty())
                            .map(|tag| Value::String(tag.to_string()))
                            .collect(),
                    ),
                    _ => Value::String(raw.trim().to_string()),
                };
                object.insert(spec.key.to_string(), value);
            }
            (any_value || keep_blank).then_some(Value::Object(object))
        })
        .collect();
    Value::Array(items)
}

/// Write one plan into the audience x tier tree. Externally seeded rows
/// may hold scalars where the editor expects a group, so every level that
/// is not an object is rebuilt before indexing into it.
fn splice_plan(tree: &mut Value, audience: PricingAudience, tier: PricingTier, plan: Value) {
    if !tree.is_object() {
        *tree = json!({});
    }
    let group = &mut tree[audience.as_str()];
    if !group.is_object() {
        *group = json!({});
    }
    group[tier.as_str()] = plan;
}

fn lines_to_array(raw: &str) -> Value {
    Value::Array(
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Value::String(line.to_string()))
            .collect(),
    )
}

fn blank_to_null(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Value::Null
    } else {
        Value::String(trimmed.to_string())
    }
}

pub(super) fn build_editor_view(
    snapshot: &EditorSnapshot,
    error: String,
) -> admin_views::AdminEditorView {
    let key = snapshot.key;
    let (kind, item_label, rows, simple_fields, plans) = match key.schema() {
        Some(SectionSchema::List {
            item_label, fields, ..
        }) => (
            "list",
            *item_label,
            payload_to_rows(fields, &snapshot.payload),
            Vec::new(),
            Vec::new(),
        ),
        Some(SectionSchema::Simple { fields, .. }) => (
            "simple",
            "",
            Vec::new(),
            payload_to_simple_fields(fields, &snapshot.payload),
            Vec::new(),
        ),
        Some(SectionSchema::Pricing { .. }) => (
            "pricing",
            "",
            Vec::new(),
            Vec::new(),
            payload_to_plans(&snapshot.payload),
        ),
        None => ("plain", "", Vec::new(), Vec::new(), Vec::new()),
    };

    admin_views::AdminEditorView {
        key: key.as_str(),
        label: key.label(),
        kind,
        item_label,
        title: snapshot.title.clone(),
        subtitle: snapshot.subtitle.clone(),
        description: snapshot.description.clone(),
        rows,
        simple_fields,
        plans,
        error,
    }
}

fn payload_to_rows(fields: &[FieldSpec], payload: &Value) -> Vec<admin_views::EditorRowView> {
    payload
        .as_array()
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(index, item)| admin_views::EditorRowView {
                    index,
                    fields: fields
                        .iter()
                        .map(|spec| admin_views::EditorFieldView {
                            name: format!("item__{}", spec.key),
                            label: spec.label,
                            kind: field_kind_str(spec.kind),
                            value: field_display_value(item.get(spec.key), spec.kind),
                        })
                        .collect(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn payload_to_simple_fields(
    fields: &[FieldSpec],
    payload: &Value,
) -> Vec<admin_views::EditorFieldView> {
    fields
        .iter()
        .map(|spec| admin_views::EditorFieldView {
            name: format!("field__{}", spec.key),
            label: spec.label,
            kind: field_kind_str(spec.kind),
            value: field_display_value(payload.get(spec.key), spec.kind),
        })
        .collect()
}

fn payload_to_plans(payload: &Value) -> Vec<admin_views::PricingPlanFormView> {
    let mut plans = Vec::with_capacity(PricingAudience::ALL.len() * PricingTier::ALL.len());
    for audience in PricingAudience::ALL {
        for tier in PricingTier::ALL {
            let plan = &payload[audience.as_str()][tier.as_str()];
            plans.push(admin_views::PricingPlanFormView {
                audience: audience.as_str(),
                audience_label: audience.label(),
                tier: tier.as_str(),
                tier_label: tier.label(),
                title: string_at(plan, "title"),
                price: string_at(plan, "price"),
                price_note: string_at(plan, "price_note"),
                description_text: joined_lines_at(plan, "description"),
                features_text: joined_lines_at(plan, "features"),
                cta: string_at(plan, "cta"),
                discount: string_at(plan, "discount"),
            });
        }
    }
    plans
}

fn field_kind_str(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Multiline => "multiline",
        FieldKind::TagList => "tags",
    }
}

fn field_display_value(value: Option<&Value>, kind: FieldKind) -> String {
    match (kind, value) {
        (FieldKind::TagList, Some(Value::Array(tags))) => tags
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        (_, Some(Value::String(text))) => text.clone(),
        (_, Some(Value::Number(number))) => number.to_string(),
        _ => String::new(),
    }
}

fn string_at(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn joined_lines_at(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|lines| {
            lines
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn repeated_item_keys_split_the_form_into_rows() {
        let form = parse_editor_form(&[
            pair("title", "FAQ"),
            pair("item__question", "q1"),
            pair("item__answer", "a1"),
            pair("item__question", "q2"),
            pair("item__answer", "a2"),
        ]);
        assert_eq!(form.title, "FAQ");
        assert_eq!(form.rows.len(), 2);
        assert_eq!(form.rows[1][0], ("question".to_string(), "q2".to_string()));
    }

    #[test]
    fn tag_fields_become_arrays_and_blank_rows_are_dropped_on_save() {
        let Some(SectionSchema::List { fields, .. }) = SectionKey::Services.schema() else {
            panic!("services is a list section");
        };
        let rows = vec![
            vec![
                ("title".to_string(), "Editing".to_string()),
                ("description".to_string(), "Cuts".to_string()),
                ("features".to_string(), "color, sound , ".to_string()),
            ],
            vec![
                ("title".to_string(), "  ".to_string()),
                ("description".to_string(), "".to_string()),
                ("features".to_string(), "".to_string()),
            ],
        ];
        let value = form_rows_to_value(fields, &rows, false);
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["features"], serde_json::json!(["color", "sound"]));
    }

    #[test]
    fn blank_rows_survive_row_mutations() {
        let Some(SectionSchema::List { fields, .. }) = SectionKey::Faq.schema() else {
            panic!("faq is a list section");
        };
        let rows = vec![vec![
            ("question".to_string(), "".to_string()),
            ("answer".to_string(), "".to_string()),
        ]];
        let value = form_rows_to_value(fields, &rows, true);
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn pricing_editor_always_offers_every_plan_slot() {
        let plans = payload_to_plans(&Value::Null);
        assert_eq!(plans.len(), 6);
        assert!(plans.iter().all(|plan| plan.title.is_empty()));
    }

    #[test]
    fn plan_splice_rebuilds_scalar_audience_groups() {
        let mut tree = json!({"creators": "legacy note"});
        splice_plan(
            &mut tree,
            PricingAudience::Creators,
            PricingTier::Basic,
            json!({"title": "Starter"}),
        );
        assert_eq!(tree["creators"]["basic"]["title"], "Starter");

        let mut tree = json!("not even a tree");
        splice_plan(
            &mut tree,
            PricingAudience::Agencies,
            PricingTier::Premium,
            json!({"title": "Studio"}),
        );
        assert_eq!(tree["agencies"]["premium"]["title"], "Studio");
    }

    #[test]
    fn plan_splice_keeps_sibling_plans_intact() {
        let mut tree = json!({"creators": {"basic": {"title": "Starter"}}});
        splice_plan(
            &mut tree,
            PricingAudience::Creators,
            PricingTier::Standard,
            json!({"title": "Growth"}),
        );
        assert_eq!(tree["creators"]["basic"]["title"], "Starter");
        assert_eq!(tree["creators"]["standard"]["title"], "Growth");
    }
}
