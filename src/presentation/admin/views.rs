//! Admin view models and templates.

use askama::Template;

#[derive(Clone)]
pub struct AdminBrandView {
    pub title: String,
}

#[derive(Clone)]
pub struct AdminNavigationItemView {
    pub label: &'static str,
    pub href: &'static str,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct AdminChrome {
    pub brand: AdminBrandView,
    pub items: Vec<AdminNavigationItemView>,
    pub page_title: String,
}

/// Build the admin chrome with the given navigation entry highlighted.
pub fn admin_chrome(active: &str, page_title: impl Into<String>) -> AdminChrome {
    let entries = [
        ("Dashboard", "/"),
        ("Site content", "/content"),
        ("Portfolio", "/portfolio"),
        ("Contacts", "/contacts"),
    ];
    AdminChrome {
        brand: AdminBrandView {
            title: "kadro admin".to_string(),
        },
        items: entries
            .iter()
            .map(|(label, href)| AdminNavigationItemView {
                label,
                href,
                is_active: *href == active,
            })
            .collect(),
        page_title: page_title.into(),
    }
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub chrome: AdminChrome,
    pub asset_version: String,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(chrome: AdminChrome, content: T) -> Self {
        Self {
            chrome,
            asset_version: asset_version(),
            content,
        }
    }
}

fn asset_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    /// Empty string when there is no error to show.
    pub error: String,
}

#[derive(Clone)]
pub struct AdminMetricView {
    pub label: String,
    pub value: i64,
}

#[derive(Clone)]
pub struct AdminDashboardView {
    pub portfolio_metrics: Vec<AdminMetricView>,
    pub new_contacts: i64,
    pub customized_sections: usize,
    pub total_sections: usize,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub view: AdminLayout<AdminDashboardView>,
}

#[derive(Clone)]
pub struct AdminSectionRowView {
    pub label: &'static str,
    pub key: &'static str,
    pub edit_href: String,
    /// Empty string for sections without a list payload.
    pub item_count: String,
    pub status: &'static str,
    pub updated: String,
}

#[derive(Clone)]
pub struct AdminContentView {
    pub sections: Vec<AdminSectionRowView>,
}

#[derive(Template)]
#[template(path = "admin/content.html")]
pub struct AdminContentTemplate {
    pub view: AdminLayout<AdminContentView>,
}

#[derive(Clone)]
pub struct EditorFieldView {
    pub name: String,
    pub label: &'static str,
    /// One of `text`, `multiline`, `tags`.
    pub kind: &'static str,
    pub value: String,
}

#[derive(Clone)]
pub struct EditorRowView {
    pub index: usize,
    pub fields: Vec<EditorFieldView>,
}

#[derive(Clone)]
pub struct PricingPlanFormView {
    pub audience: &'static str,
    pub audience_label: &'static str,
    pub tier: &'static str,
    pub tier_label: &'static str,
    pub title: String,
    pub price: String,
    pub price_note: String,
    pub description_text: String,
    pub features_text: String,
    pub cta: String,
    pub discount: String,
}

/// Everything the editor panel renders. `kind` picks the form variant:
/// `list`, `pricing`, `simple` or `plain` (headline fields only).
#[derive(Clone)]
pub struct AdminEditorView {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub item_label: &'static str,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub rows: Vec<EditorRowView>,
    pub simple_fields: Vec<EditorFieldView>,
    pub plans: Vec<PricingPlanFormView>,
    /// Empty string when the last save did not fail.
    pub error: String,
}

#[derive(Template)]
#[template(path = "admin/content_editor.html")]
pub struct AdminContentEditorTemplate {
    pub view: AdminEditorView,
}

#[derive(Template)]
#[template(path = "admin/content_edit.html")]
pub struct AdminContentEditTemplate {
    pub view: AdminLayout<AdminContentEditPageView>,
}

#[derive(Clone)]
pub struct AdminContentEditPageView {
    pub section_label: &'static str,
    pub editor_html: String,
}

#[derive(Clone)]
pub struct AdminCategoryTabView {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
    pub count: i64,
}

#[derive(Clone)]
pub struct AdminPortfolioItemView {
    pub id: String,
    pub title: String,
    pub kind_label: &'static str,
    pub media_url: String,
    pub thumbnail_url: String,
    pub edit_href: String,
    pub delete_action: String,
}

#[derive(Clone)]
pub struct AdminPortfolioPanelView {
    pub category: &'static str,
    pub items: Vec<AdminPortfolioItemView>,
}

#[derive(Template)]
#[template(path = "admin/portfolio_panel.html")]
pub struct AdminPortfolioPanelTemplate {
    pub view: AdminPortfolioPanelView,
}

#[derive(Clone)]
pub struct AdminPortfolioFormView {
    pub heading: String,
    pub action: String,
    pub category: &'static str,
    pub title: String,
    pub description: String,
    pub media_kind: &'static str,
    pub reference_url: String,
    pub current_media: String,
    pub sort_order: String,
    pub error: String,
}

#[derive(Template)]
#[template(path = "admin/portfolio_form.html")]
pub struct AdminPortfolioFormTemplate {
    pub view: AdminPortfolioFormView,
}

#[derive(Clone)]
pub struct AdminPortfolioPageView {
    pub tabs: Vec<AdminCategoryTabView>,
    pub panel_html: String,
    pub form_html: String,
    /// Post-redirect banner text; empty when there is nothing to report.
    pub notice: String,
}

#[derive(Template)]
#[template(path = "admin/portfolio.html")]
pub struct AdminPortfolioTemplate {
    pub view: AdminLayout<AdminPortfolioPageView>,
}

#[derive(Clone)]
pub struct AdminContactRowView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project: String,
    pub service: String,
    pub description: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub received: String,
    pub status_action: String,
    pub delete_action: String,
}

#[derive(Clone)]
pub struct AdminContactsPanelView {
    pub rows: Vec<AdminContactRowView>,
}

#[derive(Template)]
#[template(path = "admin/contacts_panel.html")]
pub struct AdminContactsPanelTemplate {
    pub view: AdminContactsPanelView,
}

#[derive(Clone)]
pub struct AdminContactsPageView {
    pub panel_html: String,
    pub new_count: i64,
}

#[derive(Template)]
#[template(path = "admin/contacts.html")]
pub struct AdminContactsTemplate {
    pub view: AdminLayout<AdminContactsPageView>,
}

#[derive(Clone)]
pub struct AdminToastItem {
    pub id: String,
    pub kind: &'static str,
    pub text: String,
    pub ttl_ms: u64,
}

#[derive(Template)]
#[template(path = "admin/toast_stack.html")]
pub struct AdminToastStackTemplate {
    pub toasts: Vec<AdminToastItem>,
}
