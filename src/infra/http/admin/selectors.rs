//! Shared CSS selectors used by admin Datastar responses.

pub const PANEL: &str = "[data-role=\"panel\"]";
pub const TOAST_STACK: &str = "[data-admin-toast=\"stack\"]";

pub const CONTACTS_PANEL: &str = "[data-admin-panel=\"contacts\"]";
