//! HTML fragments for notification and dialog surfaces.
//!
//! All caller-provided text passes through [`escape_html`]; message content
//! is treated as plain text, never as markup.

use crate::config::Anchor;
use crate::model::confirmation::ConfirmationView;
use crate::model::notification::Severity;
use crate::notify::surface::NotificationView;

/// Escapes the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn icon_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "fa-check-circle",
        Severity::Error => "fa-exclamation-triangle",
        Severity::Warning => "fa-exclamation-circle",
        Severity::Info => "fa-info-circle",
    }
}

fn anchor_class(anchor: Anchor) -> &'static str {
    match anchor {
        Anchor::TopRight => "notification-top-right",
        Anchor::TopLeft => "notification-top-left",
        Anchor::BottomRight => "notification-bottom-right",
        Anchor::BottomLeft => "notification-bottom-left",
    }
}

/// Renders one dismissible alert element.
pub fn notification_markup(view: &NotificationView) -> String {
    format!(
        concat!(
            r#"<div class="alert alert-{style} alert-dismissible fade show notification-item {anchor}" data-notification-id="{id}" role="alert">"#,
            r#"<i class="fas {icon} me-2"></i>{message}"#,
            r#"<button type="button" class="btn-close" aria-label="Close"></button>"#,
            "</div>"
        ),
        style = view.severity.style_class(),
        anchor = anchor_class(view.anchor),
        id = view.id,
        icon = icon_class(view.severity),
        message = escape_html(&view.message),
    )
}

/// Renders the body of a confirm/cancel dialog.
pub fn confirmation_markup(view: &ConfirmationView, title: &str) -> String {
    format!(
        concat!(
            r#"<div class="modal fade" data-confirmation-id="{id}" tabindex="-1">"#,
            r#"<div class="modal-dialog"><div class="modal-content">"#,
            r#"<div class="modal-header"><h5 class="modal-title">{title}</h5>"#,
            r#"<button type="button" class="btn-close" data-action="dismiss"></button></div>"#,
            r#"<div class="modal-body"><p>{message}</p></div>"#,
            r#"<div class="modal-footer">"#,
            r#"<button type="button" class="btn btn-secondary" data-action="cancel">{cancel}</button>"#,
            r#"<button type="button" class="btn btn-primary" data-action="confirm">{confirm}</button>"#,
            "</div></div></div></div>"
        ),
        id = view.id,
        title = escape_html(title),
        message = escape_html(&view.message),
        cancel = escape_html(&view.labels.cancel),
        confirm = escape_html(&view.labels.confirm),
    )
}
