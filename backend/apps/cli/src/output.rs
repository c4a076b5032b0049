//! Plain-text rendering for terminal output

use auth::domain::Session;
use catalog::models::{
    ExtensionDto, ExtensionVersionDto, PaginatedResponse, TagDto, TagWithCountDto,
};
use catalog::{PageItem, PageWindow};
use serde_json::Value;

pub fn signed_in(session: &Session) -> String {
    format!("Signed in as {} ({})", display_name(session), session.role)
}

pub fn session(session: &Session) -> String {
    let mut lines = vec![
        format!("username:   {}", display_name(session)),
        format!("user id:    {}", session.user_id),
        format!("role:       {}", session.role),
    ];
    if !session.expires_at.is_empty() {
        lines.push(format!("expires at: {}", session.expires_at));
    }
    lines.join("\n")
}

fn display_name(session: &Session) -> &str {
    if session.username.is_empty() {
        &session.user_id
    } else {
        &session.username
    }
}

pub fn json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// ============================================================================
// Extensions
// ============================================================================

pub fn extension_page(page: &PaginatedResponse<ExtensionDto>) -> String {
    if page.items.is_empty() {
        return "No extensions found".to_string();
    }

    let mut lines: Vec<String> = page.items.iter().map(extension_line).collect();
    lines.push(String::new());
    lines.push(format!(
        "{} extension(s), page {} of {}",
        page.total_count, page.page_number, page.total_pages
    ));
    if page.total_pages > 1 {
        lines.push(page_window(&page.window()));
    }
    lines.join("\n")
}

fn extension_line(extension: &ExtensionDto) -> String {
    let tags = tag_names(&extension.tags);
    if tags.is_empty() {
        format!("{}  {}", extension.id, extension.name)
    } else {
        format!("{}  {}  [{}]", extension.id, extension.name, tags)
    }
}

pub fn extension(extension: &ExtensionDto) -> String {
    let mut lines = vec![format!("{} ({})", extension.name, extension.id)];
    if !extension.description.is_empty() {
        lines.push(extension.description.clone());
    }
    if let Some(user) = extension.uploader.as_ref().and_then(|u| u.user.as_ref()) {
        lines.push(format!("uploaded by {}", user.username));
    }
    if !extension.tags.is_empty() {
        lines.push(format!("tags: {}", tag_names(&extension.tags)));
    }
    if !extension.version_details.is_empty() {
        lines.push(versions(&extension.version_details));
    }
    lines.join("\n")
}

/// `< 1 ... 4 [5] 6 ... 10 >`
pub fn page_window(window: &PageWindow) -> String {
    let mut parts = Vec::new();
    if window.previous.is_some() {
        parts.push("<".to_string());
    }
    for item in &window.items {
        parts.push(match item {
            PageItem::Page {
                number,
                current: true,
            } => format!("[{}]", number),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => "...".to_string(),
        });
    }
    if window.next.is_some() {
        parts.push(">".to_string());
    }
    parts.join(" ")
}

// ============================================================================
// Versions and tags
// ============================================================================

pub fn versions(versions: &[ExtensionVersionDto]) -> String {
    if versions.is_empty() {
        return "No versions".to_string();
    }
    versions
        .iter()
        .map(|v| {
            let files = match v.files.len() {
                1 => "1 file".to_string(),
                n => format!("{} files", n),
            };
            format!("{}  {}  {}  {}", v.id, v.version_name, v.status, files)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn tag_names(tags: &[TagDto]) -> String {
    tags.iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn tags(tags: &[TagDto]) -> String {
    if tags.is_empty() {
        return "No tags".to_string();
    }
    tags.iter()
        .map(|t| format!("{}  {}", t.id, t.name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn tags_with_count(tags: &[TagWithCountDto]) -> String {
    if tags.is_empty() {
        return "No tags".to_string();
    }
    tags.iter()
        .map(|t| format!("{}  {} ({})", t.id, t.name, t.extension_count))
        .collect::<Vec<_>>()
        .join("\n")
}
