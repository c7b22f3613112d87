// ============================================================
// MENU DOMAIN TYPES
// ============================================================
// Navigation entities consumed by the static site's menu loader

use serde::Serialize;
use std::fmt;

pub const COVER_IMAGE: &str = "assets/ycba.png";
pub const PROJECT_PAGE: &str = "project.html";

/// One spreadsheet record describing a portfolio project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRow {
    pub title: String,
    pub category: String,
    pub role: Option<String>,
    pub budget: Option<String>,
    pub technology: Option<String>,
    pub design_partner: Option<String>,
    pub design_partner_url: Option<String>,
    pub project_url: Option<String>,
    pub summary: Option<String>,
}

/// Categories with a fixed slot in the navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownCategory {
    HigherEducation,
    IntranetsPortals,
    WebApps,
    Informational,
    ECommerce,
    MusicArt,
}

impl KnownCategory {
    /// Categories rendered between "About" and "Blog Posts", in display order.
    /// Music & Art is placed separately, after "Blog Posts".
    pub const PRIORITY: [KnownCategory; 5] = [
        KnownCategory::HigherEducation,
        KnownCategory::IntranetsPortals,
        KnownCategory::WebApps,
        KnownCategory::Informational,
        KnownCategory::ECommerce,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KnownCategory::HigherEducation => "Higher Education",
            KnownCategory::IntranetsPortals => "Intranets & Portals",
            KnownCategory::WebApps => "Web & iOS Apps",
            KnownCategory::Informational => "Informational",
            KnownCategory::ECommerce => "E-Commerce",
            KnownCategory::MusicArt => "Music & Art",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            KnownCategory::HigherEducation => "grad.svg",
            KnownCategory::IntranetsPortals => "intranet.svg",
            KnownCategory::WebApps => "web.svg",
            KnownCategory::Informational => "info.svg",
            KnownCategory::ECommerce => "money.svg",
            KnownCategory::MusicArt => "music.svg",
        }
    }
}

/// Canonical category label: a known category or the title-cased raw value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Known(KnownCategory),
    Other(String),
}

impl Category {
    pub fn label(&self) -> &str {
        match self {
            Category::Known(known) => known.label(),
            Category::Other(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A project link inside a category submenu.
///
/// Optional fields serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub label: String,
    pub slug: String,
    pub url: String,
    pub project_title: String,
    pub role: Option<String>,
    pub budget: Option<String>,
    pub technology: Option<String>,
    pub design_partner: Option<String>,
    pub design_partner_url: Option<String>,
    pub project_url: Option<String>,
    pub page_summary: Option<String>,
    pub cover_image: String,
    #[serde(rename = "sub_menu")]
    pub sub_menu: u8,
}

impl MenuItem {
    pub fn new(row: ProjectRow, slug: String) -> Self {
        Self {
            label: row.title.clone(),
            url: format!("{}?item={}", PROJECT_PAGE, slug),
            slug,
            project_title: row.title,
            role: row.role,
            budget: row.budget,
            technology: row.technology,
            design_partner: row.design_partner,
            design_partner_url: row.design_partner_url,
            project_url: row.project_url,
            page_summary: row.summary,
            cover_image: COVER_IMAGE.to_string(),
            sub_menu: 1,
        }
    }
}

/// Top-level navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub label: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub more: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submenu: Option<Vec<MenuItem>>,
}

impl MenuEntry {
    pub fn about() -> Self {
        Self::link("About", "about.svg", "#")
    }

    pub fn resume() -> Self {
        Self::link("Resume", "work.svg", "resume/resume.html")
    }

    pub fn blog_posts() -> Self {
        Self {
            label: "Blog Posts".to_string(),
            icon: "hash.svg".to_string(),
            url: None,
            more: 0,
            submenu: Some(Vec::new()),
        }
    }

    pub fn category(category: KnownCategory, items: Vec<MenuItem>) -> Self {
        Self {
            label: category.label().to_string(),
            icon: category.icon().to_string(),
            url: None,
            more: 1,
            submenu: Some(items),
        }
    }

    fn link(label: &str, icon: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            url: Some(url.to_string()),
            more: 0,
            submenu: None,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        self.submenu.as_deref().unwrap_or(&[])
    }
}

/// Ordered top-level menu, serialized as a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MenuDocument {
    pub entries: Vec<MenuEntry>,
}

impl MenuDocument {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn entry(&self, label: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_serializes_missing_fields_as_null() {
        let row = ProjectRow {
            title: "Campus Portal".to_string(),
            category: "Intranet".to_string(),
            role: Some("Lead Developer".to_string()),
            ..Default::default()
        };
        let item = MenuItem::new(row, "campus-portal".to_string());
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["url"], "project.html?item=campus-portal");
        assert_eq!(json["projectTitle"], "Campus Portal");
        assert_eq!(json["role"], "Lead Developer");
        assert!(json["budget"].is_null());
        assert!(json.as_object().unwrap().contains_key("pageSummary"));
        assert_eq!(json["sub_menu"], 1);
        assert_eq!(json["coverImage"], COVER_IMAGE);
    }

    #[test]
    fn test_link_entries_omit_submenu() {
        let json = serde_json::to_value(MenuEntry::about()).unwrap();
        assert_eq!(json["url"], "#");
        assert_eq!(json["more"], 0);
        assert!(json.get("submenu").is_none());

        let blog = serde_json::to_value(MenuEntry::blog_posts()).unwrap();
        assert!(blog.get("url").is_none());
        assert_eq!(blog["submenu"], serde_json::json!([]));
    }

    #[test]
    fn test_category_label() {
        assert_eq!(
            Category::Known(KnownCategory::ECommerce).label(),
            "E-Commerce"
        );
        assert_eq!(Category::Other("Games".to_string()).to_string(), "Games");
    }
}
