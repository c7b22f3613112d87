use crate::domain::menu::{Category, KnownCategory};

/// Map a raw spreadsheet category onto a canonical one.
///
/// Prefix rules on the lowercased value are tried in order and the first
/// match wins. Anything unmatched is title-cased and kept as its own
/// category; blank input yields an empty label.
pub fn normalize_category(raw: &str) -> Category {
    let raw = raw.trim();
    let lower = raw.to_lowercase();

    let known = if lower.starts_with("high") {
        Some(KnownCategory::HigherEducation)
    } else if lower.starts_with("intranet") {
        Some(KnownCategory::IntranetsPortals)
    } else if lower.starts_with("web") {
        Some(KnownCategory::WebApps)
    } else if lower.starts_with("inform") {
        Some(KnownCategory::Informational)
    } else if lower.starts_with("e-") || lower.starts_with("ecommerce") {
        Some(KnownCategory::ECommerce)
    } else if lower.starts_with("music") {
        Some(KnownCategory::MusicArt)
    } else {
        None
    };

    match known {
        Some(category) => Category::Known(category),
        None => Category::Other(title_case(raw)),
    }
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
