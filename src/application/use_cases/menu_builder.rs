// ============================================================
// MENU BUILDER USE CASE
// ============================================================
// Turn the project spreadsheet into the site's navigation document

use std::path::Path;

use tracing::{debug, info, warn};

use crate::application::use_cases::category::normalize_category;
use crate::application::use_cases::slug::slugify;
use crate::domain::error::Result;
use crate::domain::menu::{Category, KnownCategory, MenuDocument, MenuEntry, MenuItem, ProjectRow};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::storage;

/// Items grouped by canonical category, in first-seen order
#[derive(Debug, Default)]
pub struct CategoryGroups {
    groups: Vec<(Category, Vec<MenuItem>)>,
}

impl CategoryGroups {
    pub fn push(&mut self, category: Category, item: MenuItem) {
        match self.groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, items)) => items.push(item),
            None => self.groups.push((category, vec![item])),
        }
    }

    pub fn take(&mut self, category: KnownCategory) -> Option<Vec<MenuItem>> {
        let target = Category::Known(category);
        let pos = self.groups.iter().position(|(c, _)| *c == target)?;
        Some(self.groups.remove(pos).1)
    }

    fn into_inner(self) -> Vec<(Category, Vec<MenuItem>)> {
        self.groups
    }
}

/// Categories that had items but no slot in the fixed menu order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnplacedCategory {
    pub label: String,
    pub item_count: usize,
}

/// Assembled document plus what was left out of it
#[derive(Debug, Clone)]
pub struct MenuBuild {
    pub document: MenuDocument,
    pub unplaced: Vec<UnplacedCategory>,
    pub skipped_rows: usize,
}

/// Menu builder use case
pub struct MenuBuilder {
    parser: CsvParser,
}

impl MenuBuilder {
    pub fn new(parser: CsvParser) -> Self {
        Self { parser }
    }

    /// Group rows by canonical category; rows with a blank title are skipped
    pub fn group_rows(rows: Vec<ProjectRow>) -> (CategoryGroups, usize) {
        let mut groups = CategoryGroups::default();
        let mut skipped = 0;

        for mut row in rows {
            row.title = row.title.trim().to_string();
            if row.title.is_empty() {
                skipped += 1;
                continue;
            }
            let category = normalize_category(&row.category);
            let slug = slugify(&row.title);
            debug!(title = %row.title, category = %category, slug = %slug, "Grouped project row");
            groups.push(category, MenuItem::new(row, slug));
        }

        (groups, skipped)
    }

    /// Lay out the fixed menu structure around the grouped categories
    pub fn assemble(mut groups: CategoryGroups) -> (MenuDocument, Vec<UnplacedCategory>) {
        let mut entries = vec![MenuEntry::about()];

        for category in KnownCategory::PRIORITY {
            if let Some(items) = groups.take(category) {
                entries.push(MenuEntry::category(category, items));
            }
        }

        entries.push(MenuEntry::blog_posts());

        if let Some(items) = groups.take(KnownCategory::MusicArt) {
            entries.push(MenuEntry::category(KnownCategory::MusicArt, items));
        }

        entries.push(MenuEntry::resume());

        let unplaced = groups
            .into_inner()
            .into_iter()
            .map(|(category, items)| UnplacedCategory {
                label: category.label().to_string(),
                item_count: items.len(),
            })
            .collect();

        (MenuDocument { entries }, unplaced)
    }

    pub fn build_from_rows(rows: Vec<ProjectRow>) -> MenuBuild {
        let (groups, skipped_rows) = Self::group_rows(rows);
        let (document, unplaced) = Self::assemble(groups);

        for category in &unplaced {
            warn!(
                category = %category.label,
                items = category.item_count,
                "Unrecognized category has no menu slot; items left out"
            );
        }

        MenuBuild {
            document,
            unplaced,
            skipped_rows,
        }
    }

    pub fn build_from_content(&self, content: &str) -> Result<MenuBuild> {
        let rows = self.parser.parse_content(content)?;
        Ok(Self::build_from_rows(rows))
    }

    pub fn build_from_file(&self, csv_path: &Path) -> Result<MenuBuild> {
        let rows = self.parser.parse_file(csv_path)?;
        info!(path = %csv_path.display(), rows = rows.len(), "Parsed project spreadsheet");
        Ok(Self::build_from_rows(rows))
    }

    /// Read the CSV, build the document and write it as indented JSON.
    ///
    /// Nothing is written unless the whole CSV parsed.
    pub fn convert(&self, csv_path: &Path, out_path: &Path) -> Result<MenuBuild> {
        let build = self.build_from_file(csv_path)?;
        storage::write_json_pretty(out_path, &build.document)?;
        info!(
            path = %out_path.display(),
            entries = build.document.len(),
            skipped_rows = build.skipped_rows,
            "Wrote menu document"
        );
        Ok(build)
    }
}

impl Default for MenuBuilder {
    fn default() -> Self {
        Self::new(CsvParser::new())
    }
}
