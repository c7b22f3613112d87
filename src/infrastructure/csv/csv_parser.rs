// ============================================================
// CSV PARSER
// ============================================================
// Parse the project spreadsheet export into typed rows

use crate::domain::error::{AppError, Result};
use crate::domain::menu::ProjectRow;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

const TITLE_COLUMN: &str = "Project Title";
const CATEGORY_COLUMN: &str = "Category";
const ROLE_COLUMN: &str = "ROLE";
const BUDGET_COLUMN: &str = "BUDGET";
const TECHNOLOGY_COLUMN: &str = "TECHNOLOGY";
const DESIGN_PARTNER_COLUMN: &str = "DESIGN PARTNER";
const DESIGN_PARTNER_URL_COLUMN: &str = "DESIGNER domain";
const PROJECT_URL_COLUMN: &str = "DOMAIN";
const SUMMARY_COLUMN: &str = "Description";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header positions resolved once per file
struct ColumnIndex {
    title: usize,
    category: usize,
    role: Option<usize>,
    budget: Option<usize>,
    technology: Option<usize>,
    design_partner: Option<usize>,
    design_partner_url: Option<usize>,
    project_url: Option<usize>,
    summary: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| {
            find(name).ok_or_else(|| {
                AppError::ValidationError(format!("CSV is missing required column '{}'", name))
            })
        };

        Ok(Self {
            title: required(TITLE_COLUMN)?,
            category: required(CATEGORY_COLUMN)?,
            role: find(ROLE_COLUMN),
            budget: find(BUDGET_COLUMN),
            technology: find(TECHNOLOGY_COLUMN),
            design_partner: find(DESIGN_PARTNER_COLUMN),
            design_partner_url: find(DESIGN_PARTNER_URL_COLUMN),
            project_url: find(PROJECT_URL_COLUMN),
            summary: find(SUMMARY_COLUMN),
        })
    }
}

/// CSV parser for project rows; comma-delimited, headers and values trimmed
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSV file into project rows
    pub fn parse_file(&self, path: &Path) -> Result<Vec<ProjectRow>> {
        let content = Self::read_with_encoding_detection(path)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Vec<ProjectRow>> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();
        let columns = ColumnIndex::resolve(&headers)?;

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(&columns, &record));
        }

        Ok(rows)
    }

    /// Read the file as UTF-8, falling back to Windows-1252 for legacy spreadsheet exports
    pub fn read_with_encoding_detection(path: &Path) -> Result<String> {
        let buffer = std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(Self::decode(&buffer))
    }

    fn decode(buffer: &[u8]) -> String {
        let bytes = buffer.strip_prefix(UTF8_BOM).unwrap_or(buffer);
        match std::str::from_utf8(bytes) {
            Ok(content) => content.to_string(),
            Err(_) => {
                let (content, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                content.into_owned()
            }
        }
    }

    fn parse_row(columns: &ColumnIndex, record: &StringRecord) -> ProjectRow {
        let text = |idx: usize| record.get(idx).unwrap_or("").to_string();
        let optional = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        };

        ProjectRow {
            title: text(columns.title),
            category: text(columns.category),
            role: optional(columns.role),
            budget: optional(columns.budget),
            technology: optional(columns.technology),
            design_partner: optional(columns.design_partner),
            design_partner_url: optional(columns.design_partner_url),
            project_url: optional(columns.project_url),
            summary: optional(columns.summary),
        }
    }
}
