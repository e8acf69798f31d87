//! PR template catalog.
//!
//! The set of templates is compiled in; only their content lives on disk.
//! Declaration order is a stable contract that the suggester's alternative
//! ranking leans on.

use std::fs;
use std::path::Path;

use serde::Serialize;

/// A compiled-in template entry.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSpec {
    pub id: &'static str,
    pub filename: &'static str,
    pub category: &'static str,
}

/// The known templates, in declaration order.
pub const TEMPLATES: &[TemplateSpec] = &[
    TemplateSpec {
        id: "bug",
        filename: "bug.md",
        category: "Bug Fix",
    },
    TemplateSpec {
        id: "feature",
        filename: "feature.md",
        category: "Feature",
    },
    TemplateSpec {
        id: "docs",
        filename: "docs.md",
        category: "Documentation",
    },
    TemplateSpec {
        id: "refactor",
        filename: "refactor.md",
        category: "Refactor",
    },
    TemplateSpec {
        id: "test",
        filename: "test.md",
        category: "Test",
    },
    TemplateSpec {
        id: "performance",
        filename: "performance.md",
        category: "Performance",
    },
    TemplateSpec {
        id: "security",
        filename: "security.md",
        category: "Security",
    },
];

/// Position of a template id in declaration order.
pub fn template_index(id: &str) -> Option<usize> {
    TEMPLATES.iter().position(|t| t.id == id)
}

/// A template with its content, or the reason it could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateRecord {
    pub id: String,
    pub filename: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Read every known template from `dir`, in declaration order.
///
/// Never fails as a whole: an entry whose file cannot be read carries an
/// `error` field instead of content, so callers can skip or surface the
/// broken entry. Content is re-read on every call so external edits are
/// picked up.
pub fn list_templates(dir: &Path) -> Vec<TemplateRecord> {
    TEMPLATES
        .iter()
        .map(|spec| match fs::read_to_string(dir.join(spec.filename)) {
            Ok(content) => TemplateRecord {
                id: spec.id.to_string(),
                filename: spec.filename.to_string(),
                category: spec.category.to_string(),
                content: Some(content),
                error: None,
            },
            Err(e) => TemplateRecord {
                id: spec.id.to_string(),
                filename: spec.filename.to_string(),
                category: spec.category.to_string(),
                content: None,
                error: Some(format!("Error loading template: {e}")),
            },
        })
        .collect()
}
