//! Combine the sections into a single markdown document.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::section::Section;

pub const DEFAULT_TITLE: &str = "Untitled Document";
pub const DEFAULT_OUTPUT: &str = "output.md";

/// GitHub-style heading anchor: lowercase, spaces to `-`, punctuation dropped.
fn slugify(text: &str) -> String {
    text.trim()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c.to_lowercase().collect::<String>())
            } else if c.is_whitespace() {
                Some("-".to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Render `sections` as a markdown document with a table of contents.
pub fn render_markdown(title: &str, sections: &[Section]) -> String {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let anchors: Vec<String> = sections
        .iter()
        .map(|section| {
            let base = slugify(&section.title);
            let count = seen.entry(base.clone()).or_insert(0);
            let anchor = if *count == 0 {
                base
            } else {
                format!("{base}-{count}")
            };
            *count += 1;
            anchor
        })
        .collect();

    let mut out = format!("# {title}\n\n## Contents\n\n");
    for (section, anchor) in sections.iter().zip(&anchors) {
        out.push_str(&format!("- [{}](#{anchor})\n", section.title));
    }
    for section in sections {
        out.push_str(&format!("\n## {}\n\n{}\n", section.title, section.content.trim_end()));
    }
    out
}

/// Write the combined document to `path`, creating parent directories.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_markdown(path: &Path, title: &str, sections: &[Section]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output dir {}", parent.display()))?;
    }
    fs::write(path, render_markdown(title, sections))
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_slugify_matches_heading_anchor_rules() {
        assert_eq!(slugify("Getting Started!"), "getting-started");
        assert_eq!(slugify("  API: v2_beta "), "api-v2_beta");
    }

    #[test]
    fn test_render_lists_contents_then_sections_in_order() {
        let sections = vec![
            Section::new("2", "Second Part", "two"),
            Section::new("1", "First", "one\n"),
        ];
        let doc = render_markdown("Book", &sections);
        assert_eq!(
            doc,
            "# Book\n\n## Contents\n\n- [Second Part](#second-part)\n- [First](#first)\n\n## Second Part\n\ntwo\n\n## First\n\none\n"
        );
    }

    #[test]
    fn test_duplicate_titles_get_numbered_anchors() {
        let sections = vec![
            Section::new("1", "Notes", "a"),
            Section::new("2", "Notes", "b"),
            Section::new("3", "Notes", "c"),
        ];
        let doc = render_markdown("T", &sections);
        assert!(doc.contains("- [Notes](#notes)\n"));
        assert!(doc.contains("- [Notes](#notes-1)\n"));
        assert!(doc.contains("- [Notes](#notes-2)\n"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("doc.md");
        write_markdown(&path, "T", &[Section::new("1", "A", "body")]).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# T\n"));
        assert!(written.contains("## A\n\nbody\n"));
    }
}
