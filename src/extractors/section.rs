// src/extractors/section.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// Any second-level heading marks the end of the previous section.
// `###` and deeper do not match because the fourth byte must be a space.
static NEXT_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^## ").expect("Failed to compile NEXT_HEADING_RE")
});

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSection {
    pub title: String,   // The title that was requested, e.g. "Quick Start"
    pub content: String, // Heading line plus body, trimmed
}

// --- Main Extractor Structure ---
#[derive(Debug, Default, Clone, Copy)]
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Extracts the `## <title>` section from a markdown document.
    ///
    /// The section runs from the heading line up to (not including) the next
    /// line starting with `## `, or to the end of the document when it is the
    /// last one. The result is trimmed of surrounding whitespace.
    ///
    /// A missing heading is `Ok(None)`. `Err` only happens when the heading
    /// pattern cannot be compiled.
    pub fn extract(
        &self,
        document: &str,
        title: &str,
    ) -> Result<Option<ExtractedSection>, ExtractError> {
        let heading_re = Self::heading_pattern(title)?;

        // Leftmost match, so the first occurrence of a repeated title wins.
        let heading = match heading_re.find(document) {
            Some(m) => m,
            None => {
                tracing::debug!(
                    "No '## {}' heading in document ({} bytes)",
                    title,
                    document.len()
                );
                return Ok(None);
            }
        };

        // find_at keeps the surrounding text in view, so `^` only fires at a real line start.
        let end = match NEXT_HEADING_RE.find_at(document, heading.end()) {
            Some(next) => {
                tracing::trace!("Section '{}' bounded by heading at byte {}", title, next.start());
                next.start()
            }
            None => {
                tracing::trace!("Section '{}' is the last one, running to end of document", title);
                document.len()
            }
        };

        let content = document[heading.start()..end].trim().to_string();
        tracing::debug!("Extracted section '{}' ({} bytes)", title, content.len());

        Ok(Some(ExtractedSection {
            title: title.to_string(),
            content,
        }))
    }

    /// Builds the line-anchored heading pattern with the title taken literally.
    fn heading_pattern(title: &str) -> Result<Regex, ExtractError> {
        let pattern = format!(r"(?m)^## {}", regex::escape(title));
        Regex::new(&pattern).map_err(|e| {
            ExtractError::RegexError(format!("Invalid heading pattern for '{}': {}", title, e))
        })
    }
}
