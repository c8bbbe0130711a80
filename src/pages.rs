// src/pages.rs
use std::fmt::Write as _;
use std::path::PathBuf;

const FENCE: &str = "---";

/// Metadata block the site generator reads at the top of every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prologue {
    pub layout: String,
    pub title: String,
    pub nav_order: Option<u32>,
}

impl Prologue {
    pub fn new(layout: &str, title: &str, nav_order: Option<u32>) -> Self {
        Self {
            layout: layout.to_string(),
            title: title.to_string(),
            nav_order,
        }
    }

    /// A regular content page.
    pub fn page(title: &str, nav_order: Option<u32>) -> Self {
        Self::new("page", title, nav_order)
    }

    /// Renders the fenced block followed by the blank separator line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", FENCE);
        let _ = writeln!(out, "layout: {}", self.layout);
        let _ = writeln!(out, "title: {}", self.title);
        if let Some(order) = self.nav_order {
            let _ = writeln!(out, "nav_order: {}", order);
        }
        let _ = writeln!(out, "{}", FENCE);
        out.push('\n');
        out
    }
}

/// A generated page, addressed relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub path: PathBuf,
    pub prologue: Prologue,
    pub body: String,
}

impl Page {
    pub fn new<P: Into<PathBuf>>(path: P, prologue: Prologue, body: String) -> Self {
        Self {
            path: path.into(),
            prologue,
            body,
        }
    }

    /// Prologue, blank line, then the body verbatim.
    pub fn render(&self) -> String {
        let mut out = self.prologue.render();
        out.push_str(&self.body);
        out
    }
}
