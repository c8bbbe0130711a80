// src/config/mod.rs
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rewrite::LinkRewrite;
use crate::utils::error::ConfigError;

const REPO_TREE_URL: &str = "https://github.com/veggiemonk/backlog/tree/main";

/// A README section published as its own page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionPage {
    pub title: String,
    pub filename: PathBuf,
    #[serde(default)]
    pub nav_order: Option<u32>,
}

/// An instruction file republished verbatim under a new path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptPage {
    pub source: PathBuf,
    pub target: PathBuf,
    pub title: String,
    #[serde(default)]
    pub nav_order: Option<u32>,
    /// Applied to this page only; empty keeps the file verbatim.
    #[serde(default)]
    pub rewrites: Vec<LinkRewrite>,
}

/// The landing page built from the whole README.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexPage {
    pub target: PathBuf,
    pub title: String,
    pub nav_order: Option<u32>,
    pub layout: String,
}

impl Default for IndexPage {
    fn default() -> Self {
        Self {
            target: PathBuf::from("index.md"),
            title: "Home".to_string(),
            nav_order: Some(1),
            layout: "home".to_string(),
        }
    }
}

/// Everything the generator needs to know. Any field left out of a config
/// file keeps its built-in value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub readme: PathBuf,
    pub output_dir: PathBuf,
    pub index: IndexPage,
    pub prompts: Vec<PromptPage>,
    pub sections: Vec<SectionPage>,
    pub link_rewrites: Vec<LinkRewrite>,
    /// JSON listing of generated pages, relative to `output_dir`.
    pub manifest: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            readme: PathBuf::from("README.md"),
            output_dir: PathBuf::from("docs"),
            index: IndexPage::default(),
            prompts: vec![PromptPage {
                source: PathBuf::from("internal/mcp/prompt.md"),
                target: PathBuf::from("prompts/mcp.md"),
                title: "Prompt to use Backlog CLI".to_string(),
                nav_order: Some(2),
                rewrites: Vec::new(),
            }],
            sections: default_sections(),
            link_rewrites: default_link_rewrites(),
            manifest: None,
        }
    }
}

fn default_sections() -> Vec<SectionPage> {
    [
        ("Installation", "installation.md", 2),
        ("Quick Start", "getting-started.md", 3),
        ("Usage Examples", "usage-examples.md", 4),
        ("AI Agent Integration", "ai-integration.md", 5),
    ]
    .into_iter()
    .map(|(title, filename, order)| SectionPage {
        title: title.to_string(),
        filename: PathBuf::from(filename),
        nav_order: Some(order),
    })
    .collect()
}

fn default_link_rewrites() -> Vec<LinkRewrite> {
    let mut rewrites = vec![LinkRewrite::new("(./internal/mcp/prompt.md)", "(prompts/mcp.md)")];
    for dir in [".backlog", ".gemini", ".claude"] {
        rewrites.push(LinkRewrite::new(
            &format!("(./{})", dir),
            &format!("({}/{})", REPO_TREE_URL, dir),
        ));
    }
    rewrites
}

impl SiteConfig {
    /// Reads a JSON config file and validates it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Rejects configs that would write outside the output directory or
    /// write the same file twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for section in &self.sections {
            if section.title.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "section targeting {} has an empty title",
                    section.filename.display()
                )));
            }
        }

        let mut seen: HashSet<PathBuf> = HashSet::new();
        let targets = std::iter::once(&self.index.target)
            .chain(self.prompts.iter().map(|p| &p.target))
            .chain(self.sections.iter().map(|s| &s.filename))
            .chain(self.manifest.iter());

        for target in targets {
            check_relative_target(target)?;
            // `./a.md` and `a.md` land on the same file.
            let normalized: PathBuf = target
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect();
            if !seen.insert(normalized) {
                return Err(ConfigError::Invalid(format!(
                    "more than one page targets {}",
                    target.display()
                )));
            }
        }
        Ok(())
    }
}

fn check_relative_target(target: &Path) -> Result<(), ConfigError> {
    // Catches both an empty path and bare `.`.
    if !target.components().any(|c| matches!(c, Component::Normal(_))) {
        return Err(ConfigError::Invalid(format!(
            "output path '{}' does not name a file",
            target.display()
        )));
    }
    let escapes = target
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ConfigError::Invalid(format!(
            "output path {} must stay inside the output directory",
            target.display()
        )));
    }
    Ok(())
}
