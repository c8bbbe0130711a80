// src/generator.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::extractors::{ExtractedSection, SectionExtractor};
use crate::pages::{Page, Prologue};
use crate::rewrite::LinkRewriter;
use crate::storage::{ManifestEntry, PageWriter};
use crate::utils::AppError;

/// Outcome of one generation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Paths written, or that would be written on a dry run.
    pub written: Vec<PathBuf>,
    /// Section titles that were not found in the README.
    pub skipped: Vec<String>,
}

pub struct DocsGenerator {
    config: SiteConfig,
    extractor: SectionExtractor,
    rewriter: LinkRewriter,
    dry_run: bool,
}

impl DocsGenerator {
    pub fn new(config: SiteConfig, dry_run: bool) -> Self {
        let rewriter = LinkRewriter::new(config.link_rewrites.clone());
        Self {
            config,
            extractor: SectionExtractor::new(),
            rewriter,
            dry_run,
        }
    }

    /// Builds every page in memory. Fails only when a required input is unreadable.
    pub fn build_pages(&self) -> Result<(Vec<Page>, Vec<String>), AppError> {
        let readme = read_input(&self.config.readme)?;
        tracing::debug!("Read {} ({} bytes)", self.config.readme.display(), readme.len());

        // Read every mandatory input before rendering anything.
        let mut prompt_sources = Vec::with_capacity(self.config.prompts.len());
        for prompt in &self.config.prompts {
            prompt_sources.push(read_input(&prompt.source)?);
        }

        let mut pages = Vec::new();

        for (prompt, content) in self.config.prompts.iter().zip(prompt_sources) {
            let body = LinkRewriter::new(prompt.rewrites.clone()).apply(&content);
            pages.push(Page::new(
                prompt.target.clone(),
                Prologue::page(&prompt.title, prompt.nav_order),
                body,
            ));
        }

        let index = &self.config.index;
        pages.push(Page::new(
            index.target.clone(),
            Prologue::new(&index.layout, &index.title, index.nav_order),
            self.rewriter.apply(&readme),
        ));

        let mut skipped = Vec::new();
        for section in &self.config.sections {
            match self.extractor.extract(&readme, &section.title)? {
                Some(ExtractedSection { title, content }) => {
                    pages.push(Page::new(
                        section.filename.clone(),
                        Prologue::page(&title, section.nav_order),
                        self.rewriter.apply(&content),
                    ));
                }
                None => {
                    tracing::info!(
                        "Section '{}' not found in README, skipping {}",
                        section.title,
                        section.filename.display()
                    );
                    skipped.push(section.title.clone());
                }
            }
        }

        Ok((pages, skipped))
    }

    /// Builds and writes all pages, plus the manifest when one is configured.
    pub fn run(&self) -> Result<GenerationReport, AppError> {
        let (pages, skipped) = self.build_pages()?;

        if self.dry_run {
            for page in &pages {
                tracing::info!(
                    "[dry run] would write {} ({} bytes)",
                    page.path.display(),
                    page.body.len()
                );
            }
            let mut written: Vec<PathBuf> = pages
                .iter()
                .map(|p| self.config.output_dir.join(&p.path))
                .collect();
            if let Some(name) = &self.config.manifest {
                written.push(self.config.output_dir.join(name));
            }
            return Ok(GenerationReport { written, skipped });
        }

        let writer = PageWriter::new(&self.config.output_dir)?;
        tracing::info!("Writing {} page(s) to {}", pages.len(), writer.base_dir().display());

        let mut written = Vec::with_capacity(pages.len() + 1);
        for page in &pages {
            written.push(writer.write_page(page)?);
        }

        if let Some(name) = &self.config.manifest {
            let entries: Vec<ManifestEntry> = pages.iter().map(ManifestEntry::for_page).collect();
            written.push(writer.write_manifest(name, &entries)?);
        }

        Ok(GenerationReport { written, skipped })
    }
}

fn read_input(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| {
        tracing::error!("Required input {} could not be read: {}", path.display(), source);
        AppError::Input {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PromptPage;
    use crate::rewrite::LinkRewrite;

    const README: &str = "# Backlog\n\nIntro with [prompt](./internal/mcp/prompt.md).\n\n\
## Installation\n\n```sh\ngo install\n```\n\n\
## Quick Start\n\nSee [config](./.backlog).\n\n\
## AI Agent Integration\n\nUse the [prompt](./internal/mcp/prompt.md).\n";

    const PROMPT: &str = "Use the backlog CLI. See (./.claude).\n";

    fn fixture(dir: &Path) -> SiteConfig {
        let readme = dir.join("README.md");
        let prompt = dir.join("prompt.md");
        fs::write(&readme, README).unwrap();
        fs::write(&prompt, PROMPT).unwrap();

        let mut config = SiteConfig::default();
        config.readme = readme;
        config.output_dir = dir.join("docs");
        config.prompts[0].source = prompt;
        config
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_generates_pages_and_skips_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture(dir.path());
        let docs = config.output_dir.clone();

        let report = DocsGenerator::new(config, false).run().unwrap();

        assert_eq!(report.skipped, vec!["Usage Examples".to_string()]);
        assert_eq!(report.written.len(), 5);
        assert!(!docs.join("usage-examples.md").exists());

        assert_eq!(
            read(docs.join("getting-started.md")),
            "---\nlayout: page\ntitle: Quick Start\nnav_order: 3\n---\n\n\
## Quick Start\n\nSee [config](https://github.com/veggiemonk/backlog/tree/main/.backlog)."
        );
        assert_eq!(
            read(docs.join("ai-integration.md")),
            "---\nlayout: page\ntitle: AI Agent Integration\nnav_order: 5\n---\n\n\
## AI Agent Integration\n\nUse the [prompt](prompts/mcp.md)."
        );
        assert!(read(docs.join("installation.md"))
            .ends_with("## Installation\n\n```sh\ngo install\n```"));
    }

    #[test]
    fn test_index_is_full_readme_with_rewrites() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture(dir.path());
        let docs = config.output_dir.clone();

        DocsGenerator::new(config, false).run().unwrap();

        let index = read(docs.join("index.md"));
        let expected_body = README
            .replace("(./internal/mcp/prompt.md)", "(prompts/mcp.md)")
            .replace("(./.backlog)", "(https://github.com/veggiemonk/backlog/tree/main/.backlog)");
        assert_eq!(
            index,
            format!("---\nlayout: home\ntitle: Home\nnav_order: 1\n---\n\n{}", expected_body)
        );
    }

    #[test]
    fn test_prompt_is_republished_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture(dir.path());
        let docs = config.output_dir.clone();

        DocsGenerator::new(config, false).run().unwrap();

        assert_eq!(
            read(docs.join("prompts").join("mcp.md")),
            format!(
                "---\nlayout: page\ntitle: Prompt to use Backlog CLI\nnav_order: 2\n---\n\n{}",
                PROMPT
            )
        );
    }

    #[test]
    fn test_index_layout_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fixture(dir.path());
        config.index.layout = "landing".to_string();
        let docs = config.output_dir.clone();

        DocsGenerator::new(config, false).run().unwrap();

        assert!(read(docs.join("index.md")).starts_with("---\nlayout: landing\ntitle: Home\n"));
    }

    #[test]
    fn test_prompt_specific_rewrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fixture(dir.path());
        config.prompts.push(PromptPage {
            source: config.prompts[0].source.clone(),
            target: PathBuf::from("prompts/AGENTS.md"),
            title: "AGENTS.md".to_string(),
            nav_order: Some(3),
            rewrites: vec![LinkRewrite::new("(./.claude)", "(../claude.md)")],
        });
        let docs = config.output_dir.clone();

        DocsGenerator::new(config, false).run().unwrap();

        assert!(read(docs.join("prompts").join("AGENTS.md")).ends_with("See (../claude.md).\n"));
    }

    #[test]
    fn test_missing_readme_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fixture(dir.path());
        config.readme = dir.path().join("MISSING.md");
        let docs = config.output_dir.clone();

        let err = DocsGenerator::new(config, false).run().unwrap_err();
        assert!(matches!(err, AppError::Input { ref path, .. } if path.ends_with("MISSING.md")));
        assert!(!docs.exists());
    }

    #[test]
    fn test_missing_prompt_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fixture(dir.path());
        config.prompts[0].source = dir.path().join("nope.md");
        let docs = config.output_dir.clone();

        let err = DocsGenerator::new(config, false).run().unwrap_err();
        assert!(matches!(err, AppError::Input { .. }));
        assert!(!docs.exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fixture(dir.path());
        config.manifest = Some(PathBuf::from("pages.json"));
        let docs = config.output_dir.clone();

        let report = DocsGenerator::new(config, true).run().unwrap();

        assert!(!docs.exists());
        assert_eq!(report.written.len(), 6);
        assert!(report.written.contains(&docs.join("index.md")));
        assert!(report.written.contains(&docs.join("pages.json")));
    }

    #[test]
    fn test_manifest_lists_written_pages() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fixture(dir.path());
        config.manifest = Some(PathBuf::from("pages.json"));
        let docs = config.output_dir.clone();

        DocsGenerator::new(config, false).run().unwrap();

        let manifest: serde_json::Value =
            serde_json::from_str(&read(docs.join("pages.json"))).unwrap();
        assert_eq!(manifest["page_count"], 5);
        let titles: Vec<&str> = manifest["pages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Prompt to use Backlog CLI",
                "Home",
                "Installation",
                "Quick Start",
                "AI Agent Integration",
            ]
        );
    }
}
