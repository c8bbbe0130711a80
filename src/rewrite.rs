// src/rewrite.rs
use serde::{Deserialize, Serialize};

/// One literal substring replacement, e.g. a repo-relative link to its site URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRewrite {
    pub from: String,
    pub to: String,
}

impl LinkRewrite {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Applies rewrites in order; each one sees the output of the previous.
#[derive(Debug, Clone, Default)]
pub struct LinkRewriter {
    rewrites: Vec<LinkRewrite>,
}

impl LinkRewriter {
    pub fn new(rewrites: Vec<LinkRewrite>) -> Self {
        Self { rewrites }
    }

    pub fn apply(&self, content: &str) -> String {
        let mut out = content.to_string();
        for rewrite in &self.rewrites {
            // An empty pattern would insert `to` between every character.
            if rewrite.from.is_empty() {
                continue;
            }
            let hits = out.matches(rewrite.from.as_str()).count();
            if hits > 0 {
                tracing::debug!(
                    "Rewriting {} occurrence(s) of '{}' -> '{}'",
                    hits,
                    rewrite.from,
                    rewrite.to
                );
                out = out.replace(rewrite.from.as_str(), &rewrite.to);
            }
        }
        out
    }
}
