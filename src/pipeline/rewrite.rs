//! Rewrite asset references in HTML to revisioned names.
//!
//! Keys are tried longest first, and a key only matches where it is not
//! part of a longer file name: `myapp.min.css` is left alone by the key
//! `app.min.css`, while `css/app.min.css` and `"app.min.css?v=2"` are
//! rewritten.

use std::borrow::Cow;
use std::fs;

use regex::Regex;

use super::{Pipeline, PipelineError, TaskReport};
use crate::core::Category;
use crate::manifest::RevManifest;

/// Rewrites references using a loaded manifest.
pub struct Rewriter<'a> {
    manifest: &'a RevManifest,
    keys: Vec<&'a str>,
    pattern: Option<Regex>,
}

impl<'a> Rewriter<'a> {
    pub fn new(manifest: &'a RevManifest) -> Result<Self, regex::Error> {
        let keys = manifest.keys_longest_first();
        let pattern = if keys.is_empty() {
            None
        } else {
            let alternation = keys
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation)?)
        };
        Ok(Self {
            manifest,
            keys,
            pattern,
        })
    }

    /// Rewrite `text`, returning the result and the number of replacements.
    pub fn rewrite<'t>(&self, text: &'t str) -> (Cow<'t, str>, usize) {
        let Some(pattern) = &self.pattern else {
            return (Cow::Borrowed(text), 0);
        };

        let mut out = String::new();
        let mut last = 0;
        let mut pos = 0;
        let mut count = 0;

        while let Some(m) = pattern.find_at(text, pos) {
            let start = m.start();
            match self.key_at(text, start) {
                Some(key) => {
                    out.push_str(&text[last..start]);
                    out.push_str(self.manifest.get(key).unwrap_or(key));
                    last = start + key.len();
                    pos = last;
                    count += 1;
                }
                None => {
                    pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
                }
            }
            if pos >= text.len() {
                break;
            }
        }

        if count == 0 {
            return (Cow::Borrowed(text), 0);
        }
        out.push_str(&text[last..]);
        (Cow::Owned(out), count)
    }

    /// Longest key starting at `start` with name boundaries on both sides.
    fn key_at(&self, text: &str, start: usize) -> Option<&'a str> {
        let before = text[..start].chars().next_back();
        if before.is_some_and(is_name_char) {
            return None;
        }
        let rest = &text[start..];
        self.keys.iter().copied().find(|key| {
            rest.starts_with(key) && !rest[key.len()..].chars().next().is_some_and(is_name_char)
        })
    }
}

/// Characters that can continue a file name.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

impl Pipeline {
    /// Load the manifest and rewrite every HTML source into the output.
    pub fn rewrite(&self) -> Result<TaskReport, PipelineError> {
        let manifest = self.manifests.load()?;
        self.rewrite_with(&manifest)
    }

    /// Rewrite HTML sources using an already loaded manifest.
    pub fn rewrite_with(&self, manifest: &RevManifest) -> Result<TaskReport, PipelineError> {
        let rewriter = Rewriter::new(manifest)?;
        let pattern = self.patterns.get(Category::Html);
        let mut report = TaskReport::default();
        let mut replaced = 0;

        for file in self.scan(Category::Html)? {
            let html =
                fs::read_to_string(&file.path).map_err(|e| PipelineError::io(&file.path, e))?;
            let (html, count) = rewriter.rewrite(&html);
            replaced += count;

            let output = pattern.output_path(&file);
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
            }
            fs::write(&output, html.as_bytes()).map_err(|e| PipelineError::io(&output, e))?;
            report.written += 1;
        }

        crate::log!("rewrite"; "{} ({} references)", report, replaced);
        if let Some(reload) = &self.reload {
            reload.reload("html rewritten");
        }
        Ok(report)
    }
}
