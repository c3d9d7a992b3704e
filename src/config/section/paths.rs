//! `[paths.*]` section configuration.
//!
//! One table per asset category. Both keys are required when a table is
//! present; omitted tables keep the default layout.
//!
//! # Example
//!
//! ```toml
//! [paths.styles]
//! src = "src/scss/**/*.scss"   # glob, relative to the project root
//! dest = "dist/css"            # output directory
//!
//! [paths.html]
//! src = "src/**/*.html"
//! dest = "dist"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::core::Category;

/// Source glob and destination directory of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathPattern {
    /// Source glob, `/`-separated, relative to the project root.
    pub src: String,
    /// Destination directory, relative to the project root.
    pub dest: PathBuf,
}

impl PathPattern {
    pub fn new(src: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }
}

/// Path patterns for all four categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub styles: PathPattern,
    pub scripts: PathPattern,
    pub images: PathPattern,
    pub html: PathPattern,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            styles: PathPattern::new("src/scss/**/*.scss", "dist/css"),
            scripts: PathPattern::new("src/js/**/*.js", "dist/js"),
            images: PathPattern::new("src/img/**/*", "dist/img"),
            html: PathPattern::new("src/**/*.html", "dist"),
        }
    }
}

impl PathsConfig {
    /// Pattern for a category.
    pub fn get(&self, category: Category) -> &PathPattern {
        match category {
            Category::Styles => &self.styles,
            Category::Scripts => &self.scripts,
            Category::Images => &self.images,
            Category::Html => &self.html,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut PathPattern {
        match category {
            Category::Styles => &mut self.styles,
            Category::Scripts => &mut self.scripts,
            Category::Images => &mut self.images,
            Category::Html => &mut self.html,
        }
    }

    /// Check glob syntax and relative paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for category in Category::ALL {
            let pattern = self.get(category);
            let field = format!("paths.{}", category.name());

            if pattern.src.trim().is_empty() {
                diag.error(format!("{field}.src"), "source glob is empty");
            } else if let Err(e) = globset::Glob::new(&pattern.src) {
                diag.error(format!("{field}.src"), format!("invalid glob: {e}"));
            } else if pattern.src.starts_with('/') {
                diag.error_with_hint(
                    format!("{field}.src"),
                    "source glob must be relative to the project root",
                    format!("use `{}`", pattern.src.trim_start_matches('/')),
                );
            }

            if pattern.dest.is_absolute() {
                diag.error(
                    format!("{field}.dest"),
                    "destination must be relative to the project root",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};
    use crate::core::Category;
    use std::path::Path;

    #[test]
    fn test_paths_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.paths.styles.src, "src/scss/**/*.scss");
        assert_eq!(config.paths.styles.dest, Path::new("dist/css"));
        assert_eq!(config.paths.scripts.src, "src/js/**/*.js");
        assert_eq!(config.paths.images.dest, Path::new("dist/img"));
        assert_eq!(config.paths.html.src, "src/**/*.html");
        assert_eq!(config.paths.html.dest, Path::new("dist"));
    }

    #[test]
    fn test_paths_override_one_category() {
        let config =
            test_parse_config("[paths.styles]\nsrc = \"assets/sass/**/*.scss\"\ndest = \"public/css\"");
        assert_eq!(config.paths.get(Category::Styles).src, "assets/sass/**/*.scss");
        assert_eq!(config.paths.get(Category::Styles).dest, Path::new("public/css"));
        // untouched categories keep defaults
        assert_eq!(config.paths.get(Category::Scripts).src, "src/js/**/*.js");
    }

    #[test]
    fn test_paths_invalid_glob() {
        let mut config = test_parse_config("");
        config.paths.scripts.src = "src/js/[*.js".into();
        let mut diag = ConfigDiagnostics::new();
        config.paths.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "paths.scripts.src");
    }

    #[test]
    fn test_paths_absolute_rejected() {
        let mut config = test_parse_config("");
        config.paths.images.src = "/src/img/**/*".into();
        config.paths.images.dest = "/var/www/img".into();
        let mut diag = ConfigDiagnostics::new();
        config.paths.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }
}
