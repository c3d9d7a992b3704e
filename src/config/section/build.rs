//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"                         # generated tree root
//! suffix = ".min"                         # app.css -> app.min.css
//! hash_length = 10                        # app.min.css -> app.min-0123456789.css
//! minify = true
//! style_manifest = "rev-manifest-css.json"
//! script_manifest = "rev-manifest-js.json"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Allowed range for `hash_length` (blake3 hex is 64 chars). The reload
/// client recognises revisioned stylesheets by the same range.
const HASH_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 4..=64;

/// Build settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Root of the generated tree; `*.html` under it is owned by the pipeline.
    pub output: PathBuf,

    /// Suffix appended to the file stem before revisioning.
    pub suffix: String,

    /// Number of hex characters of the content hash in file names.
    pub hash_length: usize,

    /// Minify styles and scripts.
    pub minify: bool,

    /// Style manifest fragment file name, inside `output`.
    pub style_manifest: String,

    /// Script manifest fragment file name, inside `output`.
    pub script_manifest: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dist"),
            suffix: ".min".into(),
            hash_length: 10,
            minify: true,
            style_manifest: "rev-manifest-css.json".into(),
            script_manifest: "rev-manifest-js.json".into(),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !HASH_LENGTH_RANGE.contains(&self.hash_length) {
            diag.error(
                "build.hash_length",
                format!(
                    "must be between {} and {}, got {}",
                    HASH_LENGTH_RANGE.start(),
                    HASH_LENGTH_RANGE.end(),
                    self.hash_length
                ),
            );
        }

        if self.suffix.contains(['/', '\\']) {
            diag.error_with_hint(
                "build.suffix",
                "suffix must not contain a path separator",
                "use something like `.min`",
            );
        }

        for (field, name) in [
            ("build.style_manifest", &self.style_manifest),
            ("build.script_manifest", &self.script_manifest),
        ] {
            if name.is_empty() || name.contains(['/', '\\']) {
                diag.error(field, "must be a plain file name");
            }
        }

        if self.style_manifest == self.script_manifest {
            diag.error_with_hint(
                "build.script_manifest",
                "style and script manifests must be different files",
                "keep the defaults `rev-manifest-css.json` and `rev-manifest-js.json`",
            );
        }

        if self.output.is_absolute() {
            diag.error("build.output", "output must be relative to the project root");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};
    use std::path::Path;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.output, Path::new("dist"));
        assert_eq!(config.build.suffix, ".min");
        assert_eq!(config.build.hash_length, 10);
        assert!(config.build.minify);
        assert_eq!(config.build.style_manifest, "rev-manifest-css.json");
        assert_eq!(config.build.script_manifest, "rev-manifest-js.json");
    }

    #[test]
    fn test_build_partial_override() {
        let config = test_parse_config("[build]\nhash_length = 8\nminify = false");
        assert_eq!(config.build.hash_length, 8);
        assert!(!config.build.minify);
        assert_eq!(config.build.suffix, ".min");
    }

    #[test]
    fn test_build_validate_errors() {
        let config = test_parse_config(
            "[build]\nhash_length = 100\nsuffix = \"/min\"\nscript_manifest = \"rev-manifest-css.json\"",
        );
        let mut diag = ConfigDiagnostics::new();
        config.build.validate(&mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["build.hash_length", "build.suffix", "build.script_manifest"]
        );
    }

    #[test]
    fn test_build_validate_defaults_ok() {
        let config = test_parse_config("");
        let mut diag = ConfigDiagnostics::new();
        config.build.validate(&mut diag);
        assert!(diag.is_empty());
    }
}
