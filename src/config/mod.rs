//! Pipeline configuration management for `assetrev.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── paths      # [paths.styles|scripts|images|html]
//! │   ├── build      # [build]
//! │   └── serve      # [serve]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # PipelineConfig (this file)
//! ```
//!
//! The file is optional. Without it every section keeps its defaults and
//! the current directory is the project root.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildConfig, PathPattern, PathsConfig, ServeConfig};
pub use types::{ConfigDiagnostics, ConfigError};

use crate::{
    cli::{BuildArgs, Cli, Commands, ServeArgs},
    core::Category,
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "assetrev.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing assetrev.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Source globs and destinations
    pub paths: PathsConfig,

    /// Output, naming and manifest settings
    pub build: BuildConfig,

    /// Preview server settings
    pub serve: ServeConfig,
}

impl PipelineConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when no file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let config_path = match &cli.config {
            Some(explicit) => {
                let path = find_config_file(&cwd, explicit)
                    .ok_or_else(|| ConfigError::NotFound(explicit.clone()))?;
                Some(path)
            }
            None => find_config_file(&cwd, Path::new(CONFIG_FILE)),
        };

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => {
                crate::debug!("config"; "no {} found, using defaults", CONFIG_FILE);
                Self::default()
            }
        };

        let root = config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or(cwd);

        config.config_path = config_path;
        config.finalize(cli, &root);
        config.validate()?;

        Ok(config)
    }

    /// Build a configuration rooted at `root` with default sections.
    #[cfg(test)]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli, root: &Path) {
        crate::logger::set_verbose(cli.verbose);
        self.root = crate::utils::path::normalize_path(root);
        self.config_path = self
            .config_path
            .take()
            .map(|p| crate::utils::path::normalize_path(&p));

        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Watch {
                build_args,
                serve_args,
            } => {
                self.apply_build_args(build_args);
                self.apply_serve_args(serve_args);
            }
            Commands::Serve { serve_args } => self.apply_serve_args(serve_args),
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        if let Some(output) = &args.output {
            self.relocate_output(output);
        }
    }

    /// Move the output root, carrying along every destination inside it.
    fn relocate_output(&mut self, output: &Path) {
        let previous = std::mem::replace(&mut self.build.output, output.to_path_buf());
        for category in Category::ALL {
            let dest = &mut self.paths.get_mut(category).dest;
            if let Ok(rest) = dest.strip_prefix(&previous) {
                *dest = output.join(rest);
            }
        }
    }

    /// Apply serve-specific options.
    fn apply_serve_args(&mut self, args: &ServeArgs) {
        Self::update_option(&mut self.serve.interface, args.interface.as_ref());
        Self::update_option(&mut self.serve.port, args.port.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path helpers
    // ========================================================================

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Absolute output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root_join(&self.build.output)
    }

    /// Absolute path of the style manifest fragment.
    pub fn style_manifest_path(&self) -> PathBuf {
        self.output_dir().join(&self.build.style_manifest)
    }

    /// Absolute path of the script manifest fragment.
    pub fn script_manifest_path(&self) -> PathBuf {
        self.output_dir().join(&self.build.script_manifest)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.paths.validate(&mut diag);
        self.build.validate(&mut diag);
        self.serve.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PipelineConfig {
    let (parsed, ignored) = PipelineConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
