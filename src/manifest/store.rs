//! On-disk manifest fragments.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::pipeline::PipelineError;

use super::{ManifestFragment, RevManifest};

/// Combined manifest name written by older setups; removed by clean.
pub const LEGACY_MANIFEST: &str = "rev-manifest.json";

/// Which fragment a build step owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Styles,
    Scripts,
}

/// Reads, merges and removes manifest fragments in the output directory.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    styles: PathBuf,
    scripts: PathBuf,
    legacy: PathBuf,
}

impl ManifestStore {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            styles: config.style_manifest_path(),
            scripts: config.script_manifest_path(),
            legacy: config.output_dir().join(LEGACY_MANIFEST),
        }
    }

    pub fn path(&self, kind: FragmentKind) -> &Path {
        match kind {
            FragmentKind::Styles => &self.styles,
            FragmentKind::Scripts => &self.scripts,
        }
    }

    /// Read a fragment. A missing file is an empty fragment.
    pub fn read_fragment(&self, kind: FragmentKind) -> Result<ManifestFragment, PipelineError> {
        let path = self.path(kind);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ManifestFragment::new());
            }
            Err(e) => return Err(PipelineError::io(path, e)),
        };
        serde_json::from_str(&content).map_err(|e| PipelineError::Manifest(path.to_path_buf(), e))
    }

    /// Merge `entries` into the stored fragment and write it back.
    ///
    /// Returns the merged fragment.
    pub fn merge_fragment(
        &self,
        kind: FragmentKind,
        entries: ManifestFragment,
    ) -> Result<ManifestFragment, PipelineError> {
        let mut fragment = self.read_fragment(kind)?;
        fragment.merge(entries);

        let path = self.path(kind);
        let mut json = serde_json::to_string_pretty(&fragment)
            .map_err(|e| PipelineError::Manifest(path.to_path_buf(), e))?;
        json.push('\n');

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| PipelineError::io(path, e))?;

        Ok(fragment)
    }

    /// Load both fragments as one lookup.
    pub fn load(&self) -> Result<RevManifest, PipelineError> {
        let styles = self.read_fragment(FragmentKind::Styles)?;
        let scripts = self.read_fragment(FragmentKind::Scripts)?;
        Ok(RevManifest::from_fragments(styles, scripts))
    }

    /// Every manifest file the store may own, for clean.
    pub fn files(&self) -> [&Path; 3] {
        [&self.styles, &self.scripts, &self.legacy]
    }
}
