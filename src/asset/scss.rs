//! SCSS compilation via grass.

use std::path::Path;

/// Whether a stylesheet is an import-only partial (`_name.scss`).
pub fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('_'))
}

/// Compile a stylesheet file to CSS.
///
/// Imports resolve relative to the file. The error message is grass's
/// formatted diagnostic, ready to log.
pub fn compile(path: &Path) -> Result<String, String> {
    let options = grass::Options::default().style(grass::OutputStyle::Expanded);
    grass::from_path(path, &options).map_err(|e| e.to_string())
}
