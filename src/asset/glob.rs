//! Source glob resolution.
//!
//! A pattern such as `src/scss/**/*.scss` splits into a literal base
//! (`src/scss`) and a matcher applied to root-relative `/` paths. Output
//! sub-paths are taken relative to the base.

use std::io;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::config::{PathPattern, PathsConfig};
use crate::core::Category;
use crate::utils::path::{relative_to, to_slash, walk_files};

/// Characters that start a glob component.
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// A source file found by a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path.
    pub path: PathBuf,
    /// Path relative to the pattern's base.
    pub rel: PathBuf,
}

/// A compiled category pattern bound to the project root.
#[derive(Debug, Clone)]
pub struct SourcePattern {
    root: PathBuf,
    base: PathBuf,
    dest: PathBuf,
    matcher: GlobMatcher,
}

impl SourcePattern {
    pub fn new(root: &Path, pattern: &PathPattern) -> Result<Self, globset::Error> {
        let matcher = GlobBuilder::new(&pattern.src)
            .literal_separator(true)
            .build()?
            .compile_matcher();

        Ok(Self {
            root: root.to_path_buf(),
            base: root.join(glob_base(&pattern.src)),
            dest: root.join(&pattern.dest),
            matcher,
        })
    }

    /// Absolute literal prefix of the glob.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Absolute destination directory.
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Whether an absolute path matches the glob. The file need not exist.
    pub fn matches(&self, path: &Path) -> bool {
        relative_to(path, &self.root).is_some_and(|rel| self.matcher.is_match(to_slash(&rel)))
    }

    /// Destination for a source file, keeping its sub-path.
    pub fn output_path(&self, file: &SourceFile) -> PathBuf {
        self.dest.join(&file.rel)
    }

    /// All matching files under the base, sorted by path.
    ///
    /// A missing base yields no files. Hidden entries are skipped.
    pub fn scan(&self) -> io::Result<Vec<SourceFile>> {
        if !self.base.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for path in walk_files(&self.base, true) {
            let path = path?;
            if !self.matches(&path) {
                continue;
            }
            if let Some(rel) = relative_to(&path, &self.base) {
                files.push(SourceFile { path, rel });
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}

/// Compiled patterns for all four categories.
#[derive(Debug, Clone)]
pub struct SourcePatterns {
    styles: SourcePattern,
    scripts: SourcePattern,
    images: SourcePattern,
    html: SourcePattern,
}

impl SourcePatterns {
    /// Compile every category; the error names the offending one.
    pub fn new(root: &Path, paths: &PathsConfig) -> Result<Self, (Category, globset::Error)> {
        let compile = |category: Category| {
            SourcePattern::new(root, paths.get(category)).map_err(|e| (category, e))
        };
        Ok(Self {
            styles: compile(Category::Styles)?,
            scripts: compile(Category::Scripts)?,
            images: compile(Category::Images)?,
            html: compile(Category::Html)?,
        })
    }

    pub fn get(&self, category: Category) -> &SourcePattern {
        match category {
            Category::Styles => &self.styles,
            Category::Scripts => &self.scripts,
            Category::Images => &self.images,
            Category::Html => &self.html,
        }
    }

    /// Categories whose glob matches `path`.
    pub fn classify(&self, path: &Path) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&c| self.get(c).matches(path))
            .collect()
    }

    /// Distinct glob bases, outermost first. Nested bases are dropped since
    /// their parent is watched recursively.
    pub fn bases(&self) -> Vec<PathBuf> {
        let mut bases: Vec<PathBuf> = Category::ALL
            .into_iter()
            .map(|c| self.get(c).base().to_path_buf())
            .collect();
        bases.sort_by_key(|b| b.components().count());
        let mut distinct: Vec<PathBuf> = Vec::new();
        for base in bases {
            if !distinct.iter().any(|d| base.starts_with(d)) {
                distinct.push(base);
            }
        }
        distinct
    }
}

/// Literal leading components of a glob.
///
/// A glob without wildcards names a single file, so its base is the parent.
pub fn glob_base(pattern: &str) -> PathBuf {
    let components: Vec<&str> = pattern.split('/').filter(|c| !c.is_empty()).collect();
    let literal = components
        .iter()
        .take_while(|c| !c.contains(GLOB_META))
        .count();

    let take = if literal == components.len() {
        literal.saturating_sub(1)
    } else {
        literal
    };

    components[..take].iter().collect()
}
