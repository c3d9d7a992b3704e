//! Ordered task sequences triggered by source changes.
//!
//! | Changed  | Sequence                                       |
//! |----------|------------------------------------------------|
//! | styles   | clean → styles → scripts → rewrite → reload    |
//! | scripts  | clean → scripts → styles → rewrite → reload    |
//! | images   | images → rewrite → reload                      |
//! | html     | rewrite → reload                               |
//!
//! Styles and scripts are rebuilt together because clean wipes both
//! manifest fragments.

use crate::core::Category;

/// A single pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Clean,
    Styles,
    Scripts,
    Images,
    Rewrite,
    Reload,
}

impl Step {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Styles => "styles",
            Self::Scripts => "scripts",
            Self::Images => "images",
            Self::Rewrite => "rewrite",
            Self::Reload => "reload",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The sequence a change in `category` triggers.
pub const fn sequence_for(category: Category) -> &'static [Step] {
    use Step::*;
    match category {
        Category::Styles => &[Clean, Styles, Scripts, Rewrite, Reload],
        Category::Scripts => &[Clean, Scripts, Styles, Rewrite, Reload],
        Category::Images => &[Images, Rewrite, Reload],
        Category::Html => &[Rewrite, Reload],
    }
}

/// Reduce a batch of changed categories to the sequences that cover it.
///
/// Categories are visited in pipeline order; one whose steps are all part of
/// an already planned sequence adds nothing.
pub fn plan(categories: &[Category]) -> Vec<&'static [Step]> {
    let mut categories = categories.to_vec();
    categories.sort();
    categories.dedup();

    let mut covered: Vec<Step> = Vec::new();
    let mut planned = Vec::new();

    for category in categories {
        let sequence = sequence_for(category);
        if sequence.iter().all(|step| covered.contains(step)) {
            continue;
        }
        covered.extend_from_slice(sequence);
        planned.push(sequence);
    }

    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use Step::*;

    #[test]
    fn test_single_category_sequences() {
        assert_eq!(
            plan(&[Category::Styles]),
            vec![&[Clean, Styles, Scripts, Rewrite, Reload][..]]
        );
        assert_eq!(
            plan(&[Category::Scripts]),
            vec![&[Clean, Scripts, Styles, Rewrite, Reload][..]]
        );
        assert_eq!(plan(&[Category::Images]), vec![&[Images, Rewrite, Reload][..]]);
        assert_eq!(plan(&[Category::Html]), vec![&[Rewrite, Reload][..]]);
    }

    #[test]
    fn test_styles_covers_scripts_and_html() {
        let planned = plan(&[Category::Html, Category::Scripts, Category::Styles]);
        assert_eq!(planned, vec![sequence_for(Category::Styles)]);
    }

    #[test]
    fn test_images_covers_html() {
        let planned = plan(&[Category::Html, Category::Images]);
        assert_eq!(planned, vec![sequence_for(Category::Images)]);
    }

    #[test]
    fn test_styles_and_images_both_run() {
        let planned = plan(&[Category::Images, Category::Styles, Category::Images]);
        assert_eq!(
            planned,
            vec![sequence_for(Category::Styles), sequence_for(Category::Images)]
        );
    }

    #[test]
    fn test_empty_batch() {
        assert!(plan(&[]).is_empty());
    }
}
