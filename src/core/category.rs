//! Asset categories.

use serde::{Deserialize, Serialize};

/// Logical asset category. Each one owns a source glob and a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Styles,
    Scripts,
    Images,
    Html,
}

impl Category {
    /// All categories in pipeline order.
    pub const ALL: [Self; 4] = [Self::Styles, Self::Scripts, Self::Images, Self::Html];

    /// Display name, also used as the log module prefix.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Styles => "styles",
            Self::Scripts => "scripts",
            Self::Images => "images",
            Self::Html => "html",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
