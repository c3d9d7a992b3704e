//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `serve` - Preview server resources (hotreload.js)
//!
//! # Usage
//!
//! ```ignore
//! use embed::serve::{HOTRELOAD_JS, HotreloadVars};
//!
//! let js = HOTRELOAD_JS.render(&HotreloadVars { ws_port: 35729 });
//! let tag = HOTRELOAD_JS.external_tag();
//! ```

mod template;

pub use template::{EmbeddedScript, TemplateVars};

pub mod serve {
    use super::{EmbeddedScript, TemplateVars};

    /// Variables for hotreload.js.
    pub struct HotreloadVars {
        pub ws_port: u16,
    }

    impl TemplateVars for HotreloadVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__ASSETREV_WS_PORT__", &self.ws_port.to_string())
        }
    }

    /// Live reload client with WebSocket port injection.
    pub const HOTRELOAD_JS: EmbeddedScript<HotreloadVars> = EmbeddedScript::new(
        "/__assetrev/hotreload.js",
        include_str!(concat!(env!("OUT_DIR"), "/hotreload.min.js")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotreload_js_with_vars() {
        let vars = serve::HotreloadVars { ws_port: 35729 };
        let rendered = serve::HOTRELOAD_JS.render(&vars);
        assert!(rendered.contains("35729"));
        assert!(!rendered.contains("__ASSETREV_WS_PORT__"));
    }

    #[test]
    fn test_hotreload_js_leaves_revisioned_stylesheets() {
        let rendered = serve::HOTRELOAD_JS.render(&serve::HotreloadVars { ws_port: 1 });
        assert!(rendered.contains(r"/-[0-9a-f]{4,64}\.css$/"));
        assert!(rendered.contains("pathname"));
    }

    #[test]
    fn test_hotreload_tag() {
        assert_eq!(
            serve::HOTRELOAD_JS.external_tag(),
            r#"<script src="/__assetrev/hotreload.js"></script>"#
        );
        assert_eq!(serve::HOTRELOAD_JS.url_path(), "/__assetrev/hotreload.js");
    }
}
