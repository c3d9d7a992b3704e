//! Asset minification for JS and CSS files.
//!
//! Uses oxc for JavaScript and lightningcss for CSS.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

/// Minify JavaScript source code.
///
/// Classic scripts are tried first so top-level names stay global; sources
/// using `import`/`export` fall back to module parsing. Returns `None` when
/// neither parse succeeds.
pub fn minify_js(source: &str) -> Option<String> {
    minify_js_as(source, SourceType::script()).or_else(|| minify_js_as(source, SourceType::mjs()))
}

fn minify_js_as(source: &str, source_type: SourceType) -> Option<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() || ret.panicked {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

/// First parse error of a script, for logging.
pub fn js_parse_error(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::mjs()).parse();
    ret.errors.first().map(|e| e.to_string())
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_css() {
        let out = minify_css("body {\n  color: #ff0000;\n  margin: 0px;\n}\n").unwrap();
        assert!(!out.contains('\n'));
        assert!(out.starts_with("body{"));
        assert!(out.len() < 30);
    }

    #[test]
    fn test_minify_js_classic_script() {
        let source = "function greet(name) {\n  return 'hi ' + name;\n}\n";
        let out = minify_js(source).unwrap();
        assert!(out.contains("greet"));
        assert!(out.len() < source.len());
    }

    #[test]
    fn test_minify_js_keeps_unused_globals() {
        let source = "var config = {debug: true};\nfunction onClickBuy(id) { return id * 2; }\n";
        let out = minify_js(source).unwrap();
        assert!(out.contains("config"));
        assert!(out.contains("onClickBuy"));
    }

    #[test]
    fn test_minify_js_module() {
        let out = minify_js("import { a } from './a.js';\nexport const b = a + 1;\n").unwrap();
        assert!(out.contains("./a.js"));
    }

    #[test]
    fn test_minify_js_parse_error() {
        assert!(minify_js("function (").is_none());
        assert!(js_parse_error("function (").is_some());
        assert!(js_parse_error("let x = 1;").is_none());
    }
}
