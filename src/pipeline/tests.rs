use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use super::{Pipeline, Step};
use crate::config::PipelineConfig;
use crate::core::Category;
use crate::manifest::{FragmentKind, ManifestStore};
use crate::pipeline::sequence::sequence_for;
use crate::utils::path::normalize_path;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> (TempDir, Pipeline) {
    let temp = TempDir::new().unwrap();
    let root = normalize_path(temp.path());
    let pipeline = Pipeline::new(Arc::new(PipelineConfig::with_root(root))).unwrap();
    (temp, pipeline)
}

fn root(pipeline: &Pipeline) -> PathBuf {
    pipeline.config().root.clone()
}

fn list(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn seed_sources(root: &Path) {
    write(root, "src/scss/_vars.scss", "$fg: #222;");
    write(root, "src/scss/app.scss", "@import 'vars';\nbody { color: $fg; }");
    write(root, "src/scss/pages/about.scss", ".about { margin: 0 auto; }");
    write(root, "src/js/app.js", "function start() {\n  console.log('ready');\n}\nstart();\n");
    write(root, "src/img/logo.png", "not really a png");
    write(root, "src/img/icons/star.svg", "<svg/>");
    write(
        root,
        "src/index.html",
        "<link rel=\"stylesheet\" href=\"css/app.min.css\">\n<script src=\"js/app.min.js\"></script>\n<img src=\"img/logo.png\">\n",
    );
}

#[test]
fn test_build_outputs_and_manifests() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    seed_sources(&root);

    pipeline.build().unwrap();

    let css = list(&root.join("dist/css"));
    assert_eq!(css.len(), 2, "{css:?}");
    assert!(css.iter().any(|n| n.starts_with("app.min-") && n.ends_with(".css")));
    assert!(css.contains(&"pages".to_string()));
    assert_eq!(list(&root.join("dist/css/pages")).len(), 1);

    let store = ManifestStore::new(pipeline.config());
    let styles = store.read_fragment(FragmentKind::Styles).unwrap();
    assert_eq!(styles.len(), 2);
    let app_css = styles.get("app.min.css").unwrap();
    assert!(root.join("dist/css").join(app_css).is_file());
    assert!(styles.get("pages/about.min.css").unwrap().starts_with("pages/about.min-"));

    let scripts = store.read_fragment(FragmentKind::Scripts).unwrap();
    assert_eq!(scripts.len(), 1);
    let app_js = scripts.get("app.min.js").unwrap();
    let js = fs::read_to_string(root.join("dist/js").join(app_js)).unwrap();
    assert!(js.contains("ready"));

    assert!(root.join("dist/img/logo.png").is_file());
    assert!(root.join("dist/img/icons/star.svg").is_file());

    let html = fs::read_to_string(root.join("dist/index.html")).unwrap();
    assert!(html.contains(&format!("css/{app_css}")));
    assert!(html.contains(&format!("js/{app_js}")));
    assert!(!html.contains("css/app.min.css\""));
    assert!(html.contains("img/logo.png"));
}

#[test]
fn test_build_on_single_thread_pool() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    seed_sources(&root);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
    pool.install(|| pipeline.build()).unwrap();

    assert_eq!(list(&root.join("dist/css")).len(), 2);
    assert_eq!(list(&root.join("dist/js")).len(), 1);
    assert_eq!(list(&root.join("dist/img")), vec!["icons", "logo.png"]);
}

#[test]
fn test_bad_stylesheet_is_skipped() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    write(&root, "src/scss/app.scss", "body { color: red;");
    write(&root, "src/scss/ok.scss", "p { margin: 0; }");

    pipeline.build().unwrap();

    let css = list(&root.join("dist/css"));
    assert_eq!(css.len(), 1, "{css:?}");
    assert!(css[0].starts_with("ok.min-") && css[0].ends_with(".css"));

    let report = pipeline.styles().unwrap();
    assert_eq!((report.written, report.failed), (1, 1));
}

#[test]
fn test_bad_script_is_skipped() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    write(&root, "src/js/broken.js", "function (");
    write(&root, "src/js/ok.js", "var a = 1;");

    let report = pipeline.scripts().unwrap();
    assert_eq!((report.written, report.failed), (1, 1));
    let js = list(&root.join("dist/js"));
    assert_eq!(js.len(), 1);
    assert!(js[0].starts_with("ok.min-"));
}

#[test]
fn test_empty_image_dir() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    fs::create_dir_all(root.join("src/img")).unwrap();

    assert_eq!(pipeline.images().unwrap().written, 0);
    pipeline.build().unwrap();
    assert!(list(&root.join("dist/img")).is_empty());
}

#[test]
fn test_clean_after_build() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    seed_sources(&root);
    pipeline.build().unwrap();
    write(&root, "dist/rev-manifest.json", "{}");
    write(&root, "dist/nested/page.html", "<p>stale</p>");
    write(&root, "dist/robots.txt", "User-agent: *");

    pipeline.clean().unwrap();

    assert!(list(&root.join("dist/css")).is_empty());
    assert!(list(&root.join("dist/js")).is_empty());
    assert!(list(&root.join("dist/img")).is_empty());
    assert!(!root.join("dist/index.html").exists());
    assert!(!root.join("dist/nested/page.html").exists());
    assert!(!root.join("dist/rev-manifest-css.json").exists());
    assert!(!root.join("dist/rev-manifest-js.json").exists());
    assert!(!root.join("dist/rev-manifest.json").exists());
    assert!(root.join("dist/robots.txt").exists());

    // idempotent
    assert_eq!(pipeline.clean().unwrap().written, 0);
}

#[test]
fn test_clean_without_output() {
    let (_temp, pipeline) = project();
    assert_eq!(pipeline.clean().unwrap().written, 0);
}

#[test]
fn test_build_is_idempotent() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    seed_sources(&root);

    pipeline.build().unwrap();
    let css_manifest = fs::read(root.join("dist/rev-manifest-css.json")).unwrap();
    let js_manifest = fs::read(root.join("dist/rev-manifest-js.json")).unwrap();
    let css = list(&root.join("dist/css"));
    let html = fs::read(root.join("dist/index.html")).unwrap();

    pipeline.build().unwrap();
    assert_eq!(fs::read(root.join("dist/rev-manifest-css.json")).unwrap(), css_manifest);
    assert_eq!(fs::read(root.join("dist/rev-manifest-js.json")).unwrap(), js_manifest);
    assert_eq!(list(&root.join("dist/css")), css);
    assert_eq!(fs::read(root.join("dist/index.html")).unwrap(), html);
}

#[test]
fn test_unresolved_reference_is_byte_identical() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    let source = "<script src=\"js/vendor.min.js\"></script>\n<link href=\"css/missing.min.css\">\n";
    write(&root, "src/pages/index.html", source);
    write(&root, "src/js/app.js", "var x = 1;");

    pipeline.build().unwrap();
    assert_eq!(
        fs::read_to_string(root.join("dist/pages/index.html")).unwrap(),
        source
    );
}

#[test]
fn test_rewrite_without_manifests() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    write(&root, "src/index.html", "<link href=\"css/app.min.css\">");

    let report = pipeline.rewrite().unwrap();
    assert_eq!(report.written, 1);
    assert_eq!(
        fs::read_to_string(root.join("dist/index.html")).unwrap(),
        "<link href=\"css/app.min.css\">"
    );
}

#[test]
fn test_malformed_manifest_halts_rewrite() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    write(&root, "src/index.html", "<p></p>");
    write(&root, "dist/rev-manifest-js.json", "[1, 2");

    assert!(pipeline.rewrite().is_err());
    assert!(!root.join("dist/index.html").exists());
}

#[test]
fn test_style_sequence_rebuilds_sibling() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    seed_sources(&root);
    pipeline.build().unwrap();

    write(&root, "src/scss/app.scss", "body { color: blue; }");
    pipeline.run_sequence(sequence_for(Category::Styles)).unwrap();

    let store = ManifestStore::new(pipeline.config());
    let manifest = store.load().unwrap();
    assert!(manifest.get("app.min.js").is_some());
    let app_css = manifest.get("app.min.css").unwrap();
    let html = fs::read_to_string(root.join("dist/index.html")).unwrap();
    assert!(html.contains(app_css));
    // exactly one app stylesheet after clean + rebuild
    let app_outputs = list(&root.join("dist/css"))
        .into_iter()
        .filter(|n| n.starts_with("app.min-"))
        .count();
    assert_eq!(app_outputs, 1);
}

#[test]
fn test_sequence_halts_on_failure() {
    let (_temp, pipeline) = project();
    let root = root(&pipeline);
    write(&root, "src/index.html", "<p></p>");
    write(&root, "dist/rev-manifest-css.json", "nope");

    // rewrite fails, so no HTML is produced and the sequence reports it
    assert!(pipeline.run_sequence(&[Step::Rewrite, Step::Reload]).is_err());
    assert!(!root.join("dist/index.html").exists());
}

#[test]
fn test_minify_disabled_keeps_source() {
    let temp = TempDir::new().unwrap();
    let mut config = PipelineConfig::with_root(normalize_path(temp.path()));
    config.build.minify = false;
    let root = config.root.clone();
    let pipeline = Pipeline::new(Arc::new(config)).unwrap();

    let source = "var answer = 42; // keep me\n";
    write(&root, "src/js/app.js", source);
    pipeline.scripts().unwrap();

    let js = list(&root.join("dist/js"));
    assert_eq!(js.len(), 1);
    assert_eq!(fs::read_to_string(root.join("dist/js").join(&js[0])).unwrap(), source);
}
