//! Template types for typed variable injection.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// A script template served from memory at a fixed URL.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedScript<V> {
    url: &'static str,
    template: Template<V>,
}

impl<V> EmbeddedScript<V> {
    pub const fn new(url: &'static str, content: &'static str) -> Self {
        Self {
            url,
            template: Template::new(content),
        }
    }

    pub const fn url_path(&self) -> &'static str {
        self.url
    }

    /// `<script src>` tag pointing at [`Self::url_path`].
    pub fn external_tag(&self) -> String {
        format!(r#"<script src="{}"></script>"#, self.url)
    }
}

impl<V: TemplateVars> EmbeddedScript<V> {
    pub fn render(&self, vars: &V) -> String {
        self.template.render(vars)
    }
}
