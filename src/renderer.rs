//! Template rendering functionality for Kiln.
//! Expands `.templ` leaves with MiniJinja, exposing the project model as the
//! context and the fragment resolvers as template functions.
use std::sync::Arc;

use minijinja::{Environment, ErrorKind, UndefinedBehavior};

use crate::error::{Error, Result};
use crate::rules::{FragmentKind, FragmentTable};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Corpus path of the template, used in error messages
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates an engine without fragment resolvers.
    ///
    /// Undefined placeholders are errors. Block tags swallow their own line
    /// and trailing newlines are kept, so generated files end exactly like
    /// their templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        Self { env }
    }

    /// Creates an engine whose `database_migration` and `database_query`
    /// functions resolve against `fragments`.
    pub fn with_fragments(fragments: FragmentTable) -> Self {
        let mut renderer = Self::new();
        let fragments = Arc::new(fragments);
        for kind in [FragmentKind::Migration, FragmentKind::Query] {
            let fragments = Arc::clone(&fragments);
            renderer.env.add_function(
                kind.function_name(),
                move |file_name: String| -> std::result::Result<String, minijinja::Error> {
                    fragments
                        .resolve(kind, &file_name)
                        .map(str::to_string)
                        .map_err(|reason| minijinja::Error::new(ErrorKind::InvalidOperation, reason))
                },
            );
        }
        renderer
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateError` if:
    ///   - Template parsing fails
    ///   - A placeholder is undefined
    ///   - A fragment resolver fails
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env
            .render_str(template, context)
            .map_err(|source| Error::TemplateError { path: name.to_string(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_placeholders() {
        let engine = MiniJinjaRenderer::new();
        let context = serde_json::json!({"name": "acme", "auth": true});
        let result = engine
            .render("t", "module {{ name }}\n{% if auth %}\nauth\n{% endif %}\n", &context)
            .unwrap();
        assert_eq!(result, "module acme\nauth\n");
    }

    #[test]
    fn test_undefined_placeholder_is_error() {
        let engine = MiniJinjaRenderer::new();
        let err = engine.render("main.go.templ", "{{ nope }}", &serde_json::json!({})).unwrap_err();
        match err {
            Error::TemplateError { path, .. } => assert_eq!(path, "main.go.templ"),
            other => panic!("Expected TemplateError, got {other:?}"),
        }
    }

    #[test]
    fn test_fragment_functions() {
        let fragments = FragmentTable::from_entries(
            "sqlite3",
            [("00001_create_users.sql", "CREATE TABLE users (id INTEGER);\n")],
            [("users.sql", "-- name: GetUser :one\n")],
        );
        let engine = MiniJinjaRenderer::with_fragments(fragments);
        let result = engine
            .render(
                "t",
                "{{ database_migration(\"00001_create_users.sql\") }}{{ database_query(\"users.sql\") }}",
                &serde_json::json!({}),
            )
            .unwrap();
        assert_eq!(result, "CREATE TABLE users (id INTEGER);\n-- name: GetUser :one\n");
    }

    #[test]
    fn test_missing_fragment_is_template_error() {
        let fragments = FragmentTable::from_entries("mysql", [("a.sql", "")], [("b.sql", "")]);
        let engine = MiniJinjaRenderer::with_fragments(fragments);
        let err = engine
            .render("q.sql.templ", "{{ database_query(\"missing.sql\") }}", &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, Error::TemplateError { .. }));
        let message = err.to_string();
        assert!(message.contains("missing.sql"));
        assert!(message.contains("mysql"));
    }

    #[test]
    fn test_resolver_without_database_is_error() {
        let engine = MiniJinjaRenderer::with_fragments(FragmentTable::default());
        let result = engine.render("t", "{{ database_query(\"users.sql\") }}", &serde_json::json!({}));
        assert!(matches!(result, Err(Error::TemplateError { .. })));
    }
}
