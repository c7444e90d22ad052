//! View composition: a base layout wrapping a page that pulls in partials.

use crate::config::Config;
use crate::error::AppError;
use crate::models::view::TemplateData;
use std::path::Path;
use tera::{Context, Tera};

/// View listing the latest snippets.
pub const HOME_VIEW: &str = "home";
/// View showing a single snippet.
pub const SHOW_VIEW: &str = "show";

const LAYOUT_TEMPLATE: &str = "base.layout.html";
const FOOTER_TEMPLATE: &str = "footer.partial.html";
const HOME_TEMPLATE: &str = "home.page.html";
const SHOW_TEMPLATE: &str = "show.page.html";

const REQUIRED_TEMPLATES: [&str; 4] = [LAYOUT_TEMPLATE, FOOTER_TEMPLATE, HOME_TEMPLATE, SHOW_TEMPLATE];

const EMBEDDED_TEMPLATES: [(&str, &str); 4] = [
    (LAYOUT_TEMPLATE, include_str!("../templates/base.layout.html")),
    (FOOTER_TEMPLATE, include_str!("../templates/footer.partial.html")),
    (HOME_TEMPLATE, include_str!("../templates/home.page.html")),
    (SHOW_TEMPLATE, include_str!("../templates/show.page.html")),
];

/// Turns a named view and its data into a complete document.
///
/// Implementations must be all-or-nothing: either the full output is
/// returned or an error, never a prefix of the document.
pub trait Renderer: Send + Sync {
    /// # Errors
    /// [`AppError::Internal`] for an unknown view name, [`AppError::Render`]
    /// when composition or data binding fails.
    fn render(&self, view: &str, data: &TemplateData) -> Result<Vec<u8>, AppError>;
}

/// [`Renderer`] backed by tera templates.
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Use the templates compiled into the binary.
    ///
    /// # Errors
    /// Returns [`AppError::Render`] if an embedded template fails to parse.
    pub fn embedded() -> Result<Self, AppError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(EMBEDDED_TEMPLATES)?;
        Self::from_tera(tera)
    }

    /// Load every `*.html` file in `dir`.
    ///
    /// # Errors
    /// Returns an error if a template fails to parse or a required fragment
    /// is missing from the directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let pattern = dir.as_ref().join("*.html");
        let pattern = pattern.to_str().ok_or_else(|| {
            AppError::Internal(format!(
                "Template directory '{}' is not valid UTF-8",
                dir.as_ref().display()
            ))
        })?;
        Self::from_tera(Tera::new(pattern)?)
    }

    /// Pick embedded or on-disk templates based on `TEMPLATE_DIR`.
    ///
    /// # Errors
    /// See [`TeraRenderer::embedded`] and [`TeraRenderer::from_dir`].
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        match config.template_dir.as_deref() {
            Some(dir) => {
                tracing::info!("Loading templates from {}", dir);
                Self::from_dir(dir)
            }
            None => Self::embedded(),
        }
    }

    fn from_tera(tera: Tera) -> Result<Self, AppError> {
        let loaded: Vec<&str> = tera.get_template_names().collect();
        let missing: Vec<&str> = REQUIRED_TEMPLATES
            .into_iter()
            .filter(|name| !loaded.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Internal(format!(
                "Missing required templates: {}",
                missing.join(", ")
            )));
        }
        Ok(Self { tera })
    }

    fn page_template(view: &str) -> Option<&'static str> {
        match view {
            HOME_VIEW => Some(HOME_TEMPLATE),
            SHOW_VIEW => Some(SHOW_TEMPLATE),
            _ => None,
        }
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, view: &str, data: &TemplateData) -> Result<Vec<u8>, AppError> {
        let template = Self::page_template(view)
            .ok_or_else(|| AppError::Internal(format!("Unknown view '{}'", view)))?;
        let context = Context::from_serialize(data)?;
        // tera renders into its own buffer, so a failure never leaks partial output
        let html = self.tera.render(template, &context)?;
        Ok(html.into_bytes())
    }
}
