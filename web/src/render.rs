use std::path::Path;
use std::{fs, io};

use log::*;
use service::config::Config;

/// Marker in the page shell that the content fragment replaces.
pub const BODY_PLACEHOLDER: &str = "[BODY]";

const DEFAULT_TEMPLATE: &str = include_str!("../templates/page.html");

/// Static HTML document every page is rendered into.
#[derive(Clone, Debug)]
pub struct PageShell {
    template: String,
}

impl PageShell {
    pub fn new(template: String) -> Self {
        if !template.contains(BODY_PLACEHOLDER) {
            warn!("Page template has no {BODY_PLACEHOLDER} placeholder, content will not be shown");
        }
        Self { template }
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        info!("Loading page template from {}", path.display());
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// The configured template, or the built-in one.
    pub fn from_config(config: &Config) -> io::Result<Self> {
        match config.page_template() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Full document with `fragment` in place of the first placeholder.
    pub fn render(&self, fragment: &str) -> String {
        self.template.replacen(BODY_PLACEHOLDER, fragment, 1)
    }
}

impl Default for PageShell {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE.to_string())
    }
}
