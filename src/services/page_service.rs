use std::path::PathBuf;

use tokio::fs;

use crate::error::{Error, Result};

/// Loads pre-rendered HTML views from the templates directory.
#[derive(Clone)]
pub struct PageService {
    templates_dir: PathBuf,
}

impl PageService {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub async fn render(&self, view: &str) -> Result<String> {
        if view.is_empty() || !view.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(Error::BadRequest(format!("Invalid view name: {}", view)));
        }

        let path = self.templates_dir.join(format!("{}.html", view));
        match fs::read_to_string(&path).await {
            Ok(html) => Ok(html),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(format!("Template {} not found", view)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
