pub mod render;

use crate::config::site::SiteConfig;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

pub use render::{render_page, SECTIONS};

pub const INDEX_FILE: &str = "index.html";

/// Renders the landing page and writes it as `index.html`. Returns the written file name.
pub async fn publish<S: Storage>(storage: &S, site: &SiteConfig) -> Result<&'static str> {
    let html = render_page(site);
    tracing::debug!("Writing {} ({} bytes) to storage", INDEX_FILE, html.len());
    storage.write_file(INDEX_FILE, html.as_bytes()).await?;
    Ok(INDEX_FILE)
}
