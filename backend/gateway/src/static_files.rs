//! Browser client asset serving.
//!
//! Unknown paths fall back to `index.html` so the single-page client always loads.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

pub fn spa_service(public_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")))
}
