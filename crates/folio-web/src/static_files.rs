use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serves the built front end from `dir`. Paths that match no file get
/// `index.html` so client-side routes (`/admin`, `/game`) load the app.
pub fn spa_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
