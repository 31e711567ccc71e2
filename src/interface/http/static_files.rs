//! 빌드된 SPA 번들 정적 서빙.
//! 일치하는 파일이 없으면 `index.html`을 200으로 돌려준다.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

pub const INDEX_DOCUMENT: &str = "index.html";

pub type SpaService = ServeDir<ServeFile>;

pub fn spa_service(static_dir: &Path) -> SpaService {
    ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join(INDEX_DOCUMENT)))
}
