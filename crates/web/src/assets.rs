use std::path::{Path, PathBuf};

pub const DEFAULT_STATIC_DIR: &str = "Public";
const ASSET_PREFIX: &str = "/imgs/";

/// Map a request url onto a file under `root`. Only `/imgs/...` is served;
/// parent segments, backslashes and escaped bytes are refused.
pub fn asset_path(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split('?').next().unwrap_or_default();
    let rest = path.strip_prefix(ASSET_PREFIX)?;
    if rest.is_empty() || rest.contains('\\') || rest.contains('%') {
        return None;
    }
    let mut resolved = root.join("imgs");
    for segment in rest.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return None;
        }
        resolved.push(segment);
    }
    Some(resolved)
}

pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::render_index;
    use gloomdeck_core::{AbilityCatalog, Table, TableConfig};
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "gloomdeck_{tag}_test_{}_{}",
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn card_back_on_the_page_resolves_to_a_file() {
        let root = unique_temp_dir("public");
        fs::create_dir_all(root.join("imgs")).expect("mkdir");
        fs::write(root.join("imgs").join("card-back.png"), b"png").expect("write");

        let table = Table::new(&TableConfig::default(), AbilityCatalog::default()).expect("table");
        let html = render_index(&table.decks(), &table.monster_types());
        assert!(html.contains("/imgs/card-back.png"));

        let path = asset_path(&root, "/imgs/card-back.png").expect("served");
        assert_eq!(fs::read(&path).expect("read"), b"png");
        assert_eq!(content_type(&path), "image/png");
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn nested_paths_and_queries_resolve() {
        let root = Path::new("Public");
        assert_eq!(
            asset_path(root, "/imgs/player/gh-am-p1-01.png?v=2"),
            Some(root.join("imgs").join("player").join("gh-am-p1-01.png"))
        );
    }

    #[test]
    fn escapes_are_refused() {
        let root = Path::new("Public");
        assert_eq!(asset_path(root, "/imgs/../Cargo.toml"), None);
        assert_eq!(asset_path(root, "/imgs/player/../../secret"), None);
        assert_eq!(asset_path(root, "/imgs/%2e%2e/secret"), None);
        assert_eq!(asset_path(root, "/imgs/a\\..\\b"), None);
        assert_eq!(asset_path(root, "/imgs/"), None);
        assert_eq!(asset_path(root, "/state"), None);
    }

    #[test]
    fn unknown_extensions_are_binary() {
        assert_eq!(content_type(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(content_type(Path::new("a")), "application/octet-stream");
    }
}
