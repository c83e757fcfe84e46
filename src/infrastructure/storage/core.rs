use std::path::{Component, Path, PathBuf};

use crate::application::ports::asset_storage::AssetKind;

pub fn sanitize_filename(name: &str) -> String {
    let mut s = name.trim().to_string();
    let invalid = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];
    for ch in invalid {
        s = s.replace(ch, "-");
    }
    s = s.replace(' ', "_");
    if s.len() > 100 {
        let mut cut = 100;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
    }
    if s.is_empty() {
        s = "file".into();
    }
    s
}

fn default_extension(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Cover => "png",
        AssetKind::Pdf => "pdf",
    }
}

/// Splits a sanitized name into stem and extension, falling back to the kind's default extension.
fn stem_and_ext(kind: AssetKind, original: Option<&str>) -> (String, String) {
    let safe = sanitize_filename(original.unwrap_or(""));
    let p = Path::new(&safe);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && *s != "file")
        .unwrap_or(match kind {
            AssetKind::Cover => "cover",
            AssetKind::Pdf => "book",
        })
        .to_string();
    let ext = p
        .extension()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_else(|| default_extension(kind).to_string());
    (stem, ext)
}

/// Timestamped object name under the kind's directory, e.g. `pdfs/gitanjali_20250101-101010.pdf`.
pub fn timestamped_name(kind: AssetKind, original: Option<&str>) -> String {
    let (stem, ext) = stem_and_ext(kind, original);
    let ts = chrono::Utc::now().format("%Y%m%d-%H%M%S");
    format!("{}/{}_{}.{}", kind.dir(), stem, ts, ext)
}

/// Adds `-n` before the extension, used when a timestamped name is already taken.
pub fn with_counter(relative: &str, counter: u32) -> String {
    match relative.rsplit_once('.') {
        Some((head, ext)) if !head.ends_with('/') => format!("{head}-{counter}.{ext}"),
        _ => format!("{relative}-{counter}"),
    }
}

/// Normalizes a storage-relative path, rejecting absolute paths and traversal.
pub fn safe_relative(rel: &str) -> anyhow::Result<PathBuf> {
    let mut out = PathBuf::new();
    for component in Path::new(rel).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => continue,
            _ => anyhow::bail!("forbidden"),
        }
    }
    if out.as_os_str().is_empty() {
        anyhow::bail!("forbidden");
    }
    Ok(out)
}

pub fn normalize_prefix(root: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for comp in root.components() {
        if let Component::Normal(os) = comp {
            let s = os.to_string_lossy();
            if !s.is_empty() && s != "." {
                parts.push(s.replace('\\', "/"));
            }
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_separators_and_spaces() {
        assert_eq!(sanitize_filename("My Book: Vol/1.pdf"), "My_Book-_Vol-1.pdf");
        assert_eq!(sanitize_filename("   "), "file");
    }

    #[test]
    fn timestamped_name_lands_in_kind_directory() {
        let name = timestamped_name(AssetKind::Pdf, Some("Gitanjali.PDF"));
        assert!(name.starts_with("pdfs/Gitanjali_"));
        assert!(name.ends_with(".pdf"));

        let cover = timestamped_name(AssetKind::Cover, None);
        assert!(cover.starts_with("covers/cover_"));
        assert!(cover.ends_with(".png"));
    }

    #[test]
    fn counter_goes_before_extension() {
        assert_eq!(with_counter("covers/a_1.png", 2), "covers/a_1-2.png");
        assert_eq!(with_counter("covers/a", 1), "covers/a-1");
    }

    #[test]
    fn traversal_is_rejected() {
        assert!(safe_relative("../etc/passwd").is_err());
        assert!(safe_relative("/abs").is_err());
        assert!(safe_relative("").is_err());
        assert_eq!(
            safe_relative("./covers/a.png").unwrap(),
            PathBuf::from("covers/a.png")
        );
    }
}
