use std::path::Path;

pub const DEFAULT_MIME: &str = "image/png";

const MIME_TABLE: &[(&str, &str)] = &[
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("tga", "image/x-tga"),
    ("tpic", "image/x-tga"),
    ("vda", "image/x-tga"),
    ("vst", "image/x-tga"),
    ("icb", "image/x-tga"),
];

/// MIME type by file extension. Unknown extensions fall back to `image/png`.
pub fn resolve_mime(path: impl AsRef<Path>) -> &'static str {
    lookup(path.as_ref()).unwrap_or(DEFAULT_MIME)
}

fn lookup(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|e| e.to_str())?;
    MIME_TABLE
        .iter()
        .find(|(known, _)| ext.eq_ignore_ascii_case(known))
        .map(|(_, mime)| *mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_extensions_case_insensitively() {
        assert_eq!(resolve_mime("photo.TGA"), "image/x-tga");
        assert_eq!(resolve_mime("a.jpg"), "image/jpeg");
        assert_eq!(resolve_mime("a.JPEG"), "image/jpeg");
        assert_eq!(resolve_mime("anim.gif"), "image/gif");
        assert_eq!(resolve_mime("x.webp"), "image/webp");
        assert_eq!(resolve_mime("x.icb"), "image/x-tga");
    }

    #[test]
    fn unknown_extensions_fall_back_to_png() {
        assert_eq!(resolve_mime("archive.iso"), "image/png");
        assert_eq!(resolve_mime("no_extension"), "image/png");
        assert_eq!(resolve_mime(".bashrc"), "image/png");
        assert_eq!(resolve_mime("trailing."), "image/png");
    }
}
