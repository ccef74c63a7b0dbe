use crate::error::TagError;
use crate::home::Home;
use crate::mime::resolve_mime;
use crate::reader::read_max_size;
use crate::settings::Settings;
use base64::{engine::general_purpose, Engine as _};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// One rendered `<img>` tag with its payload inlined as a data URI.
pub struct ImgTag<'a> {
    path: PathBuf,
    settings: &'a Settings,
    out: Vec<u8>,
}

impl<'a> ImgTag<'a> {
    /// Reads `path` and renders its tag. Nothing is returned on failure.
    pub fn build(path: &Path, settings: &'a Settings, home: &Home) -> Result<Self, TagError> {
        let data = read_max_size(path, settings.max_file_size, home)?;
        let mut tag = Self {
            path: path.to_path_buf(),
            settings,
            out: Vec::new(),
        };
        tag.render(&data);
        Ok(tag)
    }

    fn render(&mut self, data: &[u8]) {
        self.open();
        self.alt();
        self.sp();
        self.src(data);
        self.close();
        self.ln();
    }

    fn open(&mut self) {
        self.out.extend_from_slice(b"<img ");
    }

    fn alt(&mut self) {
        let name = self.name();
        self.out.extend_from_slice(b"alt=\"");
        self.out.extend_from_slice(escape_html(&name).as_bytes());
        self.out.push(b'"');
    }

    fn sp(&mut self) {
        self.out.push(b' ');
    }

    fn src(&mut self, data: &[u8]) {
        self.out.extend_from_slice(b"src=\"data:");
        self.out.extend_from_slice(resolve_mime(&self.path).as_bytes());
        self.out.extend_from_slice(b";base64,");
        let encoded = general_purpose::STANDARD.encode(data);
        write_chunked(&mut self.out, encoded.as_bytes(), self.settings.chunk_size);
        self.out.push(b'"');
    }

    fn close(&mut self) {
        self.out.push(b'>');
    }

    fn ln(&mut self) {
        self.out.push(b'\n');
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.out)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}

impl fmt::Display for ImgTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name(), self.len())
    }
}

impl fmt::Debug for ImgTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImgTag")
            .field("path", &self.path)
            .field("len", &self.out.len())
            .finish()
    }
}

/// Writes `data` with a line break in front of every `chunk_size` bytes.
/// A chunk size of 0 writes it unbroken.
fn write_chunked(out: &mut Vec<u8>, data: &[u8], chunk_size: usize) {
    if chunk_size == 0 {
        out.extend_from_slice(data);
        return;
    }
    for chunk in data.chunks(chunk_size) {
        out.push(b'\n');
        out.extend_from_slice(chunk);
    }
}

pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
