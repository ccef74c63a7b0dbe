use crate::error::TagError;
use crate::home::{unexpand_home, Home};
use crate::progress::ProgressSink;
use crate::settings::Settings;
use crate::tag::ImgTag;
use std::path::PathBuf;

/// A file that produced no tag, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: PathBuf,
    pub reason: String,
}

impl From<TagError> for Failure {
    fn from(err: TagError) -> Self {
        Self {
            path: err.path().to_path_buf(),
            reason: err.to_string(),
        }
    }
}

/// Outcome of one pass over the input list. Both lists keep input order.
#[derive(Debug)]
pub struct Batch<'a> {
    tags: Vec<ImgTag<'a>>,
    failures: Vec<Failure>,
    home: Home,
}

impl<'a> Batch<'a> {
    /// Builds a tag for every path. Per-file errors become [`Failure`]s and
    /// the pass carries on with the next file.
    pub fn run(
        files: &[PathBuf],
        settings: &'a Settings,
        home: &Home,
        progress: &mut dyn ProgressSink,
    ) -> Self {
        let mut tags = Vec::new();
        let mut failures = Vec::new();

        for path in files {
            progress.start_file(path);
            match ImgTag::build(path, settings, home) {
                Ok(tag) => {
                    progress.finish_file(path, tag.len());
                    tags.push(tag);
                }
                Err(err) => {
                    let failure = Failure::from(err);
                    progress.fail_file(path, &failure.reason);
                    failures.push(failure);
                }
            }
        }

        progress.finish(tags.len(), failures.len());
        Self {
            tags,
            failures,
            home: home.clone(),
        }
    }

    pub fn tags(&self) -> &[ImgTag<'a>] {
        &self.tags
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.tags.iter().map(ImgTag::len).sum());
        for tag in &self.tags {
            out.extend_from_slice(tag.as_bytes());
        }
        out
    }

    pub fn to_text(&self) -> String {
        self.tags.iter().map(|tag| tag.as_text()).collect()
    }

    /// `Done (n):` and `Errors (n):` sections; an empty section is left out.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.tags.is_empty() {
            lines.push(format!("Done ({}):", self.tags.len()));
            lines.extend(self.tags.iter().map(ToString::to_string));
        }

        if !self.failures.is_empty() {
            lines.push(format!("Errors ({}):", self.failures.len()));
            lines.extend(self.failures.iter().map(|failure| {
                let shown = unexpand_home(failure.path.clone(), &self.home);
                format!("{}: {}", shown.display(), failure.reason)
            }));
        }

        lines
    }

    pub fn summary_text(&self) -> String {
        self.summary_lines().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressSink;
    use std::path::Path;
    use tempfile::tempdir;

    struct NoopProgress;
    impl ProgressSink for NoopProgress {}

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ProgressSink for Recorder {
        fn start_file(&mut self, path: &Path) {
            self.events.push(format!("start {}", path.display()));
        }
        fn finish_file(&mut self, path: &Path, _tag_len: usize) {
            self.events.push(format!("done {}", path.display()));
        }
        fn fail_file(&mut self, path: &Path, _reason: &str) {
            self.events.push(format!("fail {}", path.display()));
        }
        fn finish(&mut self, done: usize, failed: usize) {
            self.events.push(format!("finish {done}/{failed}"));
        }
    }

    #[test]
    fn one_success_and_one_missing_file() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("a.jpg");
        std::fs::write(&good, vec![7u8; 500]).unwrap();
        let missing = dir.path().join("missing.png");

        let settings = Settings::default();
        let home = Home::default();
        let files = vec![good.clone(), missing.clone()];
        let batch = Batch::run(&files, &settings, &home, &mut NoopProgress);

        assert_eq!(batch.tag_count(), 1);
        assert_eq!(batch.failure_count(), 1);

        let tag = &batch.tags()[0];
        assert_eq!(tag.path(), good.as_path());
        let text = tag.as_text();
        assert!(text.starts_with("<img alt=\"a.jpg\" src=\"data:image/jpeg;base64,\n"));

        assert_eq!(batch.failures()[0].path, missing);
        assert_eq!(batch.failures()[0].reason, "No such file or directory");

        assert_eq!(batch.to_text(), text);
        assert_eq!(batch.to_bytes(), tag.as_bytes());
    }

    #[test]
    fn keeps_input_order_in_both_lists() {
        let dir = tempdir().unwrap();
        let names = ["1.gif", "2.gif", "3.gif", "4.gif", "5.gif"];
        let files: Vec<PathBuf> = names.iter().map(|n| dir.path().join(n)).collect();
        std::fs::write(&files[0], b"a").unwrap();
        std::fs::write(&files[2], b"ccc").unwrap();
        std::fs::write(&files[3], b"dddddddddddd").unwrap();

        let settings = Settings {
            max_file_size: 4,
            ..Settings::default()
        };
        let mut progress = Recorder::default();
        let batch = Batch::run(&files, &settings, &Home::default(), &mut progress);

        assert_eq!(batch.tag_count() + batch.failure_count(), files.len());
        let ok: Vec<&Path> = batch.tags().iter().map(|t| t.path()).collect();
        assert_eq!(ok, vec![files[0].as_path(), files[2].as_path()]);
        let failed: Vec<&PathBuf> = batch.failures().iter().map(|f| &f.path).collect();
        assert_eq!(failed, vec![&files[1], &files[3], &files[4]]);
        assert_eq!(
            batch.failures()[1].reason,
            "file size (12) greater than max_file_size (4)"
        );

        let lines = batch.summary_lines();
        assert_eq!(lines[0], "Done (2):");
        assert_eq!(lines[3], "Errors (3):");
        assert_eq!(lines.len(), 2 + 1 + 3 + 1);

        assert_eq!(progress.events.len(), files.len() * 2 + 1);
        assert_eq!(progress.events.last().unwrap(), "finish 2/3");
    }

    #[test]
    fn summary_sections_and_home_relative_errors() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("ok.webp");
        std::fs::write(&good, b"RIFF").unwrap();
        let home = Home::new(dir.path().to_string_lossy().into_owned());
        let files = vec![good, PathBuf::from("~/gone.jpg")];

        let settings = Settings::default();
        let batch = Batch::run(&files, &settings, &home, &mut NoopProgress);
        let lines = batch.summary_lines();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Done (1):");
        assert!(lines[1].starts_with("ok.webp ("));
        assert_eq!(lines[2], "Errors (1):");
        assert!(lines[3].starts_with("~/gone.jpg: "));
        assert_eq!(batch.summary_text(), lines.join("\n"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let dir = tempdir().unwrap();
        let settings = Settings::default();

        let missing = vec![dir.path().join("nope.png")];
        let batch = Batch::run(&missing, &settings, &Home::default(), &mut NoopProgress);
        let lines = batch.summary_lines();
        assert_eq!(lines[0], "Errors (1):");
        assert!(!lines.iter().any(|l| l.starts_with("Done")));
        assert!(batch.to_text().is_empty());

        let present = dir.path().join("yes.png");
        std::fs::write(&present, b"png").unwrap();
        let batch = Batch::run(&[present], &settings, &Home::default(), &mut NoopProgress);
        let lines = batch.summary_lines();
        assert_eq!(lines[0], "Done (1):");
        assert!(!lines.iter().any(|l| l.starts_with("Errors")));
    }
}
