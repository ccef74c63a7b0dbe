use std::path::Path;

pub trait ProgressSink {
    fn start_file(&mut self, _path: &Path) {}
    fn finish_file(&mut self, _path: &Path, _tag_len: usize) {}
    fn fail_file(&mut self, _path: &Path, _reason: &str) {}
    fn finish(&mut self, _done: usize, _failed: usize) {}
}

pub struct ProgressReporter {
    enabled: bool,
    total_files: usize,
    processed_files: usize,
    current_file: Option<String>,
}

impl ProgressReporter {
    pub fn new(enabled: bool, total_files: usize) -> Self {
        Self {
            enabled,
            total_files,
            processed_files: 0,
            current_file: None,
        }
    }

    fn current_filename(&self) -> &str {
        self.current_file.as_deref().unwrap_or("unknown file")
    }

    fn position(&self) -> String {
        format!("[{}/{}]", self.processed_files, self.total_files.max(1))
    }
}

impl ProgressSink for ProgressReporter {
    fn start_file(&mut self, path: &Path) {
        if !self.enabled {
            return;
        }
        self.processed_files += 1;
        self.current_file = Some(path.display().to_string());
        eprintln!("{} Encoding {}", self.position(), self.current_filename());
    }

    fn finish_file(&mut self, _path: &Path, tag_len: usize) {
        if !self.enabled {
            return;
        }
        eprintln!(
            "{} Done {} ({} bytes of HTML)",
            self.position(),
            self.current_filename(),
            tag_len
        );
        self.current_file = None;
    }

    fn fail_file(&mut self, _path: &Path, reason: &str) {
        if !self.enabled {
            return;
        }
        eprintln!(
            "{} Skipped {}: {}",
            self.position(),
            self.current_filename(),
            reason
        );
        self.current_file = None;
    }

    fn finish(&mut self, done: usize, failed: usize) {
        if !self.enabled {
            return;
        }
        eprintln!(
            "Finished. {} tag(s) built, {} file(s) failed.",
            done, failed
        );
    }
}
