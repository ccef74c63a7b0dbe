mod batch;
pub mod config;
mod error;
pub mod home;
pub mod mime;
pub mod progress;
mod reader;
pub mod settings;
pub mod sink;
mod tag;

pub use batch::{Batch, Failure};
pub use config::Config;
pub use error::TagError;
pub use home::Home;
pub use progress::{ProgressReporter, ProgressSink};
pub use settings::Settings;
pub use sink::{ClipboardSink, DisplaySink};
pub use tag::ImgTag;

use anyhow::Result;
use std::path::PathBuf;

pub const SUMMARY_TITLE: &str = "Image tags";
pub const EMPTY_INPUT: &str = "Empty file list";

/// What a finished run produced, detached from the borrowed settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub done: usize,
    pub failed: usize,
    pub summary: Vec<String>,
}

impl From<&Batch<'_>> for RunReport {
    fn from(batch: &Batch<'_>) -> Self {
        Self {
            done: batch.tag_count(),
            failed: batch.failure_count(),
            summary: batch.summary_lines(),
        }
    }
}

/// Runs the whole pipeline. `Ok(None)` means there was nothing to encode and
/// the user has already been told through `display`.
pub fn run(
    config: Config,
    home: &Home,
    clipboard: &mut dyn ClipboardSink,
    display: &mut dyn DisplaySink,
) -> Result<Option<RunReport>> {
    let Some(settings) = prepare(&config, display)? else {
        return Ok(None);
    };
    let mut progress = ProgressReporter::new(!config.quiet, config.inputs.len());
    execute(&settings, &config.inputs, home, clipboard, display, &mut progress).map(Some)
}

pub fn run_with_progress(
    config: Config,
    home: &Home,
    clipboard: &mut dyn ClipboardSink,
    display: &mut dyn DisplaySink,
    progress: &mut dyn ProgressSink,
) -> Result<Option<RunReport>> {
    let Some(settings) = prepare(&config, display)? else {
        return Ok(None);
    };
    execute(&settings, &config.inputs, home, clipboard, display, progress).map(Some)
}

fn prepare(config: &Config, display: &mut dyn DisplaySink) -> Result<Option<Settings>> {
    if config.inputs.is_empty() {
        display.show_error(EMPTY_INPUT)?;
        return Ok(None);
    }

    let settings = Settings::load(&config.resolved_settings_path())?;
    log::debug!("settings: {:?}", settings);
    Ok(Some(settings))
}

fn execute(
    settings: &Settings,
    files: &[PathBuf],
    home: &Home,
    clipboard: &mut dyn ClipboardSink,
    display: &mut dyn DisplaySink,
    progress: &mut dyn ProgressSink,
) -> Result<RunReport> {
    let batch = Batch::run(files, settings, home, progress);
    clipboard.copy_text(&batch.to_text())?;
    display.show(SUMMARY_TITLE, &batch.summary_text())?;
    Ok(RunReport::from(&batch))
}
