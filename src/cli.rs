use clap::Parser;
use img_b64_tag::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "img-b64-tag",
    version,
    about = "Turns image files into <img> tags with inline base64 data URIs and copies them to the clipboard."
)]
pub struct Cli {
    #[arg(
        value_name = "FILE",
        help = "Image files to encode, in output order"
    )]
    pub inputs: Vec<PathBuf>,

    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        help = "Settings file (defaults to the per-user config directory)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long = "quiet",
        help = "Suppress per-file progress messages",
        action = clap::ArgAction::SetTrue
    )]
    pub quiet: bool,

    #[arg(long, help = "Write the tags to stdout instead of the clipboard")]
    pub stdout: bool,

    #[arg(
        long = "no-dialog",
        help = "Print the summary to stderr instead of opening a dialog"
    )]
    pub no_dialog: bool,

    #[arg(
        long = "write-default-config",
        help = "Write the default settings file and exit"
    )]
    pub write_default_config: bool,
}

impl Cli {
    pub fn into_config(self) -> Config {
        Config {
            inputs: self.inputs,
            settings_path: self.config,
            quiet: self.quiet,
        }
    }
}
