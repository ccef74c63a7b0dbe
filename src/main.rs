mod cli;

use anyhow::Result;
use clap::Parser;
use img_b64_tag::sink::{
    ClipboardSink, ConsoleDisplay, DialogDisplay, DisplaySink, StdoutClipboard, SystemClipboard,
};
use img_b64_tag::{Home, Settings};

fn main() -> Result<()> {
    env_logger::init();
    let cli = cli::Cli::parse();

    if cli.write_default_config {
        let path = cli.config.clone().unwrap_or_else(Settings::default_path);
        Settings::write_default(&path)?;
        eprintln!("Default settings written to {}", path.display());
        return Ok(());
    }

    let mut clipboard: Box<dyn ClipboardSink> = if cli.stdout {
        Box::new(StdoutClipboard)
    } else {
        Box::new(SystemClipboard::new())
    };
    let mut display: Box<dyn DisplaySink> = if cli.no_dialog {
        Box::new(ConsoleDisplay)
    } else {
        Box::new(DialogDisplay)
    };

    let home = Home::from_env();
    img_b64_tag::run(
        cli.into_config(),
        &home,
        clipboard.as_mut(),
        display.as_mut(),
    )?;
    Ok(())
}
