use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Installs the terminal logger; `verbose` lowers the level to debug.
pub fn init_logger(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .context("Failed to initialize logger")
}

/// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `-`.
pub fn save_json<T>(value: &T, path: &Path) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let (mut writer, display): (Box<dyn Write>, String) = if path == Path::new("-") {
        (Box::new(io::stdout().lock()), "stdout".to_owned())
    } else {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        (Box::new(BufWriter::new(file)), path.display().to_string())
    };
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {display}"))?;
    writeln!(writer).with_context(|| format!("Failed to write newline to {display}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {display}"))?;
    Ok(())
}
