//! Displays used by the CLI: the library's log summary plus an optional JSON dump.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use roadnet::{LogDisplay, NetworkDisplay, Road};

/// Writes the accepted roads as a JSON array.
///
/// `display_network` cannot fail, so a write error is kept and surfaced by
/// [`JsonDump::finish`].
#[derive(Debug)]
pub struct JsonDump {
    target: PathBuf,
    pretty: bool,
    error: Option<anyhow::Error>,
}

impl JsonDump {
    pub fn new(target: PathBuf, pretty: bool) -> Self {
        Self {
            target,
            pretty,
            error: None,
        }
    }

    pub fn finish(&mut self) -> anyhow::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn write(&self, roads: &[Road]) -> anyhow::Result<()> {
        if self.target == Path::new("-") {
            let stdout = io::stdout();
            self.write_to(stdout.lock(), roads)
        } else {
            let file = File::create(&self.target)?;
            self.write_to(BufWriter::new(file), roads)?;
            info!("Wrote {} roads to {}", roads.len(), self.target.display());
            Ok(())
        }
    }

    fn write_to<W: Write>(&self, mut writer: W, roads: &[Road]) -> anyhow::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, roads)?;
        } else {
            serde_json::to_writer(&mut writer, roads)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl NetworkDisplay for JsonDump {
    fn display_network(&mut self, roads: &[Road]) {
        if let Err(err) = self.write(roads) {
            self.error = Some(err.context(format!("Writing {}", self.target.display())));
        }
    }
}

/// Log summary, followed by the JSON dump when one was requested.
#[derive(Debug, Default)]
pub struct CliDisplay {
    pub log: LogDisplay,
    pub dump: Option<JsonDump>,
}

impl NetworkDisplay for CliDisplay {
    fn display_network(&mut self, roads: &[Road]) {
        self.log.display_network(roads);
        if let Some(dump) = self.dump.as_mut() {
            dump.display_network(roads);
        }
    }
}
