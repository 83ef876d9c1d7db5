//! CSV drive-trace writer.
//!
//! One sample per row under the fixed header
//! `timestamp_s,latitude_deg,longitude_deg,altitude_m,speed_m_per_s`:
//! 1-decimal timestamps, 7-decimal coordinates, 2-decimal altitude (empty
//! cell when absent).  UTF-8, Unix line endings.
//!
//! Rows stream into a temp file that [`TraceWriter::finish`] renames into
//! place, so an abandoned writer never leaves a partial trace behind.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;

use eh_route::DriveSample;

use crate::error::OutputResult;

/// The exact header row of a drive trace.
pub const TRACE_HEADER: [&str; 5] = [
    "timestamp_s",
    "latitude_deg",
    "longitude_deg",
    "altitude_m",
    "speed_m_per_s",
];

/// Streams drive samples into a CSV file.
pub struct TraceWriter {
    writer: Writer<File>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    finished: bool,
}

impl TraceWriter {
    /// Open the trace at `path` (written via a sibling temp file) and emit
    /// the header row.
    pub fn create(path: impl AsRef<Path>) -> OutputResult<Self> {
        let final_path = path.as_ref().to_path_buf();
        let mut tmp_os = final_path.clone().into_os_string();
        tmp_os.push(".tmp");
        let tmp_path = PathBuf::from(tmp_os);

        let mut writer = Writer::from_path(&tmp_path)?;
        writer.write_record(TRACE_HEADER)?;

        Ok(Self { writer, tmp_path, final_path, finished: false })
    }

    /// Append one sample row.
    pub fn write_sample(&mut self, sample: &DriveSample) -> OutputResult<()> {
        self.writer.write_record(&[
            format!("{:.1}", sample.timestamp_s),
            format!("{:.7}", sample.position.lat),
            format!("{:.7}", sample.position.lon),
            sample
                .position
                .alt
                .map(|alt| format!("{alt:.2}"))
                .unwrap_or_default(),
            format!("{}", sample.speed_m_s),
        ])?;
        Ok(())
    }

    /// Flush and move the trace to its final path.
    ///
    /// Idempotent — safe to call more than once.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.writer.flush()?;
        fs::rename(&self.tmp_path, &self.final_path)?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for TraceWriter {
    /// An unfinished writer is a cancelled run: discard the temp file so
    /// no partial trace survives.
    fn drop(&mut self) {
        if !self.finished {
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}

/// Write `samples` to `path` in one call.
pub fn save_trace(path: impl AsRef<Path>, samples: &[DriveSample]) -> OutputResult<()> {
    let mut writer = TraceWriter::create(path)?;
    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finish()
}
