use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::encode::sink::{FrameRecord, FrameSink, SinkConfig};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::unpremultiply_rgba8;

/// Line written to the camera log for each frame.
#[derive(Debug, serde::Serialize)]
struct CameraLogLine<'a> {
    frame: u64,
    step: u64,
    #[serde(flatten)]
    camera: &'a crate::foundation::core::CameraState,
}

/// Writes `<prefix>_<index:05>.png` per frame into `dir`, plus a `<prefix>_cameras.jsonl` log.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    cfg: Option<SinkConfig>,
    log: Option<BufWriter<File>>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            cfg: None,
            log: None,
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the PNG for capture `index`.
    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("{}_{index:05}.png", self.prefix))
    }

    /// Path of the per-run camera log.
    pub fn camera_log_path(&self) -> PathBuf {
        self.dir.join(format!("{}_cameras.jsonl", self.prefix))
    }

    /// Whether `name` is a numbered frame of this sink's sequence.
    fn is_sequence_frame(&self, name: &str) -> bool {
        name.strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|rest| rest.strip_suffix(".png"))
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Delete frames an earlier run left under the same prefix, so the sequence on disk is
    /// exactly the one this run writes.
    fn remove_stale_frames(&self) -> ReelResult<()> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            ReelError::engine(format!("failed to list '{}': {e}", self.dir.display()))
        })?;
        let mut removed = 0usize;
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !self.is_sequence_frame(name) {
                continue;
            }
            let path = entry.path();
            std::fs::remove_file(&path).map_err(|e| {
                ReelError::engine(format!(
                    "failed to remove stale frame '{}': {e}",
                    path.display()
                ))
            })?;
            removed += 1;
        }
        if removed > 0 {
            tracing::info!(removed, dir = %self.dir.display(), prefix = %self.prefix, "removed frames from an earlier run");
        }
        Ok(())
    }

    /// Files written by the current run, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ReelError::configuration(
                "png sink width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ReelError::engine(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.remove_stale_frames()?;

        let log_path = self.camera_log_path();
        let file = File::create(&log_path).map_err(|e| {
            ReelError::engine(format!(
                "failed to create camera log '{}': {e}",
                log_path.display()
            ))
        })?;
        self.written.clear();
        self.written.push(log_path);
        self.log = Some(BufWriter::new(file));
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, record: &FrameRecord) -> ReelResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| ReelError::engine("png sink not started"))?;
        let frame = &record.frame;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ReelError::engine(format!(
                "frame {} is {}x{}, sink expects {}x{}",
                record.index, frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let path = self.frame_path(record.index);
        let straight;
        let data = if frame.premultiplied {
            straight = unpremultiply_rgba8(&frame.data);
            &straight
        } else {
            &frame.data
        };
        image::save_buffer_with_format(
            &path,
            data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| ReelError::engine(format!("failed to write '{}': {e}", path.display())))?;
        self.written.push(path);

        let line = CameraLogLine {
            frame: record.index,
            step: record.step,
            camera: &record.camera,
        };
        let log = self
            .log
            .as_mut()
            .ok_or_else(|| ReelError::engine("png sink camera log is closed"))?;
        serde_json::to_writer(&mut *log, &line)
            .map_err(|e| ReelError::serde(format!("camera log line: {e}")))?;
        log.write_all(b"\n")
            .map_err(|e| ReelError::engine(format!("failed to append camera log: {e}")))?;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        if let Some(mut log) = self.log.take() {
            log.flush()
                .map_err(|e| ReelError::engine(format!("failed to flush camera log: {e}")))?;
        }
        self.cfg = None;
        Ok(())
    }

    fn abort(&mut self) {
        drop(self.log.take());
        self.cfg = None;
        for path in self.written.drain(..) {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove partial output");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
