//! Headless PNG capture of rendered frames.

use std::path::Path;

use thiserror::Error;

use crate::ocean::FrameBuffer;
use crate::params::RecordingConfig;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to save frame {frame}: {source}")]
    Save {
        frame: usize,
        source: image::ImageError,
    },
}

/// Writes numbered PNG frames into `RecordingConfig::frames_dir`
pub struct FrameRecorder {
    config: RecordingConfig,
    frames_written: usize,
}

impl FrameRecorder {
    /// Create output directories and an empty recorder
    pub fn create(config: RecordingConfig) -> Result<Self, RecordingError> {
        let frames_dir = config.frames_dir();
        std::fs::create_dir_all(&frames_dir).map_err(|source| RecordingError::CreateDir {
            path: frames_dir.clone(),
            source,
        })?;

        log::info!(
            "Recording {} frames to {}",
            config.total_frames(),
            frames_dir
        );
        Ok(Self {
            config,
            frames_written: 0,
        })
    }

    pub fn config(&self) -> &RecordingConfig {
        &self.config
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn is_finished(&self) -> bool {
        self.frames_written >= self.config.total_frames()
    }

    /// Save one frame; empty frames are skipped without advancing the counter
    pub fn capture(&mut self, frame: &FrameBuffer) -> Result<(), RecordingError> {
        if frame.is_empty() {
            return Ok(());
        }

        let frame_num = self.frames_written;
        let path = self.config.frame_path(frame_num);
        image::save_buffer(
            Path::new(&path),
            frame.as_bytes(),
            frame.width() as u32,
            frame.height() as u32,
            image::ColorType::Rgba8,
        )
        .map_err(|source| RecordingError::Save {
            frame: frame_num,
            source,
        })?;

        self.frames_written += 1;
        if self.frames_written % 60 == 0 {
            log::debug!("Saved {} frames", self.frames_written);
        }
        Ok(())
    }
}
