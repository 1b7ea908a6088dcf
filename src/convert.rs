use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};

use crate::bvh::{camera_joint, write_bvh_with};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::extract_track;
use crate::replay::ReplayDecoder;
use crate::resample::resample;

/// Set from a signal handler; checked between pipeline stages.
pub type CancelFlag = Arc<AtomicBool>;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub output: PathBuf,
    pub frames: usize,
    pub frame_time: f64,
    pub target_fps: u32,
    pub source_fps: f64,
    pub skipped: usize,
}

/// `<dir>/<stem><suffix>` next to the input file.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, suffix))
}

pub fn has_demo_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("dem"))
        .unwrap_or(false)
}

fn check_cancelled(cancel: &AtomicBool) -> Result<()> {
    if cancel.load(Ordering::SeqCst) {
        return Err(Error::Cancelled);
    }
    Ok(())
}

/// Run the whole conversion for one replay file.
///
/// The output file is created only once the complete BVH text exists, so a
/// failure or cancellation never leaves a partial file behind.
pub fn convert_file(
    input: &Path,
    config: &Config,
    decoder: &dyn ReplayDecoder,
    cancel: &AtomicBool,
) -> Result<ConversionSummary> {
    if !input.exists() {
        return Err(Error::NotFound(input.to_path_buf()));
    }
    config.validate()?;
    let target_fps = config.target_fps;

    let bytes = std::fs::read(input)?;
    debug!("read {} bytes from {}", bytes.len(), input.display());
    check_cancelled(cancel)?;

    let replay = decoder.decode(&bytes)?;
    let source = extract_track(&replay, &config.extract);
    if source.poses.len() < 2 {
        return Err(Error::InsufficientSamples {
            found: source.poses.len(),
        });
    }
    check_cancelled(cancel)?;

    let poses = if source.fps != target_fps as f64 {
        info!("Resampling from {:.1}fps to {}fps...", source.fps, target_fps);
        resample(&source.poses, source.fps, target_fps as f64)?
    } else {
        source.poses
    };
    check_cancelled(cancel)?;

    let text = write_bvh_with(&camera_joint(&config.output.root_name), &poses, target_fps as f64);
    check_cancelled(cancel)?;

    let output = output_path(input, &config.output.suffix);
    let mut file = File::create(&output)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    Ok(ConversionSummary {
        output,
        frames: poses.len(),
        frame_time: 1.0 / target_fps as f64,
        target_fps,
        source_fps: source.fps,
        skipped: source.skipped,
    })
}
