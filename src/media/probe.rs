use std::path::Path;

use crate::foundation::error::{GestaltError, GestaltResult};
use crate::plan::config::SourceMetadata;

#[derive(serde::Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

#[derive(serde::Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(serde::Deserialize)]
struct ProbeOut {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

/// Probe duration, frame rate and dimensions of the first video stream through `ffprobe`.
pub fn probe_video(source_path: &Path) -> GestaltResult<SourceMetadata> {
    if source_path.is_dir() {
        return Err(GestaltError::invalid_input(format!(
            "'{}' is a directory, expected a video file",
            source_path.display()
        )));
    }
    if !source_path.is_file() {
        return Err(GestaltError::invalid_input(format!(
            "'{}' does not exist",
            source_path.display()
        )));
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| GestaltError::invalid_input(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(GestaltError::invalid_input(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let meta = parse_probe_json(&out.stdout)?;
    tracing::info!(
        path = %source_path.display(),
        "source is {}x{} @ {:.3} fps, {:.3}s",
        meta.width,
        meta.height,
        meta.frame_rate,
        meta.duration
    );
    Ok(meta)
}

/// Extract [`SourceMetadata`] from `ffprobe -print_format json` output.
pub(crate) fn parse_probe_json(bytes: &[u8]) -> GestaltResult<SourceMetadata> {
    let parsed: ProbeOut = serde_json::from_slice(bytes)
        .map_err(|e| GestaltError::invalid_input(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| GestaltError::invalid_input("no video stream found"))?;

    let width = video_stream
        .width
        .ok_or_else(|| GestaltError::invalid_input("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| GestaltError::invalid_input("missing video height from ffprobe"))?;

    // avg_frame_rate is "0/0" for some streams; r_frame_rate is the fallback.
    let frame_rate = [&video_stream.avg_frame_rate, &video_stream.r_frame_rate]
        .into_iter()
        .flatten()
        .find_map(|s| parse_rate(s))
        .ok_or_else(|| GestaltError::invalid_input("missing video frame rate from ffprobe"))?;

    let duration = video_stream
        .duration
        .as_deref()
        .or_else(|| parsed.format.as_ref()?.duration.as_deref())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| GestaltError::invalid_input("missing duration from ffprobe"))?;

    SourceMetadata::new(duration, frame_rate, width, height)
}

/// Parse `num/den` or a plain decimal into a positive rate.
pub(crate) fn parse_rate(s: &str) -> Option<f64> {
    let rate = match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => s.trim().parse().ok()?,
    };
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

#[cfg(test)]
#[path = "../../tests/unit/media/probe.rs"]
mod tests;
