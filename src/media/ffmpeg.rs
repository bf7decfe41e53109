use std::ffi::OsString;
use std::fmt::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::foundation::error::{GestaltError, GestaltResult};
use crate::media::engine::{CompositeSpec, LayerSpec, MediaEngine};
use crate::plan::layout::CellSource;
use crate::plan::motion::Direction;
use crate::render::output::OutputFormat;

/// Engine that renders the whole composite with a single `ffmpeg` invocation.
///
/// Every layer becomes its own seeked input, is resized and then overlaid onto a solid
/// canvas with an `x` expression that is linear in the canvas timestamp.
#[derive(Debug, Default)]
pub struct FfmpegEngine {
    layers: Vec<LayerSpec>,
}

impl FfmpegEngine {
    /// Create an engine with no queued layers.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaEngine for FfmpegEngine {
    fn place_layer(&mut self, layer: LayerSpec) -> GestaltResult<()> {
        if layer.width == 0 || layer.height == 0 {
            return Err(GestaltError::render("layer width/height must be non-zero"));
        }
        self.layers.push(layer);
        Ok(())
    }

    fn encode(&mut self, composite: &CompositeSpec) -> GestaltResult<()> {
        let layers = std::mem::take(&mut self.layers);
        validate_composite(composite, &layers)?;

        ensure_parent_dir(&composite.out_path)?;
        if !composite.overwrite && composite.out_path.exists() {
            return Err(GestaltError::render(format!(
                "output file '{}' already exists",
                composite.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(GestaltError::render(
                "ffmpeg is required for rendering, but was not found on PATH",
            ));
        }

        let args = build_args(&layers, composite);
        tracing::debug!(
            inputs = layers.len(),
            "ffmpeg {}",
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let stdout = if composite.format == OutputFormat::Image {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        let out = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                GestaltError::render(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        if !out.status.success() {
            if composite.format != OutputFormat::Image {
                discard_partial_output(&composite.out_path);
            }
            return Err(GestaltError::render(format!(
                "ffmpeg exited with status {}: {}",
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        if composite.format == OutputFormat::Image {
            write_png(composite, &out.stdout)?;
        }
        Ok(())
    }
}

fn validate_composite(composite: &CompositeSpec, layers: &[LayerSpec]) -> GestaltResult<()> {
    if layers.is_empty() {
        return Err(GestaltError::render("no layers were placed before encode"));
    }
    if composite.width == 0 || composite.height == 0 {
        return Err(GestaltError::render(
            "composite width/height must be non-zero",
        ));
    }
    if !positive(composite.duration) || !positive(composite.frame_rate) {
        return Err(GestaltError::render(
            "composite duration and frame rate must be > 0",
        ));
    }
    if let Some(fps) = composite.gif.fps
        && !positive(fps)
    {
        return Err(GestaltError::render("gif fps must be > 0"));
    }
    if !(2..=256).contains(&composite.gif.max_colors) {
        return Err(GestaltError::render("gif max_colors must be within 2..=256"));
    }
    Ok(())
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Full `ffmpeg` argument list for `layers` composited per `composite`.
pub(crate) fn build_args(layers: &[LayerSpec], composite: &CompositeSpec) -> Vec<OsString> {
    let overwrite = if composite.overwrite { "-y" } else { "-n" };
    let mut args: Vec<OsString> = [overwrite, "-loglevel", "error"]
        .map(OsString::from)
        .to_vec();

    for layer in layers {
        match layer.source {
            CellSource::Window { start, end, .. } => {
                args.extend(
                    [
                        "-ss".to_string(),
                        secs(start),
                        "-t".to_string(),
                        secs(end - start),
                    ]
                    .map(OsString::from),
                );
            }
            CellSource::HeldFrame { at, .. } => {
                args.extend(["-ss".to_string(), secs(at)].map(OsString::from));
            }
        }
        args.push("-i".into());
        args.push(layer.input.clone().into_os_string());
    }

    args.push("-filter_complex".into());
    args.push(filter_graph(layers, composite).into());
    args.extend(["-map", "[out]", "-an"].map(OsString::from));

    match composite.format {
        OutputFormat::Video => {
            args.extend(["-t".to_string(), secs(composite.duration)].map(OsString::from));
            args.push(composite.out_path.clone().into_os_string());
        }
        OutputFormat::Gif => {
            args.extend(["-t".to_string(), secs(composite.duration)].map(OsString::from));
            args.extend(["-loop", "0"].map(OsString::from));
            args.push(composite.out_path.clone().into_os_string());
        }
        OutputFormat::Image => {
            args.extend(
                ["-frames:v", "1", "-f", "rawvideo", "-pix_fmt", "rgba", "pipe:1"]
                    .map(OsString::from),
            );
        }
    }
    args
}

/// The `-filter_complex` graph: canvas source, one chain per layer, overlay chain, format tail.
pub(crate) fn filter_graph(layers: &[LayerSpec], composite: &CompositeSpec) -> String {
    let mut g = String::new();
    let _ = write!(
        g,
        "color=c=black:s={}x{}:r={}:d={}[base]",
        composite.width,
        composite.height,
        rate(composite.frame_rate),
        secs(composite.duration)
    );

    for (m, layer) in layers.iter().enumerate() {
        match layer.source {
            CellSource::Window { .. } => {
                let _ = write!(
                    g,
                    ";[{m}:v]setpts=PTS-STARTPTS,scale={}:{}[l{m}]",
                    layer.width, layer.height
                );
            }
            CellSource::HeldFrame { hold, .. } => {
                let _ = write!(
                    g,
                    ";[{m}:v]trim=end_frame=1,setpts=PTS-STARTPTS,scale={}:{},\
                     tpad=stop_mode=clone:stop_duration={}[l{m}]",
                    layer.width,
                    layer.height,
                    secs(hold)
                );
            }
        }
    }

    let mut below = "base".to_string();
    for (m, layer) in layers.iter().enumerate() {
        let _ = write!(
            g,
            ";[{below}][l{m}]overlay=x={}:y={}:eval=frame:eof_action=pass[o{m}]",
            x_expr(layer),
            px(layer.motion.y)
        );
        below = format!("o{m}");
    }

    match composite.format {
        OutputFormat::Video => {
            // yuv420p needs even dimensions.
            let _ = write!(
                g,
                ";[{below}]pad=ceil(iw/2)*2:ceil(ih/2)*2,format=yuv420p[out]"
            );
        }
        OutputFormat::Gif => {
            let fps = composite
                .gif
                .fps
                .map(|f| format!("fps={},", rate(f)))
                .unwrap_or_default();
            let _ = write!(
                g,
                ";[{below}]{fps}split[g0][g1];[g0]palettegen=max_colors={}[pal];\
                 [g1][pal]paletteuse[out]",
                composite.gif.max_colors
            );
        }
        OutputFormat::Image => {
            let _ = write!(g, ";[{below}]format=rgba[out]");
        }
    }
    g
}

/// Overlay `x` expression in terms of the canvas timestamp `t`.
fn x_expr(layer: &LayerSpec) -> String {
    let m = &layer.motion;
    let speed = m.distance / m.duration;
    let op = match m.direction {
        Direction::Forward => '+',
        Direction::Reverse => '-',
    };
    format!("{}{op}{}*t", px(m.start_x), num(speed))
}

fn secs(v: f64) -> String {
    format!("{v:.6}")
}

fn rate(v: f64) -> String {
    format!("{v:.6}")
}

fn px(v: f64) -> String {
    format!("{v:.3}")
}

fn num(v: f64) -> String {
    format!("{v:.6}")
}

fn write_png(composite: &CompositeSpec, rgba: &[u8]) -> GestaltResult<()> {
    let expected = composite.width as usize * composite.height as usize * 4;
    if rgba.len() != expected {
        return Err(GestaltError::render(format!(
            "ffmpeg returned {} bytes for a {}x{} frame, expected {expected}",
            rgba.len(),
            composite.width,
            composite.height
        )));
    }

    image::save_buffer_with_format(
        &composite.out_path,
        rgba,
        composite.width,
        composite.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| {
        GestaltError::render(format!(
            "failed to write png '{}': {e}",
            composite.out_path.display()
        ))
    })
}

/// Remove whatever a failed `ffmpeg` run left at `path`.
fn discard_partial_output(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!("removed partial output '{}'", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("could not remove partial output '{}': {e}", path.display()),
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> GestaltResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            GestaltError::render(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/media/ffmpeg.rs"]
mod tests;
