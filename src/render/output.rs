use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Kind of artifact to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// A single PNG still of the first composite frame.
    Image,
    /// An animated, palette-quantized GIF.
    Gif,
    /// A video in the container implied by the output extension.
    Video,
}

/// GIF encoding knobs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GifOptions {
    /// Output frame rate; `None` keeps the source rate.
    pub fps: Option<f64>,
    /// Palette size, 2..=256.
    pub max_colors: u16,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            fps: None,
            max_colors: 256,
        }
    }
}

/// Whether the final component of `path` ends with `suffix`, ignoring ASCII case.
///
/// Compared on the raw name so a bare `.gif` counts as already suffixed.
fn has_suffix_ci(path: &Path, suffix: &str) -> bool {
    path.file_name().is_some_and(|name| {
        let name = name.as_encoded_bytes();
        name.len() >= suffix.len()
            && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
    })
}

fn append(path: &Path, suffix: &std::ffi::OsStr) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}

/// Final write path for `output` given the target `format`.
///
/// - GIF: `.gif` is appended unless already present (any case).
/// - Video: with no extension, the `input` extension is appended so the encoder can pick a
///   container.
/// - Image: `.png` is appended unless already present (any case).
pub fn resolve_output_path(output: &Path, format: OutputFormat, input: &Path) -> PathBuf {
    match format {
        OutputFormat::Gif if !has_suffix_ci(output, ".gif") => append(output, ".gif".as_ref()),
        OutputFormat::Image if !has_suffix_ci(output, ".png") => append(output, ".png".as_ref()),
        OutputFormat::Video if output.extension().is_none() => match input.extension() {
            Some(ext) => {
                let mut suffix = OsString::from(".");
                suffix.push(ext);
                append(output, &suffix)
            }
            None => output.to_path_buf(),
        },
        _ => output.to_path_buf(),
    }
}

/// `gestalt-<file name>` next to `input`, used when no output path is given.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from("gestalt-");
    name.push(input.file_name().unwrap_or(input.as_os_str()));
    match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/output.rs"]
mod tests;
