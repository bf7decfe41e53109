use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use clap::{ArgGroup, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "videogestalt",
    version,
    about = "Generates an animated overview of a video",
    group(ArgGroup::new("format").required(true).args(["gif", "video", "image"]))
)]
struct Cli {
    /// Input video file.
    #[arg(short, long, value_name = "something.mp4", value_parser = existing_path)]
    input: PathBuf,

    /// Output path. Defaults to `gestalt-<input name>` next to the input.
    #[arg(short, long, value_name = "/some/folder/output.(gif|mp4)")]
    output: Option<PathBuf>,

    /// Generate an animated GIF.
    #[arg(short, long)]
    gif: bool,

    /// Generate a video file.
    #[arg(short, long)]
    video: bool,

    /// Generate a PNG still of the first composite frame.
    #[arg(long)]
    image: bool,

    /// Nominal output width in pixels.
    #[arg(long)]
    output_width: Option<u32>,

    /// Minimum thumbnail width in pixels.
    #[arg(long)]
    min_thumb_width: Option<u32>,

    /// Minimum slide speed in pixels per frame.
    #[arg(long)]
    min_speed: Option<f64>,

    /// Canvas sizing policy.
    #[arg(long, value_enum, default_value_t = PolicyChoice::WidthFirst)]
    policy: PolicyChoice,

    /// GIF frame rate (defaults to the source frame rate).
    #[arg(long)]
    gif_fps: Option<f64>,

    /// GIF palette size.
    #[arg(long, default_value_t = 256, value_parser = clap::value_parser!(u16).range(2..=256))]
    gif_colors: u16,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,

    /// Print the computed layout as JSON and exit without rendering.
    #[arg(long)]
    dump_plan: bool,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyChoice {
    WidthFirst,
    ThumbSizeFirst,
}

impl From<PolicyChoice> for videogestalt::SizingPolicyKind {
    fn from(choice: PolicyChoice) -> Self {
        match choice {
            PolicyChoice::WidthFirst => Self::WidthFirst,
            PolicyChoice::ThumbSizeFirst => Self::ThumbSizeFirst,
        }
    }
}

fn existing_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() || path.is_file() {
        Ok(path)
    } else {
        Err(format!("{s} is not a directory nor a file"))
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

impl Cli {
    fn format(&self) -> videogestalt::OutputFormat {
        if self.gif {
            videogestalt::OutputFormat::Gif
        } else if self.video {
            videogestalt::OutputFormat::Video
        } else {
            videogestalt::OutputFormat::Image
        }
    }

    fn grid_config(&self) -> videogestalt::GridConfig {
        let defaults = videogestalt::GridConfig::default();
        videogestalt::GridConfig {
            output_width: self.output_width.unwrap_or(defaults.output_width),
            min_thumb_width: self.min_thumb_width.unwrap_or(defaults.min_thumb_width),
            min_speed_pixels_per_frame: self
                .min_speed
                .unwrap_or(defaults.min_speed_pixels_per_frame),
            policy: self.policy.into(),
        }
    }

    fn render_options(&self) -> videogestalt::RenderOptions {
        videogestalt::RenderOptions {
            gif: videogestalt::GifOptions {
                fps: self.gif_fps,
                max_colors: self.gif_colors,
            },
            overwrite: !self.no_overwrite,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = cli.format();
    let cfg = cli.grid_config();
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| videogestalt::default_output_path(&cli.input));

    if cli.dump_plan {
        let source = videogestalt::VideoHandle::open(&cli.input)?;
        let plan = videogestalt::compute_layout(source.metadata(), &cfg)?;
        let stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(stdout, &plan).context("write plan json")?;
        println!();
        return Ok(());
    }

    let started = Instant::now();
    let result =
        videogestalt::generate(&cli.input, &output, format, &cfg, &cli.render_options())?;

    eprintln!("wrote {}", result.output_path.display());
    eprintln!(
        "--- Total time spent: {} seconds ---",
        started.elapsed().as_secs()
    );
    Ok(())
}
