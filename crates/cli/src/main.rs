mod settings;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use face_overlay_core::detection::infrastructure::replay_landmark_detector::ReplayLandmarkDetector;
use face_overlay_core::overlay::domain::face_geometry::FaceGeometry;
use face_overlay_core::overlay::domain::overlay_sink::OverlayRenderer;
use face_overlay_core::overlay::infrastructure::channel_overlay::overlay_channel;
use face_overlay_core::pipeline::frame_dispatcher::FrameDispatcher;
use face_overlay_core::pipeline::landmark_projector::LandmarkProjector;
use face_overlay_core::pipeline::live_overlay_use_case::LiveOverlayUseCase;
use face_overlay_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use face_overlay_core::projection::domain::preview_geometry::{
    PreviewGeometry, Rotation, VideoGravity,
};
use face_overlay_core::projection::infrastructure::shared_preview_geometry::SharedPreviewGeometry;
use face_overlay_core::shared::geometry::{Rect, Size};
use face_overlay_core::source::domain::frame_source::{FrameSource, SourceMetadata};
use face_overlay_core::source::infrastructure::image_sequence_source::ImageSequenceSource;

use settings::Settings;

/// Replay recorded face landmarks over an image sequence and emit the
/// projected overlay geometry as JSON lines.
#[derive(Parser)]
#[command(name = "face-overlay")]
struct Cli {
    /// Directory of frames (sorted by file name).
    input: PathBuf,

    /// Recorded detections (JSON: {"frames": {"0": [...]}, "failures": [..]}).
    #[arg(long)]
    detections: PathBuf,

    /// Output file for JSON lines (stdout if omitted).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Preview layer width in pixels.
    #[arg(long)]
    layer_width: Option<f64>,

    /// Preview layer height in pixels.
    #[arg(long)]
    layer_height: Option<f64>,

    /// Video gravity: fill, fit or stretch.
    #[arg(long)]
    gravity: Option<String>,

    /// Clockwise sensor-to-display rotation: 0, 90, 180 or 270.
    #[arg(long)]
    rotation: Option<u32>,

    /// Mirror the preview horizontally.
    #[arg(long)]
    mirrored: bool,

    /// Simulated camera rate; 0 delivers frames as fast as possible.
    #[arg(long, default_value = "0")]
    fps: f64,

    /// Log progress every N processed frames.
    #[arg(long)]
    log_every: Option<usize>,
}

/// Writes one JSON object per redraw.
struct JsonLinesRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesRenderer<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(e) = self.error.take() {
            return Err(e.into());
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> OverlayRenderer for JsonLinesRenderer<W> {
    fn redraw(&mut self, geometry: &FaceGeometry) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, geometry)
            .map_err(io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        if let Err(e) = result {
            self.error = Some(e);
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::load();
    validate(&cli)?;

    let mut source: Box<dyn FrameSource> = Box::new(ImageSequenceSource::new(&cli.input));
    let metadata = source.open()?;

    let geometry = build_preview(&cli, &settings, &metadata)?;
    log::info!(
        "Preview {}x{} ({:?}, rotation {:?}, mirrored {})",
        geometry.layer_bounds.size.width,
        geometry.layer_bounds.size.height,
        geometry.gravity,
        geometry.rotation,
        geometry.mirrored
    );
    let preview = SharedPreviewGeometry::new(geometry);

    let detector = ReplayLandmarkDetector::from_file(&cli.detections)?;
    let (publisher, mut overlay) = overlay_channel();
    let logger = StdoutPipelineLogger::new(cli.log_every.unwrap_or(settings.log_every));
    let dispatcher = FrameDispatcher::new(
        Box::new(detector),
        LandmarkProjector::new(preview, Box::new(publisher)),
        Box::new(logger),
    );

    let mut use_case = LiveOverlayUseCase::new(source, dispatcher);
    if cli.fps > 0.0 {
        use_case = use_case.with_frame_interval(Duration::from_secs_f64(1.0 / cli.fps));
    }

    let stats = match &cli.output {
        Some(path) => {
            let mut renderer = JsonLinesRenderer::new(BufWriter::new(File::create(path)?));
            let stats = use_case.execute(&mut overlay, &mut renderer)?;
            renderer.finish()?;
            log::info!("Overlay geometry written to {}", path.display());
            stats
        }
        None => {
            let mut renderer = JsonLinesRenderer::new(io::stdout().lock());
            let stats = use_case.execute(&mut overlay, &mut renderer)?;
            renderer.finish()?;
            stats
        }
    };

    log::info!(
        "{} frames: {} projected, {} dropped, {} failed",
        stats.submitted,
        stats.projected,
        stats.dropped,
        stats.failed
    );
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.is_dir() {
        return Err(format!("Input directory not found: {}", cli.input.display()).into());
    }
    if !cli.detections.is_file() {
        return Err(format!("Detections file not found: {}", cli.detections.display()).into());
    }
    if let Some(v) = cli.layer_width {
        check_layer_dimension("width", v)?;
    }
    if let Some(v) = cli.layer_height {
        check_layer_dimension("height", v)?;
    }
    if let Some(g) = &cli.gravity {
        parse_gravity(g)?;
    }
    if let Some(r) = cli.rotation {
        parse_rotation(r)?;
    }
    if !(cli.fps.is_finite() && cli.fps >= 0.0) {
        return Err(format!("FPS must be zero or positive, got {}", cli.fps).into());
    }
    Ok(())
}

fn build_preview(
    cli: &Cli,
    settings: &Settings,
    metadata: &SourceMetadata,
) -> Result<PreviewGeometry, Box<dyn std::error::Error>> {
    let gravity = match &cli.gravity {
        Some(g) => parse_gravity(g)?,
        None => settings.gravity,
    };
    let rotation = match cli.rotation {
        Some(r) => parse_rotation(r)?,
        None => settings.rotation,
    };
    let width = check_layer_dimension("width", cli.layer_width.unwrap_or(settings.layer_width))?;
    let height =
        check_layer_dimension("height", cli.layer_height.unwrap_or(settings.layer_height))?;

    Ok(PreviewGeometry::new(
        Rect::new(0.0, 0.0, width, height),
        display_video_size(metadata, rotation),
    )
    .with_gravity(gravity)
    .with_rotation(rotation)
    .with_mirrored(cli.mirrored || settings.mirrored))
}

fn check_layer_dimension(name: &str, value: f64) -> Result<f64, Box<dyn std::error::Error>> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("Layer {name} must be positive, got {value}").into())
    }
}

/// Frame dimensions after rotating into display orientation.
fn display_video_size(metadata: &SourceMetadata, rotation: Rotation) -> Size {
    let (w, h) = (metadata.width as f64, metadata.height as f64);
    match rotation {
        Rotation::R90 | Rotation::R270 => Size::new(h, w),
        Rotation::R0 | Rotation::R180 => Size::new(w, h),
    }
}

fn parse_gravity(value: &str) -> Result<VideoGravity, Box<dyn std::error::Error>> {
    match value {
        "fill" => Ok(VideoGravity::ResizeAspectFill),
        "fit" => Ok(VideoGravity::ResizeAspect),
        "stretch" => Ok(VideoGravity::Resize),
        other => {
            Err(format!("Gravity must be 'fill', 'fit' or 'stretch', got '{other}'").into())
        }
    }
}

fn parse_rotation(value: u32) -> Result<Rotation, Box<dyn std::error::Error>> {
    Rotation::from_degrees(value)
        .ok_or_else(|| format!("Rotation must be 0, 90, 180 or 270, got {value}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    /// Input directory and detections file that pass the existence checks.
    fn inputs() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let detections = dir.path().join("detections.json");
        fs::write(&detections, r#"{"frames": {}}"#).unwrap();
        (dir, detections)
    }

    fn parse(input: &std::path::Path, detections: &std::path::Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "face-overlay".to_string(),
            input.display().to_string(),
            "--detections".to_string(),
            detections.display().to_string(),
        ];
        args.extend(extra.iter().map(|a| a.to_string()));
        Cli::parse_from(args)
    }

    fn metadata(width: u32, height: u32) -> SourceMetadata {
        SourceMetadata {
            width,
            height,
            total_frames: 1,
        }
    }

    #[test]
    fn test_validate_accepts_existing_inputs() {
        let (dir, detections) = inputs();
        let cli = parse(
            dir.path(),
            &detections,
            &["--layer-width", "390", "--gravity", "fit", "--rotation", "90", "--fps", "30"],
        );
        assert!(validate(&cli).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_input_dir() {
        let (dir, detections) = inputs();
        let cli = parse(&dir.path().join("frames"), &detections, &[]);

        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Input directory not found"));
    }

    #[test]
    fn test_validate_rejects_missing_detections() {
        let (dir, _) = inputs();
        let cli = parse(dir.path(), &dir.path().join("missing.json"), &[]);

        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Detections file not found"));
    }

    #[rstest]
    #[case(&["--layer-width", "0"], "Layer width must be positive")]
    #[case(&["--layer-height=-5"], "Layer height must be positive")]
    #[case(&["--layer-width", "NaN"], "Layer width must be positive")]
    #[case(&["--fps=-1"], "FPS must be zero or positive")]
    #[case(&["--fps", "inf"], "FPS must be zero or positive")]
    #[case(&["--gravity", "zoom"], "Gravity must be")]
    #[case(&["--rotation", "45"], "Rotation must be")]
    fn test_validate_rejects_bad_flags(#[case] extra: &[&str], #[case] message: &str) {
        let (dir, detections) = inputs();
        let cli = parse(dir.path(), &detections, extra);

        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains(message), "{err}");
    }

    #[rstest]
    #[case(Settings { layer_width: 0.0, ..Settings::default() }, "Layer width must be positive")]
    #[case(Settings { layer_height: -1.0, ..Settings::default() }, "Layer height must be positive")]
    fn test_build_preview_rejects_bad_settings(#[case] settings: Settings, #[case] message: &str) {
        let (dir, detections) = inputs();
        let cli = parse(dir.path(), &detections, &[]);

        let err = build_preview(&cli, &settings, &metadata(4, 3)).unwrap_err();
        assert!(err.to_string().contains(message), "{err}");
    }

    #[test]
    fn test_build_preview_flags_override_settings() {
        let (dir, detections) = inputs();
        let cli = parse(dir.path(), &detections, &["--layer-width", "200", "--rotation", "90"]);
        let settings = Settings {
            layer_width: 0.0,
            ..Settings::default()
        };

        let geometry = build_preview(&cli, &settings, &metadata(1920, 1080)).unwrap();

        assert_eq!(geometry.layer_bounds.size, Size::new(200.0, 844.0));
        assert_eq!(geometry.rotation, Rotation::R90);
        assert_eq!(geometry.video_size, Size::new(1080.0, 1920.0));
    }

    #[test]
    fn test_parse_gravity() {
        assert_eq!(parse_gravity("fill").unwrap(), VideoGravity::ResizeAspectFill);
        assert_eq!(parse_gravity("fit").unwrap(), VideoGravity::ResizeAspect);
        assert_eq!(parse_gravity("stretch").unwrap(), VideoGravity::Resize);
        assert!(parse_gravity("zoom").is_err());
    }

    #[test]
    fn test_parse_rotation() {
        assert_eq!(parse_rotation(270).unwrap(), Rotation::R270);
        assert!(parse_rotation(45).is_err());
    }

    #[test]
    fn test_display_size_swaps_for_quarter_turns() {
        assert_eq!(
            display_video_size(&metadata(1920, 1080), Rotation::R90),
            Size::new(1080.0, 1920.0)
        );
        assert_eq!(
            display_video_size(&metadata(1920, 1080), Rotation::R180),
            Size::new(1920.0, 1080.0)
        );
    }

    #[test]
    fn test_renderer_writes_one_line_per_redraw() {
        let mut renderer = JsonLinesRenderer::new(Vec::new());
        renderer.redraw(&FaceGeometry::default());
        renderer.redraw(&FaceGeometry::default());

        let text = String::from_utf8(renderer.out.clone()).unwrap();
        assert_eq!(text.lines().count(), 2);
        let parsed: FaceGeometry = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(parsed, FaceGeometry::default());
        renderer.finish().unwrap();
    }
}
