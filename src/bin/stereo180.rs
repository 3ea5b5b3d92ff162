use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stereo180::{
    Coordinator, EyeImage, ImageCrateCodec, LatestSink, MetadataTree, PipelineOpts,
    ReencodePolicy, RunOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "stereo180", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stereo format and horizon correction implied by a metadata file.
    Classify(ClassifyArgs),
    /// Split a stereo photo into left/right eye JPEGs.
    Split(SplitArgs),
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    /// Parsed EXIF/XMP metadata as JSON.
    #[arg(long)]
    metadata: PathBuf,
}

#[derive(Parser, Debug)]
struct SplitArgs {
    /// Input photo (JPEG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Parsed EXIF/XMP metadata as JSON. Without it the photo is treated as side-by-side.
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Output directory for `left.jpg` and `right.jpg`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Skip the JPEG round trip of side-by-side halves.
    #[arg(long)]
    passthrough: bool,

    /// JPEG quality for re-encoded halves (1-100).
    #[arg(long, default_value_t = 100)]
    quality: u8,

    /// Fail a codec operation that takes longer than this many milliseconds.
    #[arg(long)]
    decode_timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Classify(args) => cmd_classify(args),
        Command::Split(args) => cmd_split(args).await,
    }
}

fn read_metadata(path: Option<&Path>) -> anyhow::Result<MetadataTree> {
    let Some(path) = path else {
        return Ok(MetadataTree::empty());
    };
    let f = File::open(path).with_context(|| format!("open metadata '{}'", path.display()))?;
    let tree = MetadataTree::from_reader(BufReader::new(f))
        .with_context(|| format!("parse metadata '{}'", path.display()))?;
    Ok(tree)
}

fn cmd_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let meta = read_metadata(Some(&args.metadata))?;
    let format = stereo180::classify_format(&meta);
    let correction = stereo180::resolve_orientation(&meta);

    let report = serde_json::json!({
        "format": format,
        "orientation": correction,
        "euler_degrees": correction.euler_degrees(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn cmd_split(args: SplitArgs) -> anyhow::Result<()> {
    let meta = read_metadata(args.metadata.as_deref())?;
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read photo '{}'", args.in_path.display()))?;

    let opts = PipelineOpts {
        reencode: if args.passthrough {
            ReencodePolicy::Passthrough
        } else {
            ReencodePolicy::Jpeg
        },
        jpeg_quality: args.quality,
        decode_timeout: args.decode_timeout_ms.map(Duration::from_millis),
    };
    let coordinator = Coordinator::new(ImageCrateCodec, LatestSink::new(), opts)?;

    match coordinator.load(bytes, meta).await {
        RunOutcome::Committed(_) => {}
        RunOutcome::Failed { error, .. } => {
            return Err(error).with_context(|| format!("split '{}'", args.in_path.display()));
        }
        RunOutcome::Superseded(g) => {
            anyhow::bail!("run {g} was superseded with no newer load (bug)")
        }
    }

    let presentation = coordinator
        .with_sink(LatestSink::take)
        .context("committed run left nothing in the sink (bug)")?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let left_path = write_eye(&presentation.pair.left, &args.out_dir, args.quality)?;
    let right_path = write_eye(&presentation.pair.right, &args.out_dir, args.quality)?;

    let correction = presentation.correction;
    let report = serde_json::json!({
        "generation": presentation.generation,
        "format": presentation.pair.format,
        "left": eye_report(&presentation.pair.left, &left_path),
        "right": eye_report(&presentation.pair.right, &right_path),
        "orientation": correction,
        "euler_degrees": correction.euler_degrees(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn write_eye(eye: &EyeImage, out_dir: &Path, quality: u8) -> anyhow::Result<PathBuf> {
    let path = out_dir.join(match eye.eye {
        stereo180::Eye::Left => "left.jpg",
        stereo180::Eye::Right => "right.jpg",
    });
    let bytes = match &eye.encoded {
        Some(encoded) => encoded.to_vec(),
        None => stereo180::encode_jpeg_raster(&eye.raster, quality)?,
    };
    std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    tracing::info!(texture = eye.texture_id(), path = %path.display(), "wrote eye image");
    Ok(path)
}

fn eye_report(eye: &EyeImage, path: &Path) -> serde_json::Value {
    let (width, height) = eye.dimensions();
    serde_json::json!({
        "texture_id": eye.texture_id(),
        "render_layer": eye.eye.render_layer(),
        "path": path.display().to_string(),
        "width": width,
        "height": height,
    })
}
