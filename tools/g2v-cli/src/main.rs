use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use g2v_config::{init_tracing, RuntimeConfig};
use g2v_core::ndarray::Ix2;
use g2v_core::{
    angular_projection, build_volume_stack, fft_encode, glyph_from_token, ifft_decode,
    load_real, reconstruction_mse, retrieve_layer, save_array, DEFAULT_GLYPH_SIZE,
};
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

type DynError = Box<dyn Error>;

type Result<T> = std::result::Result<T, DynError>;

const DEMO_TOKENS: [&str; 2] = ["I\u{2011}Glyph", "Octave Cycle Drive"];
const DEMO_THETA_DEG: f64 = 30.0;

#[derive(Parser)]
#[command(author, version, about = "Glyph-to-volume toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stack glyphs into a volume
    Stack(StackArgs),

    /// Extract a layer from a volume
    Slice(SliceArgs),

    /// Project a volume through an angle
    Project(ProjectArgs),

    /// FFT round-trip for a glyph
    Fft(FftArgs),

    /// Generate a glyph array by token
    Glyph(GlyphArgs),

    /// Build a two-glyph demo volume, its first layer and a 30° projection
    Demo(DemoArgs),
}

#[derive(Args)]
struct StackArgs {
    /// Output .npy volume path
    #[arg(long, value_hint = ValueHint::FilePath)]
    out: PathBuf,

    /// Input glyph .npy paths
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    glyphs: Vec<PathBuf>,
}

#[derive(Args)]
struct SliceArgs {
    /// Input volume .npy path
    #[arg(value_hint = ValueHint::FilePath)]
    volume: PathBuf,

    /// Layer index (0-based)
    #[arg(long, allow_negative_numbers = true)]
    z: i64,

    /// Output .npy path
    #[arg(long, value_hint = ValueHint::FilePath)]
    out: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    X,
    Y,
    Z,
}

impl AxisArg {
    fn as_str(self) -> &'static str {
        match self {
            AxisArg::X => "x",
            AxisArg::Y => "y",
            AxisArg::Z => "z",
        }
    }
}

#[derive(Args)]
struct ProjectArgs {
    /// Input volume .npy path
    #[arg(value_hint = ValueHint::FilePath)]
    volume: PathBuf,

    /// Angle in degrees
    #[arg(long, allow_negative_numbers = true)]
    theta: f64,

    /// Axis
    #[arg(long, value_enum, default_value_t = AxisArg::X)]
    axis: AxisArg,

    /// Output .npy path
    #[arg(long, value_hint = ValueHint::FilePath)]
    out: PathBuf,
}

#[derive(Args)]
struct FftArgs {
    /// Input glyph .npy path
    #[arg(value_hint = ValueHint::FilePath)]
    glyph: PathBuf,

    /// Reconstruction .npy
    #[arg(long = "out-recon", value_hint = ValueHint::FilePath)]
    out_recon: PathBuf,

    /// Spectrum .npy
    #[arg(long = "out-spec", value_hint = ValueHint::FilePath)]
    out_spec: PathBuf,
}

#[derive(Args)]
struct GlyphArgs {
    /// Glyph token name
    #[arg(long)]
    token: String,

    /// Glyph size (pixels)
    #[arg(long, default_value_t = DEFAULT_GLYPH_SIZE)]
    size: usize,

    /// Output .npy path
    #[arg(long, value_hint = ValueHint::FilePath)]
    out: PathBuf,
}

#[derive(Args)]
struct DemoArgs {
    /// Directory receiving volume.npy, layer0.npy and projection_30deg.npy
    #[arg(long, default_value = "demo-data", value_hint = ValueHint::DirPath)]
    out_dir: PathBuf,
}

#[derive(Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Summary {
    Stack {
        out: String,
        shape: Vec<usize>,
    },
    Slice {
        out: String,
        z: i64,
        shape: Vec<usize>,
    },
    Project {
        out: String,
        theta: f64,
        axis: &'static str,
        shape: Vec<usize>,
    },
    Fft {
        out_spec: String,
        out_recon: String,
        glyph_shape: Vec<usize>,
        mse: f64,
    },
    Glyph {
        token: String,
        size: usize,
        out: String,
    },
    Demo {
        volume: String,
        layer0: String,
        projection: String,
    },
}

fn main() {
    let guard = match RuntimeConfig::from_env().and_then(|config| init_tracing(&config)) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            None
        }
    };
    let outcome = try_main();
    drop(guard);
    if let Err(err) = outcome {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = match &cli.command {
        Command::Stack(args) => run_stack(args)?,
        Command::Slice(args) => run_slice(args)?,
        Command::Project(args) => run_project(args)?,
        Command::Fft(args) => run_fft(args)?,
        Command::Glyph(args) => run_glyph(args)?,
        Command::Demo(args) => run_demo(args)?,
    };
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn run_stack(args: &StackArgs) -> Result<Summary> {
    let glyphs = args
        .glyphs
        .iter()
        .map(load_real)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let volume = build_volume_stack(&glyphs)?;
    let out = save_array(&args.out, &volume)?;
    tracing::info!(inputs = glyphs.len(), %out, "stacked glyphs");
    Ok(Summary::Stack {
        out,
        shape: volume.shape().to_vec(),
    })
}

fn run_slice(args: &SliceArgs) -> Result<Summary> {
    let volume = load_real(&args.volume)?;
    let layer = retrieve_layer(&volume, args.z)?;
    let out = save_array(&args.out, &layer)?;
    tracing::info!(z = args.z, %out, "sliced layer");
    Ok(Summary::Slice {
        out,
        z: args.z,
        shape: layer.shape().to_vec(),
    })
}

fn run_project(args: &ProjectArgs) -> Result<Summary> {
    let volume = load_real(&args.volume)?;
    let axis = args.axis.as_str();
    let projection = angular_projection(&volume, args.theta, axis)?;
    let out = save_array(&args.out, &projection)?;
    tracing::info!(theta = args.theta, axis, %out, "projected volume");
    Ok(Summary::Project {
        out,
        theta: args.theta,
        axis,
        shape: projection.shape().to_vec(),
    })
}

fn run_fft(args: &FftArgs) -> Result<Summary> {
    let glyph = load_real(&args.glyph)?;
    let spectrum = fft_encode(&glyph)?;
    let recon = ifft_decode(&spectrum)?;
    let out_spec = save_array(&args.out_spec, &spectrum)?;
    let out_recon = save_array(&args.out_recon, &recon)?;
    let original = glyph.view().into_dimensionality::<Ix2>()?;
    let mse = reconstruction_mse(&original, &recon)?;
    tracing::info!(%out_spec, %out_recon, mse, "fft round trip");
    Ok(Summary::Fft {
        out_spec,
        out_recon,
        glyph_shape: glyph.shape().to_vec(),
        mse,
    })
}

fn run_glyph(args: &GlyphArgs) -> Result<Summary> {
    let glyph = glyph_from_token(&args.token, args.size)?;
    let out = save_array(&args.out, &glyph)?;
    tracing::info!(token = %args.token, size = args.size, %out, "synthesized glyph");
    Ok(Summary::Glyph {
        token: args.token.clone(),
        size: args.size,
        out,
    })
}

fn run_demo(args: &DemoArgs) -> Result<Summary> {
    let glyphs = DEMO_TOKENS
        .iter()
        .map(|token| glyph_from_token(token, DEFAULT_GLYPH_SIZE))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let volume = build_volume_stack(&glyphs)?;
    let layer0 = retrieve_layer(&volume, 0)?;
    let projection = angular_projection(&volume, DEMO_THETA_DEG, "x")?;

    let dir: &Path = &args.out_dir;
    let summary = Summary::Demo {
        volume: save_array(dir.join("volume.npy"), &volume)?,
        layer0: save_array(dir.join("layer0.npy"), &layer0)?,
        projection: save_array(dir.join("projection_30deg.npy"), &projection)?,
    };
    tracing::info!(dir = %dir.display(), "saved demo data");
    Ok(summary)
}
