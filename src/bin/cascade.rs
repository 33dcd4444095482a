use std::path::{Path, PathBuf};

use anyhow::Context as _;
use cascade::TimelineWriter as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cascade", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay a directory of generation records out as an OTIO timeline.
    Timeline(TimelineArgs),
    /// Unwrap one storyboard record into an OTIO timeline.
    Storyboard(StoryboardArgs),
    /// Build the crossfade compositing graph for a directory of records.
    Comp(CompArgs),
}

#[derive(Args, Debug)]
struct BuildOpts {
    /// TOML build configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds a normalized domain window of 1.0 spans.
    #[arg(long)]
    base_duration: Option<f64>,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Directory of generation record JSON files.
    #[arg(long = "in")]
    in_dir: PathBuf,

    /// Output .otio path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    build: BuildOpts,
}

#[derive(Parser, Debug)]
struct StoryboardArgs {
    /// Storyboard record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output .otio path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    build: BuildOpts,
}

#[derive(Parser, Debug)]
struct CompArgs {
    /// Directory of generation record JSON files.
    #[arg(long = "in")]
    in_dir: PathBuf,

    /// Output composition path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the intermediate timeline as OTIO.
    #[arg(long)]
    timeline_out: Option<PathBuf>,

    /// Crossfade segments stacked on every track, not just V1.
    #[arg(long)]
    all_tracks: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = GraphFormat::Fusion)]
    format: GraphFormat,

    #[command(flatten)]
    build: BuildOpts,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GraphFormat {
    Fusion,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Storyboard(args) => cmd_storyboard(args),
        Command::Comp(args) => cmd_comp(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(opts: &BuildOpts) -> anyhow::Result<cascade::BuildConfig> {
    let mut config = match &opts.config {
        Some(path) => cascade::BuildConfig::from_path(path)?,
        None => cascade::BuildConfig::default(),
    };
    if let Some(base) = opts.base_duration {
        config.base_duration_secs = base;
    }
    config.validate()?;
    Ok(config)
}

fn read_records(dir: &Path) -> anyhow::Result<Vec<cascade::GenerationRecord>> {
    let records = cascade::load_generation_records(dir)
        .with_context(|| format!("load records from '{}'", dir.display()))?;
    Ok(records)
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let config = load_config(&args.build)?;
    let records = read_records(&args.in_dir)?;
    let timeline = cascade::build_timeline(&records, &config)?;

    let text = cascade::OtioJson::new(config.timeline_fps).write_timeline(&timeline)?;
    cascade::write_artifact(&args.out, &text)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_storyboard(args: StoryboardArgs) -> anyhow::Result<()> {
    let config = load_config(&args.build)?;
    let storyboard = cascade::load_storyboard(&args.in_path)
        .with_context(|| format!("load storyboard '{}'", args.in_path.display()))?;
    let timeline = cascade::build_storyboard_timeline(&storyboard, &config)?;

    let text = cascade::OtioJson::new(config.timeline_fps).write_timeline(&timeline)?;
    cascade::write_artifact(&args.out, &text)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_comp(args: CompArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.build)?;
    if args.all_tracks {
        config.group_scope = cascade::GroupScope::AllTracks;
    }
    let records = read_records(&args.in_dir)?;
    let composed = cascade::compose(&records, &config)?;

    let serializer: Box<dyn cascade::GraphSerializer> = match args.format {
        GraphFormat::Fusion => Box::new(cascade::FusionComp::default()),
        GraphFormat::Json => Box::new(cascade::JsonGraph),
    };
    let otio = cascade::OtioJson::new(config.timeline_fps);
    let (timeline_text, graph_text) =
        cascade::render_composed(&composed, &otio, serializer.as_ref())?;

    if let Some(path) = &args.timeline_out {
        cascade::write_artifact(path, &timeline_text)?;
        eprintln!("wrote {}", path.display());
    }
    cascade::write_artifact(&args.out, &graph_text)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
