use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use endpoint_chart::annotations::AnnotationLayer;
use endpoint_chart::export::default_download_dir;
use endpoint_chart::images::ImageCache;
use endpoint_chart::overlay::{DatasetsDrawHook, EndpointOverlay};
use endpoint_chart::{ChartConfig, ChartHost, ChartKind, viz};

#[derive(Parser, Debug)]
#[command(
    name = "endpoint-chart",
    version,
    about = "Render a line/bar chart with endpoint avatars and max-value labels"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart to a PNG or SVG file.
    Render(RenderArgs),
    /// Render and save as chart.png in a directory (downloads folder by default).
    Export(ExportArgs),
    /// Print the annotation markers of the configured data as JSON.
    Annotations(ConfigArg),
    /// Write the built-in configuration to a JSON file.
    InitConfig {
        /// Destination path.
        path: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Line,
    Bar,
}

impl From<KindArg> for ChartKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Line => ChartKind::Line,
            KindArg::Bar => ChartKind::Bar,
        }
    }
}

#[derive(Args, Debug)]
struct ConfigArg {
    /// JSON config; the built-in dataset is used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArg,
    /// Chart presentation.
    #[arg(short, long, value_enum, default_value_t = KindArg::Line)]
    kind: KindArg,
    /// Output path (.svg or .png).
    #[arg(short, long, default_value = "chart.png")]
    out: PathBuf,
    /// Override the configured width.
    #[arg(long)]
    width: Option<u32>,
    /// Override the configured height.
    #[arg(long)]
    height: Option<u32>,
    /// Leave out endpoint avatars and labels.
    #[arg(long, default_value_t = false)]
    no_overlay: bool,
    /// Leave out max-value labels.
    #[arg(long, default_value_t = false)]
    no_annotations: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    config: ConfigArg,
    #[arg(short, long, value_enum, default_value_t = KindArg::Line)]
    kind: KindArg,
    /// Directory chart.png is written to.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn load_config(arg: &ConfigArg) -> Result<ChartConfig> {
    match &arg.config {
        Some(p) => ChartConfig::load(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(ChartConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Export(args) => cmd_export(args),
        Command::Annotations(args) => cmd_annotations(args),
        Command::InitConfig { path } => cmd_init_config(&path),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    config.validate()?;

    let mut hooks: Vec<Box<dyn DatasetsDrawHook>> = Vec::new();
    if !args.no_annotations {
        hooks.push(Box::new(AnnotationLayer));
    }
    let overlay = EndpointOverlay::default();
    let mut images = ImageCache::new(overlay.image_size);
    if !args.no_overlay {
        images.preload(config.data.series.iter().map(|s| config.assets.avatar_for(s)));
        hooks.push(Box::new(overlay));
    }

    viz::render_to_file(&args.out, &config, args.kind.into(), &images, &hooks)
        .with_context(|| format!("rendering {}", args.out.display()))?;
    eprintln!("Wrote chart to {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let dir = args.out_dir.unwrap_or_else(default_download_dir);
    let mut host = ChartHost::new(config);
    host.set_kind(args.kind.into());
    host.render()?;
    if let Some(path) = host.export(&dir)? {
        eprintln!("Exported chart to {}", path.display());
    }
    Ok(())
}

fn cmd_annotations(args: ConfigArg) -> Result<()> {
    let config = load_config(&args)?;
    let host = ChartHost::new(config);
    println!("{}", serde_json::to_string_pretty(&host.annotations())?);
    Ok(())
}

fn cmd_init_config(path: &Path) -> Result<()> {
    ChartConfig::default()
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    eprintln!("Wrote default config to {}", path.display());
    Ok(())
}
