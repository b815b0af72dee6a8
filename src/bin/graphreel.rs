use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use graphreel::{
    ExportOptions, ExprEnv, FrameExporter, GraphSnapshot, GraphStyle, LayoutRunOptions,
    LayoutStepDriver, NoOpLayout, PngSequenceSink, Renderer as _, SvgRenderer, fit_camera,
};

#[derive(Parser, Debug)]
#[command(name = "graphreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a layout over a graph and write a PNG frame sequence.
    Export(ExportArgs),
    /// Validate a run configuration without rendering anything.
    Check(CheckArgs),
    /// Evaluate a camera expression.
    Eval(EvalArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Graph snapshot JSON (`{"nodes": [...], "edges": [...]}`).
    #[arg(long)]
    graph: PathBuf,

    /// Run configuration JSON (`{"layout": {...}, "export": {...}}`).
    #[arg(long)]
    config: PathBuf,

    /// Output directory for frames and the camera log.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Run configuration JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Expression source, e.g. `step / totalSteps * 2`.
    expr: String,

    /// Variable binding `name=value`; repeatable.
    #[arg(long = "var", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RunConfig {
    layout: LayoutRunOptions,
    #[serde(default)]
    export: ExportOptions,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Check(args) => cmd_check(args),
        Command::Eval(args) => cmd_eval(args),
    }
}

fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("bad value for '{name}': {e}"))?;
    Ok((name.trim().to_owned(), value))
}

fn read_run_config(path: &Path) -> anyhow::Result<RunConfig> {
    let f = File::open(path).with_context(|| format!("open run config '{}'", path.display()))?;
    let cfg: RunConfig = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse run config '{}'", path.display()))?;
    Ok(cfg)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = read_run_config(&args.config)?;
    let schedule = cfg.layout.schedule()?;
    let plan = cfg.export.plan()?;
    let canvas = cfg.export.canvas()?;
    println!(
        "ok: {} steps, a frame every {}, {}x{} canvas, scale {:?}, pan {:?}",
        schedule.total_steps, schedule.export_every, canvas.width, canvas.height, plan.scale, plan.pan
    );
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let mut env = ExprEnv::new();
    for (name, value) in &args.vars {
        env.set(name, *value);
    }
    let v = graphreel::evaluate(&args.expr, &env)?;
    println!("{v}");
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let cfg = read_run_config(&args.config)?;
    let graph = GraphSnapshot::from_path(&args.graph)?;

    let mode = cfg.layout.mode()?;
    let schedule = cfg.layout.schedule()?;
    let canvas = cfg.export.canvas()?;

    let mut style = GraphStyle::default();
    if cfg.export.transparent_bg {
        style = style.transparent();
    }
    let mut renderer = SvgRenderer::new(canvas, style);
    renderer.set_camera(fit_camera(&graph, canvas))?;

    let mut sink = PngSequenceSink::new(&args.out, cfg.export.prefix()?);
    let mut exporter = FrameExporter::from_options(&cfg.export, schedule, &mut sink)?;

    let mut layout = NoOpLayout::new(graph);
    let mut driver = LayoutStepDriver::new(&mut layout, mode)?;
    let report = driver
        .run_with_export(&mut exporter, &mut renderer)
        .context("export run failed")?;

    tracing::info!(
        steps = report.steps_run,
        frames = report.frames.len(),
        out = %args.out.display(),
        "export finished"
    );
    println!(
        "wrote {} frames to {}",
        report.frames.len(),
        args.out.display()
    );
    Ok(())
}
