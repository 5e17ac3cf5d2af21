use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "aup2", version)]
struct Cli {
    /// Increase log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print counts, the layer histogram and parse warnings.
    Summary(SummaryArgs),
    /// Check that a project can be written back out.
    Validate(InputArgs),
    /// Parse and reconstruct without changes.
    Normalize(ConvertArgs),
    /// Move objects to one layer, optionally repacking their frames.
    Transform(TransformArgs),
    /// Write the keyed JSON tree of a project.
    ExportJson(ConvertArgs),
    /// Rebuild a project from a JSON tree.
    ImportJson(ConvertArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input `.aup2` project.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    /// Input `.aup2` project.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TransformArgs {
    /// Input `.aup2` project.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output `.aup2` path.
    #[arg(long)]
    out: PathBuf,

    /// Only touch objects of this scene.
    #[arg(long, allow_negative_numbers = true)]
    scene: Option<i64>,

    /// Target layer.
    #[arg(long, allow_negative_numbers = true)]
    layer: Option<i64>,

    /// Pack frame windows back to back and renumber the selected objects.
    #[arg(long)]
    adjust_frames: bool,

    /// Where objects without a `scene` key go when packing across scenes.
    #[arg(long, value_enum)]
    unspecified: Option<PlacementChoice>,

    /// Base options as JSON; explicit flags override its fields.
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Print the transform report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlacementChoice {
    Trailing,
    Leading,
    SceneZero,
}

impl From<PlacementChoice> for aup2::UnspecifiedScenePlacement {
    fn from(c: PlacementChoice) -> Self {
        match c {
            PlacementChoice::Trailing => Self::Trailing,
            PlacementChoice::Leading => Self::Leading,
            PlacementChoice::SceneZero => Self::SceneZero,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Summary(args) => cmd_summary(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Normalize(args) => cmd_normalize(args),
        Command::Transform(args) => cmd_transform(args),
        Command::ExportJson(args) => cmd_export_json(args),
        Command::ImportJson(args) => cmd_import_json(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn print_warnings(warnings: &[String]) {
    for w in warnings {
        eprintln!("warning: {w}");
    }
}

fn cmd_summary(args: SummaryArgs) -> anyhow::Result<()> {
    let doc = aup2::read_document(&args.in_path)?;
    let summary = aup2::summarize(&doc);

    if args.json {
        let s = serde_json::to_string_pretty(&summary).context("encode summary JSON")?;
        println!("{s}");
    } else {
        println!("file: {}", args.in_path.display());
        println!("lines: {}", summary.line_count);
        println!("project: {}", if summary.has_project { "yes" } else { "no" });
        println!("scenes: {}", summary.scene_count);
        println!("objects: {}", summary.object_count);
        println!("sections: {}", summary.section_count);
        for (layer, count) in &summary.layer_histogram {
            println!("  layer {layer}: {count}");
        }
        println!("warnings: {}", summary.warning_count);
    }
    print_warnings(doc.warnings());
    Ok(())
}

fn cmd_validate(args: InputArgs) -> anyhow::Result<()> {
    let outcome = aup2::validate_file(&args.in_path)?;
    print_warnings(&outcome.warnings);
    for e in &outcome.errors {
        eprintln!("error: {e}");
    }
    if !outcome.valid {
        anyhow::bail!(
            "'{}' is not reconstructable ({} error(s))",
            args.in_path.display(),
            outcome.errors.len()
        );
    }
    println!("ok: {}", args.in_path.display());
    Ok(())
}

fn cmd_normalize(args: ConvertArgs) -> anyhow::Result<()> {
    let doc = aup2::convert_file(&args.in_path, &args.out)?;
    print_warnings(doc.warnings());
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn read_opts(path: &Path) -> anyhow::Result<aup2::TransformOpts> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read options '{}'", path.display()))?;
    let opts = serde_json::from_str(&s)
        .with_context(|| format!("parse options JSON '{}'", path.display()))?;
    Ok(opts)
}

fn cmd_transform(args: TransformArgs) -> anyhow::Result<()> {
    let mut opts = match &args.opts {
        Some(p) => read_opts(p)?,
        None => aup2::TransformOpts::default(),
    };
    if args.scene.is_some() {
        opts.scene = args.scene;
    }
    if let Some(layer) = args.layer {
        opts.target_layer = layer;
    }
    if args.adjust_frames {
        opts.adjust_frames = true;
    }
    if let Some(p) = args.unspecified {
        opts.unspecified_scene = p.into();
    }
    tracing::debug!(?opts, "transform options");

    let report = aup2::transform_file(&args.in_path, &args.out, &opts)?;
    if args.json {
        let s = serde_json::to_string_pretty(&report).context("encode report JSON")?;
        println!("{s}");
    } else {
        print_warnings(&report.warnings);
    }
    if report.selected == 0 {
        eprintln!("nothing selected; {} not written", args.out.display());
        return Ok(());
    }
    eprintln!(
        "wrote {} ({} object(s) moved to layer {})",
        args.out.display(),
        report.selected,
        opts.target_layer
    );
    Ok(())
}

fn cmd_export_json(args: ConvertArgs) -> anyhow::Result<()> {
    let doc = aup2::export_json(&args.in_path, &args.out)?;
    print_warnings(doc.warnings());
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_import_json(args: ConvertArgs) -> anyhow::Result<()> {
    let doc = aup2::import_json(&args.in_path, &args.out)?;
    print_warnings(doc.warnings());
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
