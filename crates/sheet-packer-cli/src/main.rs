use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use image::ImageReader;
use serde::Deserialize;
use sheet_packer_core::compositing::compose_sheet;
use sheet_packer_core::config::{
    GuillotineChoice, GuillotineSplit, MaxRectsHeuristic, PlacerFamily, SkylineHeuristic,
};
use sheet_packer_core::{
    CssOptions, LayoutConfig, SheetItem, SheetLayout, Size, pack_sheet, to_css, to_json_array,
    to_json_hash,
};
use tracing::{error, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "sheet-packer",
    about = "Pack a folder of sprite images into one sheet with CSS",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack sprites into a PNG sheet, with optional CSS and JSON
    Pack(PackArgs),
    /// Layout-only: compute positions and emit JSON (no PNG)
    Layout(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Directory to scan for sprites (defaults to the current directory)
    #[arg(help_heading = "Input/Output")]
    path: Option<PathBuf>,
    /// File name masks (glob), repeatable; defaults to *.png
    #[arg(short, long, help_heading = "Input/Output")]
    mask: Vec<String>,
    /// Scan subdirectories too
    #[arg(short, long, default_value_t = false, help_heading = "Input/Output")]
    recursive: bool,
    /// Sheet image path (defaults to PATH/sheet.png); never read as input
    #[arg(short, long, help_heading = "Input/Output")]
    out: Option<PathBuf>,
    /// YAML config file path (overrides layout options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,

    // Layout
    /// Minimum sheet width (defaults to the narrowest sprite)
    #[arg(long, help_heading = "Layout")]
    min_width: Option<u32>,
    /// Minimum sheet height (defaults to the shortest sprite)
    #[arg(long, help_heading = "Layout")]
    min_height: Option<u32>,
    /// Starting sheet width (defaults to the widest sprite)
    #[arg(long, help_heading = "Layout")]
    max_width: Option<u32>,
    /// Starting sheet height (defaults to the tallest sprite)
    #[arg(long, help_heading = "Layout")]
    max_height: Option<u32>,
    /// Height added per growth step (defaults to the shortest sprite)
    #[arg(long, help_heading = "Layout")]
    increment: Option<u32>,
    /// Keep discovery order instead of widest-first
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    no_sort: bool,
    /// Time budget for the whole search (ms)
    #[arg(long, help_heading = "Layout")]
    time_budget: Option<u64>,
    /// Give up after this many trials
    #[arg(long, help_heading = "Layout")]
    max_trials: Option<usize>,

    // Placers/Heuristics
    /// Placer: anchor | skyline | maxrects | guillotine
    #[arg(long, value_parser = ["anchor", "skyline", "maxrects", "guillotine"], default_value = "anchor", help_heading = "Placers")]
    placer: String,
    /// MaxRects heuristic: baf|bssf|blsf|bl|cp
    #[arg(long, default_value = "baf", help_heading = "Heuristics")]
    heuristic: String,
    /// Skyline heuristic: bl|minwaste
    #[arg(long, default_value = "bl", help_heading = "Heuristics")]
    skyline: String,
    /// Guillotine choice: baf|bssf|blsf|waf|wssf|wlsf
    #[arg(long, default_value = "baf", help_heading = "Heuristics")]
    g_choice: String,
    /// Guillotine split: slas|llas|minas|maxas|sas|las
    #[arg(long, default_value = "slas", help_heading = "Heuristics")]
    g_split: String,

    // Export
    /// Write a stylesheet with one rule per sprite to this file
    #[arg(long, help_heading = "Export")]
    css: Option<PathBuf>,
    /// Base CSS class carrying the sheet background
    #[arg(long, default_value = "icon", help_heading = "Export")]
    class: String,
    /// Write JSON layout to this file (the layout command prints to stdout otherwise)
    #[arg(long, help_heading = "Export")]
    json: Option<PathBuf>,
    /// JSON shape: hash | array
    #[arg(long, default_value = "hash", value_parser = ["hash", "array"], help_heading = "Export")]
    json_format: String,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run(args, cli.progress && !cli.quiet, false),
        Commands::Layout(args) => run(args, false, true),
    }
}

fn run(cli: &PackArgs, show_progress: bool, layout_only: bool) -> anyhow::Result<()> {
    let root = cli.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let out = cli.out.clone().unwrap_or_else(|| root.join("sheet.png"));
    let masks: Vec<String> = if cli.mask.is_empty() {
        vec!["*.png".into()]
    } else {
        cli.mask.clone()
    };

    let paths = gather_paths(&root, &masks, cli.recursive, &out)?;
    let mut items = load_sizes_with_progress(&paths, show_progress)?;
    info!(count = items.len(), "read sprite sizes");

    let sizes: Vec<Size> = items.iter().map(SheetItem::size).collect();
    let cfg = build_config(cli, LayoutConfig::from_sprite_sizes(&sizes))?;

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    if items.is_empty() {
        info!(path = %root.display(), "nothing to do");
        return Ok(());
    }

    let size = pack_sheet(&mut items, &cfg).context("lay out sprites")?;
    let sheet = SheetLayout::from_items(size, &items);
    info!("{}", sheet.stats().summary());

    if layout_only {
        let json = serde_json::to_string_pretty(&json_value(&sheet, &cli.json_format))?;
        match &cli.json {
            Some(path) => {
                fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
                info!(?path, "layout written");
            }
            None => println!("{json}"),
        }
        return Ok(());
    }

    let canvas = compose_sheet(&sheet, |key| Ok(image::open(key)?.to_rgba8()))
        .context("compose sheet")?;
    canvas
        .save(&out)
        .with_context(|| format!("write {}", out.display()))?;
    info!(path = ?out, width = size.width, height = size.height, "sheet written");

    if let Some(css_path) = &cli.css {
        let opts = CssOptions {
            base_class: cli.class.clone(),
            sheet_url: out
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "sheet.png".into()),
        };
        fs::write(css_path, to_css(&sheet, &opts))
            .with_context(|| format!("write {}", css_path.display()))?;
        info!(path = ?css_path, "css written");
    }

    if let Some(json_path) = &cli.json {
        let json = serde_json::to_string_pretty(&json_value(&sheet, &cli.json_format))?;
        fs::write(json_path, json).with_context(|| format!("write {}", json_path.display()))?;
        info!(path = ?json_path, "layout written");
    }

    info!(files = items.len(), "complete");
    Ok(())
}

fn json_value(sheet: &SheetLayout, format: &str) -> serde_json::Value {
    match format {
        "array" => to_json_array(sheet),
        _ => to_json_hash(sheet),
    }
}

/// Flags override the sprite-derived bounds; a YAML file overrides both.
fn build_config(cli: &PackArgs, derived: LayoutConfig) -> anyhow::Result<LayoutConfig> {
    let (placer, mr_heuristic, skyline_heuristic, g_choice, g_split) = parse_placer(cli)?;
    let cfg = LayoutConfig {
        min_width: cli.min_width.unwrap_or(derived.min_width),
        min_height: cli.min_height.unwrap_or(derived.min_height),
        max_width: cli.max_width.unwrap_or(derived.max_width),
        max_height: cli.max_height.unwrap_or(derived.max_height),
        increment: cli.increment.unwrap_or(derived.increment),
        sort_by_size: !cli.no_sort,
        placer,
        mr_heuristic,
        skyline_heuristic,
        g_choice,
        g_split,
        time_budget_ms: cli.time_budget,
        max_trials: cli.max_trials,
    };
    let Some(path) = &cli.config else {
        return Ok(cfg);
    };
    let file = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let y: YamlConfig =
        serde_yaml::from_str(&file).with_context(|| format!("parse {}", path.display()))?;
    Ok(y.into_layout_config(cfg))
}

fn parse_placer(
    cli: &PackArgs,
) -> anyhow::Result<(
    PlacerFamily,
    MaxRectsHeuristic,
    SkylineHeuristic,
    GuillotineChoice,
    GuillotineSplit,
)> {
    let placer = cli
        .placer
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown placer: {}", cli.placer))?;
    let h = cli
        .heuristic
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown heuristic: {}", cli.heuristic))?;
    let sky = cli
        .skyline
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown skyline heuristic: {}", cli.skyline))?;
    let g_choice = cli
        .g_choice
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown guillotine choice: {}", cli.g_choice))?;
    let g_split = cli
        .g_split
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown guillotine split: {}", cli.g_split))?;
    Ok((placer, h, sky, g_choice, g_split))
}

/// Files directly under `root` (or below it with `recursive`) whose file name
/// matches any mask, sorted by path. `out` is never included.
fn gather_paths(
    root: &Path,
    masks: &[String],
    recursive: bool,
    out: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut b = GlobSetBuilder::new();
    for pat in masks {
        b.add(
            GlobBuilder::new(pat)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("invalid mask {pat}"))?,
        );
    }
    let set = b.build()?;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .sort_by_file_name();
    let mut list: Vec<PathBuf> = Vec::new();
    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        let p = entry.path();
        if entry.file_type().is_file() && matches_mask(p, &set) && !same_file(p, out) {
            list.push(p.to_path_buf());
        }
    }
    Ok(list)
}

fn matches_mask(p: &Path, set: &GlobSet) -> bool {
    p.file_name().is_some_and(|name| set.is_match(name))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn load_sizes_with_progress(paths: &[PathBuf], progress: bool) -> anyhow::Result<Vec<SheetItem>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} reading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match image_size(p) {
            Ok((w, h)) => {
                let key = p.to_string_lossy().replace('\\', "/");
                list.push(SheetItem::new(key, w, h));
            }
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

fn image_size(p: &Path) -> anyhow::Result<(u32, u32)> {
    let dims = ImageReader::open(p)?
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(dims)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    min_width: Option<u32>,
    min_height: Option<u32>,
    max_width: Option<u32>,
    max_height: Option<u32>,
    increment: Option<u32>,
    sort_by_size: Option<bool>,
    placer: Option<String>,
    skyline: Option<String>,
    heuristic: Option<String>,
    g_choice: Option<String>,
    g_split: Option<String>,
    time_budget_ms: Option<u64>,
    max_trials: Option<usize>,
}

impl YamlConfig {
    fn into_layout_config(self, mut cfg: LayoutConfig) -> LayoutConfig {
        if let Some(v) = self.min_width {
            cfg.min_width = v;
        }
        if let Some(v) = self.min_height {
            cfg.min_height = v;
        }
        if let Some(v) = self.max_width {
            cfg.max_width = v;
        }
        if let Some(v) = self.max_height {
            cfg.max_height = v;
        }
        if let Some(v) = self.increment {
            cfg.increment = v;
        }
        if let Some(v) = self.sort_by_size {
            cfg.sort_by_size = v;
        }
        if let Some(v) = self.placer {
            cfg.placer = v.parse().unwrap_or(cfg.placer);
        }
        if let Some(v) = self.skyline {
            cfg.skyline_heuristic = v.parse().unwrap_or(cfg.skyline_heuristic);
        }
        if let Some(v) = self.heuristic {
            cfg.mr_heuristic = v.parse().unwrap_or(cfg.mr_heuristic);
        }
        if let Some(v) = self.g_choice {
            cfg.g_choice = v.parse().unwrap_or(cfg.g_choice);
        }
        if let Some(v) = self.g_split {
            cfg.g_split = v.parse().unwrap_or(cfg.g_split);
        }
        if let Some(v) = self.time_budget_ms {
            cfg.time_budget_ms = Some(v);
        }
        if let Some(v) = self.max_trials {
            cfg.max_trials = Some(v);
        }
        cfg
    }
}
