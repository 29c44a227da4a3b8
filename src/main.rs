use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};

use paintbox::Config;
use paintbox::config::MAX_CANVAS_SIDE;
use paintbox::input::DrawingSurface;
use paintbox::notification::{DesktopNotifier, Notifier, TerminalNotifier};
use paintbox::persist::{GalleryStore, PaintingStore, PersistManager};
use paintbox::script::Script;
use paintbox::session::Session;

#[derive(Parser, Debug)]
#[command(name = "paintbox")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PAINTBOX_GIT_HASH"), ")"),
    about = "Raster drawing surface driven by stroke scripts"
)]
struct Cli {
    /// Config file to use instead of ~/.config/paintbox/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Run a stroke script against a fresh drawing surface
    Draw(DrawArgs),
    /// List paintings stored in the gallery
    Gallery(GalleryArgs),
    /// Write a config file holding the default settings
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug)]
struct DrawArgs {
    /// Stroke script to run
    script: PathBuf,

    /// Identity `save` stores paintings under (e.g. an email address)
    #[arg(long, value_name = "OWNER")]
    owner: Option<String>,

    /// Surface width in pixels
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=i64::from(MAX_CANVAS_SIDE)))]
    width: Option<i32>,

    /// Surface height in pixels
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=i64::from(MAX_CANVAS_SIDE)))]
    height: Option<i32>,

    /// Directory `export` writes image.png into
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Gallery directory `save` writes into
    #[arg(long, value_name = "DIR")]
    gallery_dir: Option<PathBuf>,

    /// Also send desktop notifications
    #[arg(long, action = ArgAction::SetTrue)]
    desktop_notifications: bool,
}

#[derive(Args, Debug)]
struct GalleryArgs {
    /// Only list paintings of this owner
    #[arg(long, value_name = "OWNER")]
    owner: Option<String>,

    /// Gallery directory to read
    #[arg(long, value_name = "DIR")]
    gallery_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    /// Overwrite an existing config file
    #[arg(long, action = ArgAction::SetTrue)]
    force: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        CliCommand::Draw(args) => run_draw(&load_config(cli.config.as_deref())?, args),
        CliCommand::Gallery(args) => run_gallery(&load_config(cli.config.as_deref())?, args),
        CliCommand::InitConfig(args) => run_init_config(cli.config, &args),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn run_init_config(path: Option<PathBuf>, args: &InitConfigArgs) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::get_config_path()?,
    };
    if path.exists() && !args.force {
        anyhow::bail!(
            "Config file {} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    Config::default().save_to(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn run_draw(config: &Config, args: DrawArgs) -> Result<()> {
    let script = Script::load(&args.script)?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let gallery_dir = args
        .gallery_dir
        .unwrap_or_else(|| config.gallery.resolve_directory());
    let persist = PersistManager::new(runtime.handle(), Arc::new(GalleryStore::new(gallery_dir)));

    let notifier: Box<dyn Notifier> =
        if args.desktop_notifications || config.notifications.desktop {
            Box::new(DesktopNotifier::new(runtime.handle()))
        } else {
            Box::new(TerminalNotifier)
        };

    let width = args.width.unwrap_or(config.canvas.width);
    let height = args.height.unwrap_or(config.canvas.height);
    let surface = DrawingSurface::new(width, height, config.canvas.background.to_color())
        .with_context(|| format!("Failed to create {width}x{height} drawing surface"))?;

    let mut export = config.export.to_export_config();
    if let Some(dir) = args.export_dir {
        export.directory = dir;
    }

    let mut session = Session::new(
        surface,
        config.tool_selection(),
        persist,
        notifier,
        runtime.handle(),
    )
    .with_owner(args.owner)
    .with_export(export);

    let summary = session
        .run(&script)
        .with_context(|| format!("Script {} failed", args.script.display()))?;

    if let Some(path) = &summary.last_export {
        println!("Exported image to {}", path.display());
    }
    println!(
        "{} strokes, {} exports, {} saved, {} failed saves",
        summary.strokes, summary.exports, summary.saved, summary.failed
    );

    Ok(())
}

fn run_gallery(config: &Config, args: GalleryArgs) -> Result<()> {
    let directory = args
        .gallery_dir
        .unwrap_or_else(|| config.gallery.resolve_directory());
    let store = GalleryStore::new(&directory);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let records = runtime
        .block_on(store.list_paintings(args.owner.as_deref()))
        .with_context(|| format!("Failed to read gallery at {}", directory.display()))?;

    if records.is_empty() {
        println!("No paintings found in {}", directory.display());
        return Ok(());
    }

    for record in records {
        println!(
            "{}\t{}\t{}\t{}",
            record.id,
            record.created_at,
            record.owner,
            directory.join(&record.file).display()
        );
    }
    Ok(())
}
