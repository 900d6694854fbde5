mod config;
mod domain;
mod events;
mod watch;

use clap::{Parser, Subcommand};
use events::AppEvent;
use std::path::{Path, PathBuf};
use wheelchart::{Point, SegmentId, WheelChart};

#[derive(Parser, Debug)]
#[command(name = "skillwheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the competency wheel to an SVG file
    Render {
        /// Records file (JSON array); overrides the configured path
        #[arg(short, long)]
        records: Option<PathBuf>,
        /// Output path, `-` for stdout; overrides the configured path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Render with this segment selected
        #[arg(short, long)]
        select: Option<String>,
        /// Keep running and re-render when the records or config change
        #[arg(short, long)]
        watch: bool,
    },
    /// Print the segment id a pointer event at X Y would select
    Hit {
        x: f64,
        y: f64,
        /// Records file (JSON array); overrides the configured path
        #[arg(short, long)]
        records: Option<PathBuf>,
    },
    /// Write the default config file and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Render {
        records: None,
        output: None,
        select: None,
        watch: false,
    });

    match command {
        Commands::Render {
            records,
            output,
            select,
            watch,
        } => {
            let cfg = config::load_or_default();
            if watch {
                run_watch(cfg, records, output, select)
            } else {
                render_once(&cfg, records.as_deref(), output.as_deref(), select.as_deref())
            }
        }
        Commands::Hit { x, y, records } => {
            let cfg = config::load_or_default();
            let chart = build_chart(&cfg, records.as_deref(), None);
            if let Some(target) = chart.hit_test(Point::new(x, y)) {
                println!("{}", chart.props().segments[target.index()].id);
            }
            Ok(())
        }
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn build_chart(
    cfg: &config::Config,
    records_override: Option<&Path>,
    select: Option<&str>,
) -> WheelChart {
    let records = match records_override.or(cfg.records.as_deref()) {
        Some(path) => domain::load_or_empty(path),
        None => {
            log::warn!("no records file configured; rendering an empty wheel");
            Vec::new()
        }
    };

    let mut props = cfg.to_props(domain::to_segments(&records));
    props.selected = select.map(SegmentId::from);
    WheelChart::new(props)
}

fn render_once(
    cfg: &config::Config,
    records_override: Option<&Path>,
    output_override: Option<&Path>,
    select: Option<&str>,
) -> anyhow::Result<()> {
    let chart = build_chart(cfg, records_override, select);
    let svg = chart.render_svg();

    let output = output_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cfg.output_path());
    if output == Path::new("-") {
        println!("{svg}");
    } else {
        fs_err::write(&output, svg)?;
        log::info!("wrote {}", output.display());
    }
    Ok(())
}

fn run_watch(
    mut cfg: config::Config,
    records_override: Option<PathBuf>,
    output_override: Option<PathBuf>,
    select: Option<String>,
) -> anyhow::Result<()> {
    let (tx, rx) = async_channel::bounded(32);
    let records_path = records_override.clone().or_else(|| cfg.records.clone());
    watch::start_background_services(tx, config::get_config_path().ok(), records_path);

    render_once(
        &cfg,
        records_override.as_deref(),
        output_override.as_deref(),
        select.as_deref(),
    )?;
    log::info!("watching for changes, ctrl-c to stop");

    while let Ok(event) = rx.recv_blocking() {
        if matches!(event, AppEvent::ConfigChanged) {
            cfg = config::load_or_default();
        }
        if let Err(e) = render_once(
            &cfg,
            records_override.as_deref(),
            output_override.as_deref(),
            select.as_deref(),
        ) {
            log::error!("render failed: {e}");
        }
    }
    Ok(())
}
