mod args;
mod decode;
mod walk;

use std::collections::HashMap;
use std::fs;
use std::io::Write as _;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tex_packer_core::prelude::*;
use tracing::{debug, info, warn};

use args::{Cli, Method, Scheme, FLAGS};

fn main() -> Result<()> {
    check_duplicate_args()?;
    let cli = Cli::parse();
    init_logging(&cli)?;

    let filters = walk::Filters::new(&cli.formats, cli.regex.as_deref(), cli.negate)?;
    let paths = walk::gather(&cli.input, &filters)
        .with_context(|| format!("walking {}", cli.input.display()))?;
    if paths.is_empty() {
        bail!("no input files matched under {}", cli.input.display());
    }
    info!(count = paths.len(), "discovered source files");

    let settings = build_settings(&cli);
    let mut driver = Driver::new();
    let flags = driver.diff_and_record(settings);
    debug!(?flags, "driver change flags (first run always does everything)");

    let anims = load_animations(&cli, &paths)?;
    let mut anims = AnimationList { animations: anims };

    let basename = cli
        .output
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "bank".to_string());

    let opts = BankPipelineOptions {
        page_w: cli.area.0,
        page_h: cli.area.1,
        pad: cli.border,
        trim: cli.trim,
        rotate: cli.rotate,
        dedupe: cli.doubles,
        pivot_enabled: cli.color.is_some(),
        exhaustive: cli.exhaust,
        method: match cli.method {
            Method::Guillotine => PackMethod::Guillotine,
            Method::Maxrects => PackMethod::MaxRects,
        },
        basename: basename.clone(),
        debug_overlay: None,
    };

    let bar = progress_bar(&cli, paths.len());
    let output = bank_pipeline::run(&mut anims, cli.color, &opts, |frac| {
        if let Some(bar) = &bar {
            if frac <= 1.0 {
                bar.set_position((frac * paths.len() as f32) as u64);
            } else {
                bar.finish_and_clear();
            }
        }
    })
    .context("packing animations")?;

    if cli.warnings {
        for w in &output.pivot_warnings {
            warn!("{w}");
        }
    }

    let out_dir = cli.output.parent().unwrap_or_else(|| std::path::Path::new("."));
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    for (i, page) in output.pages.iter().enumerate() {
        let png_path = out_dir.join(format!("{basename}-{i}.png"));
        page.rgba
            .save(&png_path)
            .with_context(|| format!("writing {}", png_path.display()))?;
        info!(
            ?png_path,
            rects = page.rects,
            occupancy = format!("{:.1}%", page.occupancy * 100.0),
            "wrote sheet"
        );
    }

    let text = match cli.scheme {
        Scheme::Xml => drive_exporter(&output.bank, XmlExporter::default()),
        Scheme::Json => drive_exporter(&output.bank, JsonExporter::default()),
        Scheme::C99 => drive_exporter(&output.bank, C99Exporter::new(basename.clone())),
    };
    let mut f = fs::File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    f.write_all(text.as_bytes())
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!(
        output = %cli.output.display(),
        sheets = output.bank.sheets.len(),
        animations = output.bank.animations.len(),
        "bank written"
    );

    Ok(())
}

fn build_settings(cli: &Cli) -> Settings {
    Settings {
        pivot_color: cli.color,
        formats: cli
            .formats
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .collect(),
        regex: cli.regex.clone(),
        negate: cli.negate,
        input_path: cli.input.clone(),
        method: match cli.method {
            Method::Guillotine => PackMethodKey::Guillotine,
            Method::Maxrects => PackMethodKey::MaxRects,
        },
        page_w: cli.area.0,
        page_h: cli.area.1,
        pad: cli.border,
        trim: cli.trim,
        rotate: cli.rotate,
        exhaustive: cli.exhaust,
        dedupe: cli.doubles,
    }
}

fn load_animations(cli: &Cli, paths: &[std::path::PathBuf]) -> Result<Vec<Animation>> {
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let decoded = match decode::decode(path, &ext) {
            Ok(d) => d,
            Err(e) => {
                warn!(?path, error = %e, "skipping file that failed to decode");
                continue;
            }
        };
        let name = walk::animation_name(&cli.input, path, &cli.prefix, cli.long);
        let frames = decoded
            .frames
            .into_iter()
            .map(|f| AnimFrame::new(f.pixels.into_raw(), f.duration_ms))
            .collect();
        out.push(Animation::new(name, decoded.canvas_w, decoded.canvas_h, frames));
    }
    Ok(out)
}

fn progress_bar(cli: &Cli, total: usize) -> Option<indicatif::ProgressBar> {
    if !cli.visual || cli.quiet {
        return None;
    }
    let bar = indicatif::ProgressBar::new(total as u64);
    bar.set_style(
        indicatif::ProgressStyle::with_template(
            "{spinner:.green} packing {pos}/{len} [{elapsed_precise}]",
        )
        .unwrap(),
    );
    Some(bar)
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.quiet {
        "error"
    } else if cli.warnings {
        "warn"
    } else {
        "info"
    };
    let builder = tracing_subscriber::fmt().with_env_filter(level).with_target(false);
    match &cli.log {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_writer(std::sync::Mutex::new(file)).with_ansi(false).init();
        }
        None => {
            let _ = builder.try_init();
        }
    }
    Ok(())
}

/// Fatal duplicate-argument scan over the raw process arguments, run
/// before `clap` ever sees them: the reference performs this as an
/// explicit O(n^2) pass over `argv`, and `clap`'s own derive parser
/// silently accepts a repeated single-value flag by keeping the last
/// occurrence, which does not satisfy "duplicate arguments are a fatal
/// error".
fn check_duplicate_args() -> Result<()> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let long_by_short: HashMap<char, &str> = FLAGS.iter().map(|(long, short)| (*short, *long)).collect();

    for raw in std::env::args().skip(1) {
        let key = if let Some(rest) = raw.strip_prefix("--") {
            let name = rest.split('=').next().unwrap_or(rest);
            if FLAGS.iter().any(|(long, _)| *long == name) {
                Some(name.to_string())
            } else {
                None
            }
        } else if let Some(rest) = raw.strip_prefix('-') {
            let ch = rest.chars().next();
            ch.and_then(|c| long_by_short.get(&c)).map(|s| s.to_string())
        } else {
            None
        };
        if let Some(name) = key {
            *counts.entry(name).or_insert(0) += 1;
        }
    }

    let dupes: Vec<&str> = counts
        .iter()
        .filter(|(_, &n)| n > 1)
        .map(|(k, _)| k.as_str())
        .collect();
    if !dupes.is_empty() {
        let mut dupes = dupes;
        dupes.sort_unstable();
        bail!("duplicate argument(s): {}", dupes.join(", "));
    }
    Ok(())
}
