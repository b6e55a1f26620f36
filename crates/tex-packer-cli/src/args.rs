//! Command-line surface for the animation-bank generator.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "tex-packer",
    about = "Pack folders of sprite animations into a texture atlas plus an animation bank",
    version,
    author
)]
pub struct Cli {
    /// Root directory to walk for source images/animations
    #[arg(short, long, help_heading = "Input/Output")]
    pub input: PathBuf,

    /// Bank file to write; sheet PNGs are written alongside it as
    /// `<basename>-<index>.png`
    #[arg(short, long, help_heading = "Input/Output")]
    pub output: PathBuf,

    /// Bank serialization scheme
    #[arg(short, long, value_enum, help_heading = "Export")]
    pub scheme: Scheme,

    /// Packing algorithm
    #[arg(short, long, value_enum, help_heading = "Layout")]
    pub method: Method,

    /// Page size as WxH, e.g. 1024x1024
    #[arg(short, long, value_parser = parse_area, help_heading = "Layout")]
    pub area: (u32, u32),

    /// Keep trying to fill a page with smaller rectangles after the first
    /// rectangle that does not fit
    #[arg(short = 'e', long, help_heading = "Layout")]
    pub exhaust: bool,

    /// Allow 90-degree rotation of frames that do not otherwise fit
    #[arg(short, long, help_heading = "Layout")]
    pub rotate: bool,

    /// Crop frames to their opaque bounding box before packing
    #[arg(short, long, help_heading = "Image Processing")]
    pub trim: bool,

    /// Detect and dedupe exact-duplicate frames
    #[arg(short, long, help_heading = "Image Processing")]
    pub doubles: bool,

    /// Padding (in pixels) added around every packed frame
    #[arg(short, long, default_value_t = 0, help_heading = "Image Processing")]
    pub border: u32,

    /// Pivot sentinel color as RRGGBB hex, e.g. FF00FF; must be nonzero
    #[arg(short, long, value_parser = parse_color, help_heading = "Image Processing")]
    pub color: Option<[u8; 3]>,

    /// Comma-separated list of file extensions to admit while walking
    #[arg(
        short,
        long,
        default_value = "gif,webp,png",
        help_heading = "Input/Output"
    )]
    pub formats: String,

    /// Prefix prepended to every derived animation name
    #[arg(short, long, default_value = "", help_heading = "Input/Output")]
    pub prefix: String,

    /// Keep the file extension in derived animation names
    #[arg(short = 'z', long, help_heading = "Input/Output")]
    pub long: bool,

    /// POSIX-flavored regex a path must match to be admitted
    #[arg(short = 'x', long, help_heading = "Input/Output")]
    pub regex: Option<String>,

    /// Invert the `--regex` match
    #[arg(short, long, help_heading = "Input/Output")]
    pub negate: bool,

    /// Show a progress bar while loading and packing
    #[arg(short, long, help_heading = "Logging/UX")]
    pub visual: bool,

    /// Write logs to this file instead of stderr
    #[arg(short, long, help_heading = "Logging/UX")]
    pub log: Option<PathBuf>,

    /// Print recoverable warnings (e.g. multiple pivot-color matches)
    #[arg(short, long, help_heading = "Logging/UX")]
    pub warnings: bool,

    /// Suppress all non-error output
    #[arg(short, long, help_heading = "Logging/UX")]
    pub quiet: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Xml,
    Json,
    C99,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Guillotine,
    Maxrects,
}

fn parse_area(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: u32 = w.parse().map_err(|_| format!("invalid width in '{s}'"))?;
    let h: u32 = h.parse().map_err(|_| format!("invalid height in '{s}'"))?;
    if w == 0 || h == 0 {
        return Err(format!("width and height must be nonzero (got '{s}')"));
    }
    Ok((w, h))
}

fn parse_color(s: &str) -> Result<[u8; 3], String> {
    if s.len() != 6 {
        return Err(format!("expected 6 hex digits, got '{s}'"));
    }
    let mut out = [0u8; 3];
    for i in 0..3 {
        out[i] = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
            .map_err(|_| format!("invalid hex byte in '{s}'"))?;
    }
    if out == [0, 0, 0] {
        return Err("pivot color must be nonzero".to_string());
    }
    Ok(out)
}

/// Every long-form flag name this CLI recognizes, paired with its short
/// form, for the duplicate-argument pre-pass in `main`.
pub const FLAGS: &[(&str, char)] = &[
    ("input", 'i'),
    ("output", 'o'),
    ("scheme", 's'),
    ("method", 'm'),
    ("area", 'a'),
    ("exhaust", 'e'),
    ("rotate", 'r'),
    ("trim", 't'),
    ("doubles", 'd'),
    ("border", 'b'),
    ("color", 'c'),
    ("formats", 'f'),
    ("prefix", 'p'),
    ("long", 'z'),
    ("regex", 'x'),
    ("negate", 'n'),
    ("visual", 'v'),
    ("log", 'l'),
    ("warnings", 'w'),
    ("quiet", 'q'),
    ("help", 'h'),
];
