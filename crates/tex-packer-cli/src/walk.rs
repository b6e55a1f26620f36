//! Directory walking and file admission: `--formats`/`--regex`/`--negate`
//! filtering over a `walkdir` traversal of the input root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use walkdir::WalkDir;

pub struct Filters {
    formats: GlobSet,
    regex: Option<Regex>,
    negate: bool,
}

impl Filters {
    pub fn new(formats_csv: &str, regex: Option<&str>, negate: bool) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for ext in formats_csv.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            builder.add(
                Glob::new(&format!("*.{}", ext.to_ascii_lowercase()))
                    .with_context(|| format!("invalid format entry '{ext}'"))?,
            );
        }
        let formats = builder.build().context("building format glob set")?;
        let regex = regex
            .map(Regex::new)
            .transpose()
            .context("compiling --regex pattern")?;
        Ok(Self {
            formats,
            regex,
            negate,
        })
    }

    fn admits(&self, path: &Path) -> bool {
        let name = match path.file_name().and_then(|s| s.to_str()) {
            Some(n) => n,
            None => return false,
        };
        if !self.formats.is_match(name.to_ascii_lowercase()) {
            return false;
        }
        if let Some(re) = &self.regex {
            let s = path.to_string_lossy();
            let matched = re.is_match(&s);
            if matched == self.negate {
                return false;
            }
        }
        true
    }
}

/// Walks `root` and returns every admitted file path, sorted for
/// deterministic animation ordering across runs.
pub fn gather(root: &Path, filters: &Filters) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let p = entry.path();
        if p.is_file() && filters.admits(p) {
            out.push(p.to_path_buf());
        }
    }
    Ok(out)
}

/// Derives an animation name from a source path relative to the input
/// root: `prefix + relative_path`, leading slashes stripped, extension
/// stripped unless `long` is set.
pub fn animation_name(root: &Path, path: &Path, prefix: &str, long: bool) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut name = rel.to_string_lossy().replace('\\', "/");
    name = name.trim_start_matches('/').to_string();
    if !long {
        if let Some(stripped) = path
            .extension()
            .and_then(|_| name.rsplit_once('.'))
            .map(|(base, _)| base.to_string())
        {
            name = stripped;
        }
    }
    format!("{prefix}{name}")
}
