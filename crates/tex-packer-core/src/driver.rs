//! An explicit driver/session struct that owns the previous-run settings,
//! the current animation/rectangle lists, and decides which pipeline
//! stages a new run must redo.

use crate::bankpack::PackMethod;
use std::path::PathBuf;

/// One file discovered by the (external) directory walker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub extension: String,
    pub animation_id: Option<usize>,
}

/// Every setting the driver needs to diff between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub pivot_color: Option<[u8; 3]>,
    pub formats: Vec<String>,
    pub regex: Option<String>,
    pub negate: bool,
    pub input_path: PathBuf,
    pub method: PackMethodKey,
    pub page_w: u32,
    pub page_h: u32,
    pub pad: u32,
    pub trim: bool,
    pub rotate: bool,
    pub exhaustive: bool,
    pub dedupe: bool,
}

/// `PackMethod` isn't `PartialEq`-able across crate boundaries without a
/// local wrapper; this mirrors it just for settings comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackMethodKey {
    Guillotine,
    MaxRects,
}

impl From<PackMethodKey> for PackMethod {
    fn from(k: PackMethodKey) -> Self {
        match k {
            PackMethodKey::Guillotine => PackMethod::Guillotine,
            PackMethodKey::MaxRects => PackMethod::MaxRects,
        }
    }
}

/// Which stages a new run must redo, computed from a settings diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeFlags {
    pub do_file_tree: bool,
    pub do_images: bool,
    pub do_image_all: bool,
    pub do_rectangles: bool,
}

/// Owns the previous settings snapshot and current analyzed state across
/// driver invocations; replaces the reference's process-global session.
#[derive(Debug, Default)]
pub struct Driver {
    prev_settings: Option<Settings>,
}

impl Driver {
    pub fn new() -> Self {
        Self { prev_settings: None }
    }

    /// Computes which stages must rerun for `new` relative to whatever
    /// settings were last recorded, then records `new` as the new
    /// snapshot. On the very first call, everything must run.
    pub fn diff_and_record(&mut self, new: Settings) -> ChangeFlags {
        let flags = match &self.prev_settings {
            None => ChangeFlags {
                do_file_tree: true,
                do_images: true,
                do_image_all: true,
                do_rectangles: true,
            },
            Some(prev) => {
                let do_file_tree = prev.input_path != new.input_path
                    || prev.formats != new.formats
                    || prev.regex != new.regex
                    || prev.negate != new.negate;
                let pivot_changed = prev.pivot_color != new.pivot_color;
                // A file-tree change forces all downstream flags.
                let do_image_all = do_file_tree;
                let do_images = do_file_tree || pivot_changed;
                let pack_settings_changed = prev.method != new.method
                    || prev.page_w != new.page_w
                    || prev.page_h != new.page_h
                    || prev.pad != new.pad
                    || prev.trim != new.trim
                    || prev.rotate != new.rotate
                    || prev.exhaustive != new.exhaustive
                    || prev.dedupe != new.dedupe;
                // An image-analysis change forces rectangle rebuilding too.
                let do_rectangles = do_images || pack_settings_changed;
                ChangeFlags {
                    do_file_tree,
                    do_images,
                    do_image_all,
                    do_rectangles,
                }
            }
        };
        self.prev_settings = Some(new);
        flags
    }

    pub fn prev_settings(&self) -> Option<&Settings> {
        self.prev_settings.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(page_w: u32) -> Settings {
        Settings {
            pivot_color: None,
            formats: vec!["png".into()],
            regex: None,
            negate: false,
            input_path: PathBuf::from("/in"),
            method: PackMethodKey::Guillotine,
            page_w,
            page_h: 512,
            pad: 0,
            trim: true,
            rotate: false,
            exhaustive: false,
            dedupe: false,
        }
    }

    #[test]
    fn first_run_does_everything() {
        let mut d = Driver::new();
        let flags = d.diff_and_record(settings(512));
        assert!(flags.do_file_tree && flags.do_images && flags.do_image_all && flags.do_rectangles);
    }

    #[test]
    fn page_size_change_only_forces_rectangles() {
        let mut d = Driver::new();
        d.diff_and_record(settings(512));
        let flags = d.diff_and_record(settings(1024));
        assert!(!flags.do_file_tree);
        assert!(!flags.do_images);
        assert!(flags.do_rectangles);
    }

    #[test]
    fn identical_settings_change_nothing() {
        let mut d = Driver::new();
        d.diff_and_record(settings(512));
        let flags = d.diff_and_record(settings(512));
        assert_eq!(flags, ChangeFlags::default());
    }

    #[test]
    fn pivot_color_change_forces_images_and_rectangles_not_file_tree() {
        let mut d = Driver::new();
        d.diff_and_record(settings(512));
        let mut s = settings(512);
        s.pivot_color = Some([1, 2, 3]);
        let flags = d.diff_and_record(s);
        assert!(!flags.do_file_tree);
        assert!(flags.do_images);
        assert!(flags.do_rectangles);
    }
}
