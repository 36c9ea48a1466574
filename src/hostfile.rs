//! Host file readers: turn one or more host list files into an ordered list
//! of [`HostTarget`]s.
//!
//! Problems with individual lines never abort a read. Each rejected line is
//! kept in [`HostList::rejected`] (with its file and line number) and left out
//! of [`HostList::targets`]; blank lines and `#` comments are skipped. A file
//! that cannot be opened or read is a hard error.
//!
//! ```no_run
//! use hostfile::hostfile::read_host_files;
//! use hostfile::target::Defaults;
//! # fn main() -> anyhow::Result<()> {
//! let defaults = Defaults::new().with_user("deploy");
//! let list = read_host_files(&["hosts.txt", "more-hosts.txt"], &defaults)?;
//! for bad in &list.rejected {
//!     eprintln!("{}", bad.error);
//! }
//! for target in &list.targets {
//!     println!("{}", target);
//! }
//! # Ok(())
//! # }
//! ```
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use crate::io::{DEFAULT_MMAP_THRESHOLD_BYTES, iter_lines_auto};
use crate::line::{EntryError, is_skippable, parse_host_entry};
use crate::target::{Defaults, HostTarget};

/// A line that was dropped from the result, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub source: PathBuf,
    pub line_number: usize,
    pub error: EntryError,
}

/// Line counters gathered while reading.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub blank: usize,
    pub comments: usize,
    pub parsed: usize,
    pub rejected: usize,
}

impl ParseStats {
    fn merge(&mut self, other: &ParseStats) {
        self.lines += other.lines;
        self.blank += other.blank;
        self.comments += other.comments;
        self.parsed += other.parsed;
        self.rejected += other.rejected;
    }
}

/// Targets parsed from one or more sources, in source order then line order.
#[derive(Debug, Default, Clone)]
pub struct HostList {
    pub targets: Vec<HostTarget>,
    pub rejected: Vec<RejectedLine>,
    pub stats: ParseStats,
}

impl HostList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another list after this one.
    pub fn extend(&mut self, other: HostList) {
        self.targets.extend(other.targets);
        self.rejected.extend(other.rejected);
        self.stats.merge(&other.stats);
    }

    /// Append targets that did not come from a file, e.g. an inline host string.
    pub fn push_targets(&mut self, targets: impl IntoIterator<Item = HostTarget>) {
        for t in targets {
            self.stats.parsed += 1;
            self.targets.push(t);
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn into_targets(self) -> Vec<HostTarget> {
        self.targets
    }

    fn feed(&mut self, source: &Path, line_number: usize, raw: &str, defaults: &Defaults) {
        self.stats.lines += 1;
        let line = raw.trim();
        if is_skippable(line) {
            if line.is_empty() {
                self.stats.blank += 1;
            } else {
                self.stats.comments += 1;
            }
            return;
        }
        match parse_host_entry(line, defaults) {
            Ok(target) => {
                self.stats.parsed += 1;
                self.targets.push(target);
            }
            Err(error) => {
                debug!("{}:{}: {}", source.display(), line_number, error);
                self.stats.rejected += 1;
                self.rejected.push(RejectedLine {
                    source: source.to_path_buf(),
                    line_number,
                    error,
                });
            }
        }
    }
}

/// Parse host file text already in memory. `source` only labels rejections.
pub fn parse_host_list<P: AsRef<Path>>(
    contents: &str,
    source: P,
    defaults: &Defaults,
) -> HostList {
    let mut list = HostList::new();
    for (idx, line) in contents.lines().enumerate() {
        list.feed(source.as_ref(), idx + 1, line, defaults);
    }
    list
}

/// Read one host file using an explicit mmap threshold.
pub fn read_host_file_with_threshold<P: AsRef<Path>>(
    path: P,
    defaults: &Defaults,
    mmap_threshold_bytes: u64,
) -> Result<HostList> {
    let path = path.as_ref();
    let mut list = HostList::new();
    let lines = iter_lines_auto(path, mmap_threshold_bytes)?;
    for (idx, line) in lines.enumerate() {
        let line = line.with_context(|| format!("read {}", path.display()))?;
        list.feed(path, idx + 1, &line, defaults);
    }
    debug!(
        "{}: {} targets, {} rejected",
        path.display(),
        list.stats.parsed,
        list.stats.rejected
    );
    Ok(list)
}

/// Read one host file.
pub fn read_host_file<P: AsRef<Path>>(path: P, defaults: &Defaults) -> Result<HostList> {
    read_host_file_with_threshold(path, defaults, DEFAULT_MMAP_THRESHOLD_BYTES)
}

/// Read several host files in order using an explicit mmap threshold.
/// Every file sees the same complete `defaults`.
pub fn read_host_files_with_threshold<P: AsRef<Path>>(
    paths: &[P],
    defaults: &Defaults,
    mmap_threshold_bytes: u64,
) -> Result<HostList> {
    let mut all = HostList::new();
    for p in paths {
        all.extend(read_host_file_with_threshold(p, defaults, mmap_threshold_bytes)?);
    }
    Ok(all)
}

/// Read several host files in order and concatenate their targets.
pub fn read_host_files<P: AsRef<Path>>(paths: &[P], defaults: &Defaults) -> Result<HostList> {
    read_host_files_with_threshold(paths, defaults, DEFAULT_MMAP_THRESHOLD_BYTES)
}
