//! CSV export of parsed targets.
//!
//! Columns are `host,port,user,password`; absent fields are empty cells.
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::target::HostTarget;

/// Write `targets` as CSV to any writer, header first.
pub fn write_targets_csv<W: io::Write>(targets: &[HostTarget], out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    for t in targets {
        wtr.serialize(t)?;
    }
    if targets.is_empty() {
        wtr.write_record(["host", "port", "user", "password"])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `targets` as CSV to a file at `path`, replacing it.
pub fn save_targets_csv<P: AsRef<Path>>(targets: &[HostTarget], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_targets_csv(targets, file).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::parse_host_string;
    use crate::target::Defaults;
    use tempfile::tempdir;

    #[test]
    fn writes_header_and_empty_cells() {
        let targets = parse_host_string("alice:pw@web1:2222 web2", &Defaults::new());
        let mut buf = Vec::new();
        write_targets_csv(&targets, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "host,port,user,password\nweb1,2222,alice,pw\nweb2,,,\n");
    }

    #[test]
    fn empty_list_still_has_header() {
        let mut buf = Vec::new();
        write_targets_csv(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "host,port,user,password\n");
    }

    #[test]
    fn saves_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("targets.csv");
        let targets = parse_host_string("db:5432", &Defaults::new());
        save_targets_csv(&targets, &path).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("db,5432,,"));
    }
}
