pub mod entry;
pub mod export;
#[cfg(unix)]
pub mod fd;
pub mod hostfile;
pub mod io;
pub mod line;
pub mod report;
pub mod target;

pub mod prelude {
    pub use crate::entry::{parse_host, parse_host_string};
    pub use crate::hostfile::{HostList, read_host_file, read_host_files};
    pub use crate::line::{EntryError, parse_host_entry};
    pub use crate::target::{Defaults, HostTarget};
}
