//! Close-on-exec for descriptors held by a process that spawns children.
//!
//! Marking every descriptor the parent keeps open with `FD_CLOEXEC` means
//! children started through `exec` never inherit them, without each spawn
//! having to close descriptors itself.
use std::os::fd::AsFd;

use anyhow::{Context, Result};
use nix::fcntl::{FcntlArg, FdFlag, fcntl};

/// Set `FD_CLOEXEC` on the descriptor behind `file`, keeping its other flags.
pub fn set_cloexec<F: AsFd>(file: &F) -> Result<()> {
    let fd = file.as_fd();
    let flags = fcntl(fd, FcntlArg::F_GETFD).context("F_GETFD")?;
    let flags = FdFlag::from_bits_truncate(flags) | FdFlag::FD_CLOEXEC;
    fcntl(fd, FcntlArg::F_SETFD(flags)).context("F_SETFD")?;
    Ok(())
}

/// Whether `FD_CLOEXEC` is currently set on the descriptor behind `file`.
pub fn is_cloexec<F: AsFd>(file: &F) -> Result<bool> {
    let flags = fcntl(file.as_fd(), FcntlArg::F_GETFD).context("F_GETFD")?;
    Ok(FdFlag::from_bits_truncate(flags).contains(FdFlag::FD_CLOEXEC))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_flag_cleared_by_hand() {
        let f = tempfile::tempfile().unwrap();
        // std opens with O_CLOEXEC already; clear it first
        fcntl(f.as_fd(), FcntlArg::F_SETFD(FdFlag::empty())).unwrap();
        assert!(!is_cloexec(&f).unwrap());
        set_cloexec(&f).unwrap();
        assert!(is_cloexec(&f).unwrap());
    }

    #[test]
    fn setting_twice_is_harmless() {
        let f = tempfile::tempfile().unwrap();
        set_cloexec(&f).unwrap();
        set_cloexec(&f).unwrap();
        assert!(is_cloexec(&f).unwrap());
    }
}
