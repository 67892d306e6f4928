//! Per-state-file run lock using PID files
//!
//! Two runs against the same state file would race between load and save.
//! The lock lives next to the state file as `<state>.lock` and holds the
//! owner's PID; a lock left by a dead process is reclaimed.
//!
//! The lock file only ever appears with its PID already inside: the PID is
//! written to a private staging file which is then hard-linked into place,
//! and the link fails if a lock exists. Reclaiming renames the stale file to
//! a private name first and checks it still holds the stale content, so a
//! lock taken in the meantime by another run is put back instead of deleted.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use slotwatch_domain::constants::LOCK_FILE_SUFFIX;
use slotwatch_domain::{Result, SlotWatchError};

static NEXT_PRIVATE_NAME: AtomicU64 = AtomicU64::new(0);

/// Guard for exclusive access to one state file
///
/// Released when dropped.
#[derive(Debug)]
pub struct RunLock {
    lock_file: PathBuf,
}

impl RunLock {
    /// Lock the state file at `state_path`.
    ///
    /// Returns `SlotWatchError::Locked` if a live process already holds it.
    pub fn acquire<P: AsRef<Path>>(state_path: P) -> Result<Self> {
        let lock_file = Self::lock_path_for(state_path.as_ref());

        if let Some(parent) = lock_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SlotWatchError::StorageWrite(format!(
                    "failed to create lock directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        match Self::try_create(&lock_file) {
            Ok(lock) => Ok(lock),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                Self::reclaim_if_stale(&lock_file)?;
                Self::try_create(&lock_file).map_err(|err| match err.kind() {
                    ErrorKind::AlreadyExists => Self::taken(&lock_file),
                    _ => Self::write_error(&lock_file, &err),
                })
            }
            Err(err) => Err(Self::write_error(&lock_file, &err)),
        }
    }

    /// `<state>.lock` beside the state file.
    pub fn lock_path_for(state_path: &Path) -> PathBuf {
        let mut name = state_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".");
        name.push(LOCK_FILE_SUFFIX);
        state_path.with_file_name(name)
    }

    /// Location of the held lock file.
    pub fn path(&self) -> &Path {
        &self.lock_file
    }

    /// Unique sibling of `lock_file` owned by this call.
    fn private_path(lock_file: &Path, tag: &str) -> PathBuf {
        let serial = NEXT_PRIVATE_NAME.fetch_add(1, Ordering::Relaxed);
        let mut name = lock_file.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(format!(".{}-{serial}.{tag}", std::process::id()));
        lock_file.with_file_name(name)
    }

    fn try_create(lock_file: &Path) -> std::io::Result<Self> {
        let current_pid = std::process::id();
        let staging = Self::private_path(lock_file, "new");

        let linked = Self::write_owner(&staging, current_pid)
            .and_then(|()| fs::hard_link(&staging, lock_file));
        if let Err(err) = fs::remove_file(&staging) {
            if err.kind() != ErrorKind::NotFound {
                tracing::debug!(error = %err, path = %staging.display(), "run_lock.staging_left");
            }
        }
        linked?;

        tracing::info!(pid = current_pid, path = %lock_file.display(), "run_lock.acquired");
        Ok(Self { lock_file: lock_file.to_path_buf() })
    }

    fn write_owner(path: &Path, pid: u32) -> std::io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        file.write_all(pid.to_string().as_bytes())?;
        file.sync_all()
    }

    fn reclaim_if_stale(lock_file: &Path) -> Result<()> {
        let content = match fs::read_to_string(lock_file) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => {
                return Err(SlotWatchError::Locked(format!(
                    "cannot inspect {}: {err}",
                    lock_file.display()
                )))
            }
        };

        match content.trim().parse::<u32>() {
            Ok(pid) if Self::is_process_running(pid) => {
                tracing::warn!(existing_pid = pid, "run_lock.process_active");
                return Err(SlotWatchError::Locked(format!(
                    "another run holds {} (PID: {pid})",
                    lock_file.display()
                )));
            }
            Ok(pid) => tracing::warn!(stale_pid = pid, "run_lock.stale_lock_detected"),
            Err(_) => {
                tracing::warn!(path = %lock_file.display(), "run_lock.unreadable_lock_detected")
            }
        }

        let claimed = Self::private_path(lock_file, "stale");
        match fs::rename(lock_file, &claimed) {
            Ok(()) => {}
            // Another run reclaimed it first.
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => {
                tracing::warn!(error = %err, path = %lock_file.display(), "run_lock.remove_stale_failed");
                return Err(Self::write_error(lock_file, &err));
            }
        }

        if fs::read_to_string(&claimed).is_ok_and(|now| now == content) {
            if let Err(err) = fs::remove_file(&claimed) {
                tracing::debug!(error = %err, path = %claimed.display(), "run_lock.stale_left");
            }
            return Ok(());
        }

        // The file was replaced by a fresh lock between the read and the rename.
        if let Err(err) = fs::hard_link(&claimed, lock_file) {
            tracing::warn!(error = %err, path = %lock_file.display(), "run_lock.restore_failed");
        }
        if let Err(err) = fs::remove_file(&claimed) {
            tracing::debug!(error = %err, path = %claimed.display(), "run_lock.stale_left");
        }
        Err(Self::taken(lock_file))
    }

    fn taken(lock_file: &Path) -> SlotWatchError {
        SlotWatchError::Locked(format!("{} was taken by another run", lock_file.display()))
    }

    fn write_error(lock_file: &Path, err: &std::io::Error) -> SlotWatchError {
        SlotWatchError::StorageWrite(format!(
            "failed to create lock file {}: {err}",
            lock_file.display()
        ))
    }

    #[cfg(target_os = "macos")]
    fn is_process_running(pid: u32) -> bool {
        use std::process::Command;

        // `kill -0` probes without signalling
        Command::new("kill")
            .arg("-0")
            .arg(pid.to_string())
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    #[cfg(target_os = "linux")]
    fn is_process_running(pid: u32) -> bool {
        Path::new("/proc").join(pid.to_string()).exists()
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn is_process_running(pid: u32) -> bool {
        // No cheap probe; only our own PID is known to be alive.
        tracing::warn!(pid = pid, "run_lock.process_check_unsupported");
        pid == std::process::id()
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_file) {
            tracing::warn!(error = %e, path = %self.lock_file.display(), "run_lock.remove_failed");
        } else {
            tracing::info!(path = %self.lock_file.display(), "run_lock.released");
        }
    }
}
