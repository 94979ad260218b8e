//! # Project Files
//!
//! Reading and writing `.rcb` project files and JSON reports.
//!
//! - Writes go to a `.tmp` sibling, are synced, then renamed over the target,
//!   so an interrupted save never leaves a truncated file
//! - Loads check the schema version before the project is used
//! - [`FileLock`] marks a project as being edited: an OS-level lock (fs2)
//!   plus a `.rcb.lock` sidecar naming the holder
//!
//! ## Example
//!
//! ```rust,no_run
//! use rcbeam_core::file_io::{load_project, save_project, FileLock};
//! use rcbeam_core::project::Project;
//! use std::path::Path;
//!
//! let path = Path::new("tower-a.rcb");
//! save_project(&Project::new("Engineer", "25-001", "Client"), path)?;
//!
//! let lock = FileLock::acquire(path, "engineer@company.com")?;
//! let mut project = load_project(path)?;
//! project.touch();
//! save_project(&project, path)?;
//! drop(lock);
//! # Ok::<(), rcbeam_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Extension used for project files
pub const PROJECT_EXTENSION: &str = "rcb";

/// Locks older than this are treated as abandoned
const STALE_LOCK_HOURS: i64 = 24;

fn io_error<'a>(operation: &str, path: &'a Path) -> impl FnOnce(std::io::Error) -> CalcError + 'a {
    let operation = operation.to_string();
    move |e| CalcError::file_error(operation, path.display().to_string(), e.to_string())
}

/// Path with `suffix` appended to its extension (`a.rcb` -> `a.rcb.lock`)
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let extension = match path.extension() {
        Some(ext) => format!("{}.{suffix}", ext.to_string_lossy()),
        None => suffix.to_string(),
    };
    path.with_extension(extension)
}

// ============================================================================
// JSON Read / Write
// ============================================================================

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
pub fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(CalcError::serialization)?;
    let tmp_path = sibling_path(path, "tmp");

    let mut tmp = File::create(&tmp_path).map_err(io_error("create temp file", &tmp_path))?;
    tmp.write_all(json.as_bytes())
        .map_err(io_error("write temp file", &tmp_path))?;
    tmp.sync_all().map_err(io_error("sync temp file", &tmp_path))?;
    drop(tmp);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error("rename to final", path)(e));
    }
    debug!(path = %path.display(), bytes = json.len(), "wrote file");
    Ok(())
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path).map_err(io_error("read", path))?;
    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {e}", path.display())))
}

// ============================================================================
// Projects
// ============================================================================

/// Save a project with an atomic write.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    write_json_atomic(project, path)?;
    info!(path = %path.display(), beams = project.beam_count(), "project saved");
    Ok(())
}

/// Load a project and check its schema version.
///
/// # Errors
///
/// * `CalcError::FileError` - the file cannot be read
/// * `CalcError::SerializationError` - the file is not a valid project
/// * `CalcError::VersionMismatch` - the file was written by an incompatible version
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let project: Project = read_json(path)?;
    check_version(&project.meta.version)?;
    debug!(path = %path.display(), beams = project.beam_count(), "project loaded");
    Ok(project)
}

fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.').map(|p| p.parse::<u32>().ok());
    let major = parts.next()??;
    let minor = parts.next().flatten().unwrap_or(0);
    Some((major, minor))
}

/// A file is compatible when its major version matches; for 0.x schemas
/// the file's minor version must not be newer than ours.
pub fn check_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let (file_major, file_minor) = parse_version(file_version).ok_or_else(mismatch)?;
    let (major, minor) = parse_version(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != major || (major == 0 && file_minor > minor) {
        return Err(mismatch());
    }
    Ok(())
}

// ============================================================================
// Locking
// ============================================================================

/// Holder information written to the lock sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockHolder {
    /// User identifier (email or username)
    pub user: String,
    pub host: String,
    pub pid: u32,
    pub since: DateTime<Utc>,
}

impl LockHolder {
    fn current(user: impl Into<String>) -> Self {
        LockHolder {
            user: user.into(),
            host: host_name(),
            pid: std::process::id(),
            since: Utc::now(),
        }
    }

    /// A lock is abandoned when it is too old, or its process has exited on
    /// this host.
    fn is_abandoned(&self) -> bool {
        if Utc::now() - self.since > Duration::hours(STALE_LOCK_HOURS) {
            return true;
        }
        self.host == host_name() && !process_alive(self.pid)
    }
}

fn host_name() -> String {
    ["HOSTNAME", "HOST", "COMPUTERNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}")).exists()
}

#[cfg(not(target_os = "linux"))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive edit lock on a project file, released on drop.
#[derive(Debug)]
pub struct FileLock {
    lock_path: PathBuf,
    _handle: File,
    pub holder: LockHolder,
}

impl FileLock {
    /// Acquire the lock for `path`.
    ///
    /// Fails with `CalcError::FileLocked` when another live holder owns it.
    /// Abandoned sidecars are taken over.
    pub fn acquire(path: &Path, user: impl Into<String>) -> CalcResult<Self> {
        let lock_path = sibling_path(path, "lock");
        if let Some(existing) = Self::holder(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user, existing.host),
                existing.since.to_rfc3339(),
            ));
        }

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(io_error("create lock", &lock_path))?;
        handle.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let holder = LockHolder::current(user);
        let json = serde_json::to_string_pretty(&holder).map_err(CalcError::serialization)?;
        handle
            .write_all(json.as_bytes())
            .map_err(io_error("write lock", &lock_path))?;
        handle.sync_all().map_err(io_error("sync lock", &lock_path))?;

        debug!(path = %path.display(), user = %holder.user, "lock acquired");
        Ok(FileLock {
            lock_path,
            _handle: handle,
            holder,
        })
    }

    /// Current live holder of the lock on `path`, if any.
    pub fn holder(path: &Path) -> Option<LockHolder> {
        let lock_path = sibling_path(path, "lock");
        if !lock_path.exists() {
            return None;
        }
        match read_json::<LockHolder>(&lock_path) {
            Ok(holder) if !holder.is_abandoned() => Some(holder),
            Ok(holder) => {
                warn!(path = %path.display(), user = %holder.user, "ignoring abandoned lock");
                None
            }
            Err(_) => None,
        }
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}
