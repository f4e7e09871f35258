//! Download stage: populate the local artifact cache.
//!
//! Idempotent: an artifact already present at its computed path is never
//! fetched again (and never checksummed or refreshed - clearing the cache is
//! the only way to force a re-download).

use std::path::Path;

use tracing::info;

use crate::core::config::Arch;
use crate::core::paths::{self, DownloadSet, Layout};
use crate::io::exec::{CommandLine, CommandRunner};
use crate::io::fs::{FsError, FsOps};

/// Ensure the cache directory exists, then fetch the release tarball and
/// license file unless already cached. Any fetch failure aborts the stage.
pub fn fetch_all<R, F>(
    runner: &R,
    fs: &F,
    layout: &Layout,
    arch: Arch,
    version: &str,
    set: &DownloadSet,
) -> Result<(), FsError>
where
    R: CommandRunner,
    F: FsOps,
{
    if !fs.path_exists(&layout.download_dir) {
        fs.create_dir(&layout.download_dir, "0755")?;
    }

    if fs.path_exists(&set.archive) {
        info!(path = %set.archive.display(), "release tarball already cached");
    } else {
        let url = paths::tarball_url(arch, version);
        info!(%url, "downloading release tarball");
        runner.run(&curl(&set.archive, &url))?;
    }

    if fs.path_exists(&set.license) {
        info!(path = %set.license.display(), "license already cached");
    } else {
        let url = paths::license_url(version);
        info!(%url, "downloading license");
        runner.run(&curl(&set.license, &url))?;
    }

    Ok(())
}

fn curl(output: &Path, url: &str) -> CommandLine {
    CommandLine::new("curl")
        .arg("-L")
        .arg("--output")
        .arg(output.display().to_string())
        .arg(url)
}
