//! Clean stage: remove build artifacts.

use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::paths::Layout;
use crate::io::fs::FsOps;

/// Recursively remove the download cache and package root. Absence of
/// either is not an error; the produced `.deb` (which lives outside both)
/// is left alone.
pub fn clean<F: FsOps>(fs_ops: &F, layout: &Layout) -> Result<()> {
    for dir in [&layout.download_dir, &layout.pkgroot_dir] {
        if fs_ops.path_exists(dir) {
            info!(path = %dir.display(), "cleaning");
            fs::remove_dir_all(dir)
                .with_context(|| format!("failed to remove {}", dir.display()))?;
        }
    }
    info!("cleaning done");
    Ok(())
}
