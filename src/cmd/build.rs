//! Build command: the full download -> assemble -> dpkg-deb pipeline.

use anyhow::{Context, Result};
use tracing::info;

use openvscode_deb::core::config::Arch;
use openvscode_deb::core::paths::{DownloadSet, Layout};
use openvscode_deb::io::exec::Shell;
use openvscode_deb::io::fs::ShellFs;
use openvscode_deb::ops;

/// Run the whole pipeline. The first failure aborts with its error; partial
/// state stays on disk for inspection and is removed by `--clean true`.
pub fn build(layout: &Layout, arch: Arch, version: &str) -> Result<()> {
    let runner = Shell;
    let fs_ops = ShellFs::new(Shell);
    let set = DownloadSet::derive(layout, arch, version);

    ops::download::fetch_all(&runner, &fs_ops, layout, arch, version, &set)
        .context("download stage failed")?;

    ops::assemble::stage(&runner, &fs_ops, layout, arch, version, &set)?;

    let artifact = ops::assemble::build_deb(&runner, layout, arch, version)?;
    info!(%artifact, "package built");

    Ok(())
}
