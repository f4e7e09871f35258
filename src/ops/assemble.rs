//! Package assembly stage: lay out the package root and stamp metadata.
//!
//! Nine sequential steps; the first failure aborts the remainder with no
//! rollback of already-produced state.

use anyhow::{Context, Result};
use tracing::info;

use crate::core::config::Arch;
use crate::core::paths::{self, DownloadSet, Layout};
use crate::io::exec::{CommandLine, CommandRunner};
use crate::io::fs::FsOps;

/// Build the package root from the cached artifacts and the static Debian
/// metadata directory.
pub fn stage<R, F>(
    runner: &R,
    fs: &F,
    layout: &Layout,
    arch: Arch,
    version: &str,
    set: &DownloadSet,
) -> Result<()>
where
    R: CommandRunner,
    F: FsOps,
{
    let extracted_name = paths::extracted_dir_name(&set.archive);

    fs.extract_tar_gz(&set.archive, &layout.download_dir)
        .context("failed to extract release tarball")?;

    fs.copy(&layout.download_dir.join(&extracted_name), &layout.opt_dir(), true)
        .context("failed to copy server tree into package root")?;

    fs.rename(
        &layout.opt_dir().join(&extracted_name),
        &layout.opt_dir().join(paths::PACKAGE_NAME),
        true,
    )
    .context("failed to rename server tree")?;

    fs.copy(&set.license, &layout.license_dir(), true)
        .context("failed to copy license into package root")?;

    fs.rename(
        &layout.license_dir().join(paths::LICENSE_FILE_NAME),
        &layout.license_dir().join(paths::PACKAGE_NAME),
        true,
    )
    .context("failed to rename license")?;

    fs.copy(&layout.debian_dir, &layout.pkgroot_dir, true)
        .context("failed to copy Debian metadata files")?;

    let staged_metadata = layout.pkgroot_dir.join(
        layout
            .debian_dir
            .file_name()
            .unwrap_or(layout.debian_dir.as_os_str()),
    );
    fs.rename(&staged_metadata, &layout.control_dir(), true)
        .context("failed to rename Debian metadata directory")?;

    update_control(runner, layout, arch, version)?;

    fix_permissions(runner, layout)?;

    Ok(())
}

/// Substitute the `ARCHITECTURE` and `VERSION` placeholder tokens in the
/// control file with the real values. Two independent passes so a failure
/// points at the token that did not apply.
fn update_control<R: CommandRunner>(
    runner: &R,
    layout: &Layout,
    arch: Arch,
    version: &str,
) -> Result<()> {
    let control = layout.control_path().display().to_string();

    runner
        .run(
            &CommandLine::new("sed")
                .arg("-i")
                .arg(format!("s|ARCHITECTURE|{}|g", arch.as_str()))
                .arg(&control),
        )
        .context("failed to substitute architecture into control file")?;
    info!(arch = %arch, "updated package architecture");

    runner
        .run(
            &CommandLine::new("sed")
                .arg("-i")
                .arg(format!("s|VERSION|{version}|g"))
                .arg(&control),
        )
        .context("failed to substitute version into control file")?;
    info!(version, "updated package version");

    Ok(())
}

/// Normalize the package root's permission bits for dpkg-deb.
fn fix_permissions<R: CommandRunner>(runner: &R, layout: &Layout) -> Result<()> {
    runner
        .run(
            &CommandLine::new("chmod")
                .arg("755")
                .arg(layout.pkgroot_dir.display().to_string()),
        )
        .context("failed to fix package root permissions")?;
    info!(path = %layout.pkgroot_dir.display(), "fixed package root permissions");
    Ok(())
}

/// Invoke the system package builder on the completed package root. The
/// artifact lands in the working directory.
pub fn build_deb<R: CommandRunner>(
    runner: &R,
    layout: &Layout,
    arch: Arch,
    version: &str,
) -> Result<String> {
    let deb_name = paths::deb_file_name(arch, version);
    runner
        .run(
            &CommandLine::new("dpkg-deb")
                .arg("--build")
                .arg("--verbose")
                .arg(layout.pkgroot_dir.display().to_string())
                .arg(&deb_name),
        )
        .context("dpkg-deb failed")?;
    Ok(deb_name)
}
