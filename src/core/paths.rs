//! Build directory layout and derived artifact names.
//!
//! Every stage receives an explicit [`Layout`] rather than reading global
//! constants, so tests can point the pipeline at temporary directories.

use std::path::{Path, PathBuf};

use crate::core::config::Arch;

/// Upstream project name; also the canonical install and license directory
/// name inside the package root.
pub const PACKAGE_NAME: &str = "openvscode-server";

/// File name the upstream license is cached under.
pub const LICENSE_FILE_NAME: &str = "LICENSE.txt";

/// Directory name required by the Debian package format for control
/// metadata.
pub const CONTROL_DIR_NAME: &str = "DEBIAN";

/// Directory layout for one build, defaulted at the entry point.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Download cache for release artifacts.
    pub download_dir: PathBuf,
    /// Package staging root consumed by dpkg-deb.
    pub pkgroot_dir: PathBuf,
    /// Static Debian metadata shipped with the repository.
    pub debian_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("downloads"),
            pkgroot_dir: PathBuf::from("pkgroot"),
            debian_dir: PathBuf::from("debian-files"),
        }
    }
}

impl Layout {
    /// Installation area inside the package root.
    pub fn opt_dir(&self) -> PathBuf {
        self.pkgroot_dir.join("opt")
    }

    /// License area inside the package root.
    pub fn license_dir(&self) -> PathBuf {
        self.pkgroot_dir.join("usr/share/licenses")
    }

    /// Control metadata directory inside the package root.
    pub fn control_dir(&self) -> PathBuf {
        self.pkgroot_dir.join(CONTROL_DIR_NAME)
    }

    /// The control file that carries the architecture/version placeholders.
    pub fn control_path(&self) -> PathBuf {
        self.control_dir().join("control")
    }
}

/// Local cache paths of the two artifacts a build fetches, derived once
/// after configuration validation and read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSet {
    /// The release tarball.
    pub archive: PathBuf,
    /// The upstream license file.
    pub license: PathBuf,
}

impl DownloadSet {
    pub fn derive(layout: &Layout, arch: Arch, version: &str) -> Self {
        Self {
            archive: layout.download_dir.join(tarball_file_name(arch, version)),
            license: layout.download_dir.join(LICENSE_FILE_NAME),
        }
    }
}

/// Upstream tarball file name, e.g.
/// `openvscode-server-v1.2.3-linux-x64.tar.gz`.
pub fn tarball_file_name(arch: Arch, version: &str) -> String {
    format!(
        "{PACKAGE_NAME}-v{version}-linux-{}.tar.gz",
        arch.platform_token()
    )
}

/// Release download URL for the tarball.
pub fn tarball_url(arch: Arch, version: &str) -> String {
    format!(
        "https://github.com/gitpod-io/openvscode-server/releases/download/{PACKAGE_NAME}-v{version}/{}",
        tarball_file_name(arch, version)
    )
}

/// Raw-file URL for the license at the release tag.
pub fn license_url(version: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/gitpod-io/openvscode-server/refs/tags/{PACKAGE_NAME}-v{version}/{LICENSE_FILE_NAME}"
    )
}

/// Name of the final package artifact, e.g.
/// `openvscode-server-v1.2.3-x64.deb`.
pub fn deb_file_name(arch: Arch, version: &str) -> String {
    format!("{PACKAGE_NAME}-v{version}-{}.deb", arch.platform_token())
}

/// Name of the directory the tarball unpacks to: the tarball file name with
/// its `.tar.gz` suffix stripped.
pub fn extracted_dir_name(archive: &Path) -> String {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(".tar.gz") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amd64_artifacts_use_the_x64_token() {
        assert_eq!(
            tarball_file_name(Arch::Amd64, "1.2.3"),
            "openvscode-server-v1.2.3-linux-x64.tar.gz"
        );
        assert_eq!(
            deb_file_name(Arch::Amd64, "1.2.3"),
            "openvscode-server-v1.2.3-x64.deb"
        );
        assert_eq!(
            tarball_url(Arch::Amd64, "1.2.3"),
            "https://github.com/gitpod-io/openvscode-server/releases/download/openvscode-server-v1.2.3/openvscode-server-v1.2.3-linux-x64.tar.gz"
        );
    }

    #[test]
    fn arm64_artifacts_keep_the_debian_name() {
        assert_eq!(
            tarball_file_name(Arch::Arm64, "9.9.9"),
            "openvscode-server-v9.9.9-linux-arm64.tar.gz"
        );
        assert_eq!(
            deb_file_name(Arch::Arm64, "9.9.9"),
            "openvscode-server-v9.9.9-arm64.deb"
        );
    }

    #[test]
    fn license_url_points_at_the_release_tag() {
        assert_eq!(
            license_url("1.88.1"),
            "https://raw.githubusercontent.com/gitpod-io/openvscode-server/refs/tags/openvscode-server-v1.88.1/LICENSE.txt"
        );
    }

    #[test]
    fn download_set_lives_under_the_cache_dir() {
        let layout = Layout::default();
        let set = DownloadSet::derive(&layout, Arch::Amd64, "1.2.3");
        assert_eq!(
            set.archive,
            Path::new("downloads/openvscode-server-v1.2.3-linux-x64.tar.gz")
        );
        assert_eq!(set.license, Path::new("downloads/LICENSE.txt"));
    }

    #[test]
    fn extracted_dir_name_strips_the_archive_suffix() {
        let set = DownloadSet::derive(&Layout::default(), Arch::Arm64, "1.2.3");
        assert_eq!(
            extracted_dir_name(&set.archive),
            "openvscode-server-v1.2.3-linux-arm64"
        );
    }
}
