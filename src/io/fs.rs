//! Filesystem capability set used by the build stages.
//!
//! The operations that have a natural system utility (`mkdir`, `tar`, `cp`)
//! delegate to it through the [`CommandRunner`]; existence checks and
//! renames are native calls. Stages depend on the [`FsOps`] trait so they
//! can run against a substitute implementation in tests.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::io::exec::{CommandLine, CommandRunner, ExecError};

#[derive(Error, Debug)]
pub enum FsError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub trait FsOps {
    /// True when `path` names an existing entry. Absence and "could not
    /// stat" both map to false; this never errors.
    fn path_exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents with the given permission
    /// mode (an octal string such as `"0755"`).
    fn create_dir(&self, path: &Path, mode: &str) -> Result<(), FsError>;

    /// Unpack a gzip-compressed tarball into an existing target directory.
    fn extract_tar_gz(&self, archive: &Path, target_dir: &Path) -> Result<(), FsError>;

    /// Move `old` to `new`. With `overwrite`, a pre-existing destination is
    /// recursively deleted first so the move always succeeds structurally.
    fn rename(&self, old: &Path, new: &Path, overwrite: bool) -> Result<(), FsError>;

    /// Recursively, archive-preservingly copy `source` into `dest`,
    /// optionally creating `dest` (mode 0755) first.
    fn copy(&self, source: &Path, dest: &Path, create_dest: bool) -> Result<(), FsError>;
}

/// Production implementation backed by system utilities.
#[derive(Debug)]
pub struct ShellFs<R> {
    runner: R,
}

impl<R: CommandRunner> ShellFs<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> FsOps for ShellFs<R> {
    fn path_exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn create_dir(&self, path: &Path, mode: &str) -> Result<(), FsError> {
        info!(path = %path.display(), mode, "creating directory");
        let cmd = CommandLine::new("mkdir")
            .arg("--parents")
            .arg("--mode")
            .arg(mode)
            .arg(path.display().to_string());
        self.runner.run(&cmd)?;
        Ok(())
    }

    fn extract_tar_gz(&self, archive: &Path, target_dir: &Path) -> Result<(), FsError> {
        info!(
            archive = %archive.display(),
            target = %target_dir.display(),
            "extracting archive"
        );
        let cmd = CommandLine::new("tar")
            .arg("xzf")
            .arg(archive.display().to_string())
            .arg("--directory")
            .arg(target_dir.display().to_string());
        self.runner.run(&cmd)?;
        Ok(())
    }

    fn rename(&self, old: &Path, new: &Path, overwrite: bool) -> Result<(), FsError> {
        info!(from = %old.display(), to = %new.display(), "renaming");
        if overwrite && self.path_exists(new) {
            remove_existing(new)?;
        }
        fs::rename(old, new)?;
        Ok(())
    }

    fn copy(&self, source: &Path, dest: &Path, create_dest: bool) -> Result<(), FsError> {
        if create_dest {
            self.create_dir(dest, "0755")?;
        }
        info!(from = %source.display(), to = %dest.display(), "copying");
        let cmd = CommandLine::new("cp")
            .arg("-arf")
            .arg(source.display().to_string())
            .arg(dest.display().to_string());
        self.runner.run(&cmd)?;
        Ok(())
    }
}

fn remove_existing(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}


#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;
    use crate::io::exec::Shell;
    use crate::io::exec::testing::RecordingRunner;

    #[test]
    fn path_exists_reflects_the_filesystem() {
        let tmp = TempDir::new().unwrap();
        let fs_ops = ShellFs::new(Shell);

        let path = tmp.path().join("marker");
        assert!(!fs_ops.path_exists(&path));

        File::create(&path).unwrap();
        assert!(fs_ops.path_exists(&path));
    }

    #[test]
    fn rename_with_overwrite_replaces_an_existing_directory() {
        let tmp = TempDir::new().unwrap();
        let fs_ops = ShellFs::new(Shell);

        let old = tmp.path().join("old");
        let new = tmp.path().join("new");
        fs::create_dir(&old).unwrap();
        File::create(old.join("from-old")).unwrap();
        fs::create_dir(&new).unwrap();
        File::create(new.join("from-new")).unwrap();

        fs_ops.rename(&old, &new, true).unwrap();

        assert!(!old.exists());
        assert!(new.join("from-old").exists());
        assert!(!new.join("from-new").exists());
    }

    #[test]
    fn rename_with_overwrite_replaces_an_existing_file() {
        let tmp = TempDir::new().unwrap();
        let fs_ops = ShellFs::new(Shell);

        let old = tmp.path().join("LICENSE.txt");
        let new = tmp.path().join("openvscode-server");
        let mut f = File::create(&old).unwrap();
        f.write_all(b"MIT").unwrap();
        File::create(&new).unwrap();

        fs_ops.rename(&old, &new, true).unwrap();

        assert!(!old.exists());
        assert_eq!(fs::read_to_string(&new).unwrap(), "MIT");
    }

    #[test]
    fn rename_fails_when_the_source_is_missing() {
        let tmp = TempDir::new().unwrap();
        let fs_ops = ShellFs::new(Shell);

        let err = fs_ops
            .rename(&tmp.path().join("absent"), &tmp.path().join("new"), true)
            .unwrap_err();
        assert!(matches!(err, FsError::Io(_)));
    }

    #[test]
    fn create_dir_delegates_to_mkdir_with_the_mode() {
        let runner = RecordingRunner::default();
        let fs_ops = ShellFs::new(&runner);

        fs_ops.create_dir(Path::new("pkgroot/opt"), "0755").unwrap();

        let commands = runner.commands.borrow();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].program(), "mkdir");
        assert_eq!(
            commands[0].arguments(),
            ["--parents", "--mode", "0755", "pkgroot/opt"]
        );
    }

    #[test]
    fn extract_delegates_to_tar() {
        let runner = RecordingRunner::default();
        let fs_ops = ShellFs::new(&runner);

        fs_ops
            .extract_tar_gz(Path::new("downloads/a.tar.gz"), Path::new("downloads"))
            .unwrap();

        let commands = runner.commands.borrow();
        assert_eq!(commands[0].program(), "tar");
        assert_eq!(
            commands[0].arguments(),
            ["xzf", "downloads/a.tar.gz", "--directory", "downloads"]
        );
    }

    #[test]
    fn copy_optionally_creates_the_destination_first() {
        let runner = RecordingRunner::default();
        let fs_ops = ShellFs::new(&runner);

        fs_ops
            .copy(Path::new("src-tree"), Path::new("pkgroot/opt"), true)
            .unwrap();

        assert_eq!(runner.programs(), ["mkdir", "cp"]);
        let commands = runner.commands.borrow();
        assert_eq!(commands[1].arguments(), ["-arf", "src-tree", "pkgroot/opt"]);
    }

    #[test]
    fn copy_without_create_dest_issues_only_cp() {
        let runner = RecordingRunner::default();
        let fs_ops = ShellFs::new(&runner);

        fs_ops
            .copy(Path::new("src-tree"), Path::new("pkgroot"), false)
            .unwrap();

        assert_eq!(runner.programs(), ["cp"]);
    }

    #[test]
    fn command_failures_surface_through_copy() {
        let runner = RecordingRunner {
            fail_programs: vec!["cp".to_string()],
            ..Default::default()
        };
        let fs_ops = ShellFs::new(&runner);

        let err = fs_ops
            .copy(Path::new("missing"), Path::new("pkgroot"), false)
            .unwrap_err();
        assert!(matches!(err, FsError::Exec(ExecError::Failed { .. })));
    }
}
