//! Clean command

use anyhow::Result;

use openvscode_deb::core::paths::Layout;
use openvscode_deb::io::exec::Shell;
use openvscode_deb::io::fs::ShellFs;
use openvscode_deb::ops;

pub fn clean(layout: &Layout) -> Result<()> {
    ops::clean::clean(&ShellFs::new(Shell), layout)
}
