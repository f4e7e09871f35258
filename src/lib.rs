//! openvscode-deb - packages OpenVSCode Server releases into Debian packages.
//!
//! The pipeline is download -> extract -> relocate -> template -> build. The
//! heavy lifting is delegated to external system utilities (`curl`, `tar`,
//! `mkdir`, `cp`, `sed`, `chmod`, `dpkg-deb`) invoked through a small
//! command-runner abstraction, so the stage logic stays testable without the
//! real tools present.

pub mod core;
pub mod io;
pub mod ops;
