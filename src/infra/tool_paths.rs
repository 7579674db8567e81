// SPDX-License-Identifier: Apache-2.0
//! tool_paths
//!
//! Layer: Infrastructure
//! Purpose:
//! - Resolve the external tools to absolute paths once, at startup.
//!
//! Notes:
//! - A name containing '/' is taken as a path; anything else is searched on PATH.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolLookupError {
    #[error("tool '{name}' not found on PATH")]
    NotOnPath { name: String },

    #[error("tool path {} is not an executable file", path.display())]
    NotExecutable { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub ethtool: PathBuf,
    pub ifconfig: PathBuf,
    pub dhclient: PathBuf,
}

impl ToolPaths {
    pub fn resolve(
        ethtool: &str,
        ifconfig: &str,
        dhclient: &str,
        path_var: Option<&OsStr>,
    ) -> Result<Self, ToolLookupError> {
        Ok(Self {
            ethtool: resolve_tool(ethtool, path_var)?,
            ifconfig: resolve_tool(ifconfig, path_var)?,
            dhclient: resolve_tool(dhclient, path_var)?,
        })
    }
}

pub fn resolve_tool(name: &str, path_var: Option<&OsStr>) -> Result<PathBuf, ToolLookupError> {
    if name.contains('/') {
        let path = PathBuf::from(name);
        return if is_executable(&path) {
            Ok(path)
        } else {
            Err(ToolLookupError::NotExecutable { path })
        };
    }

    path_var
        .into_iter()
        .flat_map(std::env::split_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| ToolLookupError::NotOnPath {
            name: name.to_string(),
        })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use std::{fs, os::unix::fs::PermissionsExt};

    use super::*;

    fn install(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn bare_names_are_found_on_path() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        install(first.path(), "ethtool", 0o755);
        install(second.path(), "ifconfig", 0o755);
        let dhclient = install(second.path(), "dhclient", 0o755);

        let path_var = std::env::join_paths([first.path(), second.path()]).unwrap();
        let tools =
            ToolPaths::resolve("ethtool", "ifconfig", "dhclient", Some(&path_var)).unwrap();

        assert_eq!(tools.ethtool, first.path().join("ethtool"));
        assert_eq!(tools.ifconfig, second.path().join("ifconfig"));
        assert_eq!(tools.dhclient, dhclient);
    }

    #[test]
    fn earlier_path_entries_win() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let expected = install(first.path(), "dhclient", 0o755);
        install(second.path(), "dhclient", 0o755);

        let path_var = std::env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(resolve_tool("dhclient", Some(&path_var)).unwrap(), expected);
    }

    #[test]
    fn non_executable_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        install(dir.path(), "ethtool", 0o644);

        let err = resolve_tool("ethtool", Some(dir.path().as_os_str())).unwrap_err();
        assert!(matches!(err, ToolLookupError::NotOnPath { .. }));
    }

    #[test]
    fn explicit_paths_bypass_search() {
        let dir = tempfile::tempdir().unwrap();
        let tool = install(dir.path(), "custom-ethtool", 0o755);

        let found = resolve_tool(tool.to_str().unwrap(), None).unwrap();
        assert_eq!(found, tool);

        let missing = dir.path().join("missing");
        let err = resolve_tool(missing.to_str().unwrap(), None).unwrap_err();
        assert!(matches!(err, ToolLookupError::NotExecutable { .. }));
    }

    #[test]
    fn missing_path_variable_finds_nothing() {
        let err = resolve_tool("ethtool", None).unwrap_err();
        assert_eq!(err.to_string(), "tool 'ethtool' not found on PATH");
    }
}
