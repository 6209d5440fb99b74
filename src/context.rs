// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Snapshot of the environment that drives the terminfo search

use std::{
    env,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use crate::locate::Error;

/// Operating system family, as far as the terminfo search cares
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Platform {
    Linux,
    Darwin,
    Bsd,
    Windows,
    Other,
}

impl Platform {
    /// Platform the crate was compiled for
    #[must_use]
    pub fn current() -> Self {
        match env::consts::OS {
            "linux" | "android" => Self::Linux,
            "macos" | "ios" => Self::Darwin,
            "freebsd" | "netbsd" | "openbsd" | "dragonfly" => Self::Bsd,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }
}

/// Immutable view of the variables consulted while looking for terminfo
///
/// Empty variables are treated as unset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchContext {
    term: Option<OsString>,
    terminfo: Option<PathBuf>,
    home: Option<PathBuf>,
    terminfo_dirs: Option<OsString>,
    platform: Platform,
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|value| !value.is_empty())
}

impl SearchContext {
    /// Capture `TERM`, `TERMINFO`, `HOME` and `TERMINFO_DIRS` from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            term: non_empty(env::var_os("TERM")),
            terminfo: non_empty(env::var_os("TERMINFO")).map(PathBuf::from),
            home: non_empty(env::var_os("HOME")).map(PathBuf::from),
            terminfo_dirs: non_empty(env::var_os("TERMINFO_DIRS")),
            platform: Platform::current(),
        }
    }

    /// Context for the given terminal name and nothing else set
    #[must_use]
    pub fn new(term: impl Into<OsString>) -> Self {
        Self {
            term: non_empty(Some(term.into())),
            terminfo: None,
            home: None,
            terminfo_dirs: None,
            platform: Platform::current(),
        }
    }

    #[must_use]
    pub fn with_terminfo(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir: PathBuf = dir.into();
        self.terminfo = Some(dir).filter(|dir| !dir.as_os_str().is_empty());
        self
    }

    #[must_use]
    pub fn with_home(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir: PathBuf = dir.into();
        self.home = Some(dir).filter(|dir| !dir.as_os_str().is_empty());
        self
    }

    #[must_use]
    pub fn with_terminfo_dirs(mut self, dirs: impl Into<OsString>) -> Self {
        self.terminfo_dirs = non_empty(Some(dirs.into()));
        self
    }

    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Terminal name, failing if `TERM` was not set
    pub fn term(&self) -> Result<&OsStr, Error> {
        self.term.as_deref().ok_or(Error::MissingTerminalType)
    }

    #[must_use]
    pub fn terminfo(&self) -> Option<&Path> {
        self.terminfo.as_deref()
    }

    #[must_use]
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    #[must_use]
    pub fn terminfo_dirs(&self) -> Option<&OsStr> {
        self.terminfo_dirs.as_deref()
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn snapshot_from_env() {
        temp_env::with_vars(
            [
                ("TERM", Some("xterm-256color")),
                ("TERMINFO", None),
                ("HOME", Some("/home/user")),
                ("TERMINFO_DIRS", Some("/a:/b")),
            ],
            || {
                let context = SearchContext::from_env();
                assert_eq!(context.term(), Ok(OsStr::new("xterm-256color")));
                assert_eq!(context.terminfo(), None);
                assert_eq!(context.home(), Some(Path::new("/home/user")));
                assert_eq!(context.terminfo_dirs(), Some(OsStr::new("/a:/b")));
                assert_eq!(context.platform(), Platform::current());
            },
        );
    }

    #[test]
    fn snapshot_is_not_live() {
        let context = temp_env::with_var("TERM", Some("vt100"), SearchContext::from_env);
        temp_env::with_var("TERM", Some("xterm"), || {
            assert_eq!(context.term(), Ok(OsStr::new("vt100")));
        });
    }

    #[test]
    fn empty_variables_are_unset() {
        temp_env::with_vars(
            [
                ("TERM", Some("")),
                ("TERMINFO", Some("")),
                ("HOME", Some("")),
                ("TERMINFO_DIRS", Some("")),
            ],
            || {
                let context = SearchContext::from_env();
                assert_eq!(context.term(), Err(Error::MissingTerminalType));
                assert_eq!(context.terminfo(), None);
                assert_eq!(context.home(), None);
                assert_eq!(context.terminfo_dirs(), None);
            },
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_terminfo_dirs_kept() {
        use std::os::unix::ffi::OsStrExt;

        let dirs = OsStr::from_bytes(b"/opt/\xffterminfo:/a");
        let context = temp_env::with_var("TERMINFO_DIRS", Some(dirs), SearchContext::from_env);
        assert_eq!(context.terminfo_dirs(), Some(dirs));
    }

    #[test]
    fn missing_term() {
        temp_env::with_var("TERM", None::<&str>, || {
            let context = SearchContext::from_env();
            assert_eq!(context.term(), Err(Error::MissingTerminalType));
        });
        assert_eq!(SearchContext::new("").term(), Err(Error::MissingTerminalType));
    }
}
