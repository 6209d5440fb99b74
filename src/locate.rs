// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Search for terminfo database file for the terminal

use std::{
    ffi::{OsStr, OsString},
    fmt::Debug,
    fs, io, iter,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    context::{Platform, SearchContext},
    diagnostic::Diagnostic,
};

/// System terminfo directory, also used for empty `TERMINFO_DIRS` elements
pub const DEFAULT_DIR: &str = "/usr/share/terminfo";

/// Errors reported when looking for a terminfo database file
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// `TERM` is not set or empty
    #[error("TERM not set")]
    MissingTerminalType,
    /// The name of the terminal cannot be used as a file name
    #[error("InvalidTerminalName")]
    InvalidTerminalName,
    /// A candidate file could not be read
    #[error("Cannot read {}: {kind}", .path.display())]
    PathNotFound { path: PathBuf, kind: io::ErrorKind },
    /// The search strategy produced no directories
    #[error("No directories to search")]
    NoSearchDirectories,
    /// Every candidate failed, including the strict one
    #[error("{remediation}")]
    FinalResolutionFailure { term: OsString, remediation: String },
}

/// Directory to probe, with the strict flag enabling legacy files and remediation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub dir: PathBuf,
    pub strict: bool,
}

impl Candidate {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            strict: false,
        }
    }

    #[must_use]
    pub fn strict(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            strict: true,
        }
    }
}

/// Terminfo file found on disk
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Located {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

/// Strategy producing the ordered list of directories to probe
pub trait PathResolver: Debug + Send + Sync {
    fn candidates(&self, context: &SearchContext) -> Result<Vec<Candidate>, Error>;
}

/// `TERMINFO`, then `~/.terminfo`, then `TERMINFO_DIRS`, then the default directory in strict mode
///
/// `TERMINFO` is exclusive: if it is set, nothing else is searched.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullSearch;

impl PathResolver for FullSearch {
    fn candidates(&self, context: &SearchContext) -> Result<Vec<Candidate>, Error> {
        context.term()?;

        if let Some(dir) = context.terminfo() {
            return Ok(vec![Candidate::new(dir)]);
        }

        let mut candidates = vec![];

        if let Some(home_dir) = context.home() {
            candidates.push(Candidate::new(home_dir.join(".terminfo")));
        }

        if let Some(dirs) = context.terminfo_dirs() {
            candidates.extend(split_terminfo_dirs(dirs).into_iter().map(Candidate::new));
        }

        candidates.push(Candidate::strict(DEFAULT_DIR));

        Ok(candidates)
    }
}

/// `TERMINFO` if set, the default directory otherwise, never strict
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimalSearch;

impl PathResolver for MinimalSearch {
    fn candidates(&self, context: &SearchContext) -> Result<Vec<Candidate>, Error> {
        context.term()?;
        let dir = context.terminfo().unwrap_or_else(|| Path::new(DEFAULT_DIR));
        Ok(vec![Candidate::new(dir)])
    }
}

/// Search breadth
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    Full,
    Minimal,
}

impl SearchMode {
    /// Full search where the system terminfo database has a known layout
    #[must_use]
    pub const fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Linux | Platform::Darwin | Platform::Bsd => Self::Full,
            _ => Self::Minimal,
        }
    }

    #[must_use]
    pub fn resolver(self) -> &'static dyn PathResolver {
        match self {
            Self::Full => &FullSearch,
            Self::Minimal => &MinimalSearch,
        }
    }
}

/// Split colon separated directories, empty elements mean the default directory
pub fn split_terminfo_dirs(dirs: &OsStr) -> Vec<PathBuf> {
    split_on_colon(dirs)
        .into_iter()
        .map(|dir| {
            if dir.as_os_str().is_empty() {
                PathBuf::from(DEFAULT_DIR)
            } else {
                dir
            }
        })
        .collect()
}

#[cfg(unix)]
fn split_on_colon(list: &OsStr) -> Vec<PathBuf> {
    use std::os::unix::ffi::OsStrExt;

    list.as_bytes()
        .split(|c| *c == b':')
        .map(|dir| PathBuf::from(OsStr::from_bytes(dir)))
        .collect()
}

#[cfg(not(unix))]
fn split_on_colon(list: &OsStr) -> Vec<PathBuf> {
    list.to_string_lossy().split(':').map(PathBuf::from).collect()
}

/// Leaf directory named by the first byte of the terminal name
#[cfg(unix)]
fn first_byte_dir(first_byte: u8) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(&[first_byte]))
}

// Non-unix file names are Unicode, so a non-ASCII byte becomes its Latin-1 character
#[cfg(not(unix))]
fn first_byte_dir(first_byte: u8) -> PathBuf {
    PathBuf::from((first_byte as char).to_string())
}

fn read_file(path: PathBuf) -> Result<Located, Error> {
    debug!("trying terminfo file {}", path.display());
    match fs::read(&path) {
        Ok(data) => Ok(Located { path, data }),
        Err(err) => Err(Error::PathNotFound {
            path,
            kind: err.kind(),
        }),
    }
}

/// Read the terminfo file for the terminal from one candidate directory
///
/// Returns the error of the last attempted file if none could be read.
pub fn find_in_directory(
    term_name: &OsStr,
    candidate: &Candidate,
    platform: Platform,
    diagnostic: &dyn Diagnostic,
) -> Result<Located, Error> {
    let Some(first_byte) = term_name.as_encoded_bytes().first() else {
        return Err(Error::InvalidTerminalName);
    };
    if term_name.as_encoded_bytes().contains(&b'/') {
        return Err(Error::InvalidTerminalName);
    }

    // Standard layout - leaf directories use the first byte of the terminal name.
    let standard = candidate.dir.join(first_byte_dir(*first_byte)).join(term_name);

    let legacy = if candidate.strict {
        diagnostic.legacy_files(term_name, platform)
    } else {
        vec![]
    };

    for path in iter::once(standard).chain(legacy) {
        if let Ok(located) = read_file(path) {
            return Ok(located);
        }
    }

    // Layout for systems with non-case-sensitive filesystems (MacOS, Windows) - leaf
    // directories use the first byte of the terminal name in hexadecimal form.
    let first_byte_hex = format!("{first_byte:02x}");
    read_file(candidate.dir.join(first_byte_hex).join(term_name))
}

/// Find and read the terminfo database file for the terminal in `context`
///
/// Candidates are tried in the order given by `resolver`, a failed candidate
/// moves on to the next one. If the last failed candidate was strict, the
/// error carries the remediation text from `diagnostic`.
pub fn locate(
    context: &SearchContext,
    resolver: &dyn PathResolver,
    diagnostic: &dyn Diagnostic,
) -> Result<Located, Error> {
    let term_name = context.term()?;
    let mut last_error = Error::NoSearchDirectories;
    let mut strict = false;

    for candidate in resolver.candidates(context)? {
        match find_in_directory(term_name, &candidate, context.platform(), diagnostic) {
            Ok(located) => {
                info!("using terminfo file {}", located.path.display());
                return Ok(located);
            }
            Err(err @ Error::PathNotFound { .. }) => {
                debug!("no terminfo entry in {}: {err}", candidate.dir.display());
                strict = candidate.strict;
                last_error = err;
            }
            Err(err) => return Err(err),
        }
    }

    if strict {
        return Err(Error::FinalResolutionFailure {
            term: term_name.to_os_string(),
            remediation: diagnostic.remediation(term_name, context.platform()),
        });
    }

    Err(last_error)
}
