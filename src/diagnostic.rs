// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Distribution specific hints used by the strict terminfo search
//!
//! The last candidate of a full search is probed in strict mode. Only then
//! are legacy file locations tried, and if that candidate fails too, the
//! remediation text is attached to the final error.

use std::{ffi::OsStr, fmt::Debug, path::PathBuf};

use crate::context::Platform;

/// Source of legacy file locations and remediation text
pub trait Diagnostic: Debug + Send + Sync {
    /// Extra files tried in strict mode, between the standard and the hex layout
    fn legacy_files(&self, term_name: &OsStr, platform: Platform) -> Vec<PathBuf>;

    /// Human readable advice shown when no terminfo entry could be found
    fn remediation(&self, term_name: &OsStr, platform: Platform) -> String;
}

/// Hints for Debian-like Linux systems, where `ncurses-base` ships the basic entries
#[derive(Clone, Copy, Debug, Default)]
pub struct NcursesBase;

impl Diagnostic for NcursesBase {
    fn legacy_files(&self, term_name: &OsStr, platform: Platform) -> Vec<PathBuf> {
        if platform == Platform::Linux && term_name == OsStr::new("xterm") {
            vec![PathBuf::from("/lib/terminfo/x/xterm")]
        } else {
            vec![]
        }
    }

    fn remediation(&self, term_name: &OsStr, platform: Platform) -> String {
        match platform {
            Platform::Linux => format!(
                "no terminfo entry found for TERM={}\n\
                 \tDebian and Ubuntu users need to install the terminfo database:\n\
                 \t\tsudo apt-get install ncurses-base\n\
                 \tTERM should also be set to either \"xterm\" or \"xterm-*\".",
                term_name.display()
            ),
            _ => Generic.remediation(term_name, platform),
        }
    }
}

/// Hints that assume nothing about the distribution
#[derive(Clone, Copy, Debug, Default)]
pub struct Generic;

impl Diagnostic for Generic {
    fn legacy_files(&self, _term_name: &OsStr, _platform: Platform) -> Vec<PathBuf> {
        vec![]
    }

    fn remediation(&self, term_name: &OsStr, _platform: Platform) -> String {
        format!(
            "no terminfo entry found for TERM={}\n\
             \tInstall the system terminfo database, or point TERMINFO at a directory \
             containing a compiled entry for this terminal.",
            term_name.display()
        )
    }
}
