// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Locate, parse and publish the capabilities of the current terminal
//!
//! The capabilities are resolved once per process, before any terminal
//! output. After that they are shared read-only through [`capabilities`].

use std::{path::PathBuf, process, sync::OnceLock};

use log::error;

use crate::{
    capability::Capabilities,
    context::{Platform, SearchContext},
    diagnostic::{Diagnostic, NcursesBase},
    locate::{self, Located, SearchMode},
    parse,
};

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Errors reported when loading terminal capabilities
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Locate(#[from] locate::Error),
    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: parse::Error },
}

/// Search strategy and diagnostics used to load capabilities
#[derive(Debug)]
pub struct Loader {
    mode: SearchMode,
    diagnostic: Box<dyn Diagnostic>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

impl Loader {
    /// Loader with the search mode suitable for `platform`
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            mode: SearchMode::for_platform(platform),
            diagnostic: Box::new(NcursesBase),
        }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_diagnostic(mut self, diagnostic: impl Diagnostic + 'static) -> Self {
        self.diagnostic = Box::new(diagnostic);
        self
    }

    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Find and read the terminfo file without parsing it
    pub fn locate(&self, context: &SearchContext) -> Result<Located, locate::Error> {
        locate::locate(context, self.mode.resolver(), self.diagnostic.as_ref())
    }

    /// Find the terminfo file and extract the capabilities
    ///
    /// A file that is found but cannot be parsed fails the load, no other
    /// directories are tried.
    pub fn load(&self, context: &SearchContext) -> Result<Capabilities, Error> {
        let Located { path, data } = self.locate(context)?;
        Capabilities::parse(&data).map_err(|source| Error::Parse { path, source })
    }
}

/// Load the capabilities for the process environment and publish them
pub fn init() -> Result<&'static Capabilities, Error> {
    init_with(&Loader::default(), &SearchContext::from_env())
}

/// Load the capabilities with an explicit loader and context and publish them
///
/// Does nothing if the capabilities have already been published.
pub fn init_with(
    loader: &Loader,
    context: &SearchContext,
) -> Result<&'static Capabilities, Error> {
    if let Some(capabilities) = CAPABILITIES.get() {
        return Ok(capabilities);
    }
    let capabilities = loader.load(context)?;
    Ok(CAPABILITIES.get_or_init(|| capabilities))
}

/// Capabilities published by [`init`], if any
#[must_use]
pub fn capabilities() -> Option<&'static Capabilities> {
    CAPABILITIES.get()
}

/// Like [`init`], but report the error on stderr and exit the process on failure
pub fn init_or_exit() -> &'static Capabilities {
    match init() {
        Ok(capabilities) => capabilities,
        Err(err) => {
            error!("cannot load terminal capabilities: {err}");
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
