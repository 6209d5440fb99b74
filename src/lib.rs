// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Locate the terminfo entry for the terminal and resolve the sequences for
//! special keys and parameterless control functions

pub mod capability;
pub mod context;
pub mod diagnostic;
pub mod load;
pub mod locate;
pub mod parse;

#[cfg(test)]
mod testdata;

pub use capability::{Capabilities, Function, Key};
pub use context::{Platform, SearchContext};
pub use load::{Loader, capabilities, init, init_or_exit};
pub use locate::{SearchMode, locate};
