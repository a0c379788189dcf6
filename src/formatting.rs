// Copyright (C) 2025 Bryan A. Jones.
//
// This file is part of Console Monitor. Console Monitor is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License as published by the Free Software Foundation, either version
// 3 of the License, or (at your option) any later version.
//
// Console Monitor is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for
// more details.
//
// You should have received a copy of the GNU General Public License along with
// Console Monitor. If not, see
// [http://www.gnu.org/licenses](http://www.gnu.org/licenses).
/// `formatting.rs` -- Render logged arguments without trusting them
/// ================================================================
// Imports
// -------
//
// ### Standard library
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

// Globals
// -------
//
// The stand-in text recorded when a logged value cannot be rendered.
pub const UNSERIALIZABLE: &str = "[unserializable]";

// Code
// ----
//
/// Flatten a log record's arguments into one string. The code under test
/// controls the `Display`/`Debug` implementations involved, so this must
/// survive an implementation that reports `fmt::Error` or panics outright;
/// capture never propagates a failure to the logging call.
pub fn safe_format(args: &fmt::Arguments<'_>) -> String {
    catch_unwind(AssertUnwindSafe(|| {
        let mut text = String::new();
        match fmt::write(&mut text, *args) {
            Ok(()) => text,
            Err(fmt::Error) => UNSERIALIZABLE.to_string(),
        }
    }))
    .unwrap_or_else(|_| UNSERIALIZABLE.to_string())
}
