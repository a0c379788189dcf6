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
/// `assertions.rs` -- Fail tests that produced unexpected console errors
/// =====================================================================
// Imports
// -------
//
// ### Local
use crate::monitor::get_console_monitor;

// Data structures
// ---------------
#[derive(Debug, thiserror::Error)]
#[error("Unexpected console error output:\n{}", .messages.join("\n"))]
pub struct UnexpectedConsoleErrors {
    /// The offending error-channel messages, in capture order.
    pub messages: Vec<String>,
}

// Code
// ----
//
/// Check that the current window captured no error-channel output at all.
pub fn verify_no_console_errors() -> Result<(), UnexpectedConsoleErrors> {
    verify_no_console_errors_where(|_| false)
}

/// Check the error channel against an allow-list: messages the predicate
/// accepts are tolerated (known-benign framework warnings and the like, a
/// per-suite convention); anything else fails. The monitor itself never
/// hard-codes which messages are benign.
pub fn verify_no_console_errors_where<F>(is_allowed: F) -> Result<(), UnexpectedConsoleErrors>
where
    F: Fn(&str) -> bool,
{
    let messages: Vec<String> = get_console_monitor()
        .error_messages()
        .into_iter()
        .filter(|message| !is_allowed(message))
        .collect();
    if messages.is_empty() {
        Ok(())
    } else {
        Err(UnexpectedConsoleErrors { messages })
    }
}

/// Assertion form of [`verify_no_console_errors`]: panics like any other
/// failed test assertion.
pub fn expect_no_console_errors() {
    if let Err(err) = verify_no_console_errors() {
        panic!("{err}");
    }
}

/// Assertion form of [`verify_no_console_errors_where`].
pub fn expect_no_console_errors_where<F>(is_allowed: F)
where
    F: Fn(&str) -> bool,
{
    if let Err(err) = verify_no_console_errors_where(is_allowed) {
        panic!("{err}");
    }
}
