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
/// `monitoring.rs` - Exercise the monitoring harness as a test suite would
/// =======================================================================
// Imports
// -------
//
// ### Third-party
use log::{error, warn};
use predicates::prelude::*;
use pretty_assertions::assert_eq;

// ### Local
use console_monitor::assertions::{
    expect_no_console_errors, expect_no_console_errors_where, verify_no_console_errors,
};
use console_monitor::monitor::{
    monitor_console, start_console_monitoring, stop_console_monitoring,
};

// Support functions
// -----------------
//
// Stand-ins for components under test: opaque code that may write to the
// console while doing its job.
fn render_dashboard_card() {
    warn!("Router warning: no route matched /missing");
}

fn render_broken_widget() {
    error!("Failed to resolve icon: UnknownIcon");
}

// Tests
// -----
#[test]
fn test_benign_warning_does_not_fail_the_assertion() {
    let window = monitor_console();
    render_dashboard_card();
    // Only the warn channel saw output; the error assertion passes.
    expect_no_console_errors();
    assert_eq!(
        window.monitor().warn_messages(),
        vec!["Router warning: no route matched /missing".to_string()]
    );
}

#[test]
fn test_allow_list_predicate_tolerates_known_output() {
    let known_benign =
        predicate::str::contains("Router warning").or(predicate::str::contains("UnknownIcon"));
    let window = monitor_console();
    render_dashboard_card();
    render_broken_widget();
    // The icon failure is on this suite's allow-list; nothing else is.
    expect_no_console_errors_where(|message| known_benign.eval(message));
    drop(window);
}

#[test]
fn test_unexpected_error_is_reported_with_its_text() {
    start_console_monitoring();
    render_broken_widget();
    let err = verify_no_console_errors().unwrap_err();
    assert_eq!(
        err.messages,
        vec!["Failed to resolve icon: UnknownIcon".to_string()]
    );
    stop_console_monitoring();
}

#[test]
#[should_panic(expected = "Unexpected console error output")]
fn test_unexpected_error_panics_the_assertion_form() {
    let _window = monitor_console();
    render_broken_widget();
    expect_no_console_errors();
}
