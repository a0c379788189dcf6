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
/// `lib.rs` -- Define library modules for Console Monitor
/// ======================================================
///
/// The monitoring lifecycle and query API live in [`monitor`]; the
/// test-facing assertions built on top of it live in [`assertions`].
pub mod assertions;
pub mod formatting;
pub mod monitor;
