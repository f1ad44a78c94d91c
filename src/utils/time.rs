// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Time utilities.
//!
//! This module provides the timestamp formats used across the project:
//! ISO-8601 for stored records and a human-readable local form for
//! notification bodies.

use chrono::{Local, SecondsFormat, Utc};

/// ISO-8601 UTC timestamp with millisecond precision, e.g.
/// `2026-08-05T14:30:15.123Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human-readable local timestamp for message bodies, e.g.
/// `8/5/2026, 2:30:15 PM`.
pub fn now_human() -> String {
    Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_timestamps_parse_back() {
        let ts = now_iso();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn human_timestamps_carry_a_meridiem() {
        let ts = now_human();
        assert!(ts.ends_with("AM") || ts.ends_with("PM"));
    }
}
