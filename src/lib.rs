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

//! trailguard: a tourist safety registry with encrypted records.
//!
//! This library keeps personally identifiable data and credentials encrypted
//! at rest, authenticates by decrypting and comparing stored fields, and
//! dispatches templated emergency notifications through a pluggable SMS
//! channel.

pub mod config;
pub mod constants;
pub mod crypto;
pub mod notify;
pub mod registry;
pub mod utils;

mod verification;
