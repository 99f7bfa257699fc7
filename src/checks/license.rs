//! Apache-2.0 license header rule.

use std::path::Path;

use super::{scan, Findings, Violation};
use crate::error::Error;

/// Text every checked file must contain, whatever its comment syntax.
pub const LICENSE_MARKER: &str = "Licensed under the Apache License, Version 2.0";

/// Canonical header, printed once when any file is missing it.
pub const LICENSE_HEADER: &str = r#"Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License."#;

pub fn has_license(contents: &str) -> bool {
    contents.contains(LICENSE_MARKER)
}

/// Files without the license header.
pub fn check<'a>(
    root: &Path,
    paths: impl IntoIterator<Item = &'a Path>,
) -> Result<Findings, Error> {
    scan(root, paths, Violation::MissingLicense, |contents| !has_license(contents))
}
