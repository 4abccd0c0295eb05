//! Targeted value substitution in shell resource XML files.
//!
//! The decoded shell contains a handful of fixed-shape resource files
//! (`strings.xml`, `colors.xml`, `splash_screen.xml`). Each targeted element or
//! attribute appears at most once per file, so patching locates the first match
//! and splices the replacement into the value span only. All surrounding markup
//! is preserved byte-for-byte.
//!
//! Substituted values are not escaped: a value containing `<`, `&` or `"` will
//! corrupt the resource file. Callers must supply values that are already valid
//! for the destination XML context.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::Result;

/// The result of a single substitution attempt.
///
/// A no-match is not an error: a misspelled or renamed resource key leaves the
/// file untouched and surfaces here so callers and tests can observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The target was found and its value replaced.
    Patched,
    /// No element or attribute matched; the file content is unchanged.
    NoMatch,
}

impl PatchOutcome {
    pub fn is_patched(&self) -> bool {
        matches!(self, PatchOutcome::Patched)
    }
}

/// An in-memory resource file, read once and written back once regardless of
/// how many substitutions are applied in between.
#[derive(Debug)]
pub struct ResourceFile {
    path: PathBuf,
    contents: String,
}

impl ResourceFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path)?;
        Ok(Self { path, contents })
    }

    /// Replace the text content of `<tag name="name">...</tag>`.
    pub fn patch_element(&mut self, tag: &str, name: &str, value: &str) -> PatchOutcome {
        let pattern = format!("<{0} name=\"{1}\">([^<]*)</{0}>", tag, name);
        self.patch_span(&pattern, value)
    }

    /// Replace the value of the first `attr="..."` occurrence.
    pub fn patch_attribute(&mut self, attr: &str, value: &str) -> PatchOutcome {
        let pattern = format!("{}=\"([^\"]*)\"", attr);
        self.patch_span(&pattern, value)
    }

    fn patch_span(&mut self, pattern: &str, value: &str) -> PatchOutcome {
        // Targets are well-known fixed names, never user input
        let regex = Regex::new(pattern).expect("fixed resource pattern");

        match regex.captures(&self.contents) {
            Some(captures) => {
                let span = captures.get(1).expect("pattern has a value group").range();
                tracing::debug!("Patching {} at {}..{}", self.path.display(), span.start, span.end);
                self.contents.replace_range(span, value);
                PatchOutcome::Patched
            }
            None => {
                tracing::debug!("No match for '{}' in {}", pattern, self.path.display());
                PatchOutcome::NoMatch
            }
        }
    }

    /// Write the (possibly unchanged) contents back to disk.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, &self.contents)?;
        Ok(())
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}
