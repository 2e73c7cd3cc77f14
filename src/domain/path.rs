//! The session's working directory.
//!
//! Paths are purely logical: `cd` never checks that a directory exists.

use std::fmt;

/// An absolute, normalized path. Root is `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingPath {
    segments: Vec<String>,
}

impl Default for WorkingPath {
    fn default() -> Self {
        Self::root()
    }
}

impl WorkingPath {
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a path. Relative input is taken from root.
    pub fn parse(path: &str) -> Self {
        let mut resolved = Self::root();
        resolved.push_all(path);
        resolved
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Apply a `cd` argument.
    ///
    /// `..` pops one segment and stops at root. A leading `/` replaces the
    /// path, anything else is appended. Empty and `.` segments are dropped.
    /// An empty argument or `~` goes to `home`.
    pub fn change_dir(&mut self, arg: &str, home: &WorkingPath) {
        let arg = arg.trim();
        if arg.is_empty() || arg == "~" {
            *self = home.clone();
            return;
        }
        if let Some(rest) = arg.strip_prefix("~/") {
            *self = home.clone();
            self.push_all(rest);
            return;
        }
        if arg.starts_with('/') {
            self.segments.clear();
        }
        self.push_all(arg);
    }

    fn push_all(&mut self, path: &str) {
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    self.segments.pop();
                }
                name => self.segments.push(name.to_string()),
            }
        }
    }
}

impl fmt::Display for WorkingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
