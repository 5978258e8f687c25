//! Cue settings scanned from the timing line
//!
//! Settings such as `align:start` or `line:90%` are recorded as ordered
//! name/value pairs. They are never interpreted.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered `name:value` settings following a cue's end timestamp
///
/// # Examples
///
/// ```rust
/// # use vtt_core::parser::ast::CueSettings;
/// let settings: CueSettings = [("align", "start"), ("line", "90%")].into_iter().collect();
/// assert_eq!(settings.get("line"), Some("90%"));
/// assert_eq!(settings.to_string(), "align:start line:90%");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CueSettings {
    entries: Vec<(String, String)>,
}

impl CueSettings {
    /// Create an empty settings list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a setting, keeping earlier ones with the same name
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Value of the first setting called `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Settings in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for CueSettings {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl core::fmt::Display for CueSettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (index, (name, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}:{value}")?;
        }
        Ok(())
    }
}
