//! Recorded screen positions.
//!
//! A [`CoordinateMap`] binds semantic labels (`buy_button`, `ticker_box`, …)
//! to screen points. Entries are kept exactly as stored so that a malformed
//! entry is reported when a step needs it rather than silently dropped.

mod store;

pub use store::CoordinateStore;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A 2-D screen coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Anchor {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Label → coordinate mapping as persisted in the store file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateMap {
    entries: BTreeMap<String, Vec<i32>>,
}

impl CoordinateMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `label` to an anchor.
    ///
    /// Fails if the label is absent or its entry does not have exactly two
    /// components.
    pub fn anchor(&self, label: &str) -> Result<Anchor> {
        match self.entries.get(label).map(Vec::as_slice) {
            Some(&[x, y]) => Ok(Anchor::new(x, y)),
            Some(other) => Err(Error::invalid_anchor(
                label,
                format!("expected 2 components, found {}", other.len()),
            )),
            None => Err(Error::invalid_anchor(label, "not recorded")),
        }
    }

    /// Record `anchor` under `label`, replacing any earlier value.
    pub fn set(&mut self, label: impl Into<String>, anchor: Anchor) {
        self.entries.insert(label.into(), vec![anchor.x, anchor.y]);
    }

    /// Whether `label` has any entry, well-formed or not.
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, Anchor)> for CoordinateMap {
    fn from_iter<I: IntoIterator<Item = (S, Anchor)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (label, anchor) in iter {
            map.set(label, anchor);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_anchor_resolves_two_components() {
        let map: CoordinateMap = [("buy_button", Anchor::new(640, 412))].into_iter().collect();
        assert_eq!(map.anchor("buy_button").unwrap(), Anchor::new(640, 412));
    }

    #[test]
    fn test_missing_anchor_is_invalid() {
        let map = CoordinateMap::new();
        let err = map.anchor("sell_button").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAnchor);
        assert!(err.to_string().contains("sell_button"));
    }

    #[test]
    fn test_wrong_arity_is_invalid() {
        let map: CoordinateMap =
            serde_json::from_str(r#"{"amount_box": [1, 2, 3], "ticker_box": [5]}"#).unwrap();

        let err = map.anchor("amount_box").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAnchor);
        assert!(err.to_string().contains("found 3"));
        assert!(map.anchor("ticker_box").is_err());
    }

    #[test]
    fn test_set_overwrites() {
        let mut map = CoordinateMap::new();
        map.set("account_dropdown", Anchor::new(1, 1));
        map.set("account_dropdown", Anchor::new(2, 2));

        assert_eq!(map.len(), 1);
        assert_eq!(map.anchor("account_dropdown").unwrap(), Anchor::new(2, 2));
    }

    #[test]
    fn test_serializes_as_label_to_pair() {
        let map: CoordinateMap = [("day_option", Anchor::new(-20, 300))].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"day_option":[-20,300]}"#);
    }
}
