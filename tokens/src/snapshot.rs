use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::UNSET;

// ResolvedSnapshot
//
// an ordered map from requested name to resolved value.  custom properties and regular
// properties share one namespace (told apart only by the leading --), and iteration follows
// the order the names were requested in rather than anything the platform imposes
//
// the map is small (tens of entries at most), so a vec with linear lookup beats pulling in an
// ordered map crate
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedSnapshot {
    entries: Vec<(String, String)>,
}

impl ResolvedSnapshot {
    pub fn new() -> Self {
        ResolvedSnapshot {
            entries: Vec::new(),
        }
    }

    // record a raw value, trimming it and substituting the sentinel when nothing is left
    //
    // a repeated name keeps its original position but takes the newer value, which is how
    // assigning the same key twice on a plain object behaves
    pub fn insert(&mut self, name: &str, raw: &str) {
        let value = match raw.trim() {
            "" => UNSET.to_owned(),
            v => v.to_owned(),
        };

        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_owned(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_unset(&self, name: &str) -> bool {
        self.get(name) == Some(UNSET)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // one `"name": value` line per entry, in snapshot order
    pub fn to_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(k, v)| format!("\"{k}\": {v}"))
            .collect()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ResolvedSnapshot {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut snapshot = ResolvedSnapshot::new();
        for (k, v) in iter {
            snapshot.insert(k, v);
        }
        snapshot
    }
}

// serde's derived map impls go through HashMap/BTreeMap and would lose the request order
impl Serialize for ResolvedSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// pretty json, which is what the debug panel has always shown
impl fmt::Display for ResolvedSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(s) => write!(f, "{s}"),
            Err(_) => Err(fmt::Error),
        }
    }
}
