//! Header field collection.

use std::collections::HashMap;
use std::collections::hash_map;

/// Header fields keyed by lowercased field-name.
///
/// Each name maps to the ordered comma-separated values of its field line.
/// Inserting a name that is already present replaces the earlier values:
/// a repeated field line overwrites instead of accumulating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    map: HashMap<String, Vec<String>>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `values` under the lowercased `name`, returning the values it replaced.
    pub fn insert(&mut self, name: &str, values: Vec<String>) -> Option<Vec<String>> {
        self.map.insert(name.to_ascii_lowercase(), values)
    }

    /// Case-insensitive lookup of all values of a field.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.map.get(&name.to_ascii_lowercase()).map(Vec::as_slice)
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(<[String]>::first).map(String::as_str)
    }

    pub fn last(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(<[String]>::last).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.map.iter() }
    }
}

/// Iterator over `(name, values)` pairs, in no particular order.
#[derive(Debug)]
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, Vec<String>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [String]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(vs: &[&str]) -> Vec<String> {
        vs.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("Content-Length", values(&["3"]));

        assert!(headers.contains("content-length"));
        assert_eq!(headers.first("CONTENT-LENGTH"), Some("3"));
        assert_eq!(headers.iter().next().unwrap().0, "content-length");
    }

    #[test]
    fn later_insert_replaces() {
        let mut headers = Headers::new();
        assert_eq!(headers.insert("X-Tag", values(&["a"])), None);
        assert_eq!(headers.insert("x-tag", values(&["b"])), Some(values(&["a"])));

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("x-tag"), Some(&values(&["b"])[..]));
    }

    #[test]
    fn first_and_last() {
        let mut headers = Headers::new();
        headers.insert("transfer-encoding", values(&["gzip", "chunked"]));

        assert_eq!(headers.first("transfer-encoding"), Some("gzip"));
        assert_eq!(headers.last("transfer-encoding"), Some("chunked"));
        assert_eq!(headers.last("missing"), None);
        assert!(!headers.is_empty());
    }
}
