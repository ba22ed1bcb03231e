//! Column-name header shared by every row of a table.

/// Ordered column names, paired by position with each row's fields.
///
/// A header is built once per table and borrowed immutably by every row
/// decode, so it can be shared across threads decoding rows in parallel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Get the column name at a position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Position of the first column with this name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Header {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Header::new(iter)
    }
}

impl From<Vec<String>> for Header {
    fn from(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl From<&[&str]> for Header {
    fn from(names: &[&str]) -> Self {
        Header::new(names.iter().copied())
    }
}
