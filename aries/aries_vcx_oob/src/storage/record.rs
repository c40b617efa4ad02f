use std::fmt;

use typed_builder::TypedBuilder;

#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct Record {
    #[builder(setter(into))]
    category: String,
    #[builder(setter(into))]
    name: String,
    #[builder(setter(into))]
    value: String,
    #[builder(default)]
    tags: RecordTags,
}

impl Record {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tags(&self) -> &RecordTags {
        &self.tags
    }
}

/// Plaintext search tags, kept sorted by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordTags {
    inner: Vec<(String, String)>,
}

impl RecordTags {
    pub fn new(inner: Vec<(String, String)>) -> Self {
        inner.into_iter().collect()
    }

    /// Adds a tag, replacing any previous value of the same name.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.inner.retain(|(existing, _)| existing != &name);
        self.inner.push((name, value.into()));
        self.inner.sort();
    }

    /// Adds the tag only when a value is present.
    pub fn add_opt(&mut self, name: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value {
            self.add(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// True when every tag of `filter` is present here with the same value.
    pub fn matches(&self, filter: &RecordTags) -> bool {
        filter
            .inner
            .iter()
            .all(|(name, value)| self.get(name) == Some(value.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for RecordTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, (name, value)) in self.inner.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(String, String)> for RecordTags {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut tags = Self::default();
        for (name, value) in iter {
            tags.add(name, value);
        }
        tags
    }
}

impl From<Vec<(String, String)>> for RecordTags {
    fn from(value: Vec<(String, String)>) -> Self {
        value.into_iter().collect()
    }
}

impl From<RecordTags> for Vec<(String, String)> {
    fn from(value: RecordTags) -> Self {
        value.inner
    }
}
