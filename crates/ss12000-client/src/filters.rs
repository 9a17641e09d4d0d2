//! Caller-side request inputs: filter values, filter sets, expand options,
//! lookup requests, and the ordered query parameter list sent on the wire.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// A single filter value as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    /// Sent as one repeated query key per element.
    List(Vec<String>),
}

impl FilterValue {
    /// Query-string renderings of this value, one per wire occurrence.
    #[must_use]
    pub fn wire_values(&self) -> Vec<String> {
        match self {
            Self::Text(text) => vec![text.clone()],
            Self::Bool(flag) => vec![flag.to_string()],
            Self::Integer(n) => vec![n.to_string()],
            Self::List(items) => items.clone(),
        }
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl<T: Into<String>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FilterValue {
    fn from(values: [&str; N]) -> Self {
        Self::List(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

/// Dates go on the wire as `YYYY-MM-DD`.
impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        Self::Text(value.format("%Y-%m-%d").to_string())
    }
}

/// Timestamps go on the wire as RFC 3339 with a `Z` suffix.
impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Text(value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Named filters for one list call, keyed by logical (snake_case) name.
///
/// Only names that are set are ever sent; there is no way to store an
/// "absent" value. Setting a name again replaces the previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    entries: Vec<(String, FilterValue)>,
}

impl Filters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name` only when `value` is `Some`.
    #[must_use]
    pub fn set_opt<V: Into<FilterValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.set("limit", limit)
    }

    #[must_use]
    pub fn page_token(self, token: impl Into<String>) -> Self {
        self.set("page_token", token.into())
    }

    #[must_use]
    pub fn sortkey(self, key: impl Into<String>) -> Self {
        self.set("sortkey", key.into())
    }

    #[must_use]
    pub fn expand<I, S>(self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set("expand", expand.into_iter().map(Into::into).collect::<Vec<String>>())
    }

    #[must_use]
    pub fn expand_reference_names(self, enabled: bool) -> Self {
        self.set("expand_reference_names", enabled)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
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

/// Ordered query parameters; a key may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// `expand` / `expandReferenceNames` options for lookup and by-id calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    pub expand: Vec<String>,
    pub expand_reference_names: bool,
}

impl ExpandOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_expand<I, S>(mut self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand.extend(expand.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_reference_names(mut self) -> Self {
        self.expand_reference_names = true;
        self
    }
}

/// Body and options for a `POST /{resource}/lookup` call.
///
/// Identifier lists go in the JSON body; expand options go in the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    pub ids: Vec<String>,
    /// Resource-specific identifier lists by logical name, e.g. `civic_nos`.
    pub keys: Vec<(String, Vec<String>)>,
    pub options: ExpandOptions,
}

impl LookupRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn by_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().with_ids(ids)
    }

    #[must_use]
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Adds values under a resource-specific identifier list such as
    /// `civic_nos` or `school_unit_codes`.
    #[must_use]
    pub fn with_key<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let values = values.into_iter().map(Into::into);
        if let Some((_, existing)) = self.keys.iter_mut().find(|(n, _)| *n == name) {
            existing.extend(values);
        } else {
            self.keys.push((name, values.collect()));
        }
        self
    }

    #[must_use]
    pub fn with_expand<I, S>(mut self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_expand(expand);
        self
    }

    #[must_use]
    pub fn with_reference_names(mut self) -> Self {
        self.options = self.options.with_reference_names();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_opt_none_leaves_filters_empty() {
        let filters = Filters::new().set_opt("parent", None::<&str>);
        assert!(filters.is_empty());
    }

    #[test]
    fn setting_a_name_twice_replaces_the_value() {
        let filters = Filters::new().limit(10).limit(25);
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get("limit"), Some(&FilterValue::Integer(25)));
    }

    #[test]
    fn booleans_render_lowercase() {
        assert_eq!(FilterValue::from(true).wire_values(), vec!["true"]);
        assert_eq!(FilterValue::from(false).wire_values(), vec!["false"]);
    }

    #[test]
    fn dates_and_timestamps_render_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(FilterValue::from(date).wire_values(), vec!["2024-01-31"]);

        let ts = DateTime::parse_from_rfc3339("2024-03-01T08:15:00+01:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(FilterValue::from(ts).wire_values(), vec!["2024-03-01T07:15:00Z"]);
    }

    #[test]
    fn query_params_keep_repeated_keys_in_order() {
        let mut q = QueryParams::new();
        q.push("expand", "duties");
        q.push("limit", "2");
        q.push("expand", "responsibleFor");
        assert_eq!(q.get_all("expand"), vec!["duties", "responsibleFor"]);
        assert_eq!(q.get("limit"), Some("2"));
        assert!(!q.contains_key("pageToken"));
    }

    #[test]
    fn lookup_with_key_merges_repeated_names() {
        let req = LookupRequest::new()
            .with_key("civic_nos", ["191212121212"])
            .with_key("civic_nos", ["200001010000"]);
        assert_eq!(req.keys.len(), 1);
        assert_eq!(req.keys[0].1, vec!["191212121212", "200001010000"]);
    }
}
