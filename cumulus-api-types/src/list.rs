use serde::{Deserialize, Serialize};

/// The generic paged collection envelope used by all `*List` responses as
/// well as by object lists embedded in other payloads.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct List<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Index of the returned page, starting at 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,

    /// Number of items in the returned page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Total number of items of the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// The server omits this attribute entirely for empty collections.
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<T>,
}

// not derived to avoid a `T: Default` bound
impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            kind: None,
            page: None,
            size: None,
            total: None,
            items: Vec::new(),
        }
    }
}

impl<T> List<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

/// Query parameters shared by all collection requests.
#[derive(Clone, Debug, Default)]
pub struct ListParams {
    /// Index of the requested page, starting at 1.
    pub page: Option<u64>,

    /// Maximum number of items per page.
    pub size: Option<u64>,

    /// An SQL-like `where` clause, for example `name like 'osde2e-%'`.
    pub search: Option<String>,

    /// An SQL-like `order by` clause, for example `name asc`.
    pub order: Option<String>,
}

impl ListParams {
    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_items_is_empty() {
        let list: List<String> =
            serde_json::from_str(r#"{"kind":"ClusterList","page":1,"size":0,"total":0}"#).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.total, Some(0));
    }

    #[test]
    fn items_iteration() {
        let list: List<u64> = serde_json::from_str(r#"{"items":[1,2,3]}"#).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().sum::<u64>(), 6);
        assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn empty_items_not_serialized() {
        let list = List::<u64>::default();
        assert_eq!(serde_json::to_string(&list).unwrap(), "{}");
    }
}
