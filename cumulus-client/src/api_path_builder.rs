use std::borrow::Cow;

/// Builder for API paths with a query.
///
/// The [`arg`](Self::arg) method can be used to add multiple arguments to the query.
///
/// ```rust
/// use cumulus_client::ApiPathBuilder;
///
/// let cluster = "1u2k3h4j5l";
/// let query = ApiPathBuilder::new(format!("/api/clusters_mgmt/v1/clusters/{cluster}/addons"))
///     .arg("page", 2)
///     .arg("size", 50)
///     .build();
///
/// assert_eq!(&query, "/api/clusters_mgmt/v1/clusters/1u2k3h4j5l/addons?page=2&size=50");
/// ```
#[derive(Clone, Debug)]
pub struct ApiPathBuilder {
    url: String,
    separator: char,
}

impl ApiPathBuilder {
    /// Creates a new builder from a base path.
    pub fn new<'a>(base: impl Into<Cow<'a, str>>) -> Self {
        Self {
            url: base.into().into_owned(),
            separator: '?',
        }
    }

    /// Adds an argument to the query.
    ///
    /// The name and value will be percent-encoded.
    pub fn arg<T: std::fmt::Display>(mut self, name: &str, value: T) -> Self {
        self.push_separator_and_name(name);
        self.push_encoded(value.to_string().as_bytes());
        self
    }

    /// Adds an optional argument to the query.
    ///
    /// Does nothing if the value is `None`. See [`arg`](Self::arg) for more details.
    pub fn maybe_arg<T: std::fmt::Display>(mut self, name: &str, value: &Option<T>) -> Self {
        if let Some(value) = value {
            self = self.arg(name, value);
        }
        self
    }

    /// Adds a boolean argument as `true`/`false`.
    pub fn bool_arg(mut self, name: &str, value: bool) -> Self {
        self.push_separator_and_name(name);
        self.url.push_str(if value { "true" } else { "false" });
        self
    }

    /// Adds an optional boolean argument.
    ///
    /// Does nothing if `value` is `None`. See [`bool_arg`](Self::bool_arg) for more details.
    pub fn maybe_bool_arg(mut self, name: &str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self = self.bool_arg(name, value);
        }
        self
    }

    /// Builds the url.
    pub fn build(self) -> String {
        self.url
    }

    fn push_separator_and_name(&mut self, name: &str) {
        self.url.push(self.separator);
        self.separator = '&';
        self.push_encoded(name.as_bytes());
        self.url.push('=');
    }

    fn push_encoded(&mut self, value: &[u8]) {
        let enc_value = percent_encoding::percent_encode(value, percent_encoding::NON_ALPHANUMERIC);
        self.url.extend(enc_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    #[serde(rename_all = "snake_case")]
    enum OrderDirection {
        Asc,
    }
    serde_plain::derive_display_from_serialize!(OrderDirection);

    #[test]
    fn test_builder() {
        let expected = "/api/clusters_mgmt/v1/clusters?order=asc";
        let order = OrderDirection::Asc;

        let query = ApiPathBuilder::new("/api/clusters_mgmt/v1/clusters")
            .arg("order", order)
            .build();

        assert_eq!(&query, expected);

        let second_expected =
            "/api/clusters_mgmt/v1/clusters?search=name%20like%20%27osde2e%2D%25%27&page=1";
        let search = Some("name like 'osde2e-%'");
        let page = Some(1);
        let size = None::<u32>;

        let second_query = ApiPathBuilder::new("/api/clusters_mgmt/v1/clusters")
            .maybe_arg("search", &search)
            .maybe_arg("page", &page)
            .maybe_arg("size", &size)
            .build();

        assert_eq!(&second_query, &second_expected);
    }

    #[test]
    fn test_bool_args() {
        let query = ApiPathBuilder::new("/api/clusters_mgmt/v1/versions")
            .bool_arg("enabled", true)
            .maybe_bool_arg("default", Some(false))
            .maybe_bool_arg("moa_enabled", None)
            .build();

        assert_eq!(
            &query,
            "/api/clusters_mgmt/v1/versions?enabled=true&default=false"
        );
    }
}
