//! Per-request form field value set.

use serde::de::DeserializeOwned;

use crate::error::FormError;

/// Parsed form fields of a single request.
///
/// One value set exists per request, produced by parsing the body exactly
/// once when the extractor runs. Both `application/x-www-form-urlencoded`
/// bodies and the non-file fields of `multipart/form-data` bodies normalize
/// into the same ordered list of name/value pairs, so every accessor below
/// behaves identically regardless of how the form was submitted.
///
/// A request whose body fails to parse never reaches the handler; the
/// extractor finalizes it with a `400 Bad Request` response instead. See
/// [`FormError`] for the failure modes.
///
/// ```
/// use actix_form::FormData;
/// use actix_web::post;
///
/// #[post("/search")]
/// async fn search(form: FormData) -> String {
///     let query = form.get_or("q", "*");
///     let pages: Vec<&str> = form.get_all("page");
///     format!("query: {query}, pages: {pages:?}")
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    /// Construct a value set from name/value pairs, preserving order.
    ///
    /// Useful for exercising handlers in tests without an HTTP request.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        FormData {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the first value submitted under `key`, if any.
    ///
    /// A field submitted with an empty value yields `Some("")`; use
    /// [`has()`](Self::has) to treat those the same as absent fields.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first non-empty value under `key`, or `default`.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    /// Returns every value submitted under `key`, in submission order.
    ///
    /// Empty when the field is absent.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Returns true if `key` was submitted with a non-empty first value.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_empty())
    }

    /// Number of submitted fields, counting repeats.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the form contained no fields.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over all name/value pairs in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Bind the field values onto a caller type.
    ///
    /// Fields are matched by serde field name (`#[serde(rename = "...")]`
    /// selects a different form key) and values are coerced to the
    /// destination field's type by its `Deserialize` impl. A field absent
    /// from the form deserializes through `Option<_>` or
    /// `#[serde(default)]`; without either, binding fails.
    ///
    /// No response side effect on failure; the error is only returned. To
    /// reject the request instead, extract [`Form<T>`](crate::Form).
    ///
    /// ```
    /// use actix_form::FormData;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Pagination {
    ///     page: u32,
    ///     per_page: Option<u32>,
    /// }
    ///
    /// let form = FormData::from_pairs([("page", "3")]);
    /// let pagination: Pagination = form.bind().unwrap();
    /// assert_eq!(pagination.page, 3);
    /// assert_eq!(pagination.per_page, None);
    /// ```
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T, FormError> {
        let encoded = serde_urlencoded::to_string(&self.pairs)?;
        Ok(serde_urlencoded::from_str(&encoded)?)
    }
}
