//! Request parameter construction

use crate::config::TapConfig;
use crate::http::RequestConfig;
use crate::pagination::Cursor;

/// Date format sent to the API
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query parameters for one export request, in a stable order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    params: Vec<(String, String)>,
}

impl RequestParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing an earlier value with the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.params.push((key, value)),
        }
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate parameters in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Turn the parameters into a request config
    pub fn into_request_config(self) -> RequestConfig {
        RequestConfig {
            query: self.params,
            ..RequestConfig::default()
        }
    }
}

/// Build the query parameters for one request.
///
/// The window dates are sent as calendar dates; the other settings pass
/// through unchanged, with flags spelled `True`/`False` as the export
/// endpoint has always received them. The cursor, if any, is added under `cursor_param`.
pub fn build_parameters(
    config: &TapConfig,
    cursor: Option<&Cursor>,
    cursor_param: &str,
) -> RequestParams {
    let mut params = RequestParams::new();
    params.insert(
        "start_date",
        config.start_date.date().format(DATE_FORMAT).to_string(),
    );
    params.insert(
        "end_date",
        config.end_date.date().format(DATE_FORMAT).to_string(),
    );
    params.insert(
        "exclude_project_costs",
        query_bool(config.exclude_project_costs),
    );
    params.insert("file_format", config.file_format.as_str());
    params.insert("group_by", config.group_by.as_str());
    params.insert("new_endpoint", query_bool(config.new_endpoint));

    if let Some(cursor) = cursor {
        params.insert(cursor_param, cursor.as_str());
    }

    params
}

fn query_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
