/// A single outbound API request: endpoint path plus query parameters
use super::options::QueryFields;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: impl Into<String>, fields: &QueryFields) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: fields
                .query_pairs()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_optional_param<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with_param(key, v),
            None => self,
        }
    }
}
