/// Request shaping options: field allow-list XOR field deny-list
use crate::errors::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options as supplied by callers
///
/// `keys` limits the response to the listed fields, `exclude` drops them.
/// Supplying both is rejected by `validate()` before any network activity.
/// An empty list is the same as not supplying it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    pub keys: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

impl RequestOptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: Some(keys.into_iter().map(Into::into).collect()),
            exclude: None,
        }
    }

    pub fn exclude<I, S>(exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: None,
            exclude: Some(exclude.into_iter().map(Into::into).collect()),
        }
    }

    /// Build options from loosely typed JSON (`{"keys": [...]}`)
    ///
    /// Either field must be a list of strings when present.
    pub fn from_value(value: &Value) -> ClientResult<Self> {
        let object = match value {
            Value::Null => return Ok(Self::none()),
            Value::Object(map) => map,
            _ => return Err(ClientError::invalid_options("options must be an object")),
        };

        let options = Self {
            keys: list_field(object.get("keys"), "keys")?,
            exclude: list_field(object.get("exclude"), "exclude")?,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> ClientResult<QueryFields> {
        let keys = self.keys.as_ref().filter(|k| !k.is_empty());
        let exclude = self.exclude.as_ref().filter(|e| !e.is_empty());

        match (keys, exclude) {
            (Some(_), Some(_)) => Err(ClientError::invalid_options(
                "you can only request with either keys or exclude",
            )),
            (Some(keys), None) => Ok(QueryFields::Keys(keys.clone())),
            (None, Some(exclude)) => Ok(QueryFields::Exclude(exclude.clone())),
            (None, None) => Ok(QueryFields::All),
        }
    }
}

fn list_field(value: Option<&Value>, name: &str) -> ClientResult<Option<Vec<String>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ClientError::invalid_options(format!(
                        "every entry of '{}' must be a string",
                        name
                    ))
                })
            })
            .collect::<ClientResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(ClientError::invalid_options(format!(
            "make sure the '{}' argument you pass is a list",
            name
        ))),
    }
}

/// Validated field selection, ready to become query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFields {
    All,
    Keys(Vec<String>),
    Exclude(Vec<String>),
}

impl QueryFields {
    /// `keys=a,b` / `exclude=a,b`, or nothing
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            QueryFields::All => Vec::new(),
            QueryFields::Keys(keys) => vec![("keys", keys.join(","))],
            QueryFields::Exclude(exclude) => vec![("exclude", exclude.join(","))],
        }
    }
}
