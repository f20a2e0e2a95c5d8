/// `config_struct!`: one declaration per configuration section
///
/// Each field is written as `name: Type = default`. The expansion holds the
/// struct (public fields, `#[serde(default)]` so omitted keys keep their
/// defaults), a matching `Default`, and TOML helpers that report failures as
/// `ClientError::Configuration`.
///
/// ```
/// royale_client::config_struct! {
///     pub struct RetryConfig {
///         attempts: u32 = 3,
///         backoff_ms: u64 = 250,
///     }
/// }
///
/// let cfg = RetryConfig::from_toml_str("attempts = 5").unwrap();
/// assert_eq!(cfg.attempts, 5);
/// assert_eq!(cfg.backoff_ms, 250);
/// assert!(RetryConfig::from_toml_str("attempts = \"five\"").is_err());
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field_name: $default_value,)*
                }
            }
        }

        impl $name {
            /// Parse this section from TOML; absent keys take their defaults
            pub fn from_toml_str(contents: &str) -> $crate::errors::ClientResult<Self> {
                toml::from_str::<Self>(contents).map_err(|e| {
                    $crate::errors::ClientError::configuration_error(format!(
                        "Failed to parse {}: {}",
                        stringify!($name),
                        e
                    ))
                })
            }

            pub fn to_toml_string(&self) -> $crate::errors::ClientResult<String> {
                toml::to_string_pretty(self).map_err(|e| {
                    $crate::errors::ClientError::configuration_error(format!(
                        "Failed to serialize {}: {}",
                        stringify!($name),
                        e
                    ))
                })
            }
        }
    };
}
