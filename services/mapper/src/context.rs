use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use http::Uri;
use service_core::ddb::Adapter;
use service_core::simple_err_map;
use thiserror::Error;

use crate::config::{ConsistentReads, MapperConfig, TableNameOverride};
use crate::mapper::DdbMapper;
use crate::wrapper::MapperWrapper;

/// Environment variables read by [`MapperContext::from_env`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextKey {
    DynamoDbEndpoint,
    TablePrefix,
    ConsistentReads,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("{key} is not a valid endpoint: {value:?}.")]
    InvalidEndpoint { key: ContextKey, value: String },

    #[error("{key} must be either true or false, got {value:?}.")]
    InvalidFlag { key: ContextKey, value: String },
}

/// Wired mapper stack: the raw client plus the settings every call should use.
#[derive(Clone, Debug)]
pub struct MapperContext {
    pub adapter: Adapter,
    pub config: MapperConfig,
}

pub type DdbMapperWrapper = MapperWrapper<DdbMapper<Adapter>, Adapter>;

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DynamoDbEndpoint => write!(f, "DYNAMODB_ENDPOINT"),
            Self::TablePrefix => write!(f, "DYNAMODB_TABLE_PREFIX"),
            Self::ConsistentReads => write!(f, "DYNAMODB_CONSISTENT_READS"),
        }
    }
}

impl MapperContext {
    pub async fn from_env() -> Result<Self, ContextError> {
        let config = Self::config_from(Self::key)?;
        let shared_config = aws_config::load_from_env().await;

        let dynamodb_config = match Self::endpoint_from(Self::key)? {
            Some(uri) => {
                tracing::info!(endpoint = %uri, "Using custom DynamoDB endpoint.");
                aws_sdk_dynamodb::config::Builder::from(&shared_config)
                    .endpoint_resolver(aws_sdk_dynamodb::Endpoint::immutable(uri))
                    .build()
            }
            None => aws_sdk_dynamodb::config::Config::new(&shared_config),
        };

        let client = aws_sdk_dynamodb::Client::from_conf(dynamodb_config);
        Ok(MapperContext {
            adapter: client.into(),
            config,
        })
    }

    pub fn key(key: &ContextKey) -> Option<String> {
        env::var(key.to_string()).ok()
    }

    /// Mapper settings out of the variables found by `lookup`.
    pub fn config_from(lookup: impl Fn(&ContextKey) -> Option<String>) -> Result<MapperConfig, ContextError> {
        let consistent_reads = match lookup(&ContextKey::ConsistentReads) {
            None => ConsistentReads::Eventual,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" => ConsistentReads::Consistent,
                "false" => ConsistentReads::Eventual,
                _ => {
                    return Err(ContextError::InvalidFlag {
                        key: ContextKey::ConsistentReads,
                        value,
                    })
                }
            },
        };

        let table_name_override = lookup(&ContextKey::TablePrefix)
            .filter(|prefix| !prefix.is_empty())
            .map(TableNameOverride::Prefix);

        Ok(MapperConfig {
            consistent_reads,
            table_name_override,
            ..MapperConfig::default()
        })
    }

    pub fn endpoint_from(lookup: impl Fn(&ContextKey) -> Option<String>) -> Result<Option<Uri>, ContextError> {
        lookup(&ContextKey::DynamoDbEndpoint)
            .map(|endpoint| {
                Uri::from_str(&endpoint).map_err(simple_err_map!(
                    "Invalid DynamoDB endpoint.",
                    ContextError::InvalidEndpoint {
                        key: ContextKey::DynamoDbEndpoint,
                        value: endpoint.clone(),
                    }
                ))
            })
            .transpose()
    }

    /// A mapper facade sharing this context's client.
    pub fn wrapper(&self) -> DdbMapperWrapper {
        MapperWrapper::new(
            Arc::new(DdbMapper::new(self.adapter.clone())),
            Arc::new(self.adapter.clone()),
        )
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn lookup(vars: &[(ContextKey, &str)]) -> impl Fn(&ContextKey) -> Option<String> {
        let vars: HashMap<ContextKey, String> = vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key: &ContextKey| vars.get(key).cloned()
    }

    #[test]
    fn keys_are_env_var_names() {
        assert_eq!(ContextKey::DynamoDbEndpoint.to_string(), "DYNAMODB_ENDPOINT");
        assert_eq!(ContextKey::TablePrefix.to_string(), "DYNAMODB_TABLE_PREFIX");
        assert_eq!(ContextKey::ConsistentReads.to_string(), "DYNAMODB_CONSISTENT_READS");
    }

    #[test]
    fn nothing_set_is_the_default_config() {
        let config = MapperContext::config_from(lookup(&[])).unwrap();
        assert_eq!(config, MapperConfig::default());
        assert!(MapperContext::endpoint_from(lookup(&[])).unwrap().is_none());
    }

    #[rstest]
    #[case("true", ConsistentReads::Consistent)]
    #[case(" TRUE ", ConsistentReads::Consistent)]
    #[case("false", ConsistentReads::Eventual)]
    fn consistent_reads_flag(#[case] raw: &str, #[case] expected: ConsistentReads) {
        let config = MapperContext::config_from(lookup(&[
            (ContextKey::ConsistentReads, raw),
            (ContextKey::TablePrefix, "dev-"),
        ]))
        .unwrap();

        assert_eq!(config.consistent_reads, expected);
        assert_eq!(config.table_name_override, Some(TableNameOverride::Prefix("dev-".to_string())));
    }

    #[test]
    fn invalid_flag() {
        let err = MapperContext::config_from(lookup(&[(ContextKey::ConsistentReads, "yes")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "DYNAMODB_CONSISTENT_READS must be either true or false, got \"yes\"."
        );
    }

    #[test]
    fn endpoint() {
        let uri = MapperContext::endpoint_from(lookup(&[(ContextKey::DynamoDbEndpoint, "http://localhost:8000")]))
            .unwrap()
            .expect("endpoint should be set");
        assert_eq!(uri.host(), Some("localhost"));
        assert_eq!(uri.port_u16(), Some(8000));

        let err = MapperContext::endpoint_from(lookup(&[(ContextKey::DynamoDbEndpoint, "http://[::1")])).unwrap_err();
        assert!(matches!(err, ContextError::InvalidEndpoint { .. }));
    }
}
