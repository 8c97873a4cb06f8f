use std::{env, str::FromStr};

use thiserror::Error;

use crate::domain::models::storage_usage::DEFAULT_CAPACITY_BYTES;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStoreProvider {
    S3,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStoreProvider {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct S3Settings {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub object_store: ObjectStoreProvider,
    pub document_store: DocumentStoreProvider,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub s3: Option<S3Settings>,
    pub capacity_bytes: u64,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let object_store = match lookup("STORAGE_PROVIDER").as_deref() {
            None | Some("s3") => ObjectStoreProvider::S3,
            Some("memory") => ObjectStoreProvider::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_PROVIDER",
                    value: other.to_string(),
                })
            }
        };

        let document_store = match lookup("DOCUMENT_STORE").as_deref() {
            None | Some("postgres") => DocumentStoreProvider::Postgres,
            Some("memory") => DocumentStoreProvider::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "DOCUMENT_STORE",
                    value: other.to_string(),
                })
            }
        };

        let database_url = lookup("DATABASE_URL");
        if document_store == DocumentStoreProvider::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let s3 = match object_store {
            ObjectStoreProvider::S3 => {
                let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
                Some(S3Settings {
                    endpoint: required("S3_ENDPOINT")?,
                    region: required("S3_REGION")?,
                    access_key_id: required("S3_ACCESS_KEY_ID")?,
                    secret_access_key: required("S3_SECRET_ACCESS_KEY")?,
                    bucket_name: required("S3_BUCKET")?,
                })
            }
            ObjectStoreProvider::Memory => None,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            object_store,
            document_store,
            database_url,
            redis_url: lookup("REDIS_URL"),
            s3,
            capacity_bytes: parse_or(&lookup, "STORAGE_CAPACITY_BYTES", DEFAULT_CAPACITY_BYTES)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            cors_allowed_origins,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn memory_providers_need_no_credentials() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("STORAGE_PROVIDER", "memory"),
            ("DOCUMENT_STORE", "memory"),
        ]))
        .unwrap();

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.capacity_bytes, DEFAULT_CAPACITY_BYTES);
        assert!(settings.s3.is_none());
        assert!(settings.cors_allowed_origins.is_empty());
    }

    #[test]
    fn postgres_requires_database_url() {
        let result = Settings::from_lookup(lookup_from(&[("STORAGE_PROVIDER", "memory")]));
        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn s3_requires_bucket_settings() {
        let result = Settings::from_lookup(lookup_from(&[
            ("DOCUMENT_STORE", "memory"),
            ("S3_ENDPOINT", "http://localhost:9000"),
            ("S3_REGION", "us-east-1"),
            ("S3_ACCESS_KEY_ID", "key"),
            ("S3_SECRET_ACCESS_KEY", "secret"),
        ]));
        assert!(matches!(result, Err(ConfigError::Missing("S3_BUCKET"))));
    }

    #[test]
    fn rejects_unparsable_numbers() {
        let result = Settings::from_lookup(lookup_from(&[
            ("STORAGE_PROVIDER", "memory"),
            ("DOCUMENT_STORE", "memory"),
            ("PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "PORT", .. })));
    }

    #[test]
    fn parses_cors_origins() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("STORAGE_PROVIDER", "memory"),
            ("DOCUMENT_STORE", "memory"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ]))
        .unwrap();
        assert_eq!(
            settings.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }
}
