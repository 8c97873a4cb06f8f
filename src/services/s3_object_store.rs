use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
    Client,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    application::{error::ApplicationError, services::object_store::ObjectStore},
    domain::{
        config::settings::S3Settings,
        models::file::{FileData, StoredObject},
    },
    services::error::StorageError,
};

/// Any S3-compatible bucket (AWS, MinIO, Supabase storage, ...).
pub struct S3ObjectStore {
    client: Client,
    endpoint: String,
    bucket_name: String,
}

impl S3ObjectStore {
    pub fn new(settings: S3Settings) -> Self {
        let credentials = Credentials::new(
            settings.access_key_id,
            settings.secret_access_key,
            None,
            None,
            "drive-service",
        );

        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region))
            .endpoint_url(settings.endpoint.clone())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(config),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            bucket_name: settings.bucket_name,
        }
    }
}

pub(crate) fn generate_object_key(filename: &str) -> String {
    let safe_filename = filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();

    format!("{}/{}", Uuid::new_v4(), safe_filename)
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, file_data), fields(filename = %file_data.filename))]
    async fn put(&self, file_data: FileData) -> Result<StoredObject, ApplicationError> {
        let key = generate_object_key(&file_data.filename);
        let size = file_data.size();

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .body(ByteStream::from(file_data.content))
            .send()
            .await
            .map_err(StorageError::from)?;

        Ok(StoredObject {
            object_ref: key,
            name: file_data.filename,
            size,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, object_ref: &str) -> Result<(), ApplicationError> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(object_ref)
            .send()
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    fn object_url(&self, object_ref: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket_name, object_ref)
    }

    fn provider_name(&self) -> &'static str {
        "s3"
    }
}
