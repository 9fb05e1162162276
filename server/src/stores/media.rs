//! # Media store
//!
//! Media bytes never pass through this server. Clients upload straight to
//! the S3-compatible bucket with short-lived presigned PUT URLs and download
//! with day-long presigned GET URLs; deletion happens server-side through
//! presigned DELETE requests. Which objects belong to which project is
//! tracked in the `project_media` table instead of bucket listings, so the
//! bucket needs no LIST permission at all.
//!
//! Object keys are `{project_id}/{file_name}` with a uuid woven into the
//! file name to keep repeated uploads of `photo.jpg` apart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use openhouse_domain::{MediaKind, ProjectMedia};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use super::ProjectMediaStore;
use crate::{config::MediaConfig, error::AppError};

type HmacSha256 = Hmac<Sha256>;

pub struct S3MediaStore {
    pool: PgPool,
    client: reqwest::Client,
    config: MediaConfig,
}

impl S3MediaStore {
    pub fn new(pool: PgPool, config: MediaConfig) -> Self {
        Self {
            pool,
            client: reqwest::Client::new(),
            config,
        }
    }

    fn presign(&self, method: &str, key: &str, expires_secs: u64) -> String {
        let url = presigned_url(&self.config, method, key, expires_secs, Utc::now());

        #[cfg(feature = "verbose")]
        println!("Presigned {method} for {key}: {url}");

        url
    }
}

#[async_trait]
impl ProjectMediaStore for S3MediaStore {
    async fn media_for_projects(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ProjectMedia>>, AppError> {
        let rows: Vec<(Uuid, String, String)> = sqlx::query_as(
            "SELECT project_id, file_name, content_type FROM project_media WHERE project_id = ANY($1) ORDER BY file_name",
        )
        .bind(project_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut media: HashMap<Uuid, Vec<ProjectMedia>> = HashMap::new();
        for (project_id, file_name, content_type) in rows {
            let Some(kind) = MediaKind::from_content_type(&content_type) else {
                warn!("Skipping media with unexpected content type: {content_type}");
                continue;
            };
            let url = self.presign(
                "GET",
                &format!("{project_id}/{file_name}"),
                self.config.download_expiry_secs,
            );
            media.entry(project_id).or_default().push(ProjectMedia { kind, url });
        }
        Ok(media)
    }

    async fn media_names(&self, project_id: Uuid) -> Result<Vec<String>, AppError> {
        let names = sqlx::query_scalar(
            "SELECT file_name FROM project_media WHERE project_id = $1 ORDER BY file_name",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn new_upload_urls(
        &self,
        project_id: Uuid,
        file_names: &[String],
    ) -> Result<Vec<String>, AppError> {
        let mut urls = Vec::with_capacity(file_names.len());
        for file_name in file_names {
            let content_type = MediaKind::content_type_for_file(file_name).ok_or_else(|| {
                AppError::Validation(format!("Unsupported media file type: \"{file_name}\""))
            })?;
            let object_name = unique_object_name(file_name);

            sqlx::query(
                "INSERT INTO project_media (project_id, file_name, content_type) VALUES ($1, $2, $3)",
            )
            .bind(project_id)
            .bind(&object_name)
            .bind(content_type)
            .execute(&self.pool)
            .await?;

            urls.push(self.presign(
                "PUT",
                &format!("{project_id}/{object_name}"),
                self.config.upload_expiry_secs,
            ));
        }
        Ok(urls)
    }

    async fn remove_media(&self, project_id: Uuid, file_names: &[String]) -> Result<(), AppError> {
        for file_name in file_names {
            let url = self.presign(
                "DELETE",
                &format!("{project_id}/{file_name}"),
                self.config.upload_expiry_secs,
            );
            let response = self
                .client
                .delete(&url)
                .send()
                .await
                .map_err(|e| AppError::ObjectStore(e.to_string()))?;
            // A missing object is already the state we want.
            if !response.status().is_success() && response.status().as_u16() != 404 {
                return Err(AppError::ObjectStore(format!(
                    "delete of {file_name} failed: {}",
                    response.status()
                )));
            }

            sqlx::query("DELETE FROM project_media WHERE project_id = $1 AND file_name = $2")
                .bind(project_id)
                .bind(file_name)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}

/// `photo.jpg` becomes `photo-5f64…1c.jpg`.
pub fn unique_object_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}-{}.{ext}", Uuid::new_v4()),
        None => format!("{file_name}-{}", Uuid::new_v4()),
    }
}

/// AWS Signature V4 query presigning (path-style URLs, UNSIGNED-PAYLOAD,
/// only `host` signed). Enough for any S3-compatible store including minio.
fn presigned_url(
    config: &MediaConfig,
    method: &str,
    key: &str,
    expires_secs: u64,
    now: DateTime<Utc>,
) -> String {
    let host = config
        .endpoint
        .split_once("://")
        .map_or(config.endpoint.as_str(), |(_, rest)| rest)
        .trim_end_matches('/');
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let datestamp = now.format("%Y%m%d").to_string();
    let scope = format!("{datestamp}/{}/s3/aws4_request", config.region);
    let credential = format!("{}/{scope}", config.access_key);

    let canonical_uri = format!(
        "/{}/{}",
        uri_encode(&config.bucket, false),
        uri_encode(key, false)
    );
    // Already sorted by parameter name.
    let canonical_query = format!(
        "X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Credential={}&X-Amz-Date={amz_date}&X-Amz-Expires={expires_secs}&X-Amz-SignedHeaders=host",
        uri_encode(&credential, true)
    );
    let canonical_request = format!(
        "{method}\n{canonical_uri}\n{canonical_query}\nhost:{host}\n\nhost\nUNSIGNED-PAYLOAD"
    );

    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let mut signing_key = hmac_sha256(
        format!("AWS4{}", config.secret_key).as_bytes(),
        datestamp.as_bytes(),
    );
    for part in [config.region.as_str(), "s3", "aws4_request"] {
        signing_key = hmac_sha256(&signing_key, part.as_bytes());
    }
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    format!(
        "{}{canonical_uri}?{canonical_query}&X-Amz-Signature={signature}",
        config.endpoint.trim_end_matches('/')
    )
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// SigV4 canonical encoding: unreserved characters stay, `/` only survives
/// in paths, everything else becomes uppercase percent escapes.
fn uri_encode(value: &str, encode_slash: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            b'/' if !encode_slash => out.push('/'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
