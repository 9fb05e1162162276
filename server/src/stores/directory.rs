//! # Directory
//!
//! Organizer identities live in a Microsoft Graph group, not in our
//! database. Client-credentials flow against the tenant, then page through
//! the group members. The token is cached until shortly before expiry.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use openhouse_domain::Organizer;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::warn;

use super::UserDirectory;
use crate::{config::DirectoryConfig, error::AppError};

const LOGIN_BASE: &str = "https://login.microsoftonline.com";
const GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";

pub struct GraphDirectory {
    client: reqwest::Client,
    config: DirectoryConfig,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct MemberPage {
    value: Vec<GraphUser>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphUser {
    id: Option<String>,
    given_name: Option<String>,
    surname: Option<String>,
    user_principal_name: Option<String>,
}

impl GraphDirectory {
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, AppError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let response = self
            .client
            .post(format!(
                "{LOGIN_BASE}/{}/oauth2/v2.0/token",
                self.config.tenant_id
            ))
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("scope", "https://graph.microsoft.com/.default"),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Directory(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AppError::Directory(format!(
                "token request failed: {}",
                response.status()
            )));
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Directory(e.to_string()))?;

        // Refresh a minute early rather than racing the expiry.
        let expires_at = Instant::now() + Duration::from_secs(token.expires_in.saturating_sub(60));
        let value = token.access_token.clone();
        *cached = Some(CachedToken {
            value: token.access_token,
            expires_at,
        });
        Ok(value)
    }
}

#[async_trait]
impl UserDirectory for GraphDirectory {
    async fn organizer_candidates(&self) -> Result<Vec<Organizer>, AppError> {
        let token = self.access_token().await?;
        let mut url = format!(
            "{GRAPH_BASE}/groups/{}/members/microsoft.graph.user?$select=id,givenName,surname,userPrincipalName&$top=999",
            self.config.organizer_group_id
        );

        let mut organizers = Vec::new();
        loop {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&token)
                .send()
                .await
                .map_err(|e| AppError::Directory(e.to_string()))?;
            if !response.status().is_success() {
                return Err(AppError::Directory(format!(
                    "group members request failed: {}",
                    response.status()
                )));
            }
            let page: MemberPage = response
                .json()
                .await
                .map_err(|e| AppError::Directory(e.to_string()))?;

            match append_members(page, &mut organizers) {
                Some(next) => url = next,
                None => break,
            }
        }
        Ok(organizers)
    }
}

/// Folds one result page into the accumulator and answers the link to the
/// next page, if any.
fn append_members(page: MemberPage, organizers: &mut Vec<Organizer>) -> Option<String> {
    for user in page.value {
        match organizer_from_graph_user(user) {
            Some(organizer) => organizers.push(organizer),
            None => warn!("Skipping directory member with incomplete profile"),
        }
    }
    page.next_link
}

fn organizer_from_graph_user(user: GraphUser) -> Option<Organizer> {
    let upn = user.user_principal_name?;
    Some(Organizer {
        id: user.id?,
        first_name: user.given_name?,
        last_name: user.surname?,
        // UPN local part doubles as the staff short name.
        short_name: upn.split('@').next().unwrap_or(&upn).to_string(),
    })
}
