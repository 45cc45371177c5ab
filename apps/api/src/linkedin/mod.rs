//! LinkedIn data provider client — activity fetch, normalization, and the
//! raw profile-data lookup.
//!
//! Activities are normalized before anything downstream sees them: newest 5
//! only, text reduced to 7-bit ASCII, engagement counts carried along. The
//! normalized list is also dumped to disk as a best-effort debug artifact.

pub mod handlers;

use std::path::PathBuf;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;

const API_HOST: &str = "linkedin-api8.p.rapidapi.com";
/// How many of the most recent posts survive normalization.
const MAX_ACTIVITIES: usize = 5;

static PROFILE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://www\.linkedin\.com/in/([^/]+)").expect("profile URL regex")
});

/// Extracts the profile handle from a LinkedIn profile URL.
/// Fails with a validation error before any network call is made.
pub fn extract_username(profile_url: &str) -> Result<String, AppError> {
    PROFILE_URL_RE
        .captures(profile_url)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| AppError::Validation(format!("invalid LinkedIn profile URL: {profile_url}")))
}

/// One normalized activity entry, ready for prompt embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub text: String,
    pub reaction_count: u32,
    pub comment_count: u32,
}

/// Wire shape of the provider's profile-posts response. Unknown fields are
/// ignored; absent fields default so one sparse post cannot sink the feed.
#[derive(Debug, Deserialize)]
struct ActivityFeed {
    #[serde(default)]
    data: Vec<UpstreamPost>,
}

#[derive(Debug, Deserialize)]
struct UpstreamPost {
    #[serde(default)]
    text: String,
    #[serde(default, rename = "totalReactionCount")]
    total_reaction_count: u32,
    #[serde(default, rename = "commentsCount")]
    comments_count: u32,
    #[serde(default, rename = "postedDate")]
    posted_date: i64,
}

/// Newest-first, capped at `MAX_ACTIVITIES`, text reduced to ASCII.
fn normalize_activities(mut posts: Vec<UpstreamPost>) -> Vec<Activity> {
    posts.sort_by(|a, b| b.posted_date.cmp(&a.posted_date));
    posts.truncate(MAX_ACTIVITIES);
    posts
        .into_iter()
        .map(|post| Activity {
            text: strip_non_ascii(&post.text),
            reaction_count: post.total_reaction_count,
            comment_count: post.comments_count,
        })
        .collect()
}

/// Drops every character outside the 7-bit ASCII range.
fn strip_non_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Client for the RapidAPI-hosted LinkedIn endpoints.
#[derive(Clone)]
pub struct LinkedInClient {
    http: Client,
    api_key: String,
    base_url: String,
    cache_path: PathBuf,
}

impl LinkedInClient {
    pub fn new(api_key: String, cache_path: PathBuf) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: format!("https://{API_HOST}"),
            cache_path,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(api_key: String, base_url: String, cache_path: PathBuf) -> Self {
        Self {
            base_url,
            ..Self::new(api_key, cache_path)
        }
    }

    /// Fetches and normalizes the profile's recent activity.
    ///
    /// Side effect: writes the normalized list to `cache_path`. The write is
    /// best-effort — a failure is logged and never fails the request.
    pub async fn fetch_activities(&self, profile_url: &str) -> Result<Vec<Activity>, AppError> {
        let username = extract_username(profile_url)?;

        let response = self.get("get-profile-posts", &username).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "activity API returned {status} for {username}"
            )));
        }

        let feed: ActivityFeed = response.json().await.map_err(|e| {
            AppError::Upstream(format!("activity API returned malformed payload: {e}"))
        })?;

        let activities = normalize_activities(feed.data);
        info!("fetched {} activities for {username}", activities.len());

        self.write_cache(&activities).await;

        Ok(activities)
    }

    /// Raw passthrough of the provider's profile-detail lookup.
    pub async fn fetch_profile_data(&self, profile_url: &str) -> Result<serde_json::Value, AppError> {
        let username = extract_username(profile_url)?;

        let response = self.get("get-profile-data", &username).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "profile data API returned {status} for {username}"
            )));
        }

        response.json().await.map_err(|e| {
            AppError::Upstream(format!("profile data API returned malformed payload: {e}"))
        })
    }

    async fn get(&self, endpoint: &str, username: &str) -> Result<reqwest::Response, AppError> {
        self.http
            .get(format!("{}/{endpoint}", self.base_url))
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", API_HOST)
            .query(&[("username", username)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("request to {endpoint} failed: {e}")))
    }

    async fn write_cache(&self, activities: &[Activity]) {
        match serde_json::to_vec_pretty(activities) {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(&self.cache_path, bytes).await {
                    warn!(
                        "failed to write activity cache {}: {e}",
                        self.cache_path.display()
                    );
                }
            }
            Err(e) => warn!("failed to serialize activity cache: {e}"),
        }
    }
}
