//! Credential resolution and the one-shot release fetch.
//!
//! Both are external collaborators from the model's point of view: the
//! event loop only ever sees a `FetchSucceeded(Vec<Release>)` or
//! `FetchFailed(String)` message. There is no retry, no pagination beyond a
//! single large page, and no cancellation of the in-flight request —
//! quitting simply ends the process.

use anyhow::{bail, Context, Result};
use relnav_core::Release;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;

/// Environment variable checked first for an access token.
pub const TOKEN_ENV: &str = "GITHUB_OAUTH_TOKEN";

/// Upstream caps `per_page` at four digits; this covers realistic release
/// histories in a single request.
const RELEASES_PER_PAGE: u32 = 1000;

/// The subset of the GitHub release object relnav consumes.
#[derive(Debug, Deserialize)]
struct ApiRelease {
    tag_name: String,
    /// Null for releases published without notes.
    body: Option<String>,
}

/// Resolves a GitHub access token.
///
/// Reads `GITHUB_OAUTH_TOKEN` first; when absent, shells out to
/// `gh auth token`. When both fail the error names both remediation paths,
/// and the caller terminates before any terminal state is touched.
pub fn resolve_token() -> Result<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        let token = token.trim().to_owned();
        if !token.is_empty() {
            return Ok(token);
        }
    }

    let output = std::process::Command::new("gh")
        .args(["auth", "token"])
        .output()
        .with_context(|| {
            format!("{TOKEN_ENV} not set and the `gh` CLI could not be run; set {TOKEN_ENV} or run `gh auth login`")
        })?;
    if !output.status.success() {
        bail!("{TOKEN_ENV} not set and `gh auth token` failed; set {TOKEN_ENV} or run `gh auth login`");
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    if token.is_empty() {
        bail!("{TOKEN_ENV} not set and `gh auth token` returned nothing; set {TOKEN_ENV} or run `gh auth login`");
    }
    Ok(token)
}

/// Builds the HTTP client with auth and API-version headers baked in.
pub fn build_client(token: &str) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
        .context("access token contains characters invalid in a header")?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
    headers.insert("X-GitHub-Api-Version", HeaderValue::from_static("2022-11-28"));

    reqwest::Client::builder()
        .user_agent(concat!("relnav/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()
        .context("failed to build HTTP client")
}

/// Lists all releases for `owner/repo` in one request.
///
/// Transport failures, auth failures, and non-2xx statuses are all fatal
/// for the session — the caller converts the error into `FetchFailed`.
pub async fn list_releases(
    client: &reqwest::Client,
    owner: &str,
    repo: &str,
) -> Result<Vec<Release>> {
    let url = format!("https://api.github.com/repos/{owner}/{repo}/releases");
    let response = client
        .get(&url)
        .query(&[("per_page", RELEASES_PER_PAGE)])
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("GitHub returned {status} listing releases for {owner}/{repo}");
    }

    let api_releases: Vec<ApiRelease> = response
        .json()
        .await
        .context("failed to decode the release list")?;

    Ok(api_releases
        .into_iter()
        .map(|r| Release {
            tag: r.tag_name,
            description: r.body.unwrap_or_default(),
        })
        .collect())
}
