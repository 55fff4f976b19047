use crate::error::{Result, VersionTaggerError};
use crate::host::{RemoteFile, TagEntry, VersionHost};
use base64::{engine::general_purpose, Engine as _};
use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

/// Tags are listed 100 at a time until the API returns an empty page.
const TAGS_PER_PAGE: u32 = 100;

/// GitHub REST API implementation of [VersionHost]
pub struct GithubHost {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TagResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PutContentResponse {
    commit: CommitResponse,
}

#[derive(Debug, Deserialize)]
struct TagObjectResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PullHeadResponse {
    #[serde(rename = "ref")]
    git_ref: String,
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    head: PullHeadResponse,
}

impl GithubHost {
    /// Create a host client authenticated with a bearer token.
    ///
    /// `base_url` is normally "https://api.github.com" but can point at a
    /// GitHub Enterprise instance.
    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| VersionTaggerError::config("token contains invalid header characters"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("version-tagger"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(GithubHost {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, owner: &str, repo: &str, rest: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.base_url, owner, repo, rest)
    }

    /// Map a non-success response to a transport error carrying the status
    /// and a body snippet.
    fn fail(context: &str, response: Response) -> VersionTaggerError {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        VersionTaggerError::transport(format!("{}: {} {}", context, status, snippet))
    }
}

/// Decode GitHub's base64 file content, which is wrapped across lines.
fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| VersionTaggerError::transport(format!("invalid base64 content: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| VersionTaggerError::transport(format!("file content is not UTF-8: {}", e)))
}

impl VersionHost for GithubHost {
    fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<TagEntry>> {
        let url = self.repo_url(owner, repo, "tags");
        let mut tags = Vec::new();
        let mut page = 1u32;

        loop {
            let response = self
                .client
                .get(&url)
                .query(&[("per_page", TAGS_PER_PAGE), ("page", page)])
                .send()?;

            if !response.status().is_success() {
                return Err(Self::fail("failed to list tags", response));
            }

            let batch: Vec<TagResponse> = response.json()?;
            if batch.is_empty() {
                break;
            }

            debug!("fetched tags page {} ({} entries)", page, batch.len());
            tags.extend(batch.into_iter().map(|t| TagEntry { name: t.name }));
            page += 1;
        }

        Ok(tags)
    }

    fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<RemoteFile>> {
        let url = self.repo_url(owner, repo, &format!("contents/{}", path));
        let response = self.client.get(&url).query(&[("ref", git_ref)]).send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::fail("failed to fetch file", response));
        }

        let content: ContentResponse = response.json()?;
        Ok(Some(RemoteFile {
            content: decode_content(&content.content)?,
            sha: content.sha,
        }))
    }

    fn put_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        content: &str,
        message: &str,
        previous_sha: Option<&str>,
    ) -> Result<String> {
        let url = self.repo_url(owner, repo, &format!("contents/{}", path));

        let mut body = json!({
            "message": message,
            "content": general_purpose::STANDARD.encode(content),
        });
        if let Some(sha) = previous_sha {
            body["sha"] = json!(sha);
        }

        let response = self.client.put(&url).json(&body).send()?;
        if !response.status().is_success() {
            return Err(Self::fail("failed to update file", response));
        }

        let updated: PutContentResponse = response.json()?;
        Ok(updated.commit.sha)
    }

    fn create_tag_object(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
        target_sha: &str,
        message: &str,
    ) -> Result<String> {
        let url = self.repo_url(owner, repo, "git/tags");
        let body = json!({
            "tag": tag,
            "message": message,
            "object": target_sha,
            "type": "commit",
        });

        let response = self.client.post(&url).json(&body).send()?;
        if !response.status().is_success() {
            return Err(Self::fail("failed to create tag object", response));
        }

        let created: TagObjectResponse = response.json()?;
        Ok(created.sha)
    }

    fn create_tag_ref(&self, owner: &str, repo: &str, tag: &str, object_sha: &str) -> Result<()> {
        let url = self.repo_url(owner, repo, "git/refs");
        let body = json!({
            "ref": format!("refs/tags/{}", tag),
            "sha": object_sha,
        });

        let response = self.client.post(&url).json(&body).send()?;
        if !response.status().is_success() {
            // The tag object from the previous step has no ref now; name it
            // so the operator can find the orphan.
            return Err(Self::fail(
                &format!("failed to create ref for tag '{}'", tag),
                response,
            ));
        }

        Ok(())
    }

    fn pull_request_source_branch(&self, owner: &str, repo: &str, number: u64) -> Result<String> {
        let url = self.repo_url(owner, repo, &format!("pulls/{}", number));
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(Self::fail("failed to fetch pull request", response));
        }

        let pull: PullResponse = response.json()?;
        Ok(pull.head.git_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_content_plain() {
        assert_eq!(decode_content("MS4y").unwrap(), "1.2");
    }

    #[test]
    fn test_decode_content_with_line_wrapping() {
        // GitHub inserts newlines into long base64 payloads
        assert_eq!(decode_content("MS\n4y\n").unwrap(), "1.2");
    }

    #[test]
    fn test_decode_content_invalid() {
        assert!(decode_content("!!not-base64!!").is_err());
    }

    #[test]
    fn test_repo_url_trims_trailing_slash() {
        let host = GithubHost::new("https://api.github.com/", "token").unwrap();
        assert_eq!(
            host.repo_url("octo", "demo", "tags"),
            "https://api.github.com/repos/octo/demo/tags"
        );
    }
}
