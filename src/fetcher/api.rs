//! [`StateFetcher`] implementation over the public presence and users APIs.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{EntityId, FetchError, PresenceSnapshot, PresenceStatus, ProfileSnapshot, StateFetcher};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Label of the presence API in errors and logs.
pub const PRESENCE_API: &str = "presence API";

/// Label of the profile API in errors and logs.
pub const PROFILE_API: &str = "profile API";

/// Longest body excerpt kept in a [`FetchError::Status`].
const BODY_EXCERPT_CHARS: usize = 200;

/// Base URLs of the two upstream APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// Batch presence endpoint, called with `POST {"userIds": [id]}`.
    pub presence: Url,
    /// Users endpoint; the account id is appended as a path segment.
    pub profile: Url,
}

impl ApiEndpoints {
    /// Creates the endpoint set.
    #[must_use]
    pub const fn new(presence: Url, profile: Url) -> Self {
        Self { presence, profile }
    }

    /// Returns the profile URL for `id`, tolerating a trailing slash on the base.
    fn profile_url(&self, id: EntityId) -> Result<Url, HttpError> {
        let mut url = self.profile.clone();
        url.path_segments_mut()
            .map_err(|()| HttpError::InvalidUrl(self.profile.to_string()))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresenceQuery {
    user_ids: [EntityId; 1],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresenceResponse {
    #[serde(default)]
    user_presences: Option<Vec<PresenceRecord>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresenceRecord {
    user_presence_type: Option<i64>,
    place_id: Option<u64>,
    last_location: Option<String>,
    user_id: Option<EntityId>,
}

impl From<PresenceRecord> for PresenceSnapshot {
    fn from(record: PresenceRecord) -> Self {
        Self {
            status: PresenceStatus::from_code(record.user_presence_type),
            place_id: record.place_id,
            last_location: record.last_location,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    name: Option<String>,
    display_name: Option<String>,
    description: Option<String>,
}

impl From<ProfileResponse> for ProfileSnapshot {
    fn from(body: ProfileResponse) -> Self {
        Self {
            account_name: body.name.unwrap_or_default(),
            display_name: body.display_name.unwrap_or_default(),
            about_text: body.description.unwrap_or_default(),
        }
    }
}

/// Fetches presence and profile over HTTP.
///
/// Timeouts are a property of the [`HttpClient`]; build the client with
/// [`ReqwestClient::with_timeout`](crate::transport::ReqwestClient::with_timeout).
#[derive(Debug)]
pub struct HttpStateFetcher<H> {
    client: H,
    endpoints: ApiEndpoints,
}

impl<H> HttpStateFetcher<H> {
    /// Creates a fetcher calling `endpoints` through `client`.
    #[must_use]
    pub const fn new(client: H, endpoints: ApiEndpoints) -> Self {
        Self { client, endpoints }
    }
}

impl<H: HttpClient> HttpStateFetcher<H> {
    /// Sends `request` and turns transport failures and non-2xx statuses into errors.
    async fn send(
        &self,
        endpoint: &'static str,
        request: HttpRequest,
    ) -> Result<HttpResponse, FetchError> {
        let request = request.with_header(
            http::header::ACCEPT,
            http::HeaderValue::from_static("application/json"),
        );

        let response = self
            .client
            .request(request)
            .await
            .map_err(|source| FetchError::Http { endpoint, source })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: response.status,
                body: response.body_excerpt(BODY_EXCERPT_CHARS),
            });
        }

        Ok(response)
    }
}

impl<H: HttpClient> StateFetcher for HttpStateFetcher<H> {
    async fn fetch_presence(&self, id: EntityId) -> Result<PresenceSnapshot, FetchError> {
        let request = HttpRequest::post(self.endpoints.presence.clone())
            .with_json(&PresenceQuery { user_ids: [id] })
            .map_err(|source| FetchError::Encode {
                endpoint: PRESENCE_API,
                source,
            })?;

        let response = self.send(PRESENCE_API, request).await?;
        let body: PresenceResponse = response.json().map_err(|source| FetchError::Decode {
            endpoint: PRESENCE_API,
            source,
        })?;

        // A record carrying another account's id never stands in for ours.
        let mut records = body.user_presences.unwrap_or_default();
        let index = records
            .iter()
            .position(|record| record.user_id == Some(id))
            .or_else(|| {
                records
                    .first()
                    .filter(|record| record.user_id.is_none())
                    .map(|_| 0)
            });

        Ok(index.map_or_else(PresenceSnapshot::unknown, |i| {
            records.swap_remove(i).into()
        }))
    }

    async fn fetch_profile(&self, id: EntityId) -> Result<ProfileSnapshot, FetchError> {
        let url = self
            .endpoints
            .profile_url(id)
            .map_err(|source| FetchError::Http {
                endpoint: PROFILE_API,
                source,
            })?;

        let response = self.send(PROFILE_API, HttpRequest::get(url)).await?;
        let body: ProfileResponse = response.json().map_err(|source| FetchError::Decode {
            endpoint: PROFILE_API,
            source,
        })?;

        Ok(body.into())
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
