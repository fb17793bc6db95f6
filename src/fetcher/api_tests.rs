//! Tests for `HttpStateFetcher`.

use super::*;
use std::sync::Mutex;

/// Mock HTTP client returning queued responses and recording requests.
#[derive(Debug)]
struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn json(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(HttpResponse::new(
            http::StatusCode::from_u16(status).unwrap(),
            http::HeaderMap::new(),
            body.as_bytes().to_vec(),
        ))])
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

fn endpoints() -> ApiEndpoints {
    ApiEndpoints::new(
        Url::parse("https://presence.example.com/v1/presence/users").unwrap(),
        Url::parse("https://users.example.com/v1/users").unwrap(),
    )
}

fn fetcher(client: MockClient) -> HttpStateFetcher<MockClient> {
    HttpStateFetcher::new(client, endpoints())
}

mod presence {
    use super::*;

    #[tokio::test]
    async fn posts_batch_query_for_id() {
        let fetcher = fetcher(MockClient::json(200, r#"{"userPresences":[]}"#));

        fetcher.fetch_presence(42).await.unwrap();

        let requests = fetcher.client.captured_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, http::Method::POST);
        assert_eq!(
            requests[0].url.as_str(),
            "https://presence.example.com/v1/presence/users"
        );
        assert_eq!(
            requests[0].body.as_deref(),
            Some(br#"{"userIds":[42]}"#.as_slice())
        );
        assert_eq!(
            requests[0].headers.get(http::header::ACCEPT).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn maps_record_fields() {
        let body = r#"{"userPresences":[{"userPresenceType":2,"placeId":1818,"lastLocation":"Classic Crossroads","userId":42}]}"#;
        let fetcher = fetcher(MockClient::json(200, body));

        let snapshot = fetcher.fetch_presence(42).await.unwrap();

        assert_eq!(
            snapshot,
            PresenceSnapshot::new(PresenceStatus::InGame)
                .with_place(1818)
                .with_location("Classic Crossroads")
        );
    }

    #[tokio::test]
    async fn missing_record_maps_to_unknown() {
        let fetcher = fetcher(MockClient::json(200, r#"{"userPresences":[]}"#));

        let snapshot = fetcher.fetch_presence(42).await.unwrap();

        assert_eq!(snapshot, PresenceSnapshot::unknown());
    }

    #[tokio::test]
    async fn missing_presence_list_maps_to_unknown() {
        let fetcher = fetcher(MockClient::json(200, "{}"));

        let snapshot = fetcher.fetch_presence(42).await.unwrap();

        assert_eq!(snapshot, PresenceSnapshot::unknown());
    }

    #[tokio::test]
    async fn missing_or_unmapped_code_is_unknown() {
        let body = r#"{"userPresences":[{"placeId":null,"lastLocation":"Website"}]}"#;
        let fetcher = fetcher(MockClient::json(200, body));

        let snapshot = fetcher.fetch_presence(42).await.unwrap();

        assert_eq!(snapshot.status, PresenceStatus::Unknown);
        assert_eq!(snapshot.place_id, None);
        assert_eq!(snapshot.last_location.as_deref(), Some("Website"));
    }

    #[tokio::test]
    async fn prefers_record_matching_id() {
        let body = r#"{"userPresences":[
            {"userPresenceType":0,"userId":7},
            {"userPresenceType":1,"userId":42}
        ]}"#;
        let fetcher = fetcher(MockClient::json(200, body));

        let snapshot = fetcher.fetch_presence(42).await.unwrap();

        assert_eq!(snapshot.status, PresenceStatus::Online);
    }

    #[tokio::test]
    async fn record_for_another_account_is_unknown() {
        let body = r#"{"userPresences":[{"userId":7,"userPresenceType":2,"placeId":5}]}"#;
        let fetcher = fetcher(MockClient::json(200, body));

        let snapshot = fetcher.fetch_presence(42).await.unwrap();

        assert_eq!(snapshot, PresenceSnapshot::unknown());
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let fetcher = fetcher(MockClient::json(429, "Too many requests"));

        let error = fetcher.fetch_presence(42).await.unwrap_err();

        assert!(error.is_transport());
        assert!(matches!(
            error,
            FetchError::Status {
                endpoint: PRESENCE_API,
                status: http::StatusCode::TOO_MANY_REQUESTS,
                body: Some(ref text),
            } if text == "Too many requests"
        ));
    }

    #[tokio::test]
    async fn network_failure_is_transport_error() {
        let fetcher = fetcher(MockClient::new(vec![Err(HttpError::Timeout)]));

        let error = fetcher.fetch_presence(42).await.unwrap_err();

        assert!(matches!(
            error,
            FetchError::Http {
                endpoint: PRESENCE_API,
                source: HttpError::Timeout,
            }
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let fetcher = fetcher(MockClient::json(200, "<html>maintenance</html>"));

        let error = fetcher.fetch_presence(42).await.unwrap_err();

        assert!(!error.is_transport());
        assert!(matches!(error, FetchError::Decode { .. }));
    }
}

mod profile {
    use super::*;

    #[tokio::test]
    async fn gets_profile_by_id() {
        let fetcher = fetcher(MockClient::json(
            200,
            r#"{"name":"builder","displayName":"Bob","description":"hi"}"#,
        ));

        fetcher.fetch_profile(42).await.unwrap();

        let requests = fetcher.client.captured_requests();
        assert_eq!(requests[0].method, http::Method::GET);
        assert_eq!(
            requests[0].url.as_str(),
            "https://users.example.com/v1/users/42"
        );
    }

    #[tokio::test]
    async fn trailing_slash_on_base_is_tolerated() {
        let endpoints = ApiEndpoints::new(
            Url::parse("https://presence.example.com/").unwrap(),
            Url::parse("https://users.example.com/v1/users/").unwrap(),
        );
        let fetcher = HttpStateFetcher::new(MockClient::json(200, "{}"), endpoints);

        fetcher.fetch_profile(42).await.unwrap();

        assert_eq!(
            fetcher.client.captured_requests()[0].url.as_str(),
            "https://users.example.com/v1/users/42"
        );
    }

    #[tokio::test]
    async fn maps_profile_fields() {
        let fetcher = fetcher(MockClient::json(
            200,
            r#"{"name":"builder","displayName":"Bob","description":"I build things"}"#,
        ));

        let profile = fetcher.fetch_profile(42).await.unwrap();

        assert_eq!(profile, ProfileSnapshot::new("builder", "Bob", "I build things"));
    }

    #[tokio::test]
    async fn null_description_becomes_empty_text() {
        let fetcher = fetcher(MockClient::json(
            200,
            r#"{"name":"builder","displayName":"Bob","description":null}"#,
        ));

        let profile = fetcher.fetch_profile(42).await.unwrap();

        assert_eq!(profile.about_text, "");
    }

    #[tokio::test]
    async fn absent_description_becomes_empty_text() {
        let fetcher = fetcher(MockClient::json(
            200,
            r#"{"name":"builder","displayName":"Bob"}"#,
        ));

        let profile = fetcher.fetch_profile(42).await.unwrap();

        assert_eq!(profile.about_text, "");
    }

    #[tokio::test]
    async fn not_found_is_transport_error() {
        let fetcher = fetcher(MockClient::json(404, r#"{"errors":[]}"#));

        let error = fetcher.fetch_profile(42).await.unwrap_err();

        assert!(error.is_transport());
        assert!(error.to_string().contains(PROFILE_API));
    }
}
