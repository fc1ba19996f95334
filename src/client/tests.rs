//! Tests for client module

#[cfg(test)]
mod tests {
    use crate::client::{FeedTransport, MockFeedTransport, MockTransport, Query};
    use crate::error::FeedError;
    use serde_json::json;

    fn query(pairs: &[(&str, &str)]) -> Query {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_mock_routes_by_suffix() {
        let mock = MockTransport::new()
            .with_json("/CME", json!([{"startTime": "2024-01-01T10:00Z"}]))
            .with_json("/GST", json!([]));

        let cme = mock
            .get_json("https://api.nasa.gov/DONKI/CME", &Query::new())
            .await
            .unwrap();
        let gst = mock
            .get_json("https://api.nasa.gov/DONKI/GST", &Query::new())
            .await
            .unwrap();

        assert_eq!(cme.as_array().map(|a| a.len()), Some(1));
        assert_eq!(gst, json!([]));
    }

    #[tokio::test]
    async fn test_mock_unknown_route_is_upstream_error() {
        let mock = MockTransport::new();
        let err = mock
            .get_json("https://example.invalid/nothing", &Query::new())
            .await
            .unwrap_err();
        assert!(err.is_upstream());
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_mock_non_json_body() {
        let mock = MockTransport::new().with_raw_body("/point", "<html>maintenance</html>");
        let err = mock.get_json("https://power/point", &Query::new()).await.unwrap_err();
        assert!(matches!(err, FeedError::Upstream(_)));
        assert!(err.to_string().contains("non-JSON"));
    }

    #[tokio::test]
    async fn test_mock_status_and_failures() {
        let mock = MockTransport::new().with_status("/GST", 503);
        let err = mock.get_json("https://x/GST", &Query::new()).await.unwrap_err();
        assert!(err.to_string().contains("503"));

        let failing = MockTransport::new()
            .with_json("/CME", json!([]))
            .with_failures();
        assert!(failing.get_json("https://x/CME", &Query::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockTransport::new().with_json("/CME", json!([]));
        let q = query(&[("startDate", "2024-01-01"), ("api_key", "DEMO_KEY")]);
        mock.get_json("https://x/CME", &q).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://x/CME");
        assert_eq!(requests[0].param("api_key"), Some("DEMO_KEY"));
        assert_eq!(requests[0].param("missing"), None);
    }

    #[test]
    fn test_mock_latency_blocking() {
        let mock = MockTransport::new()
            .with_json("/point", json!({"ok": true}))
            .with_latency(5);
        let body = tokio_test::block_on(async {
            tokio::time::timeout(
                std::time::Duration::from_secs(5),
                mock.get_json("https://power/point", &Query::new()),
            )
            .await
        });
        assert_eq!(body.unwrap().unwrap(), json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_generated_mock_transport() {
        let mut transport = MockFeedTransport::new();
        transport
            .expect_get_json()
            .withf(|url, query| url.ends_with("/GST") && query.is_empty())
            .times(1)
            .returning(|_, _| Ok(json!([])));

        let body = transport.get_json("https://x/GST", &Query::new()).await.unwrap();
        assert_eq!(body, json!([]));
    }
}
