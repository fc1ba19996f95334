//! Unit tests for aggregation and fallback

#[cfg(test)]
mod tests {
    use super::super::aggregator::WeatherService;
    use super::super::fallback::{self, MOCK_LOCATION};
    use crate::client::MockTransport;
    use crate::config::Config;
    use crate::ingester::{DateWindow, HISTORY_LEN};
    use crate::types::{CombinedWeather, ConditionCategory, Coordinates};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::{json, Map, Value};
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
    }

    fn coords() -> Coordinates {
        Coordinates::new(25.3387, 49.6005)
    }

    fn power_body(temperature: f64) -> Value {
        let window = DateWindow::trailing(today());
        let series = |value: f64| {
            let mut map = Map::new();
            for offset in 0..=7 {
                let day = window.start + chrono::Duration::days(offset);
                map.insert(day.format("%Y%m%d").to_string(), json!(value));
            }
            Value::Object(map)
        };
        json!({
            "geometry": { "coordinates": [49.6005, 25.3387, 12.5] },
            "properties": { "parameter": {
                "T2M": series(temperature),
                "WS10M": series(5.0),
                "RH2M": series(40.0),
            }}
        })
    }

    fn donki_cme() -> Value {
        json!([{"startTime": "2024-01-06T04:00Z"}])
    }

    fn donki_gst() -> Value {
        json!([{"allKpIndex": [{"observedTime": "2024-01-07T03:00Z", "kpIndex": 4}]}])
    }

    fn healthy() -> MockTransport {
        MockTransport::new()
            .with_json("/point", power_body(28.0))
            .with_json("/CME", donki_cme())
            .with_json("/GST", donki_gst())
    }

    fn service(transport: MockTransport) -> WeatherService {
        WeatherService::new(Arc::new(transport), &Config::default())
    }

    fn assert_dashboard_shape(weather: &CombinedWeather) {
        let labels = DateWindow::trailing(today()).chart_labels();
        let earth = &weather.earth;
        let space = &weather.space;

        for history in [
            &earth.historical_temp,
            &earth.historical_wind,
            &earth.historical_humidity,
            &space.historical_solar_wind,
            &space.historical_kp_index,
            &space.historical_cme_count,
        ] {
            assert_eq!(history.len(), HISTORY_LEN);
            assert!(history.iter().map(|p| &p.time).eq(labels.iter()));
            assert!(history.iter().filter_map(|p| p.value).all(f64::is_finite));
        }
        assert_eq!(earth.forecast.len(), 7);
        assert_eq!(space.forecast.len(), 7);
        assert!(space.forecast.iter().all(|d| d.kp_index >= 0.0));
    }

    fn expected_fallback(seed: u64) -> CombinedWeather {
        fallback::generate(today(), &mut StdRng::seed_from_u64(seed))
    }

    #[tokio::test]
    async fn test_live_result_when_both_feeds_succeed() {
        let svc = service(healthy());
        let weather = svc
            .fetch_weather(coords(), today(), &mut StdRng::seed_from_u64(1))
            .await;

        assert_dashboard_shape(&weather);
        assert_eq!(weather.earth.location, "49.6005, 25.3387, 12.5");
        assert_eq!(weather.earth.temperature, 28.0);
        assert_eq!(weather.earth.condition, ConditionCategory::Warm);
        assert_eq!(weather.space.kp_index, 4.0);
    }

    #[tokio::test]
    async fn test_earth_failure_discards_live_space() {
        let transport = MockTransport::new()
            .with_status("/point", 500)
            .with_json("/CME", donki_cme())
            .with_json("/GST", donki_gst());
        let weather = service(transport)
            .fetch_weather(coords(), today(), &mut StdRng::seed_from_u64(5))
            .await;

        assert_dashboard_shape(&weather);
        assert_eq!(weather.earth.location, MOCK_LOCATION);
        assert_eq!(weather.space.kp_index, 3.0);
        assert_eq!(weather, expected_fallback(5));
    }

    #[tokio::test]
    async fn test_space_failure_discards_live_earth() {
        let transport = MockTransport::new()
            .with_json("/point", power_body(28.0))
            .with_json("/CME", donki_cme())
            .with_status("/GST", 429);
        let weather = service(transport)
            .fetch_weather(coords(), today(), &mut StdRng::seed_from_u64(6))
            .await;

        assert_eq!(weather, expected_fallback(6));
    }

    #[tokio::test]
    async fn test_unavailable_data_falls_back() {
        let mut body = power_body(20.0);
        for value in body["properties"]["parameter"]["WS10M"]
            .as_object_mut()
            .unwrap()
            .values_mut()
        {
            *value = json!(-999);
        }
        let transport = MockTransport::new()
            .with_json("/point", body)
            .with_json("/CME", donki_cme())
            .with_json("/GST", donki_gst());
        let weather = service(transport)
            .fetch_weather(coords(), today(), &mut StdRng::seed_from_u64(8))
            .await;

        assert_eq!(weather, expected_fallback(8));
    }

    #[tokio::test]
    async fn test_schema_mismatch_falls_back() {
        let transport = MockTransport::new()
            .with_json("/point", power_body(20.0))
            .with_json("/CME", json!({"error": "OVER_RATE_LIMIT"}))
            .with_json("/GST", donki_gst());
        let weather = service(transport)
            .fetch_weather(coords(), today(), &mut StdRng::seed_from_u64(9))
            .await;

        assert_eq!(weather.earth.location, MOCK_LOCATION);
    }

    #[tokio::test]
    async fn test_total_outage_still_resolves() {
        let svc = service(MockTransport::new().with_failures());
        for (lat, lon) in [(0.0, 0.0), (-90.0, 180.0), (90.0, -180.0), (51.48, -0.0015)] {
            let weather = svc
                .fetch_weather(Coordinates::new(lat, lon), today(), &mut StdRng::seed_from_u64(3))
                .await;
            assert_dashboard_shape(&weather);
        }
    }

    #[tokio::test]
    async fn test_fetch_live_surfaces_error() {
        let transport = MockTransport::new()
            .with_json("/point", power_body(20.0))
            .with_status("/CME", 500)
            .with_json("/GST", donki_gst());
        let err = service(transport)
            .fetch_live(coords(), today(), &mut StdRng::seed_from_u64(1))
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_all_feeds_are_queried_even_when_one_fails() {
        let transport = Arc::new(
            MockTransport::new()
                .with_status("/point", 500)
                .with_json("/CME", donki_cme())
                .with_json("/GST", donki_gst()),
        );
        let svc = WeatherService::new(transport.clone(), &Config::default());
        svc.fetch_weather(coords(), today(), &mut StdRng::seed_from_u64(1))
            .await;
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_weather_now_resolves() {
        let weather = service(MockTransport::new().with_failures())
            .fetch_weather_now(coords())
            .await;
        assert_eq!(weather.earth.forecast.len(), 7);
        assert_eq!(weather.space.historical_kp_index.len(), HISTORY_LEN);
    }

    #[test]
    fn test_fetch_weather_blocking() {
        let svc = service(healthy());
        let weather = tokio_test::block_on(svc.fetch_weather(
            coords(),
            today(),
            &mut StdRng::seed_from_u64(2),
        ));
        assert_ne!(weather.earth.location, MOCK_LOCATION);
    }

    // --- fallback ---

    #[test]
    fn test_fallback_baselines() {
        let weather = expected_fallback(42);
        assert_dashboard_shape(&weather);

        assert_eq!(weather.earth.location, MOCK_LOCATION);
        assert_eq!(weather.earth.temperature, 23.0);
        assert_eq!(weather.earth.wind_speed, 15.0);
        assert_eq!(weather.earth.humidity, 60.0);
        assert_eq!(weather.space.solar_wind_speed, 450.0);
        assert_eq!(weather.space.kp_index, 3.0);
        assert_eq!(weather.space.cme_count, 2);
    }

    #[test]
    fn test_fallback_value_ranges() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..100 {
            let weather = fallback::generate(today(), &mut rng);
            for day in &weather.earth.forecast {
                assert!((18.0..=23.0).contains(&day.temperature));
                assert_eq!(day.condition, ConditionCategory::Mild);
            }
            for day in &weather.space.forecast {
                assert!((400.0..=500.0).contains(&day.solar_wind_speed));
                assert!((0.0..=4.0).contains(&day.kp_index));
            }
            for point in &weather.space.historical_kp_index {
                let kp = point.value.unwrap();
                assert!((0.0..=3.0).contains(&kp) && kp == kp.floor());
            }
            for point in &weather.space.historical_cme_count {
                assert!((0.0..=2.0).contains(&point.value.unwrap()));
            }
            for point in &weather.earth.historical_humidity {
                assert!((55.0..65.0).contains(&point.value.unwrap()));
            }
        }
    }

    #[test]
    fn test_fallback_forecast_labels() {
        let weather = expected_fallback(0);
        let days: Vec<_> = weather.space.forecast.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        assert!(weather
            .earth
            .forecast
            .iter()
            .zip(&weather.space.forecast)
            .all(|(e, s)| e.day == s.day));
    }
}
