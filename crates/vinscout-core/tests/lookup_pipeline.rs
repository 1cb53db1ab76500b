//! End-to-end lookup pipeline tests over the in-memory transport.

use std::time::Duration;

use vinscout_core::fakes::StaticTransport;
use vinscout_core::nhtsa::{self, DecodeResponse};
use vinscout_core::{LookupConfig, LookupError, TransportError, VehicleService};

const TESLA_FIXTURE: &str = include_str!("fixtures/tesla_model3.json");
const ERROR_11_FIXTURE: &str = include_str!("fixtures/error_code_11.json");
const EMPTY_FIXTURE: &str = include_str!("fixtures/empty_results.json");

/// Tesla Model 3 VIN with a correct check digit.
const TESLA_VIN: &str = "5YJ3E1EA7NF306255";
const HONDA_VIN: &str = "1HGCM82633A004352";

// ===========================================================================
// Success path
// ===========================================================================

#[tokio::test]
async fn tesla_fixture_decodes_to_vehicle() {
    let service = VehicleService::new(StaticTransport::json(TESLA_FIXTURE));
    let vehicle = service.lookup(TESLA_VIN).await.unwrap();

    assert_eq!(vehicle.vin, TESLA_VIN);
    assert_eq!(vehicle.make.as_deref(), Some("TESLA"));
    assert_eq!(vehicle.model.as_deref(), Some("Model 3"));
    assert_eq!(vehicle.year.as_deref(), Some("2022"));
    assert_eq!(vehicle.trim.as_deref(), Some("Standard Range Plus"));
    assert_eq!(vehicle.body_class.as_deref(), Some("Sedan/Saloon"));
    assert_eq!(vehicle.drive_type.as_deref(), Some("Rear-Wheel Drive"));
    assert_eq!(vehicle.fuel_type.as_deref(), Some("Electric"));
    assert_eq!(vehicle.doors.as_deref(), Some("4"));
    assert_eq!(vehicle.engine_cylinders, None);
    assert_eq!(vehicle.engine_displacement_l, None);
    assert_eq!(vehicle.series, None);
    assert!(!vehicle.is_turbocharged);
}

#[tokio::test]
async fn request_carries_url_header_and_timeout() {
    let service = VehicleService::new(StaticTransport::json(TESLA_FIXTURE));
    service.lookup(TESLA_VIN).await.unwrap();

    let request = service.transport().last_request().unwrap();
    assert!(request.url.ends_with("/5YJ3E1EA7NF306255?format=json"));
    assert_eq!(request.header("Accept"), Some("application/json"));
    assert_eq!(request.timeout, Duration::from_secs(15));
    assert_eq!(service.transport().calls(), 1);
}

#[tokio::test]
async fn configured_endpoint_and_timeout_are_used() {
    let config = LookupConfig::default()
        .with_base_url("http://127.0.0.1:9000/decode/")
        .with_timeout(Duration::from_secs(2));
    let service = VehicleService::with_config(StaticTransport::json(TESLA_FIXTURE), config);
    service.lookup(TESLA_VIN).await.unwrap();

    let request = service.transport().last_request().unwrap();
    assert_eq!(
        request.url,
        "http://127.0.0.1:9000/decode/5YJ3E1EA7NF306255?format=json"
    );
    assert_eq!(request.timeout, Duration::from_secs(2));
}

#[tokio::test]
async fn every_call_crosses_the_network() {
    let service = VehicleService::new(StaticTransport::json(TESLA_FIXTURE));
    service.lookup(TESLA_VIN).await.unwrap();
    service.lookup(TESLA_VIN).await.unwrap();

    assert_eq!(service.transport().calls(), 2);
}

#[test]
fn tesla_fixture_maps_directly() {
    let response: DecodeResponse = serde_json::from_str(TESLA_FIXTURE).unwrap();
    assert_eq!(
        response.search_criteria.as_deref(),
        Some("VIN:5YJ3E1EA4NF306255")
    );
    assert_eq!(response.results.len(), 1);

    let record = &response.results[0];
    assert!(!record.has_error());

    let vehicle = nhtsa::to_vehicle("5yj3e1ea4nf306255", record);
    assert_eq!(vehicle.vin, "5YJ3E1EA4NF306255");
    assert_eq!(vehicle.make.as_deref(), Some("TESLA"));
    assert_eq!(vehicle.engine_cylinders, None);
}

// ===========================================================================
// Local validation never reaches the network
// ===========================================================================

#[tokio::test]
async fn invalid_vins_make_no_transport_calls() {
    let service = VehicleService::new(StaticTransport::json(TESLA_FIXTURE));

    let cases = [
        ("SHORT", LookupError::InvalidLength),
        ("1hgcm82633a004352", LookupError::InvalidCharacters),
        ("1HGCM8263OA004352", LookupError::InvalidCharacters),
        ("1HGCM82643A004352", LookupError::InvalidCheckDigit),
    ];
    for (vin, expected) in cases {
        assert_eq!(service.lookup(vin).await.unwrap_err(), expected, "{vin}");
    }

    assert_eq!(service.transport().calls(), 0);
}

#[tokio::test]
async fn documented_tesla_vin_fails_check_digit_locally() {
    // Position 9 is '4' but the weighted sum gives '7'.
    let service = VehicleService::new(StaticTransport::json(TESLA_FIXTURE));
    let err = service.lookup("5YJ3E1EA4NF306255").await.unwrap_err();

    assert_eq!(err, LookupError::InvalidCheckDigit);
    assert_eq!(service.transport().calls(), 0);
}

// ===========================================================================
// Failure classification
// ===========================================================================

#[tokio::test]
async fn error_code_11_is_api_error() {
    let service = VehicleService::new(StaticTransport::json(ERROR_11_FIXTURE));
    match service.lookup(HONDA_VIN).await {
        Err(LookupError::ApiError(text)) => {
            assert!(text.contains("Incorrect Model Year"), "{text}");
            assert!(text.starts_with("11 - "));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_timeout_is_timeout() {
    let service = VehicleService::new(StaticTransport::fail(TransportError::Timeout));
    assert_eq!(
        service.lookup(HONDA_VIN).await.unwrap_err(),
        LookupError::Timeout
    );
}

#[tokio::test]
async fn other_transport_failure_is_network_issue() {
    let service = VehicleService::new(StaticTransport::fail(TransportError::Other(
        "dns error: no such host".to_string(),
    )));
    assert_eq!(
        service.lookup(HONDA_VIN).await.unwrap_err(),
        LookupError::NetworkIssue("dns error: no such host".to_string())
    );
}

#[tokio::test]
async fn non_2xx_status_is_network_issue_with_code() {
    let service = VehicleService::new(StaticTransport::respond(503, TESLA_FIXTURE));
    match service.lookup(HONDA_VIN).await {
        Err(LookupError::NetworkIssue(detail)) => assert!(detail.contains("503"), "{detail}"),
        other => panic!("expected NetworkIssue, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_decoding_error() {
    let service = VehicleService::new(StaticTransport::respond(200, "<html>oops</html>"));
    assert!(matches!(
        service.lookup(HONDA_VIN).await,
        Err(LookupError::DecodingError(_))
    ));
}

#[tokio::test]
async fn empty_results_is_decoding_error() {
    let service = VehicleService::new(StaticTransport::json(EMPTY_FIXTURE));
    assert_eq!(
        service.lookup(HONDA_VIN).await.unwrap_err(),
        LookupError::DecodingError("empty results".to_string())
    );
}
