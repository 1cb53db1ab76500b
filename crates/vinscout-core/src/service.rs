//! The lookup pipeline: validate → fetch → decode → map.
//!
//! `VehicleService` is stateless per call. Every lookup that passes local
//! validation crosses the network exactly once; nothing is cached or retried.
//! Concurrent lookups are independent and may complete in any order.

use std::time::Instant;

use tracing::{debug, Instrument};

use crate::config::LookupConfig;
use crate::error::{LookupError, Result, TransportError};
use crate::metrics::METRICS;
use crate::nhtsa::{self, DecodeResponse};
use crate::obs::{emit_lookup_finished, emit_lookup_started, lookup_span};
use crate::transport::{HttpRequest, HttpTransport};
use crate::validator;
use crate::vehicle::Vehicle;

/// Decodes VINs through an injected [`HttpTransport`].
pub struct VehicleService<T> {
    transport: T,
    config: LookupConfig,
}

impl<T> VehicleService<T>
where
    T: HttpTransport,
{
    /// Service with the default NHTSA endpoint and 15 second timeout.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, LookupConfig::default())
    }

    pub fn with_config(transport: T, config: LookupConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The GET request sent for an already-validated VIN.
    pub fn build_request(&self, vin: &str) -> HttpRequest {
        HttpRequest {
            url: self.config.decode_url(vin),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            timeout: self.config.timeout,
        }
    }

    /// Look up a vehicle by VIN.
    ///
    /// # Errors
    ///
    /// - validation variants: the VIN failed local checks; no request sent.
    /// - `LookupError::Timeout`: the transport timed out.
    /// - `LookupError::NetworkIssue`: other transport failure or non-2xx.
    /// - `LookupError::DecodingError`: unexpected body or empty `Results`.
    /// - `LookupError::ApiError`: the API flagged the VIN.
    pub async fn lookup(&self, vin: &str) -> Result<Vehicle> {
        METRICS.inc_lookups_started();

        if let Err(err) = validator::validate(vin) {
            METRICS.inc_validation_rejections();
            debug!(vin = %vin, error = %err, "rejected before network");
            return Err(err.into());
        }

        let started = Instant::now();
        let result = self.fetch(vin).instrument(lookup_span(vin)).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => {
                METRICS.inc_lookups_succeeded();
                emit_lookup_finished(vin, duration_ms, "ok");
            }
            Err(err) => {
                METRICS.inc_lookups_failed();
                emit_lookup_finished(vin, duration_ms, err.kind());
            }
        }

        result
    }

    async fn fetch(&self, vin: &str) -> Result<Vehicle> {
        emit_lookup_started(vin);

        let request = self.build_request(vin);
        let response = self.transport.send(request).await.map_err(|e| match e {
            TransportError::Timeout => LookupError::Timeout,
            TransportError::Other(detail) => LookupError::NetworkIssue(detail),
        })?;

        if !response.is_success() {
            return Err(LookupError::NetworkIssue(format!(
                "Unexpected HTTP status code: {}",
                response.status
            )));
        }

        let decoded: DecodeResponse = serde_json::from_slice(&response.body)
            .map_err(|e| LookupError::DecodingError(e.to_string()))?;
        debug!(search_criteria = ?decoded.search_criteria, results = decoded.results.len(), "decoded response");

        let record = decoded
            .results
            .first()
            .ok_or_else(|| LookupError::DecodingError("empty results".to_string()))?;

        if nhtsa::has_error(record) {
            let text = nhtsa::primary_error_text(record).unwrap_or_else(|| {
                format!(
                    "Unknown API error (ErrorCode: {})",
                    record.error_code.as_deref().unwrap_or("?")
                )
            });
            return Err(LookupError::ApiError(text));
        }

        Ok(nhtsa::to_vehicle(vin, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::StaticTransport;
    use std::time::Duration;

    #[test]
    fn test_build_request_shape() {
        let service = VehicleService::new(StaticTransport::json("{}"));
        let request = service.build_request("1HGCM82633A004352");
        assert_eq!(
            request.url,
            "https://vpic.nhtsa.dot.gov/api/vehicles/DecodeVinValues/1HGCM82633A004352?format=json"
        );
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.timeout, Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_api_error_without_text_embeds_code() {
        let body = r#"{"Results":[{"ErrorCode":"7","ErrorText":""}]}"#;
        let service = VehicleService::new(StaticTransport::json(body));
        let err = service.lookup("1HGCM82633A004352").await.unwrap_err();
        assert_eq!(
            err,
            LookupError::ApiError("Unknown API error (ErrorCode: 7)".to_string())
        );
    }

    #[tokio::test]
    async fn test_correction_code_six_is_success() {
        let body = r#"{"Results":[{"ErrorCode":"6","Make":"HONDA"}]}"#;
        let service = VehicleService::new(StaticTransport::json(body));
        let vehicle = service.lookup("1HGCM82633A004352").await.unwrap();
        assert_eq!(vehicle.make.as_deref(), Some("HONDA"));
    }

    #[tokio::test]
    async fn test_missing_results_is_decoding_error() {
        let service = VehicleService::new(StaticTransport::json(r#"{"Count":0}"#));
        let err = service.lookup("1HGCM82633A004352").await.unwrap_err();
        assert!(matches!(err, LookupError::DecodingError(_)));
    }
}
