//! Request parsing, execution, and response formatting.
//!
//! The enforcement order:
//! 1. raw text -> parse into `EngineOperation` (reject if invalid)
//! 2. validate parameters (reject if out of bounds)
//! 3. execute against read-only config
//! 4. wrap the structured result with the request id echoed back

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use frete_engine::antt::{compute_floor, VehicleCoefficients};
use frete_engine::icms::{extract_uf, resolve_icms_rate_opt, Uf};
use frete_engine::pricing::{price_forward, price_reverse, PricingResult};
use frete_engine::spot::{evaluate_spot, SpotDecision, SpotInput};
use frete_engine::tax::TaxConfig;
use frete_engine::vehicles::{default_vehicle_configs, VehicleClass};

use crate::error::{BridgeError, BridgeResult};
use crate::ops::EngineOperation;

/// A request to the pricing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeRequest {
    /// The operation to perform.
    pub operation: EngineOperation,

    /// Request ID for tracking.
    pub request_id: String,

    /// Optional context: why the caller is asking.
    pub context: Option<String>,
}

/// A response from the pricing engine.
#[derive(Debug, Clone, Serialize)]
pub struct BridgeResponse {
    /// The operation result.
    pub result: OperationResult,

    /// Request ID (echoed back).
    pub request_id: String,

    /// Was this operation read-only?
    pub read_only: bool,

    /// What ran, in words, for logs and transcripts.
    pub description: String,
}

/// Structured result per operation family.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind")]
pub enum OperationResult {
    Floor {
        floor: f64,
    },
    IcmsRate {
        origin_uf: Option<Uf>,
        destination_uf: Option<Uf>,
        rate_pct: f64,
    },
    Pricing(PricingResult),
    Spot(SpotDecision),
}

/// The bridge holds the config snapshot operations execute against.
/// Executing never mutates it; a caller that edits config builds a new
/// bridge.
pub struct Bridge {
    tax: TaxConfig,
    vehicles: HashMap<VehicleClass, VehicleCoefficients>,
}

impl Bridge {
    pub fn new(tax: TaxConfig, vehicles: HashMap<VehicleClass, VehicleCoefficients>) -> Self {
        Self { tax, vehicles }
    }

    /// Bridge over the seed tables, for tests and one-shot CLI calls.
    pub fn with_defaults() -> Self {
        Self::new(TaxConfig::default(), default_vehicle_configs())
    }

    /// Parse raw text into a validated request.
    ///
    /// First line of defense: text that does not parse into a valid
    /// operation never reaches execution.
    pub fn parse_request(&self, raw_json: &str) -> BridgeResult<BridgeRequest> {
        let request: BridgeRequest = serde_json::from_str(raw_json)
            .map_err(|e| BridgeError::UnknownOperation(format!("Failed to parse request: {}", e)))?;

        self.validate_operation(&request.operation)?;

        Ok(request)
    }

    /// Validate operation parameters.
    fn validate_operation(&self, op: &EngineOperation) -> BridgeResult<()> {
        match op {
            EngineOperation::ComputeFloor { distance_km, .. } => {
                if *distance_km < 0.0 {
                    return Err(BridgeError::InvalidParameter {
                        op: "ComputeFloor".into(),
                        reason: format!("distance_km={} must not be negative", distance_km),
                    });
                }
            }
            EngineOperation::PriceReverse {
                target_sell_price, ..
            } => {
                if *target_sell_price < 0.0 {
                    return Err(BridgeError::InvalidParameter {
                        op: "PriceReverse".into(),
                        reason: format!(
                            "target_sell_price={} must not be negative",
                            target_sell_price
                        ),
                    });
                }
            }
            EngineOperation::EvaluateSpot {
                offered_freight,
                distance_km,
                ..
            } => {
                if *offered_freight < 0.0 || *distance_km < 0.0 {
                    return Err(BridgeError::InvalidParameter {
                        op: "EvaluateSpot".into(),
                        reason: "offered_freight and distance_km must not be negative".into(),
                    });
                }
            }
            // Forward pricing and ICMS resolution accept anything that
            // parses; the engine's own guards cover degenerate values.
            _ => {}
        }
        Ok(())
    }

    /// Process a validated request end to end.
    pub fn process(&self, request: &BridgeRequest) -> BridgeResult<BridgeResponse> {
        let result = self.execute(&request.operation)?;
        Ok(BridgeResponse {
            result,
            request_id: request.request_id.clone(),
            read_only: request.operation.is_read_only(),
            description: request.operation.describe(),
        })
    }

    /// Dispatch one operation against the config snapshot.
    pub fn execute(&self, op: &EngineOperation) -> BridgeResult<OperationResult> {
        match op {
            EngineOperation::ComputeFloor {
                vehicle,
                distance_km,
            } => {
                let coefficients = self.lookup_vehicle(vehicle)?;
                Ok(OperationResult::Floor {
                    floor: compute_floor(coefficients, *distance_km),
                })
            }
            EngineOperation::ResolveIcms {
                origin,
                destination,
            } => {
                let origin_uf = extract_uf(origin);
                let destination_uf = extract_uf(destination);
                let rate_pct =
                    resolve_icms_rate_opt(origin_uf, destination_uf, &self.tax.icms_overrides);
                Ok(OperationResult::IcmsRate {
                    origin_uf,
                    destination_uf,
                    rate_pct,
                })
            }
            EngineOperation::PriceForward { input } => {
                Ok(OperationResult::Pricing(price_forward(input, &self.tax)))
            }
            EngineOperation::PriceReverse {
                target_sell_price,
                costs,
            } => Ok(OperationResult::Pricing(price_reverse(
                *target_sell_price,
                costs,
                &self.tax,
            ))),
            EngineOperation::EvaluateSpot {
                vehicle,
                offered_freight,
                distance_km,
                origin,
                destination,
            } => {
                let coefficients = self.lookup_vehicle(vehicle)?;
                let input = SpotInput {
                    offered_freight: *offered_freight,
                    distance_km: *distance_km,
                    origin_uf: extract_uf(origin),
                    destination_uf: extract_uf(destination),
                };
                Ok(OperationResult::Spot(evaluate_spot(
                    &input,
                    Some(coefficients),
                    &self.tax,
                )))
            }
        }
    }

    fn lookup_vehicle(&self, raw: &str) -> BridgeResult<&VehicleCoefficients> {
        let class: VehicleClass = raw
            .parse()
            .map_err(|_| BridgeError::UnknownVehicleClass(raw.to_string()))?;
        self.vehicles
            .get(&class)
            .ok_or_else(|| BridgeError::UnknownVehicleClass(raw.to_string()))
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frete_engine::pricing::PricingInput;

    fn request_json(op_json: &str) -> String {
        format!(
            r#"{{"operation":{},"request_id":"req-1","context":null}}"#,
            op_json
        )
    }

    #[test]
    fn floor_request_end_to_end() {
        let bridge = Bridge::with_defaults();
        let raw = request_json(
            r#"{"op":"ComputeFloor","params":{"vehicle":"truck","distance_km":500.0}}"#,
        );
        let request = bridge.parse_request(&raw).unwrap();
        let response = bridge.process(&request).unwrap();

        assert_eq!(response.request_id, "req-1");
        assert!(response.read_only);
        match response.result {
            OperationResult::Floor { floor } => assert!((floor - 3350.0).abs() < 1e-9),
            other => panic!("wrong result: {:?}", other),
        }
    }

    #[test]
    fn malformed_request_is_rejected_at_parse() {
        let bridge = Bridge::with_defaults();
        let err = bridge.parse_request("{not json").unwrap_err();
        assert!(matches!(err, BridgeError::UnknownOperation(_)));
    }

    #[test]
    fn negative_distance_is_rejected_before_execution() {
        let bridge = Bridge::with_defaults();
        let raw = request_json(
            r#"{"op":"ComputeFloor","params":{"vehicle":"truck","distance_km":-10.0}}"#,
        );
        let err = bridge.parse_request(&raw).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidParameter { .. }));
    }

    #[test]
    fn unknown_vehicle_is_a_named_error() {
        let bridge = Bridge::with_defaults();
        let op = EngineOperation::ComputeFloor {
            vehicle: "jet ski".into(),
            distance_km: 100.0,
        };
        let err = bridge.execute(&op).unwrap_err();
        assert!(matches!(err, BridgeError::UnknownVehicleClass(_)));
    }

    #[test]
    fn icms_resolution_honors_configured_overrides() {
        let mut tax = TaxConfig::default();
        tax.icms_overrides.insert("ES-RJ".into(), 9.0);
        let bridge = Bridge::new(tax, default_vehicle_configs());

        let op = EngineOperation::ResolveIcms {
            origin: "Serra ES".into(),
            destination: "Duque de Caxias RJ".into(),
        };
        match bridge.execute(&op).unwrap() {
            OperationResult::IcmsRate {
                origin_uf,
                destination_uf,
                rate_pct,
            } => {
                assert_eq!(origin_uf, Some(Uf::ES));
                assert_eq!(destination_uf, Some(Uf::RJ));
                assert!((rate_pct - 9.0).abs() < 1e-9);
            }
            other => panic!("wrong result: {:?}", other),
        }
    }

    #[test]
    fn forward_pricing_through_the_bridge_matches_the_engine() {
        let bridge = Bridge::with_defaults();
        let input = PricingInput {
            base_freight: 2000.0,
            tolls: 150.0,
            extra_costs: 0.0,
            goods_value: 50_000.0,
            insurance_percent_charged: 0.2,
            profit_margin_percent: 15.0,
            icms_percent: 12.0,
        };
        let op = EngineOperation::PriceForward {
            input: input.clone(),
        };
        match bridge.execute(&op).unwrap() {
            OperationResult::Pricing(result) => {
                let direct = price_forward(&input, &TaxConfig::default());
                assert_eq!(result, direct);
            }
            other => panic!("wrong result: {:?}", other),
        }
    }

    #[test]
    fn spot_evaluation_through_the_bridge() {
        let bridge = Bridge::with_defaults();
        let op = EngineOperation::EvaluateSpot {
            vehicle: "carreta-ls".into(),
            offered_freight: 9000.0,
            distance_km: 520.0,
            origin: "Serra ES".into(),
            destination: "Duque de Caxias RJ".into(),
        };
        match bridge.execute(&op).unwrap() {
            OperationResult::Spot(decision) => {
                // 2800 + 5.50 * 520
                assert!((decision.antt_floor - 5660.0).abs() < 1e-9);
                assert!(decision.antt_compliant);
            }
            other => panic!("wrong result: {:?}", other),
        }
    }

    #[test]
    fn response_serializes_with_a_result_kind() {
        let bridge = Bridge::with_defaults();
        let raw = request_json(
            r#"{"op":"ComputeFloor","params":{"vehicle":"van","distance_km":100.0}}"#,
        );
        let request = bridge.parse_request(&raw).unwrap();
        let response = bridge.process(&request).unwrap();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"kind\":\"Floor\""));
    }
}
