//! Engine operations: the complete vocabulary of valid requests.
//!
//! A request that does not parse into one of these variants is rejected
//! before anything executes. The enum is exhaustive: adding an operation
//! without a handler in the protocol module is a compile error.

use serde::{Deserialize, Serialize};

use frete_engine::pricing::PricingInput;

/// Every valid operation a caller can request of the pricing engine.
///
/// Vehicle classes and locations arrive as free text (the short token or
/// display label for vehicles, any address string for locations) and are
/// resolved during execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "params")]
pub enum EngineOperation {
    /// Minimum lawful freight for a vehicle class over a distance.
    ComputeFloor { vehicle: String, distance_km: f64 },

    /// ICMS rate for a route, honoring configured overrides.
    ResolveIcms { origin: String, destination: String },

    /// Costs-up pricing: sell price that covers costs, margin and taxes.
    PriceForward { input: PricingInput },

    /// Price-down pricing: maximum payable to the carrier at a target
    /// sell price.
    PriceReverse {
        target_sell_price: f64,
        costs: PricingInput,
    },

    /// Full spot-market offer evaluation for a vehicle class.
    EvaluateSpot {
        vehicle: String,
        offered_freight: f64,
        distance_km: f64,
        origin: String,
        destination: String,
    },
}

impl EngineOperation {
    /// Is this operation read-only? Every current operation is; the
    /// distinction exists so config-mutating operations can be gated
    /// when they arrive.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            EngineOperation::ComputeFloor { .. }
                | EngineOperation::ResolveIcms { .. }
                | EngineOperation::PriceForward { .. }
                | EngineOperation::PriceReverse { .. }
                | EngineOperation::EvaluateSpot { .. }
        )
    }

    /// Human-readable description of what this operation does.
    pub fn describe(&self) -> String {
        match self {
            EngineOperation::ComputeFloor {
                vehicle,
                distance_km,
            } => format!("Floor for {vehicle} over {distance_km} km"),
            EngineOperation::ResolveIcms {
                origin,
                destination,
            } => format!("ICMS rate {origin} -> {destination}"),
            EngineOperation::PriceForward { input } => {
                format!("Forward pricing from base R$ {:.2}", input.base_freight)
            }
            EngineOperation::PriceReverse {
                target_sell_price, ..
            } => format!("Reverse pricing from target R$ {target_sell_price:.2}"),
            EngineOperation::EvaluateSpot {
                vehicle,
                offered_freight,
                distance_km,
                ..
            } => format!(
                "Spot check: {vehicle}, R$ {offered_freight:.2} over {distance_km} km"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_json_round_trips() {
        let op = EngineOperation::ComputeFloor {
            vehicle: "truck".into(),
            distance_km: 500.0,
        };
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains("\"op\":\"ComputeFloor\""));
        assert!(json.contains("\"params\""));
        let back: EngineOperation = serde_json::from_str(&json).unwrap();
        match back {
            EngineOperation::ComputeFloor {
                vehicle,
                distance_km,
            } => {
                assert_eq!(vehicle, "truck");
                assert!((distance_km - 500.0).abs() < 1e-9);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn unknown_tag_fails_to_parse() {
        let result: Result<EngineOperation, _> =
            serde_json::from_str(r#"{"op":"DropTables","params":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn all_current_operations_are_read_only() {
        let op = EngineOperation::ResolveIcms {
            origin: "Serra ES".into(),
            destination: "Rio de Janeiro RJ".into(),
        };
        assert!(op.is_read_only());
    }

    #[test]
    fn describe_names_the_route() {
        let op = EngineOperation::ResolveIcms {
            origin: "Serra ES".into(),
            destination: "Rio de Janeiro RJ".into(),
        };
        assert_eq!(op.describe(), "ICMS rate Serra ES -> Rio de Janeiro RJ");
    }
}
