//! Centralized business-policy constants for pricing decisions.
//!
//! These values are calibrated for spot-market trucking brokerage under the
//! Lucro Presumido tax regime. Changing a constant here affects BOTH the
//! spot EBITDA gate (in `spot.rs`) and the negotiation headroom numbers
//! derived from it.

/// Minimum EBITDA margin (percent of offered freight) below which a spot
/// load is rejected. Loads at exactly this margin are accepted.
pub const MIN_EBITDA_MARGIN_PCT: f64 = 15.0;

/// Statutory presumed-credit fraction applied to gross ICMS for transport
/// companies (crédito presumido). The effective ICMS burden is
/// `gross * (1 - PRESUMED_ICMS_CREDIT)`.
pub const PRESUMED_ICMS_CREDIT: f64 = 0.20;

/// Fallback ICMS rate (percent) when origin or destination UF cannot be
/// resolved from the route text. Matches the standard interstate rate.
pub const DEFAULT_INTERSTATE_ICMS_PCT: f64 = 12.0;
