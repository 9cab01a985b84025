//! Freight pricing core for a Brazilian trucking brokerage.
//!
//! Everything here is pure arithmetic over read-only configuration:
//! - ANTT regulatory minimum-freight floors per vehicle class
//! - ICMS rate resolution (intrastate table, interstate blocs, overrides)
//! - Forward pricing (costs + margin target -> sell price)
//! - Reverse pricing (target sell price -> max payable to the carrier)
//! - Spot accept/reject decisions against the floor and an EBITDA gate
//!
//! No function in this crate performs I/O or retains state between calls.
//! The UI recomputes on every keystroke, so idempotence is a hard contract.

pub mod antt;
pub mod icms;
pub mod numeric;
pub mod policy;
pub mod pricing;
pub mod spot;
pub mod tax;
pub mod vehicles;

pub use antt::{compute_floor, CalcMode, VehicleCoefficients};
pub use icms::{extract_uf, resolve_icms_rate, Uf};
pub use numeric::{parse_locale_number, parse_or_zero, ParseNumberError};
pub use pricing::{price_forward, price_reverse, PricingInput, PricingResult};
pub use spot::{evaluate_spot, SpotDecision, SpotInput};
pub use tax::TaxConfig;
pub use vehicles::{default_vehicle_configs, VehicleClass};
