//! Forward and reverse freight pricing.
//!
//! Forward pricing grosses up direct costs twice (once for the margin
//! target, once for ICMS) because both are defined as percentages of the
//! final invoiced price, not of cost. Reverse pricing walks the same
//! algebra backwards from the price the client will pay down to the
//! maximum payable to the carrier ("buyer power").
//!
//! The charged-side ad valorem (what the client is billed for insurance)
//! enters the grossed-up cost base; the cost-side ad valorem (what the
//! policy actually costs the brokerage) enters the realized-profit line.
//! That asymmetry is intentional and is exactly where real margin diverges
//! from the nominal target.

use serde::{Deserialize, Serialize};

use crate::tax::TaxConfig;

/// Inputs for a single pricing calculation. Ephemeral; built per call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PricingInput {
    /// Carrier/driver cost (forward mode). Ignored by reverse mode.
    pub base_freight: f64,
    pub tolls: f64,
    pub extra_costs: f64,
    pub goods_value: f64,
    /// Client-facing ad valorem rate (percent of goods value).
    pub insurance_percent_charged: f64,
    /// Target margin as percent of the final price.
    pub profit_margin_percent: f64,
    /// Destination ICMS rate in percent.
    pub icms_percent: f64,
}

/// Output of either pricing direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Client-facing sell price.
    pub final_freight: f64,
    pub icms_amount: f64,
    pub federal_tax_amount: f64,
    pub ad_valorem_charged: f64,
    pub ad_valorem_cost: f64,
    pub real_profit_amount: f64,
    pub real_margin_percent: f64,
    /// Maximum payable to the carrier. Zero in forward mode; clamped at
    /// zero in reverse mode (a negative number is not actionable).
    pub buyer_power: f64,
}

/// Price a haul forward: costs plus margin target to sell price.
///
/// Divisor guards: a margin or ICMS rate at or above 100% would make the
/// gross-up divisor non-positive, so that division is skipped (divisor
/// treated as 1) instead of producing an infinite or negative price.
pub fn price_forward(input: &PricingInput, tax: &TaxConfig) -> PricingResult {
    let ad_valorem_charged = input.goods_value * (input.insurance_percent_charged / 100.0);
    let ad_valorem_cost = input.goods_value * (tax.insurance_policy_rate / 100.0);
    let federal_pct = tax.federal_total();

    let direct_costs_selling =
        input.base_freight + input.tolls + input.extra_costs + ad_valorem_charged;

    let margin_divisor = 1.0 - input.profit_margin_percent / 100.0;
    let price_with_margin = if margin_divisor > 0.0 {
        direct_costs_selling / margin_divisor
    } else {
        direct_costs_selling
    };

    let icms_divisor = 1.0 - input.icms_percent / 100.0;
    let final_freight = if icms_divisor > 0.0 {
        price_with_margin / icms_divisor
    } else {
        price_with_margin
    };

    let icms_amount = final_freight * (input.icms_percent / 100.0);
    let federal_tax_amount = final_freight * (federal_pct / 100.0);

    // Realized profit uses what insurance actually costs, not what was charged.
    let real_direct_costs =
        input.base_freight + input.tolls + input.extra_costs + ad_valorem_cost;
    let real_profit_amount =
        final_freight - icms_amount - federal_tax_amount - real_direct_costs;
    let real_margin_percent = if final_freight > 0.0 {
        real_profit_amount / final_freight * 100.0
    } else {
        0.0
    };

    PricingResult {
        final_freight,
        icms_amount,
        federal_tax_amount,
        ad_valorem_charged,
        ad_valorem_cost,
        real_profit_amount,
        real_margin_percent,
        buyer_power: 0.0,
    }
}

/// Price a haul in reverse: given the price the client will pay, back-solve
/// the maximum payable upstream while preserving the margin target.
pub fn price_reverse(
    target_sell_price: f64,
    costs: &PricingInput,
    tax: &TaxConfig,
) -> PricingResult {
    let ad_valorem_charged = costs.goods_value * (costs.insurance_percent_charged / 100.0);
    let ad_valorem_cost = costs.goods_value * (tax.insurance_policy_rate / 100.0);
    let federal_pct = tax.federal_total();

    let final_freight = target_sell_price;
    let icms_amount = final_freight * (costs.icms_percent / 100.0);
    let federal_tax_amount = final_freight * (federal_pct / 100.0);
    let net_revenue = final_freight - icms_amount - federal_tax_amount;

    let margin_divisor = 1.0 - costs.profit_margin_percent / 100.0;
    let max_direct_costs = net_revenue * margin_divisor;
    let buyer_power =
        (max_direct_costs - costs.tolls - costs.extra_costs - ad_valorem_charged).max(0.0);

    let real_direct_costs = buyer_power + costs.tolls + costs.extra_costs + ad_valorem_cost;
    let real_profit_amount = net_revenue - real_direct_costs;
    let real_margin_percent = if final_freight > 0.0 {
        real_profit_amount / final_freight * 100.0
    } else {
        0.0
    };

    PricingResult {
        final_freight,
        icms_amount,
        federal_tax_amount,
        ad_valorem_charged,
        ad_valorem_cost,
        real_profit_amount,
        real_margin_percent,
        buyer_power,
    }
}
