//! Monthly funnel summary over quote history.
//!
//! Profit here is recomputed from the stored rate snapshot rather than
//! trusting the `real_profit` field, so quotes edited by hand still report
//! consistent numbers. Note the recompute charges the full ad valorem that
//! was billed, which is the dashboard's conservative convention.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Quote, QuoteStatus};
use crate::util;

/// Realized profit and margin percent for a won quote.
pub fn realized_profit(quote: &Quote) -> (f64, f64) {
    let icms_amount = quote.total_freight * (quote.icms_percent / 100.0);
    let federal_pct =
        quote.pis_percent + quote.cofins_percent + quote.csll_percent + quote.irpj_percent;
    let federal_amount = quote.total_freight * (federal_pct / 100.0);
    let direct_costs = quote.base_freight + quote.tolls + quote.extra_costs;
    let profit =
        quote.total_freight - icms_amount - federal_amount - direct_costs - quote.ad_valorem;
    let margin = if quote.total_freight > 0.0 {
        profit / quote.total_freight * 100.0
    } else {
        0.0
    };
    (profit, margin)
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct MonthlySummary {
    pub month: String,
    pub total_quotes: usize,
    pub won_count: usize,
    pub lost_count: usize,
    pub pending_count: usize,
    /// Freight revenue on won quotes.
    pub total_won: f64,
    /// Freight value still sitting in pending proposals.
    pub total_pending: f64,
    /// Recomputed profit across won quotes.
    pub total_profit: f64,
    /// Mean of per-quote margins, not profit over revenue.
    pub avg_margin_percent: f64,
    pub win_rate_percent: f64,
    pub total_weight_kg: f64,
    pub total_km: f64,
    /// Won freight by customer, best five, descending.
    pub top_customers: Vec<(String, f64)>,
    /// Won freight by "origin -> destination", best five, descending.
    pub top_routes: Vec<(String, f64)>,
}

/// Aggregate one `"YYYY-MM"` bucket of history. Spot simulations are
/// counted in `total_quotes` but carry no revenue.
pub fn summarize_month(quotes: &[Quote], month: &str) -> MonthlySummary {
    let in_month: Vec<&Quote> = quotes
        .iter()
        .filter(|q| util::month_key(q.created_at) == month)
        .collect();

    let mut summary = MonthlySummary {
        month: month.to_string(),
        total_quotes: in_month.len(),
        ..Default::default()
    };

    let mut sum_margins = 0.0;
    let mut customer_totals: HashMap<&str, f64> = HashMap::new();
    let mut route_totals: HashMap<String, f64> = HashMap::new();

    for quote in &in_month {
        match quote.status {
            QuoteStatus::Won => {
                summary.won_count += 1;
                summary.total_won += quote.total_freight;
                let (profit, margin) = realized_profit(quote);
                summary.total_profit += profit;
                sum_margins += margin;
                summary.total_weight_kg += quote.weight_kg;
                summary.total_km += quote.distance_km;

                if !quote.customer.is_empty() {
                    *customer_totals.entry(quote.customer.as_str()).or_default() +=
                        quote.total_freight;
                }
                let route = format!("{} -> {}", quote.origin, quote.destination);
                *route_totals.entry(route).or_default() += quote.total_freight;
            }
            QuoteStatus::Lost => summary.lost_count += 1,
            QuoteStatus::Pending => {
                summary.pending_count += 1;
                summary.total_pending += quote.total_freight;
            }
            _ => {}
        }
    }

    if summary.won_count > 0 {
        summary.avg_margin_percent = sum_margins / summary.won_count as f64;
    }
    if summary.total_quotes > 0 {
        summary.win_rate_percent = summary.won_count as f64 / summary.total_quotes as f64 * 100.0;
    }

    summary.top_customers = top_five(customer_totals.into_iter().map(|(k, v)| (k.to_string(), v)));
    summary.top_routes = top_five(route_totals.into_iter());
    summary
}

fn top_five(totals: impl Iterator<Item = (String, f64)>) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = totals.collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(5);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Availability, QuoteStatus};
    use chrono::{TimeZone, Utc};
    use frete_engine::vehicles::VehicleClass;

    fn won_quote(proposal: &str, customer: &str, total: f64) -> Quote {
        Quote {
            proposal_number: proposal.into(),
            customer: customer.into(),
            origin: "Serra ES".into(),
            destination: "Duque de Caxias RJ".into(),
            distance_km: 520.0,
            vehicle: VehicleClass::CarretaLs,
            weight_kg: 28_000.0,
            base_freight: total * 0.6,
            tolls: 150.0,
            extra_costs: 0.0,
            goods_value: 80_000.0,
            insurance_percent_charged: 0.2,
            profit_margin_percent: 15.0,
            icms_percent: 12.0,
            pis_percent: 0.65,
            cofins_percent: 3.0,
            csll_percent: 1.08,
            irpj_percent: 1.2,
            total_freight: total,
            ad_valorem: 160.0,
            real_profit: 0.0,
            real_margin_percent: 0.0,
            buyer_power: 0.0,
            status: QuoteStatus::Won,
            availability: Availability::Immediate,
            lost_reason: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 12, 14, 0, 0).unwrap(),
        }
    }

    #[test]
    fn realized_profit_recomputes_from_the_snapshot() {
        let quote = won_quote("P-1", "Aço Forte", 5000.0);
        let (profit, margin) = realized_profit(&quote);
        // 5000 - 600 (icms) - 296.5 (federal) - 3150 (direct) - 160 (ad valorem)
        assert!((profit - 793.5).abs() < 1e-6);
        assert!((margin - 15.87).abs() < 1e-6);
    }

    #[test]
    fn zero_freight_quote_reports_zero_margin() {
        let quote = won_quote("P-0", "X", 0.0);
        let (profit, margin) = realized_profit(&quote);
        assert!(profit < 0.0); // still carries the fixed costs
        assert_eq!(margin, 0.0);
    }

    #[test]
    fn month_summary_counts_and_totals() {
        let mut lost = won_quote("P-2", "Vix Log", 3000.0);
        lost.status = QuoteStatus::Lost;
        let mut pending = won_quote("P-3", "Vix Log", 4200.0);
        pending.status = QuoteStatus::Pending;
        let mut other_month = won_quote("P-4", "Aço Forte", 9999.0);
        other_month.created_at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();

        let quotes = vec![
            won_quote("P-1", "Aço Forte", 5000.0),
            won_quote("P-5", "Aço Forte", 2000.0),
            lost,
            pending,
            other_month,
        ];
        let summary = summarize_month(&quotes, "2024-03");

        assert_eq!(summary.total_quotes, 4);
        assert_eq!(summary.won_count, 2);
        assert_eq!(summary.lost_count, 1);
        assert_eq!(summary.pending_count, 1);
        assert!((summary.total_won - 7000.0).abs() < 1e-9);
        assert!((summary.total_pending - 4200.0).abs() < 1e-9);
        assert!((summary.win_rate_percent - 50.0).abs() < 1e-9);
        assert!((summary.total_km - 1040.0).abs() < 1e-9);

        assert_eq!(summary.top_customers.len(), 1);
        assert_eq!(summary.top_customers[0].0, "Aço Forte");
        assert!((summary.top_customers[0].1 - 7000.0).abs() < 1e-9);
        assert_eq!(summary.top_routes[0].0, "Serra ES -> Duque de Caxias RJ");
    }

    #[test]
    fn empty_month_is_all_zeros() {
        let summary = summarize_month(&[], "2024-03");
        assert_eq!(summary.total_quotes, 0);
        assert_eq!(summary.win_rate_percent, 0.0);
        assert_eq!(summary.avg_margin_percent, 0.0);
        assert!(summary.top_customers.is_empty());
    }
}
