//! The quoting orchestrator.
//!
//! Wires route estimation, ICMS resolution and the pricing engine into the
//! three operations the desk runs all day: price a new haul, back-solve a
//! target price, sanity-check a spot offer. All config flows in through the
//! store at call time; the quoter itself is stateless and re-running a
//! request against unchanged config gives identical numbers.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};

use frete_engine::icms::{extract_uf, resolve_icms_rate_opt};
use frete_engine::pricing::{price_forward, price_reverse, PricingInput, PricingResult};
use frete_engine::spot::{evaluate_spot, SpotDecision, SpotInput};
use frete_engine::tax::TaxConfig;
use frete_engine::vehicles::VehicleClass;

use crate::quote_loader::QuoteRow;
use crate::route::RouteEstimator;
use crate::store::ConfigStore;
use crate::types::{Quote, QuoteRequest, QuoteStatus};

pub struct Quoter {
    estimator: Arc<dyn RouteEstimator>,
    store: Arc<dyn ConfigStore>,
}

impl Quoter {
    pub fn new(estimator: Arc<dyn RouteEstimator>, store: Arc<dyn ConfigStore>) -> Self {
        Self { estimator, store }
    }

    /// Price a haul from costs up. Missing distance/tolls are filled from
    /// the route estimator when it knows the pair; estimator failure
    /// degrades to the request as given, it never aborts the quote.
    pub async fn quote_forward(&self, request: &QuoteRequest) -> Result<Quote, String> {
        let tax = self.store.load_tax().await?;
        let (request, _) = self.hydrate_route(request.clone()).await;
        let icms = self.resolve_icms(&request, &tax);

        let result = price_forward(&pricing_input(&request, icms), &tax);
        debug!(
            "quoted {} {} -> {}: R$ {:.2}",
            request.proposal_number, request.origin, request.destination, result.final_freight
        );
        Ok(build_quote(&request, icms, &tax, &result, QuoteStatus::Pending))
    }

    /// Back-solve the maximum payable to the carrier from the price the
    /// client will accept.
    pub async fn quote_reverse(
        &self,
        request: &QuoteRequest,
        target_sell_price: f64,
    ) -> Result<Quote, String> {
        let tax = self.store.load_tax().await?;
        let (request, _) = self.hydrate_route(request.clone()).await;
        let icms = self.resolve_icms(&request, &tax);

        let result = price_reverse(target_sell_price, &pricing_input(&request, icms), &tax);
        Ok(build_quote(&request, icms, &tax, &result, QuoteStatus::Pending))
    }

    /// Evaluate a spot-market offer for a vehicle class.
    pub async fn check_spot(
        &self,
        origin: &str,
        destination: &str,
        distance_km: f64,
        vehicle: VehicleClass,
        offered_freight: f64,
    ) -> Result<SpotDecision, String> {
        let tax = self.store.load_tax().await?;
        let vehicles = self.store.load_vehicles().await?;

        let distance_km = if distance_km > 0.0 {
            distance_km
        } else {
            match self.estimator.estimate(origin, destination).await {
                Ok(estimate) => estimate.km,
                Err(e) => {
                    warn!("route estimate failed for spot check: {}", e);
                    0.0
                }
            }
        };

        let input = SpotInput {
            offered_freight,
            distance_km,
            origin_uf: extract_uf(origin),
            destination_uf: extract_uf(destination),
        };
        Ok(evaluate_spot(&input, vehicles.get(&vehicle), &tax))
    }

    /// Price a whole CSV export. Rows that fail are logged and skipped so
    /// one bad line does not sink the batch.
    pub async fn quote_batch(&self, rows: &[QuoteRow]) -> Vec<Quote> {
        let mut quotes = Vec::with_capacity(rows.len());
        for row in rows {
            match self.quote_forward(&row.to_request()).await {
                Ok(quote) => quotes.push(quote),
                Err(e) => warn!("skipping {}: {}", row.proposal_number, e),
            }
        }
        quotes
    }

    /// Fill distance and tolls from the estimator when the request lacks
    /// them. Returns the (possibly updated) request and whether an
    /// estimate was used.
    async fn hydrate_route(&self, mut request: QuoteRequest) -> (QuoteRequest, bool) {
        if request.distance_km > 0.0 {
            return (request, false);
        }
        match self
            .estimator
            .estimate(&request.origin, &request.destination)
            .await
        {
            Ok(estimate) => {
                request.distance_km = estimate.km;
                if request.tolls == 0.0 {
                    request.tolls = estimate.estimated_tolls;
                }
                (request, true)
            }
            Err(e) => {
                warn!(
                    "route estimate failed for {} -> {}: {}",
                    request.origin, request.destination, e
                );
                (request, false)
            }
        }
    }

    fn resolve_icms(&self, request: &QuoteRequest, tax: &TaxConfig) -> f64 {
        match request.icms_percent {
            Some(rate) => rate,
            None => resolve_icms_rate_opt(
                extract_uf(&request.origin),
                extract_uf(&request.destination),
                &tax.icms_overrides,
            ),
        }
    }
}

fn pricing_input(request: &QuoteRequest, icms_percent: f64) -> PricingInput {
    PricingInput {
        base_freight: request.base_freight,
        tolls: request.tolls,
        extra_costs: request.extra_costs,
        goods_value: request.goods_value,
        insurance_percent_charged: request.insurance_percent_charged,
        profit_margin_percent: request.profit_margin_percent,
        icms_percent,
    }
}

fn build_quote(
    request: &QuoteRequest,
    icms_percent: f64,
    tax: &TaxConfig,
    result: &PricingResult,
    status: QuoteStatus,
) -> Quote {
    Quote {
        proposal_number: request.proposal_number.clone(),
        customer: request.customer.clone(),
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        distance_km: request.distance_km,
        vehicle: request.vehicle,
        weight_kg: request.weight_kg,
        base_freight: request.base_freight,
        tolls: request.tolls,
        extra_costs: request.extra_costs,
        goods_value: request.goods_value,
        insurance_percent_charged: request.insurance_percent_charged,
        profit_margin_percent: request.profit_margin_percent,
        icms_percent,
        pis_percent: tax.pis,
        cofins_percent: tax.cofins,
        csll_percent: tax.csll,
        irpj_percent: tax.irpj,
        total_freight: result.final_freight,
        ad_valorem: result.ad_valorem_charged,
        real_profit: result.real_profit_amount,
        real_margin_percent: result.real_margin_percent,
        buyer_power: result.buyer_power,
        status,
        availability: request.availability,
        lost_reason: None,
        created_at: Utc::now(),
    }
}
