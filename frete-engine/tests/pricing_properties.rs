//! Cross-module properties of the pricing core, exercised the way the
//! quoting screen uses it: free-text route in, decision numbers out.

use std::collections::HashMap;

use frete_engine::antt::compute_floor;
use frete_engine::icms::{extract_uf, resolve_icms_rate, resolve_icms_rate_opt, Uf};
use frete_engine::pricing::{price_forward, price_reverse, PricingInput};
use frete_engine::spot::{evaluate_spot, SpotInput};
use frete_engine::tax::TaxConfig;
use frete_engine::vehicles::{default_vehicle_configs, VehicleClass};

fn brokerage_tax() -> TaxConfig {
    TaxConfig {
        pis: 0.65,
        cofins: 3.0,
        csll: 1.08,
        irpj: 1.2,
        insurance_policy_rate: 0.1,
        icms_overrides: HashMap::new(),
    }
}

#[test]
fn quote_from_free_text_route() {
    // Serra/ES -> Duque de Caxias/RJ: ES is not in the S/SE origin bloc,
    // so the standard 12% interstate rate applies.
    let origin = extract_uf("Serra, ES").unwrap();
    let destination = extract_uf("Duque de Caxias - RJ").unwrap();
    let icms = resolve_icms_rate(origin, destination, &HashMap::new());
    assert_eq!(icms, 12.0);

    let input = PricingInput {
        base_freight: 2000.0,
        tolls: 150.0,
        extra_costs: 0.0,
        goods_value: 50_000.0,
        insurance_percent_charged: 0.2,
        profit_margin_percent: 15.0,
        icms_percent: icms,
    };
    let result = price_forward(&input, &brokerage_tax());
    // 2250 / 0.85 / 0.88
    assert!((result.final_freight - 3008.021_390_374_331_5).abs() < 1e-6);
}

#[test]
fn override_flows_from_config_into_the_quote() {
    let mut tax = brokerage_tax();
    tax.icms_overrides.insert("ES-RJ".into(), 9.0);
    let icms = resolve_icms_rate(Uf::ES, Uf::RJ, &tax.icms_overrides);
    assert_eq!(icms, 9.0);

    let input = PricingInput {
        base_freight: 2000.0,
        tolls: 150.0,
        goods_value: 50_000.0,
        insurance_percent_charged: 0.2,
        profit_margin_percent: 15.0,
        icms_percent: icms,
        ..Default::default()
    };
    let discounted = price_forward(&input, &tax);
    let standard = price_forward(
        &PricingInput {
            icms_percent: 12.0,
            ..input
        },
        &tax,
    );
    assert!(discounted.final_freight < standard.final_freight);
}

#[test]
fn reverse_round_trip_recovers_the_buy_price() {
    // Duality is exact when federal taxes are zero; the forward gross-up
    // covers margin and ICMS only.
    let tax = TaxConfig {
        pis: 0.0,
        cofins: 0.0,
        csll: 0.0,
        irpj: 0.0,
        ..brokerage_tax()
    };
    for (base, margin, icms) in [
        (2000.0, 15.0, 12.0),
        (750.0, 8.0, 7.0),
        (12_500.0, 22.0, 18.0),
    ] {
        let input = PricingInput {
            base_freight: base,
            tolls: 150.0,
            extra_costs: 80.0,
            goods_value: 50_000.0,
            insurance_percent_charged: 0.2,
            profit_margin_percent: margin,
            icms_percent: icms,
        };
        let sell = price_forward(&input, &tax).final_freight;
        let back = price_reverse(sell, &input, &tax);
        let relative = (back.buyer_power - base).abs() / base;
        assert!(
            relative < 1e-6,
            "margin {} icms {}: recovered {} from base {}",
            margin,
            icms,
            back.buyer_power,
            base
        );
    }
}

#[test]
fn seeded_truck_config_drives_the_spot_floor() {
    let configs = default_vehicle_configs();
    let truck = &configs[&VehicleClass::Truck];
    assert!((compute_floor(truck, 500.0) - 3350.0).abs() < 1e-9);

    let decision = evaluate_spot(
        &SpotInput {
            offered_freight: 6000.0,
            distance_km: 500.0,
            origin_uf: None,
            destination_uf: None,
        },
        Some(truck),
        &brokerage_tax(),
    );
    assert!((decision.antt_floor - 3350.0).abs() < 1e-9);
    assert!(decision.can_take);
}

#[test]
fn spot_rejection_comes_with_a_counter_offer() {
    let configs = default_vehicle_configs();
    let carreta = &configs[&VehicleClass::CarretaLs];
    // 2800 + 5.50 * 800 = 7200 floor; the offer sits below it.
    let decision = evaluate_spot(
        &SpotInput {
            offered_freight: 6500.0,
            distance_km: 800.0,
            origin_uf: Some(Uf::SP),
            destination_uf: Some(Uf::BA),
        },
        Some(carreta),
        &brokerage_tax(),
    );
    assert!(!decision.can_take);
    assert!(decision.suggested_sales_freight > decision.antt_floor);

    // A real above the counter-offer clears both gates on resale.
    let redo = evaluate_spot(
        &SpotInput {
            offered_freight: decision.suggested_sales_freight + 1.0,
            distance_km: 800.0,
            origin_uf: Some(Uf::SP),
            destination_uf: Some(Uf::BA),
        },
        Some(carreta),
        &brokerage_tax(),
    );
    assert!(redo.can_take);
}

#[test]
fn unknown_route_defaults_to_interstate_rate() {
    assert_eq!(
        resolve_icms_rate_opt(extract_uf("???"), extract_uf("Porto"), &HashMap::new()),
        12.0
    );
}

#[test]
fn recomputation_is_idempotent() {
    // The quote form recomputes on every keystroke; same inputs must give
    // byte-identical results.
    let input = PricingInput {
        base_freight: 1830.55,
        tolls: 120.4,
        extra_costs: 35.0,
        goods_value: 81_000.0,
        insurance_percent_charged: 0.25,
        profit_margin_percent: 17.5,
        icms_percent: 12.0,
    };
    let tax = brokerage_tax();
    let a = price_forward(&input, &tax);
    let b = price_forward(&input, &tax);
    assert_eq!(a, b);
}
