use std::env;
use std::process;
use std::sync::Arc;

use frete_bridge::Bridge;
use frete_engine::numeric::parse_locale_number;
use frete_engine::vehicles::VehicleClass;
use frete_pipeline::quote_loader::load_quotes_file;
use frete_pipeline::quoter::Quoter;
use frete_pipeline::route::FixedRouteEstimator;
use frete_pipeline::store::InMemoryConfigStore;
use frete_pipeline::types::{Availability, Quote, QuoteRequest};

// ---------------------------------------------------------------------------
// Flag parsing
// ---------------------------------------------------------------------------

/// Flags for the single-quote modes (forward/reverse/spot).
#[derive(Default)]
struct Flags {
    origin: String,
    destination: String,
    distance_km: f64,
    vehicle: Option<VehicleClass>,
    base: f64,
    tolls: f64,
    extra: f64,
    goods: f64,
    insurance: f64,
    margin: f64,
    icms: Option<f64>,
    target: f64,
    offer: f64,
    json: bool,
}

fn parse_number_or_exit(flag: &str, raw: &str) -> f64 {
    parse_locale_number(raw).unwrap_or_else(|e| {
        eprintln!("Error: {} expects a number, got '{}' ({})", flag, raw, e);
        process::exit(1);
    })
}

fn parse_flags(args: &[String]) -> Flags {
    let mut flags = Flags::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--json" {
            flags.json = true;
            i += 1;
            continue;
        }
        let Some(value) = args.get(i + 1) else {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        };
        match flag {
            "--origin" => flags.origin = value.clone(),
            "--destination" => flags.destination = value.clone(),
            "--km" => flags.distance_km = parse_number_or_exit(flag, value),
            "--vehicle" => {
                flags.vehicle = Some(value.parse().unwrap_or_else(|e: String| {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }))
            }
            "--base" => flags.base = parse_number_or_exit(flag, value),
            "--tolls" => flags.tolls = parse_number_or_exit(flag, value),
            "--extra" => flags.extra = parse_number_or_exit(flag, value),
            "--goods" => flags.goods = parse_number_or_exit(flag, value),
            "--insurance" => flags.insurance = parse_number_or_exit(flag, value),
            "--margin" => flags.margin = parse_number_or_exit(flag, value),
            "--icms" => flags.icms = Some(parse_number_or_exit(flag, value)),
            "--target" => flags.target = parse_number_or_exit(flag, value),
            "--offer" => flags.offer = parse_number_or_exit(flag, value),
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 2;
    }
    flags
}

fn quote_request(flags: &Flags) -> QuoteRequest {
    QuoteRequest {
        proposal_number: "cli".into(),
        customer: String::new(),
        origin: flags.origin.clone(),
        destination: flags.destination.clone(),
        distance_km: flags.distance_km,
        vehicle: flags.vehicle.unwrap_or(VehicleClass::Truck),
        weight_kg: 0.0,
        base_freight: flags.base,
        tolls: flags.tolls,
        extra_costs: flags.extra,
        goods_value: flags.goods,
        insurance_percent_charged: flags.insurance,
        profit_margin_percent: flags.margin,
        icms_percent: flags.icms,
        availability: Availability::Immediate,
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Brazilian currency formatting: dot thousands, comma decimals.
fn format_reais(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let s = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();
    format!("{}{},{:02}", if negative { "-" } else { "" }, grouped, frac)
}

fn print_header(title: &str) {
    let width = 58;
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(width));
    println!("  \u{2551}{:^width$}\u{2551}", title, width = width);
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(width));
    println!();
}

fn print_quote(quote: &Quote, reverse: bool) {
    print_header(if reverse {
        "FRETE ENGINE \u{2014} Engenharia Reversa"
    } else {
        "FRETE ENGINE \u{2014} Forma\u{e7}\u{e3}o de Frete"
    });

    if !quote.origin.is_empty() || !quote.destination.is_empty() {
        println!("  Rota:            {} -> {}", quote.origin, quote.destination);
    }
    if quote.distance_km > 0.0 {
        println!("  Dist\u{e2}ncia:       {:.0} km", quote.distance_km);
    }
    println!("  Ve\u{ed}culo:         {}", quote.vehicle);
    println!("  ICMS:            {:.2}%", quote.icms_percent);
    println!();
    println!("  Frete base:      R$ {:>14}", format_reais(quote.base_freight));
    println!("  Ped\u{e1}gios:        R$ {:>14}", format_reais(quote.tolls));
    println!("  Ad valorem:      R$ {:>14}", format_reais(quote.ad_valorem));
    println!("  {:\u{2500}<40}", "");
    println!("  FRETE FINAL:     R$ {:>14}", format_reais(quote.total_freight));
    if reverse {
        println!("  PODER DE COMPRA: R$ {:>14}", format_reais(quote.buyer_power));
    }
    println!();
    println!(
        "  Lucro real: R$ {} ({:.2}%)",
        format_reais(quote.real_profit),
        quote.real_margin_percent
    );
    println!();
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

fn default_quoter() -> Quoter {
    Quoter::new(
        Arc::new(FixedRouteEstimator::new()),
        Arc::new(InMemoryConfigStore::new()),
    )
}

async fn run_forward(args: &[String]) {
    let flags = parse_flags(args);
    let quoter = default_quoter();
    match quoter.quote_forward(&quote_request(&flags)).await {
        Ok(quote) => {
            if flags.json {
                println!("{}", serde_json::to_string_pretty(&quote).unwrap());
            } else {
                print_quote(&quote, false);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn run_reverse(args: &[String]) {
    let flags = parse_flags(args);
    if flags.target <= 0.0 {
        eprintln!("Error: reverse mode requires --target <sell price>");
        process::exit(1);
    }
    let quoter = default_quoter();
    match quoter.quote_reverse(&quote_request(&flags), flags.target).await {
        Ok(quote) => {
            if flags.json {
                println!("{}", serde_json::to_string_pretty(&quote).unwrap());
            } else {
                print_quote(&quote, true);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn run_spot(args: &[String]) {
    let flags = parse_flags(args);
    let Some(vehicle) = flags.vehicle else {
        eprintln!("Error: spot mode requires --vehicle <class>");
        process::exit(1);
    };
    let quoter = default_quoter();
    let decision = match quoter
        .check_spot(
            &flags.origin,
            &flags.destination,
            flags.distance_km,
            vehicle,
            flags.offer,
        )
        .await
    {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if flags.json {
        println!("{}", serde_json::to_string_pretty(&decision).unwrap());
        return;
    }

    print_header("FRETE ENGINE \u{2014} Spot Checker");
    println!("  Oferta:          R$ {:>14}", format_reais(decision.offered_freight));
    println!("  Piso ANTT:       R$ {:>14}", format_reais(decision.antt_floor));
    println!(
        "  ICMS:            {:.2}% (efetivo ap\u{f3}s cr\u{e9}dito: R$ {})",
        decision.icms_rate_pct,
        format_reais(decision.icms_net)
    );
    println!("  Impostos:        R$ {:>14}", format_reais(decision.total_tax));
    println!("  {:\u{2500}<40}", "");
    println!(
        "  EBITDA:          R$ {:>14}  ({:.1}%)",
        format_reais(decision.ebitda),
        decision.ebitda_percent
    );
    println!(
        "  Piso ANTT:       {}",
        if decision.antt_compliant { "OK" } else { "ABAIXO DO PISO" }
    );
    println!(
        "  DECIS\u{c3}O:         {}",
        if decision.can_take { "PEGAR" } else { "RECUSAR" }
    );
    if !decision.can_take && decision.suggested_sales_freight > 0.0 {
        println!(
            "  Frete sugerido:  R$ {:>14}",
            format_reais(decision.suggested_sales_freight)
        );
    }
    println!(
        "  Pagto m\u{e1}x motorista: R$ {}",
        format_reais(decision.max_driver_payment)
    );
    println!();
}

async fn run_batch(args: &[String]) {
    let Some(csv_path) = args.first() else {
        eprintln!("Usage: frete-server batch <quotes.csv> [--json]");
        process::exit(1);
    };
    let json_output = args.iter().any(|a| a == "--json");

    let rows = match load_quotes_file(csv_path) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error loading CSV: {}", e);
            process::exit(1);
        }
    };
    let total_rows = rows.len();

    let quoter = default_quoter();
    let quotes = quoter.quote_batch(&rows).await;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&quotes).unwrap());
        return;
    }

    print_header("FRETE ENGINE \u{2014} Cota\u{e7}\u{e3}o em Lote");
    println!(
        "  {} linhas lidas \u{00b7} {} cotadas",
        total_rows,
        quotes.len()
    );
    println!();
    println!("  {:\u{2500}<72}", "");
    for quote in &quotes {
        println!(
            "  {:10} {:32} {:5.1}%  R$ {:>14}",
            quote.proposal_number,
            format!("{} -> {}", quote.origin, quote.destination),
            quote.icms_percent,
            format_reais(quote.total_freight)
        );
    }
    println!("  {:\u{2500}<72}", "");
    let total: f64 = quotes.iter().map(|q| q.total_freight).sum();
    println!("  Total cotado: R$ {}", format_reais(total));
    println!();
}

fn run_op(args: &[String]) {
    let Some(raw) = args.first() else {
        eprintln!("Usage: frete-server op '<request json>'");
        eprintln!();
        eprintln!("Example:");
        eprintln!(
            "  frete-server op '{{\"operation\":{{\"op\":\"ComputeFloor\",\"params\":{{\"vehicle\":\"truck\",\"distance_km\":500}}}},\"request_id\":\"r1\",\"context\":null}}'"
        );
        process::exit(1);
    };

    let bridge = Bridge::with_defaults();
    let request = match bridge.parse_request(raw) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    match bridge.process(&request) {
        Ok(response) => println!("{}", serde_json::to_string_pretty(&response).unwrap()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn usage() -> ! {
    eprintln!("Usage: frete-server <forward|reverse|spot|batch|op> [options]");
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  forward   Price a haul from costs up");
    eprintln!("            --base N --tolls N --extra N --goods N --insurance P");
    eprintln!("            --margin P [--icms P] [--origin S --destination S] [--km N]");
    eprintln!("  reverse   Back-solve carrier payment from a target price");
    eprintln!("            --target N plus the forward cost flags");
    eprintln!("  spot      Evaluate a spot-market offer");
    eprintln!("            --vehicle CLASS --offer N --km N [--origin S --destination S]");
    eprintln!("  batch     Price a CSV export: batch <quotes.csv>");
    eprintln!("  op        Run one structured operation: op '<request json>'");
    eprintln!();
    eprintln!("Numbers accept a comma decimal separator. Add --json for");
    eprintln!("structured output in any mode.");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  frete-server forward --base 2000 --tolls 150 --goods 50000 \\");
    eprintln!("      --insurance 0,2 --margin 15 --origin \"Serra ES\" \\");
    eprintln!("      --destination \"Duque de Caxias RJ\" --icms 12");
    process::exit(1);
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let rest = &args[2..];
    match args[1].as_str() {
        "forward" => run_forward(rest).await,
        "reverse" => run_reverse(rest).await,
        "spot" => run_spot(rest).await,
        "batch" => run_batch(rest).await,
        "op" => run_op(rest),
        _ => usage(),
    }
}
