//! CSV batch-quote loader.
//!
//! Parses operator-exported spreadsheets into `QuoteRequest`s. Expected
//! columns:
//!   proposal_number, customer, origin, destination, distance_km, vehicle,
//!   weight_kg, base_freight, tolls, extra_costs, goods_value,
//!   insurance_percent, margin_percent, icms_percent
//!
//! Numeric cells come straight from Brazilian spreadsheets, so a comma
//! decimal separator is accepted everywhere; blank cells read as zero
//! (blank `icms_percent` means resolve from the route).

use std::io::Read;

use serde::{Deserialize, Deserializer};

use frete_engine::numeric::parse_locale_number;
use frete_engine::vehicles::VehicleClass;

use crate::types::{Availability, QuoteRequest};

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRow {
    pub proposal_number: String,
    pub customer: String,
    pub origin: String,
    pub destination: String,
    #[serde(deserialize_with = "locale_number")]
    pub distance_km: f64,
    #[serde(deserialize_with = "vehicle_class")]
    pub vehicle: VehicleClass,
    #[serde(deserialize_with = "locale_number")]
    pub weight_kg: f64,
    #[serde(deserialize_with = "locale_number")]
    pub base_freight: f64,
    #[serde(deserialize_with = "locale_number")]
    pub tolls: f64,
    #[serde(deserialize_with = "locale_number")]
    pub extra_costs: f64,
    #[serde(deserialize_with = "locale_number")]
    pub goods_value: f64,
    #[serde(deserialize_with = "locale_number")]
    pub insurance_percent: f64,
    #[serde(deserialize_with = "locale_number")]
    pub margin_percent: f64,
    #[serde(deserialize_with = "optional_locale_number")]
    pub icms_percent: Option<f64>,
}

impl QuoteRow {
    pub fn to_request(&self) -> QuoteRequest {
        QuoteRequest {
            proposal_number: self.proposal_number.clone(),
            customer: self.customer.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            distance_km: self.distance_km,
            vehicle: self.vehicle,
            weight_kg: self.weight_kg,
            base_freight: self.base_freight,
            tolls: self.tolls,
            extra_costs: self.extra_costs,
            goods_value: self.goods_value,
            insurance_percent_charged: self.insurance_percent,
            profit_margin_percent: self.margin_percent,
            icms_percent: self.icms_percent,
            availability: Availability::default(),
        }
    }
}

/// Load quote rows from a CSV reader.
pub fn load_quotes<R: Read>(reader: R) -> Result<Vec<QuoteRow>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: QuoteRow =
            result.map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load quote rows from a CSV file path.
pub fn load_quotes_file(path: &str) -> Result<Vec<QuoteRow>, String> {
    let file =
        std::fs::File::open(path).map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_quotes(file)
}

/// Comma-or-dot decimal; blank reads as zero.
fn locale_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.trim().is_empty() {
        return Ok(0.0);
    }
    parse_locale_number(&s).map_err(serde::de::Error::custom)
}

/// Like `locale_number`, but blank means "not provided".
fn optional_locale_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.trim().is_empty() {
        return Ok(None);
    }
    parse_locale_number(&s)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

/// Accepts the short token ("carreta-ls") or the full display label.
fn vehicle_class<'de, D>(deserializer: D) -> Result<VehicleClass, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
proposal_number,customer,origin,destination,distance_km,vehicle,weight_kg,base_freight,tolls,extra_costs,goods_value,insurance_percent,margin_percent,icms_percent
P-1001,Aço Forte,Serra ES,Duque de Caxias RJ,520,carreta-ls,28000,\"2500,00\",150,0,\"80000,00\",\"0,2\",15,
P-1002,Vix Log,Vitória ES,São Paulo SP,940,truck,11000,3800,\"210,50\",120,50000,\"0,25\",18,7
P-1003,Aço Forte,Cariacica ES,Serra ES,38,van,1200,\"180,90\",0,,9000,\"0,1\",\"12,5\",
";

    #[test]
    fn load_sample_csv() {
        let rows = load_quotes(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].proposal_number, "P-1001");
        assert_eq!(rows[0].vehicle, VehicleClass::CarretaLs);
        assert!((rows[0].base_freight - 2500.0).abs() < 0.01);
        assert!(rows[0].icms_percent.is_none());
        assert_eq!(rows[1].icms_percent, Some(7.0));
        assert!((rows[1].tolls - 210.5).abs() < 0.01);
    }

    #[test]
    fn blank_numeric_cell_reads_as_zero() {
        let rows = load_quotes(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows[2].extra_costs, 0.0);
        assert!((rows[2].margin_percent - 12.5).abs() < 0.01);
    }

    #[test]
    fn garbage_numeric_cell_is_a_line_error() {
        let csv_data = "\
proposal_number,customer,origin,destination,distance_km,vehicle,weight_kg,base_freight,tolls,extra_costs,goods_value,insurance_percent,margin_percent,icms_percent
P-1,C,A,B,100,truck,1000,abc,0,0,0,0,15,
";
        let err = load_quotes(csv_data.as_bytes()).unwrap_err();
        assert!(err.contains("line 2"), "unexpected error: {}", err);
    }

    #[test]
    fn row_converts_to_request() {
        let rows = load_quotes(SAMPLE_CSV.as_bytes()).unwrap();
        let request = rows[0].to_request();
        assert_eq!(request.origin, "Serra ES");
        assert!((request.insurance_percent_charged - 0.2).abs() < 1e-9);
        assert_eq!(request.availability, Availability::Immediate);
    }
}
