use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use frete_engine::vehicles::VehicleClass;

// ---------------------------------------------------------------------------
// Lifecycle types
// ---------------------------------------------------------------------------

/// Where a quote sits in the commercial funnel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Pending,
    Answered,
    Approved,
    InOperation,
    Won,
    Lost,
    /// Created by the spot checker, never sent to a client.
    SpotSimulated,
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteStatus::Pending => write!(f, "Pendente"),
            QuoteStatus::Answered => write!(f, "Respondida"),
            QuoteStatus::Approved => write!(f, "Aprovada"),
            QuoteStatus::InOperation => write!(f, "Em Opera\u{e7}\u{e3}o"),
            QuoteStatus::Won => write!(f, "Ganha"),
            QuoteStatus::Lost => write!(f, "Perdida"),
            QuoteStatus::SpotSimulated => write!(f, "Simula\u{e7}\u{e3}o Spot"),
        }
    }
}

/// Why a lost quote was lost, for the funnel report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LostReason {
    PrecoAlto,
    PrazoEntrega,
    Concorrencia,
    Disponibilidade,
    Outros,
}

impl fmt::Display for LostReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LostReason::PrecoAlto => write!(f, "Pre\u{e7}o muito alto"),
            LostReason::PrazoEntrega => write!(f, "Prazo de entrega"),
            LostReason::Concorrencia => write!(f, "Concorr\u{ea}ncia"),
            LostReason::Disponibilidade => write!(f, "Indisponibilidade de ve\u{ed}culo"),
            LostReason::Outros => write!(f, "Outros"),
        }
    }
}

/// When the vehicle can load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    Immediate,
    PerSchedule,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Immediate => write!(f, "Imediato"),
            Availability::PerSchedule => write!(f, "Conforme programa\u{e7}\u{e3}o"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request and record types
// ---------------------------------------------------------------------------

/// What the operator fills in before pricing runs.
///
/// `distance_km = 0` means unknown; the quoter will ask the route estimator.
/// `icms_percent = None` means resolve from the route; `Some` is a manual
/// override entered on the form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub proposal_number: String,
    pub customer: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub vehicle: VehicleClass,
    pub weight_kg: f64,
    pub base_freight: f64,
    pub tolls: f64,
    pub extra_costs: f64,
    pub goods_value: f64,
    pub insurance_percent_charged: f64,
    pub profit_margin_percent: f64,
    pub icms_percent: Option<f64>,
    pub availability: Availability,
}

/// A priced quote as stored in history. Snapshot semantics: the tax rates
/// in force at pricing time are copied in, so later config edits never
/// rewrite past results.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    pub proposal_number: String,
    pub customer: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub vehicle: VehicleClass,
    pub weight_kg: f64,

    pub base_freight: f64,
    pub tolls: f64,
    pub extra_costs: f64,
    pub goods_value: f64,
    pub insurance_percent_charged: f64,
    pub profit_margin_percent: f64,

    // Rate snapshot
    pub icms_percent: f64,
    pub pis_percent: f64,
    pub cofins_percent: f64,
    pub csll_percent: f64,
    pub irpj_percent: f64,

    // Result snapshot
    pub total_freight: f64,
    pub ad_valorem: f64,
    pub real_profit: f64,
    pub real_margin_percent: f64,
    /// Populated by reverse quotes only.
    pub buyer_power: f64,

    pub status: QuoteStatus,
    pub availability: Availability,
    pub lost_reason: Option<LostReason>,
    pub created_at: DateTime<Utc>,
}
