//! Vehicle classes and their seed coefficient table.
//!
//! The coefficient values are the brokerage's defaults; admins can edit
//! them through the config store, so nothing in the pricing code should
//! reach for this table directly; it exists to bootstrap a fresh install.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::antt::{CalcMode, VehicleCoefficients};

/// The vehicle classes the brokerage quotes for, light to heavy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    Fiorino,
    Van,
    HrVuc,
    Toco,
    Truck,
    CarretaSimples,
    CarretaLs,
    Carreta4Eixo,
    Vanderleia,
    Rodotrem,
    Prancha,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 11] = [
        VehicleClass::Fiorino,
        VehicleClass::Van,
        VehicleClass::HrVuc,
        VehicleClass::Toco,
        VehicleClass::Truck,
        VehicleClass::CarretaSimples,
        VehicleClass::CarretaLs,
        VehicleClass::Carreta4Eixo,
        VehicleClass::Vanderleia,
        VehicleClass::Rodotrem,
        VehicleClass::Prancha,
    ];

    /// The label shown on proposals and quote forms.
    pub fn label(self) -> &'static str {
        match self {
            VehicleClass::Fiorino => "Fiorino - Utilit\u{e1}rio",
            VehicleClass::Van => "Van - Utilit\u{e1}rio",
            VehicleClass::HrVuc => "HR/VUC - Utilit\u{e1}rio",
            VehicleClass::Toco => "Toco",
            VehicleClass::Truck => "Truck",
            VehicleClass::CarretaSimples => "Carreta Simples",
            VehicleClass::CarretaLs => "Carreta LS",
            VehicleClass::Carreta4Eixo => "Carreta 4\u{ba} Eixo",
            VehicleClass::Vanderleia => "Vanderleia",
            VehicleClass::Rodotrem => "Rodotrem",
            VehicleClass::Prancha => "Prancha - Pre\u{e7}o livre",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleClass {
    type Err = String;

    /// Accepts the CLI/CSV short token (e.g. "truck", "carreta-ls") or the
    /// full display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let class = match token.as_str() {
            "fiorino" => VehicleClass::Fiorino,
            "van" => VehicleClass::Van,
            "hr-vuc" | "hr/vuc" | "vuc" => VehicleClass::HrVuc,
            "toco" => VehicleClass::Toco,
            "truck" => VehicleClass::Truck,
            "carreta-simples" | "carreta simples" => VehicleClass::CarretaSimples,
            "carreta-ls" | "carreta ls" => VehicleClass::CarretaLs,
            "carreta-4-eixo" | "carreta 4 eixo" => VehicleClass::Carreta4Eixo,
            "vanderleia" => VehicleClass::Vanderleia,
            "rodotrem" => VehicleClass::Rodotrem,
            "prancha" => VehicleClass::Prancha,
            _ => {
                return VehicleClass::ALL
                    .iter()
                    .copied()
                    .find(|c| c.label().to_ascii_lowercase() == token)
                    .ok_or_else(|| format!("unknown vehicle class: '{}'", s));
            }
        };
        Ok(class)
    }
}

/// Seed coefficient table for a fresh install.
pub fn default_vehicle_configs() -> HashMap<VehicleClass, VehicleCoefficients> {
    fn round_trip(factor: f64, axles: u32, capacity_kg: f64, consumption: f64) -> VehicleCoefficients {
        VehicleCoefficients {
            calc_mode: CalcMode::KmRoundTrip,
            fixed: 0.0,
            variable: 0.0,
            factor,
            axles,
            capacity_kg,
            consumption_km_l: consumption,
        }
    }
    fn antt(fixed: f64, variable: f64, axles: u32, capacity_kg: f64, consumption: f64) -> VehicleCoefficients {
        VehicleCoefficients {
            calc_mode: CalcMode::Antt,
            fixed,
            variable,
            factor: 0.0,
            axles,
            capacity_kg,
            consumption_km_l: consumption,
        }
    }

    let mut configs = HashMap::new();
    configs.insert(VehicleClass::Fiorino, round_trip(2.50, 2, 650.0, 12.0));
    configs.insert(VehicleClass::Van, round_trip(3.50, 2, 1_500.0, 9.0));
    configs.insert(VehicleClass::HrVuc, round_trip(4.20, 2, 1_800.0, 8.0));
    configs.insert(VehicleClass::Toco, antt(1_400.0, 2.80, 2, 6_000.0, 5.0));
    configs.insert(VehicleClass::Truck, antt(1_600.0, 3.50, 3, 12_000.0, 4.0));
    configs.insert(VehicleClass::CarretaSimples, antt(2_200.0, 4.80, 5, 25_000.0, 2.8));
    configs.insert(VehicleClass::CarretaLs, antt(2_800.0, 5.50, 6, 32_000.0, 2.2));
    configs.insert(VehicleClass::Carreta4Eixo, antt(3_200.0, 6.20, 7, 38_000.0, 2.0));
    configs.insert(VehicleClass::Vanderleia, antt(3_000.0, 5.80, 6, 34_000.0, 2.1));
    configs.insert(VehicleClass::Rodotrem, antt(4_200.0, 8.50, 9, 50_000.0, 1.6));
    configs.insert(
        VehicleClass::Prancha,
        VehicleCoefficients {
            calc_mode: CalcMode::Free,
            fixed: 0.0,
            variable: 0.0,
            factor: 0.0,
            axles: 6,
            capacity_kg: 40_000.0,
            consumption_km_l: 1.5,
        },
    );
    configs
}
