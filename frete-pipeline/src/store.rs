use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use frete_engine::antt::VehicleCoefficients;
use frete_engine::tax::TaxConfig;
use frete_engine::vehicles::{default_vehicle_configs, VehicleClass};

use crate::util;

/// Seam to wherever the admin-edited configuration lives. Pricing reads
/// through this trait and never writes; the save methods exist for the
/// admin surface only.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load_tax(&self) -> Result<TaxConfig, String>;
    async fn save_tax(&self, tax: TaxConfig) -> Result<(), String>;

    async fn load_vehicles(&self) -> Result<HashMap<VehicleClass, VehicleCoefficients>, String>;
    async fn save_vehicles(
        &self,
        configs: HashMap<VehicleClass, VehicleCoefficients>,
    ) -> Result<(), String>;

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}

/// In-process store seeded with the default tables. Backs tests and the
/// CLI; a deployment would put a database behind the same trait.
pub struct InMemoryConfigStore {
    tax: RwLock<TaxConfig>,
    vehicles: RwLock<HashMap<VehicleClass, VehicleCoefficients>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self {
            tax: RwLock::new(TaxConfig::default()),
            vehicles: RwLock::new(default_vehicle_configs()),
        }
    }

    pub fn with_tax(tax: TaxConfig) -> Self {
        Self {
            tax: RwLock::new(tax),
            vehicles: RwLock::new(default_vehicle_configs()),
        }
    }
}

impl Default for InMemoryConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn load_tax(&self) -> Result<TaxConfig, String> {
        Ok(self.tax.read().await.clone())
    }

    async fn save_tax(&self, tax: TaxConfig) -> Result<(), String> {
        *self.tax.write().await = tax;
        Ok(())
    }

    async fn load_vehicles(&self) -> Result<HashMap<VehicleClass, VehicleCoefficients>, String> {
        Ok(self.vehicles.read().await.clone())
    }

    async fn save_vehicles(
        &self,
        configs: HashMap<VehicleClass, VehicleCoefficients>,
    ) -> Result<(), String> {
        *self.vehicles.write().await = configs;
        Ok(())
    }
}
