//! Slag plant backend
//!
//! Record stores, reporting services and configuration behind the
//! `slag-report` command line tool.

pub mod config;
pub mod error;
pub mod repositories;
pub mod services;

use std::sync::Arc;

use shared::PlantParameters;

pub use config::Config;
pub use error::{AppError, AppResult};

use repositories::{
    EquipmentRepository, InventoryRepository, InvoiceRepository, LoadRepository,
    MaintenanceTaskRepository, PersonnelRepository,
};
use services::{
    InventoryService, InvoiceService, MaintenanceService, PersonnelService, ProcessingService,
    ProfitAnalyticsService, QualityService,
};

/// Record stores and calculation tables shared by the services
#[derive(Clone)]
pub struct AppState {
    pub loads: Arc<LoadRepository>,
    pub equipment: Arc<EquipmentRepository>,
    pub tasks: Arc<MaintenanceTaskRepository>,
    pub inventory: Arc<InventoryRepository>,
    pub personnel: Arc<PersonnelRepository>,
    pub invoices: Arc<InvoiceRepository>,
    pub params: Arc<PlantParameters>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Seed every store from the files named in `config`
    pub fn load(config: Config) -> AppResult<Self> {
        let data = &config.data;
        let loads = LoadRepository::from_file(&data.loads_path)?;
        let equipment = EquipmentRepository::from_file(&data.equipment_path)?;
        let tasks = MaintenanceTaskRepository::from_file(&data.tasks_path)?;
        let inventory = InventoryRepository::from_file(&data.inventory_path)?;
        let personnel = PersonnelRepository::from_file(&data.personnel_path)?;
        let invoices = InvoiceRepository::from_file(&data.invoices_path)?;

        Ok(Self {
            loads: Arc::new(loads),
            equipment: Arc::new(equipment),
            tasks: Arc::new(tasks),
            inventory: Arc::new(inventory),
            personnel: Arc::new(personnel),
            invoices: Arc::new(invoices),
            params: Arc::new(config.parameters.clone()),
            config: Arc::new(config),
        })
    }

    pub fn profit_analytics(&self) -> ProfitAnalyticsService {
        ProfitAnalyticsService::new(self.loads.clone(), self.params.clone())
    }

    pub fn quality(&self) -> QualityService {
        QualityService::new(self.loads.clone(), self.params.clone())
    }

    pub fn maintenance(&self) -> MaintenanceService {
        MaintenanceService::new(
            self.equipment.clone(),
            self.tasks.clone(),
            self.personnel.clone(),
            self.params.clone(),
        )
    }

    pub fn processing(&self) -> ProcessingService {
        ProcessingService::new(self.loads.clone())
    }

    pub fn personnel(&self) -> PersonnelService {
        PersonnelService::new(self.personnel.clone())
    }

    pub fn invoices(&self) -> InvoiceService {
        InvoiceService::new(self.invoices.clone())
    }

    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self.inventory.clone(), self.config.report.low_stock_threshold)
    }
}
