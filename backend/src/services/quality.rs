//! Chemistry quality reporting

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::{quality_status, Element, ElementCheck, PlantParameters, QualityStatus};
use uuid::Uuid;

use crate::error::AppResult;
use crate::repositories::LoadRepository;

pub struct QualityService {
    loads: Arc<LoadRepository>,
    params: Arc<PlantParameters>,
}

impl QualityService {
    pub fn new(loads: Arc<LoadRepository>, params: Arc<PlantParameters>) -> Self {
        Self { loads, params }
    }

    /// Tolerance check of one load's chemistry
    pub fn chemistry_checks(&self, load_id: Uuid) -> AppResult<BTreeMap<Element, ElementCheck>> {
        let load = self.loads.get_by_id(load_id)?;
        Ok(self.params.tolerance.evaluate(&load.chemistry))
    }

    /// Quality grade over the `sample_size` most recent loads
    pub fn recent_quality(&self, sample_size: usize) -> AppResult<QualityStatus> {
        let loads = self.loads.get_recent(sample_size)?;
        let status = quality_status(&loads, &self.params.tolerance);
        tracing::info!(
            loads = loads.len(),
            level = %status.level,
            "Graded recent chemistry"
        );
        Ok(status)
    }

    /// Quality grade over every recorded load
    pub fn overall_quality(&self) -> AppResult<QualityStatus> {
        let loads = self.loads.get_all()?;
        Ok(quality_status(&loads, &self.params.tolerance))
    }
}
