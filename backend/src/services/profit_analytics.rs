//! Profit analytics over the weighbridge record

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use shared::{
    aggregate, cost_breakdown, filter_by_date_range, profit_trends, revenue_breakdown,
    stage_impact, summarize, CostBreakdown, DateRange, PlantParameters, ProcessingStage,
    ProfitAggregate, ProfitRecord, ProfitSummary, RevenueBreakdown, StageImpact, TrendBucket,
    TrendPeriod,
};
use uuid::Uuid;

use super::profit_cache::ProfitCache;
use crate::error::AppResult;
use crate::repositories::LoadRepository;

/// Profit analytics service.
///
/// Records are recomputed from the current loads on every call; the cache
/// only short-cuts loads whose content has not changed.
pub struct ProfitAnalyticsService {
    loads: Arc<LoadRepository>,
    params: Arc<PlantParameters>,
    cache: ProfitCache,
}

impl ProfitAnalyticsService {
    pub fn new(loads: Arc<LoadRepository>, params: Arc<PlantParameters>) -> Self {
        Self {
            loads,
            params,
            cache: ProfitCache::new(),
        }
    }

    pub fn cache(&self) -> &ProfitCache {
        &self.cache
    }

    /// Profit record for every load, oldest arrival first
    pub fn profit_data(&self) -> AppResult<Vec<ProfitRecord>> {
        let mut loads = self.loads.get_all()?;
        loads.sort_by(|a, b| a.arrival_time.cmp(&b.arrival_time));
        let live: HashSet<Uuid> = loads.iter().map(|load| load.id).collect();
        self.cache.retain_loads(&live)?;

        let records = loads
            .iter()
            .map(|load| {
                self.cache.get_or_compute(load, &self.params).map_err(|e| {
                    tracing::warn!(load_number = %load.load_number, "Profit calculation failed: {}", e);
                    e
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        tracing::debug!("Computed {} profit records", records.len());
        Ok(records)
    }

    pub fn profit_for_load(&self, id: Uuid) -> AppResult<ProfitRecord> {
        let load = match self.loads.get_by_id(id) {
            Ok(load) => load,
            Err(e) => {
                self.cache.evict(id)?;
                return Err(e);
            }
        };
        self.cache.get_or_compute(&load, &self.params)
    }

    /// Delete a load and its stored profit record
    pub fn delete_load(&self, id: Uuid) -> AppResult<()> {
        self.loads.delete(id)?;
        self.cache.evict(id)?;
        Ok(())
    }

    pub fn by_date_range(&self, range: &DateRange) -> AppResult<Vec<ProfitRecord>> {
        Ok(filter_by_date_range(&self.profit_data()?, range))
    }

    pub fn stage_impact(&self, stage: ProcessingStage) -> AppResult<Vec<StageImpact>> {
        Ok(stage_impact(&self.profit_data()?, stage))
    }

    pub fn cost_breakdown(&self) -> AppResult<CostBreakdown> {
        Ok(cost_breakdown(&self.profit_data()?))
    }

    pub fn revenue_breakdown(&self) -> AppResult<RevenueBreakdown> {
        Ok(revenue_breakdown(&self.profit_data()?))
    }

    pub fn trends(&self, period: TrendPeriod) -> AppResult<BTreeMap<String, TrendBucket>> {
        Ok(profit_trends(&self.profit_data()?, period))
    }

    pub fn summary(&self, range: Option<&DateRange>) -> AppResult<ProfitSummary> {
        Ok(summarize(&self.records_in(range)?))
    }

    /// Summary, breakdowns and trends over the loads in `range`
    pub fn dashboard(&self, range: Option<&DateRange>, period: TrendPeriod) -> AppResult<ProfitAggregate> {
        let records = self.records_in(range)?;
        tracing::info!(loads = records.len(), period = %period, "Building profit report");
        Ok(aggregate(&records, period))
    }

    /// Records in `range`, or all of them
    pub fn records_in(&self, range: Option<&DateRange>) -> AppResult<Vec<ProfitRecord>> {
        match range {
            Some(range) => self.by_date_range(range),
            None => self.profit_data(),
        }
    }
}
