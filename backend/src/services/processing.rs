//! Processing queue over the weighbridge record

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{processing_queue, Load, LoadStatus, ProcessingQueue};
use uuid::Uuid;

use crate::error::AppResult;
use crate::repositories::LoadRepository;

pub struct ProcessingService {
    loads: Arc<LoadRepository>,
}

impl ProcessingService {
    pub fn new(loads: Arc<LoadRepository>) -> Self {
        Self { loads }
    }

    /// Pending and in-process loads with their priority and wait, as seen at `now`
    pub fn queue(&self, now: DateTime<Utc>) -> AppResult<ProcessingQueue> {
        let queue = processing_queue(&self.loads.get_all()?, now);
        tracing::info!(
            pending = queue.pending.len(),
            processing = queue.processing.len(),
            "Built processing queue"
        );
        Ok(queue)
    }

    pub fn start(&self, id: Uuid) -> AppResult<Load> {
        self.loads.update_status(id, LoadStatus::Processing)
    }

    pub fn finish(&self, id: Uuid) -> AppResult<Load> {
        self.loads.update_status(id, LoadStatus::Processed)
    }
}
