//! Processing queue ordering

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Chemistry, Load, LoadStatus};

/// Iron percentage above which a load is processed first
pub const HIGH_PRIORITY_IRON: Decimal = Decimal::from_parts(47, 0, 0, false, 0);
/// Iron percentage above which a load is medium priority
pub const MEDIUM_PRIORITY_IRON: Decimal = Decimal::from_parts(44, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingPriority {
    Low,
    Medium,
    High,
}

/// Richer iron goes through the plant first
pub fn processing_priority(chemistry: &Chemistry) -> ProcessingPriority {
    if chemistry.iron > HIGH_PRIORITY_IRON {
        ProcessingPriority::High
    } else if chemistry.iron > MEDIUM_PRIORITY_IRON {
        ProcessingPriority::Medium
    } else {
        ProcessingPriority::Low
    }
}

/// Whole minutes a load has waited since arrival, zero for future arrivals
pub fn queue_minutes(arrival_time: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - arrival_time).num_minutes().max(0)
}

/// `42m` under an hour, `3h 5m` beyond
pub fn format_queue_time(minutes: i64) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueEntry {
    pub load_id: Uuid,
    pub load_number: String,
    pub source: String,
    pub weight: Decimal,
    pub iron: Decimal,
    pub priority: ProcessingPriority,
    pub arrival_time: DateTime<Utc>,
    pub queue_minutes: i64,
    pub queue_time: String,
}

impl QueueEntry {
    pub fn new(load: &Load, now: DateTime<Utc>) -> Self {
        let minutes = queue_minutes(load.arrival_time, now);
        Self {
            load_id: load.id,
            load_number: load.load_number.clone(),
            source: load.source.clone(),
            weight: load.weight,
            iron: load.chemistry.iron,
            priority: processing_priority(&load.chemistry),
            arrival_time: load.arrival_time,
            queue_minutes: minutes,
            queue_time: format_queue_time(minutes),
        }
    }
}

/// Loads waiting for and going through the plant, in arrival order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProcessingQueue {
    pub pending: Vec<QueueEntry>,
    pub processing: Vec<QueueEntry>,
    pub processed_count: usize,
    pub pending_weight: Decimal,
}

pub fn processing_queue(loads: &[Load], now: DateTime<Utc>) -> ProcessingQueue {
    let mut ordered: Vec<&Load> = loads.iter().collect();
    ordered.sort_by_key(|load| load.arrival_time);

    let mut queue = ProcessingQueue::default();
    for load in ordered {
        match load.status {
            LoadStatus::Pending => {
                queue.pending_weight += load.weight;
                queue.pending.push(QueueEntry::new(load, now));
            }
            LoadStatus::Processing => queue.processing.push(QueueEntry::new(load, now)),
            LoadStatus::Processed => queue.processed_count += 1,
        }
    }
    queue
}
