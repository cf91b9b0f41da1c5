//! Usage-based maintenance scheduling

use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{
    Equipment, MaintenancePriority, MaintenanceSchedule, MaintenanceTask, TaskStatistics,
    TaskStatus,
};
use crate::parameters::MaintenanceTables;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Days since last service beyond which a unit is high priority
pub const HIGH_PRIORITY_DAYS_SINCE: i64 = 30;
/// Days since last service beyond which a unit is medium priority
pub const MEDIUM_PRIORITY_DAYS_SINCE: i64 = 20;
/// Days to the next service at or below which a unit is high priority
pub const HIGH_PRIORITY_DAYS_UNTIL: i64 = 3;
/// Days to the next service at or below which a unit is medium priority
pub const MEDIUM_PRIORITY_DAYS_UNTIL: i64 = 7;
/// Longest lead time a proposal reports. Implausibly low daily usage
/// figures are capped here instead of overflowing the calendar.
pub const MAX_SCHEDULE_DAYS: i64 = 36_500;

/// Urgency from elapsed and remaining days. Higher urgency wins ties.
pub fn maintenance_priority(days_since_last: i64, days_until: i64) -> MaintenancePriority {
    if days_since_last > HIGH_PRIORITY_DAYS_SINCE || days_until <= HIGH_PRIORITY_DAYS_UNTIL {
        MaintenancePriority::High
    } else if days_since_last > MEDIUM_PRIORITY_DAYS_SINCE || days_until <= MEDIUM_PRIORITY_DAYS_UNTIL
    {
        MaintenancePriority::Medium
    } else {
        MaintenancePriority::Low
    }
}

/// Whole days from `from` to `to`, rounded down
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

impl MaintenanceTables {
    /// Running hours left before the next service is due
    pub fn hours_until_service(&self, equipment: &Equipment) -> Decimal {
        let interval = self.interval_for(&equipment.equipment_type);
        let into_cycle = equipment
            .usage_hours
            .checked_rem(interval)
            .unwrap_or(interval);
        interval - into_cycle
    }

    /// Average daily running hours, falling back when unknown or not positive
    pub fn daily_usage(&self, equipment: &Equipment) -> Decimal {
        equipment
            .avg_daily_usage
            .filter(|hours| *hours > Decimal::ZERO)
            .unwrap_or(self.default_daily_usage)
    }

    /// Propose the next service for `equipment` as seen at `now`
    pub fn schedule_for(&self, equipment: &Equipment, now: DateTime<Utc>) -> MaintenanceSchedule {
        let hours_until = self.hours_until_service(equipment);
        let days_until = hours_until
            .checked_div(self.daily_usage(equipment))
            .map(|days| days.ceil())
            .and_then(|days| days.to_i64())
            .map_or(MAX_SCHEDULE_DAYS, |days| days.min(MAX_SCHEDULE_DAYS));
        let next_maintenance = Duration::try_days(days_until)
            .and_then(|lead| now.checked_add_signed(lead))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let days_since_last = whole_days_between(equipment.last_maintenance, now);

        MaintenanceSchedule {
            equipment_id: equipment.id,
            equipment_name: equipment.name.clone(),
            equipment_type: equipment.equipment_type.clone(),
            usage_hours: equipment.usage_hours,
            next_maintenance,
            days_until_maintenance: days_until,
            days_since_last_maintenance: days_since_last,
            priority: maintenance_priority(days_since_last, days_until),
            estimated_duration: self.duration_for(&equipment.equipment_type),
        }
    }

    /// Proposals for every unit, most urgent first
    pub fn schedule_all(&self, equipment: &[Equipment], now: DateTime<Utc>) -> Vec<MaintenanceSchedule> {
        let mut schedule: Vec<MaintenanceSchedule> = equipment
            .iter()
            .map(|unit| self.schedule_for(unit, now))
            .collect();
        schedule.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.next_maintenance.cmp(&b.next_maintenance))
        });
        schedule
    }
}

/// Schedule under the default interval and duration tables
pub fn schedule_for(equipment: &Equipment, now: DateTime<Utc>) -> MaintenanceSchedule {
    MaintenanceTables::default().schedule_for(equipment, now)
}

/// Status, priority and overdue counts for `tasks` as seen at `now`
pub fn task_statistics(tasks: &[MaintenanceTask], now: DateTime<Utc>) -> TaskStatistics {
    let mut stats = TaskStatistics {
        total: tasks.len(),
        ..TaskStatistics::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Completed => stats.completed += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Scheduled => stats.scheduled += 1,
            TaskStatus::Cancelled => stats.cancelled += 1,
        }
        match task.priority {
            MaintenancePriority::High => stats.high_priority += 1,
            MaintenancePriority::Medium => stats.medium_priority += 1,
            MaintenancePriority::Low => stats.low_priority += 1,
        }
        if task.is_overdue(now) {
            stats.overdue += 1;
        }
    }

    stats
}
