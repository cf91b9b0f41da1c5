//! Aggregation of profit records into breakdowns and trends

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::profit::percent_of;
use crate::models::{
    CostBreakdown, OperationalCategory, OperationalCostTotals, ProcessingCostTotals,
    ProcessingStage, ProductClass, ProfitAggregate, ProfitRecord, ProfitSummary,
    RevenueBreakdown, StageImpact, TrendBucket,
};
use crate::types::{DateRange, TrendPeriod};

/// Sum every stage and category cost across `records`.
///
/// All known stages and categories are present, at zero when unused.
pub fn cost_breakdown(records: &[ProfitRecord]) -> CostBreakdown {
    let mut processing = ProcessingCostTotals {
        total: Decimal::ZERO,
        stages: ProcessingStage::ALL
            .into_iter()
            .map(|stage| (stage, Decimal::ZERO))
            .collect(),
    };
    let mut operational = OperationalCostTotals {
        total: Decimal::ZERO,
        categories: OperationalCategory::ALL
            .into_iter()
            .map(|category| (category, Decimal::ZERO))
            .collect(),
    };

    for record in records {
        for (stage, cost) in &record.processing_costs {
            *processing.stages.entry(*stage).or_default() += cost.cost;
            processing.total += cost.cost;
        }
        for (category, cost) in &record.operational_costs {
            *operational.categories.entry(*category).or_default() += cost.cost;
            operational.total += cost.cost;
        }
    }

    CostBreakdown {
        processing,
        operational,
    }
}

/// Sum revenue per product class across `records`
pub fn revenue_breakdown(records: &[ProfitRecord]) -> RevenueBreakdown {
    let mut breakdown = RevenueBreakdown::default();
    let revenue_of = |record: &ProfitRecord, class: ProductClass| {
        record
            .revenue_breakdown
            .get(&class)
            .map(|line| line.revenue)
            .unwrap_or_default()
    };

    for record in records {
        breakdown.primary_product += revenue_of(record, ProductClass::PrimaryProduct);
        breakdown.aggregate_product += revenue_of(record, ProductClass::AggregateProduct);
        breakdown.byproducts += revenue_of(record, ProductClass::Byproducts);
    }

    breakdown.total = breakdown.primary_product + breakdown.aggregate_product + breakdown.byproducts;
    breakdown
}

/// Bucket `records` by the UTC calendar date of their load.
///
/// Sums are accumulated first; averages are filled in once every record
/// has been added.
pub fn profit_trends(records: &[ProfitRecord], period: TrendPeriod) -> BTreeMap<String, TrendBucket> {
    let mut trends: BTreeMap<String, TrendBucket> = BTreeMap::new();

    for record in records {
        let key = period.bucket_key(record.date.date_naive());
        let bucket = trends.entry(key).or_default();
        bucket.profit += record.profit;
        bucket.revenue += record.total_revenue;
        bucket.cost += record.total_cost;
        bucket.volume += record.weight;
        bucket.count += 1;
    }

    for bucket in trends.values_mut() {
        bucket.avg_profit_per_tonne = bucket.profit.checked_div(bucket.volume);
        bucket.profit_margin = percent_of(bucket.profit, bucket.revenue);
    }

    trends
}

/// Headline totals for `records`
pub fn summarize(records: &[ProfitRecord]) -> ProfitSummary {
    let total_profit: Decimal = records.iter().map(|r| r.profit).sum();
    let total_revenue: Decimal = records.iter().map(|r| r.total_revenue).sum();
    let total_volume: Decimal = records.iter().map(|r| r.weight).sum();

    ProfitSummary {
        load_count: records.len(),
        total_profit,
        total_revenue,
        total_cost: records.iter().map(|r| r.total_cost).sum(),
        total_volume,
        avg_profit_per_tonne: total_profit.checked_div(total_volume),
        profit_margin: percent_of(total_profit, total_revenue),
    }
}

/// Records whose load date falls in `range`
pub fn filter_by_date_range(records: &[ProfitRecord], range: &DateRange) -> Vec<ProfitRecord> {
    records
        .iter()
        .filter(|record| range.contains_timestamp(record.date))
        .cloned()
        .collect()
}

/// Cost share of `stage` for every record
pub fn stage_impact(records: &[ProfitRecord], stage: ProcessingStage) -> Vec<StageImpact> {
    records
        .iter()
        .map(|record| {
            let stage_cost = record.processing_costs.get(&stage).cloned();
            let profit_impact = stage_cost
                .as_ref()
                .and_then(|cost| percent_of(cost.cost, record.total_cost));
            StageImpact {
                load_id: record.load_id,
                load_number: record.load_number.clone(),
                date: record.date,
                stage,
                stage_cost,
                total_cost: record.total_cost,
                profit_impact,
            }
        })
        .collect()
}

/// Summary, breakdowns and trends in one pass over `records`
pub fn aggregate(records: &[ProfitRecord], period: TrendPeriod) -> ProfitAggregate {
    ProfitAggregate {
        summary: summarize(records),
        cost_breakdown: cost_breakdown(records),
        revenue_breakdown: revenue_breakdown(records),
        trends: profit_trends(records, period),
    }
}
