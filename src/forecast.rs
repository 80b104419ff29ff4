//! Revenue forecasting over invoice history.
//!
//! Buckets invoices by calendar month and projects forward with fixed
//! multiplicative heuristics. The multipliers are deliberately simple and are
//! part of the behavior contract — this is not a statistical model.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::lifecycle::{BookingRecord, InvoiceRecord, JobRecord, Stage};

/// Multiplier applied to the latest month's revenue for the monthly
/// projection. (1.05)
pub const GROWTH_MULTIPLIER: Decimal = Decimal::from_parts(105, 0, 0, false, 2);
/// Days assumed per month by the average-job-value fallback projection.
pub const FALLBACK_DAYS_PER_MONTH: u32 = 30;
pub const MONTHS_PER_QUARTER: u32 = 3;
pub const MONTHS_PER_YEAR: u32 = 12;

/// Revenue accumulated for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub month: String,
    pub revenue: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    /// Sparse, chronological: only months with at least one invoice appear.
    pub monthly: Vec<MonthlyBucket>,
    /// Month-over-month revenue growth of the final two buckets, one decimal
    /// place. Zero when fewer than two months exist.
    pub growth_percent: Decimal,
    pub projected_monthly: Decimal,
    pub projected_quarterly: Decimal,
    pub projected_annual: Decimal,
    /// Sum of net amounts for jobs not yet closed.
    pub pipeline_value: Decimal,
    pub average_job_value: Decimal,
    /// Scheduled future arrivals known to the store.
    pub upcoming_bookings: usize,
}

/// Groups invoices into sparse monthly buckets keyed by `YYYY-MM`.
///
/// Keys sort lexicographically, which for this format is chronological, so
/// the returned vector is already in month order.
pub fn monthly_buckets(invoices: &[InvoiceRecord]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
    for invoice in invoices {
        let month = invoice.date.format("%Y-%m").to_string();
        let entry = buckets.entry(month).or_insert((Decimal::ZERO, 0));
        entry.0 += invoice.grand_total;
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(month, (revenue, count))| MonthlyBucket {
            month,
            revenue,
            count,
        })
        .collect()
}

/// Month-over-month growth of the final two buckets, as a percentage rounded
/// to one decimal place. Zero when fewer than two months exist or the
/// previous month had no revenue.
pub fn growth_percent(monthly: &[MonthlyBucket]) -> Decimal {
    let [.., prev, last] = monthly else {
        return Decimal::ZERO;
    };
    if prev.revenue.is_zero() {
        return Decimal::ZERO;
    }
    ((last.revenue - prev.revenue) / prev.revenue * Decimal::ONE_HUNDRED).round_dp(1)
}

/// Sum of net amounts for jobs that have not reached `CLOSED`.
pub fn pipeline_value(jobs: &[JobRecord]) -> Decimal {
    jobs.iter()
        .filter(|j| j.status != Stage::Closed)
        .map(|j| j.net_amount)
        .sum()
}

/// Mean net amount across all jobs; zero for an empty collection.
pub fn average_job_value(jobs: &[JobRecord]) -> Decimal {
    if jobs.is_empty() {
        return Decimal::ZERO;
    }
    jobs.iter().map(|j| j.net_amount).sum::<Decimal>() / Decimal::from(jobs.len() as u64)
}

/// Builds the full forecast report from a snapshot.
///
/// The monthly projection is the latest month's revenue times
/// [`GROWTH_MULTIPLIER`]; with no invoice history it falls back to a rough
/// daily-rate extrapolation from the average job value. Quarterly and annual
/// figures are fixed multiples of the monthly one.
pub fn project(
    jobs: &[JobRecord],
    invoices: &[InvoiceRecord],
    bookings: &[BookingRecord],
) -> ForecastReport {
    let monthly = monthly_buckets(invoices);
    let average = average_job_value(jobs);

    let projected_monthly = match monthly.last() {
        Some(last) => last.revenue * GROWTH_MULTIPLIER,
        None => average * Decimal::from(FALLBACK_DAYS_PER_MONTH),
    };

    ForecastReport {
        growth_percent: growth_percent(&monthly),
        projected_quarterly: projected_monthly * Decimal::from(MONTHS_PER_QUARTER),
        projected_annual: projected_monthly * Decimal::from(MONTHS_PER_YEAR),
        projected_monthly,
        pipeline_value: pipeline_value(jobs),
        average_job_value: average,
        upcoming_bookings: bookings.len(),
        monthly,
    }
}
