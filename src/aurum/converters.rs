// ABOUTME: Maps actual records joined with catalog metadata into heat usage metrics
// ABOUTME: Filters by enabled collector, skips records whose type has no catalog source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use mijnaurum_core::constants::metric::{self, fields, tags};
use mijnaurum_core::models::{ActualRecord, Collector, Metric, Source};

use super::sources::SourceCatalog;
use crate::logging::CollectorLogger;

/// Metrics produced from one batch of actual records, with skip counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingOutcome {
    /// One metric per mapped record, in record order
    pub metrics: Vec<Metric>,
    /// Records whose type is not an enabled collector
    pub filtered: usize,
    /// Records of an enabled type without a catalog source of that type
    pub unmapped: usize,
}

/// Join actual records with catalog metadata
///
/// Numeric values are copied unchanged. A record whose type has no catalog
/// source is dropped and counted, not reported as an error.
#[must_use]
pub fn map_to_metrics(
    records: &[ActualRecord],
    catalog: &SourceCatalog,
    collectors: &BTreeSet<Collector>,
    timestamp: DateTime<Utc>,
) -> MappingOutcome {
    let mut outcome = MappingOutcome::default();

    for record in records {
        if !collectors.iter().any(|c| c.matches(&record.source_type)) {
            outcome.filtered += 1;
            continue;
        }

        let Some(source) = catalog.find_by_type(&record.source_type) else {
            CollectorLogger::log_unmapped_record(&record.source_id, &record.source_type);
            outcome.unmapped += 1;
            continue;
        };

        outcome.metrics.push(to_metric(record, source, timestamp));
    }

    outcome
}

/// Build one metric from a record and its metadata donor
#[must_use]
pub fn to_metric(record: &ActualRecord, source: &Source, timestamp: DateTime<Utc>) -> Metric {
    Metric::new(metric::NAME, timestamp)
        .with_tag(tags::SOURCE, record.source_id.as_str())
        .with_tag(tags::SOURCE_TYPE, record.source_type.as_str())
        .with_tag(tags::RATE_UNIT, source.rate_unit.as_str())
        .with_tag(tags::UNIT, source.unit.as_str())
        .with_tag(tags::METER_ID, source.meter_id.as_str())
        .with_tag(tags::LOCATION_ID, source.location_id.as_str())
        .with_field(fields::DAY_VALUE, record.this_day.value)
        .with_field(fields::DAY_COST, record.this_day.cost)
        .with_field(fields::WEEK_VALUE, record.this_week.value)
        .with_field(fields::WEEK_COST, record.this_week.cost)
        .with_field(fields::MONTH_VALUE, record.this_month.value)
        .with_field(fields::MONTH_COST, record.this_month.cost)
        .with_field(fields::YEAR_VALUE, record.this_year.value)
        .with_field(fields::YEAR_COST, record.this_year.cost)
}
