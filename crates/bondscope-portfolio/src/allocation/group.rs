//! Generic grouping engine behind every allocation view.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::config::{AggregationConfig, WeightingMethod};
use bondscope_core::safe::{safe_mean, safe_number, safe_percentage, safe_ratio};
use bondscope_core::{Portfolio, Position};

/// One slice of an allocation view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationGroup {
    /// Group label.
    pub key: String,

    /// Summed market value of members.
    pub value: Decimal,

    /// Share of the portfolio total value (0-100).
    pub percentage: f64,

    /// Number of member positions.
    pub count: usize,

    /// Average member yield, in percent.
    pub avg_yield: f64,

    /// Average member duration, in years.
    pub avg_duration: f64,

    /// Chart color for this group.
    pub color: Rgb,
}

/// Groups positions by `classifier`, reduces each group and sorts by value
/// descending. Ties keep first-encountered order.
pub(crate) fn group_positions<K, C>(
    portfolio: &Portfolio,
    classifier: K,
    colorize: C,
    config: &AggregationConfig,
) -> Vec<AllocationGroup>
where
    K: Fn(&Position) -> String,
    C: Fn(&str) -> Rgb,
{
    if portfolio.is_empty() {
        return Vec::new();
    }

    // Insertion-ordered grouping (index into `groups` by key)
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&Position>)> = Vec::new();
    for position in &portfolio.positions {
        let key = classifier(position);
        match slots.get(&key) {
            Some(&slot) => groups[slot].1.push(position),
            None => {
                slots.insert(key.clone(), groups.len());
                groups.push((key, vec![position]));
            }
        }
    }

    let mut reduced: Vec<AllocationGroup> = groups
        .into_iter()
        .map(|(key, members)| {
            let color = colorize(&key);
            reduce_group(key, &members, portfolio.total_value, color, config.weighting)
        })
        .collect();

    // sort_by is stable, which preserves first-encountered order on ties
    reduced.sort_by(|a, b| b.value.cmp(&a.value));
    reduced
}

fn reduce_group(
    key: String,
    members: &[&Position],
    total_value: Decimal,
    color: Rgb,
    weighting: WeightingMethod,
) -> AllocationGroup {
    let value: Decimal = members.iter().map(|p| p.market_value).sum();

    AllocationGroup {
        percentage: safe_percentage(value, total_value),
        count: members.len(),
        avg_yield: average(members, weighting, |p| p.bond.yield_to_maturity),
        avg_duration: average(members, weighting, |p| p.bond.duration),
        key,
        value,
        color,
    }
}

fn average<F>(members: &[&Position], weighting: WeightingMethod, metric: F) -> f64
where
    F: Fn(&Position) -> f64,
{
    let equal = || safe_mean(members.iter().map(|&p| metric(p)));

    match weighting {
        WeightingMethod::EqualWeight => equal(),
        WeightingMethod::MarketValue => {
            let (sum, weight) = members.iter().fold((0.0, 0.0), |(sum, weight), &p| {
                let mv = p.market_value_f64();
                (sum + safe_number(metric(p)) * mv, weight + mv)
            });
            if weight > 0.0 {
                safe_ratio(sum, weight)
            } else {
                equal()
            }
        }
    }
}
