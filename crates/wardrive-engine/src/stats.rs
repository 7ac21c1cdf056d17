use serde::Serialize;
use std::collections::HashMap;
use wardrive_types::AccessPointRecord;

/// Share of merged access points attributed to one vendor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorShare {
    pub vendor: String,
    pub count: usize,
    pub percent: f64,
}

/// Top `top_n` vendors by access point count.
///
/// Vendors with equal counts keep the order in which they were first seen.
pub fn vendor_distribution(records: &[AccessPointRecord], top_n: usize) -> Vec<VendorShare> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let count = counts.entry(record.vendor.as_str()).or_insert_with(|| {
            order.push(record.vendor.as_str());
            0
        });
        *count += 1;
    }

    let mut ranked: Vec<(&str, usize)> = order
        .into_iter()
        .map(|vendor| (vendor, counts[vendor]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let total = records.len();
    ranked
        .into_iter()
        .take(top_n)
        .map(|(vendor, count)| VendorShare {
            vendor: vendor.to_string(),
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect()
}
