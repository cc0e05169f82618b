use std::collections::HashSet;

use crate::domain::opportunity::LineItem;
use crate::domain::planning_config::OfferingMapping;

/// Counts the distinct simplified offerings on `line_items` that map to
/// `service_line`.
///
/// A line item counts when its `(internal_service, simplified_offering)` pair
/// appears in the service line's mappings. Offerings are compared
/// case-sensitively after trimming; blank offerings never count.
pub fn count_offerings(
    line_items: &[LineItem],
    service_line: &str,
    mappings: &[OfferingMapping],
) -> usize {
    let pairs: HashSet<(&str, &str)> = mappings
        .iter()
        .filter(|mapping| mapping.service_line == service_line)
        .map(|mapping| {
            (
                mapping.internal_service.as_str(),
                mapping.simplified_offering.as_str(),
            )
        })
        .collect();
    if pairs.is_empty() {
        return 0;
    }

    line_items
        .iter()
        .filter(|item| {
            pairs.contains(&(
                item.internal_service.as_str(),
                item.simplified_offering.as_str(),
            ))
        })
        .map(|item| item.simplified_offering.trim())
        .filter(|offering| !offering.is_empty())
        .collect::<HashSet<_>>()
        .len()
}
