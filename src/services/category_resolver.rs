use crate::domain::category::{TcvBand, UNCATEGORIZED};

/// Resolves a contract value to a band name.
///
/// Bands are visited in ascending `min_tcv` order and the last band that
/// contains the value wins, so among overlapping bands the one with the
/// highest `min_tcv` is chosen. Undefined, negative and non-finite values
/// resolve to [`UNCATEGORIZED`].
pub fn resolve_category<'a, B, I>(tcv: Option<f64>, bands: I) -> String
where
    B: TcvBand + 'a,
    I: IntoIterator<Item = &'a B>,
{
    let tcv = match tcv {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        _ => return UNCATEGORIZED.to_string(),
    };

    let mut sorted: Vec<&B> = bands.into_iter().collect();
    sorted.sort_by(|a, b| a.min_tcv().total_cmp(&b.min_tcv()));

    let mut matched: Option<&B> = None;
    for band in sorted {
        if band.contains(tcv) {
            matched = Some(band);
        }
    }

    matched
        .map(|band| band.band_name().to_string())
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

/// Pairs of band names whose ranges overlap by more than a shared boundary.
pub fn overlapping_bands<'a, B, I>(bands: I) -> Vec<(String, String)>
where
    B: TcvBand + 'a,
    I: IntoIterator<Item = &'a B>,
{
    let mut sorted: Vec<&B> = bands.into_iter().collect();
    sorted.sort_by(|a, b| a.min_tcv().total_cmp(&b.min_tcv()));

    let mut overlaps = Vec::new();
    for (idx, lower) in sorted.iter().enumerate() {
        for upper in &sorted[idx + 1..] {
            if lower.max_tcv().is_none_or(|max| max > upper.min_tcv()) {
                overlaps.push((
                    lower.band_name().to_string(),
                    upper.band_name().to_string(),
                ));
            }
        }
    }
    overlaps
}
