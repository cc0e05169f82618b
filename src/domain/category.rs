/// Name reported when no band matches a contract value.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A named TCV range. Both bounds are inclusive; a missing upper bound is
/// unbounded.
pub trait TcvBand {
    fn band_name(&self) -> &str;
    fn min_tcv(&self) -> f64;
    fn max_tcv(&self) -> Option<f64>;

    fn contains(&self, tcv: f64) -> bool {
        tcv >= self.min_tcv() && self.max_tcv().is_none_or(|max| tcv <= max)
    }
}

/// Opportunity-level category, used to look up stage durations.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub min_tcv: f64,
    pub max_tcv: Option<f64>,
}

impl TcvBand for Category {
    fn band_name(&self) -> &str {
        &self.name
    }

    fn min_tcv(&self) -> f64 {
        self.min_tcv
    }

    fn max_tcv(&self) -> Option<f64> {
        self.max_tcv
    }
}

/// Resource category of one service line, used to look up FTE requirements.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceLineCategory {
    pub service_line: String,
    pub name: String,
    pub min_tcv: f64,
    pub max_tcv: Option<f64>,
}

impl TcvBand for ServiceLineCategory {
    fn band_name(&self) -> &str {
        &self.name
    }

    fn min_tcv(&self) -> f64 {
        self.min_tcv
    }

    fn max_tcv(&self) -> Option<f64> {
        self.max_tcv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_contains_both_bounds() {
        let band = Category {
            name: "Medium".to_string(),
            min_tcv: 5.0,
            max_tcv: Some(20.0),
        };
        assert!(band.contains(5.0));
        assert!(band.contains(20.0));
        assert!(!band.contains(4.99));
        assert!(!band.contains(20.01));
    }

    #[test]
    fn band_without_upper_bound_is_open_ended() {
        let band = Category {
            name: "Mega".to_string(),
            min_tcv: 100.0,
            max_tcv: None,
        };
        assert!(band.contains(100.0));
        assert!(band.contains(1.0e9));
    }
}
