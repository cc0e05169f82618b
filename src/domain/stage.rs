use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed sales-process stages, in process order.
///
/// The derived `Ord` follows declaration order, so comparing two stages
/// compares their position in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "01")]
    Stage01,
    #[serde(rename = "02")]
    Stage02,
    #[serde(rename = "03")]
    Stage03,
    #[serde(rename = "04A")]
    Stage04A,
    #[serde(rename = "04B")]
    Stage04B,
    #[serde(rename = "05A")]
    Stage05A,
    #[serde(rename = "05B")]
    Stage05B,
    #[serde(rename = "06")]
    Stage06,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Stage01,
        Stage::Stage02,
        Stage::Stage03,
        Stage::Stage04A,
        Stage::Stage04B,
        Stage::Stage05A,
        Stage::Stage05B,
        Stage::Stage06,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Stage::Stage01 => "01",
            Stage::Stage02 => "02",
            Stage::Stage03 => "03",
            Stage::Stage04A => "04A",
            Stage::Stage04B => "04B",
            Stage::Stage05A => "05A",
            Stage::Stage05B => "05B",
            Stage::Stage06 => "06",
        }
    }

    pub fn name(self) -> String {
        format!("Stage {}", self.code())
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Parses a stage code as it appears in CRM exports.
    ///
    /// Accepts a bare code (`"04A"`), a lowercase code (`"04a"`), a prefixed
    /// code (`"Stage 04A"`) and a code followed by a description
    /// (`"04A - Qualify"`).
    pub fn from_code(value: &str) -> Option<Stage> {
        let trimmed = value.trim();
        let without_prefix = match trimmed.get(..5) {
            Some(prefix) if prefix.eq_ignore_ascii_case("stage") => trimmed[5..].trim_start(),
            _ => trimmed,
        };
        let code = without_prefix
            .split(|c: char| c.is_whitespace() || c == '-' || c == ':')
            .next()
            .unwrap_or_default();

        Stage::ALL
            .into_iter()
            .find(|stage| stage.code().eq_ignore_ascii_case(code))
    }

    /// Stages at or after `current`, in process order.
    ///
    /// `None` means every stage remains.
    pub fn remaining_from(current: Option<Stage>) -> &'static [Stage] {
        match current {
            Some(stage) => &Stage::ALL[stage.index()..],
            None => &Stage::ALL,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
