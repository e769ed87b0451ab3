use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Direction of a pass relative to the line of scrimmage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassLocation {
    Left,
    Middle,
    Right,
}

impl PassLocation {
    pub const ALL: [PassLocation; 3] = [Self::Left, Self::Middle, Self::Right];

    /// Value used by the provider's `pass_location` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }

    /// Position in [`PassLocation::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Self::Left),
            "middle" => Some(Self::Middle),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

impl fmt::Display for PassLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Air-yard depth bin of a pass.
///
/// Bins are left-inclusive and right-exclusive, except that the upper edge
/// of the deep bin (100) is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AirYardCategory {
    BehindLos,
    Short,
    Intermediate,
    Deep,
}

impl AirYardCategory {
    pub const ALL: [AirYardCategory; 4] =
        [Self::BehindLos, Self::Short, Self::Intermediate, Self::Deep];

    /// Bin edges: [-100, 0, 10, 20, 100].
    pub const EDGES: [f64; 5] = [-100.0, 0.0, 10.0, 20.0, 100.0];

    pub fn label(&self) -> &'static str {
        match self {
            Self::BehindLos => "Behind LOS",
            Self::Short => "Short [0-10)",
            Self::Intermediate => "Intermediate [10-20)",
            Self::Deep => "Deep [20+)",
        }
    }

    /// Assign a bin, or `None` when the value falls outside [-100, 100] or is NaN.
    pub fn from_air_yards(air_yards: f64) -> Option<Self> {
        let edges = Self::EDGES;
        if air_yards.is_nan() || air_yards < edges[0] || air_yards > edges[4] {
            return None;
        }
        let category = if air_yards < edges[1] {
            Self::BehindLos
        } else if air_yards < edges[2] {
            Self::Short
        } else if air_yards < edges[3] {
            Self::Intermediate
        } else {
            Self::Deep
        };
        Some(category)
    }
}

impl fmt::Display for AirYardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Passes thrown to one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationShare {
    pub location: PassLocation,
    pub count: usize,
    /// Percentage of attempts (0.0 - 100.0); `None` with zero attempts.
    pub percentage: Option<f64>,
}

/// Season statistics of the final (post-exclusion) pass set.
///
/// Every ratio is `None` when its denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassingSummary {
    pub total_passing_yards: f64,
    pub attempts: usize,
    pub completions: usize,
    pub incompletions: usize,
    /// Completions / attempts (0.0 - 1.0).
    pub completion_ratio: Option<f64>,
    pub yards_per_attempt: Option<f64>,
    pub yards_per_completion: Option<f64>,
    pub locations: Vec<LocationShare>,
    pub sacks: usize,
    /// Sacks / (attempts + sacks) (0.0 - 1.0).
    pub sack_rate: Option<f64>,
    pub run_leaning_passes: usize,
}

impl PassingSummary {
    pub fn location(&self, location: PassLocation) -> Option<&LocationShare> {
        self.locations.iter().find(|share| share.location == location)
    }
}

/// Cross-tabulation of pass counts by location and air-yard bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDepthTable {
    /// `counts[location][category]`, indexed by the `ALL` orderings.
    pub counts: [[usize; 4]; 3],
    /// Rows with a null location or null category.
    pub unclassified: usize,
}

impl LocationDepthTable {
    pub fn empty() -> Self {
        Self {
            counts: [[0; 4]; 3],
            unclassified: 0,
        }
    }

    pub fn add(&mut self, location: Option<PassLocation>, category: Option<AirYardCategory>) {
        match (location, category) {
            (Some(location), Some(category)) => {
                self.counts[location.index()][category_index(category)] += 1;
            }
            _ => self.unclassified += 1,
        }
    }

    pub fn get(&self, location: PassLocation, category: AirYardCategory) -> usize {
        self.counts[location.index()][category_index(category)]
    }

    /// Counts of one category across locations, in `PassLocation::ALL` order.
    pub fn category_series(&self, category: AirYardCategory) -> Vec<usize> {
        PassLocation::ALL
            .iter()
            .map(|location| self.get(*location, category))
            .collect()
    }

    pub fn classified_total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

fn category_index(category: AirYardCategory) -> usize {
    match category {
        AirYardCategory::BehindLos => 0,
        AirYardCategory::Short => 1,
        AirYardCategory::Intermediate => 2,
        AirYardCategory::Deep => 3,
    }
}

/// Qualifying passes in one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCount {
    pub week: i64,
    pub attempts: usize,
}

/// Everything a report run produced, suitable for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassingReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    pub season: u16,
    pub player: String,
    /// Offensive team label used in the chart title
    pub team: Option<String>,
    /// Name of the provider the season came from
    pub source: String,
    /// Rows in the season table as loaded
    pub plays_loaded: usize,
    /// Passing plays across the whole season
    pub season_pass_plays: usize,
    /// Passing plays by the player before exclusions
    pub dropbacks: usize,
    pub sacks: usize,
    pub run_leaning_passes: usize,
    /// Rows of the final table
    pub attempts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PassingSummary>,
    pub depth_by_location: LocationDepthTable,
    pub weekly_attempts: Vec<WeeklyCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_index_follows_all_order() {
        for (i, location) in PassLocation::ALL.iter().enumerate() {
            assert_eq!(location.index(), i);
        }
    }

    #[test]
    fn test_air_yard_bins() {
        assert_eq!(
            AirYardCategory::from_air_yards(-5.0),
            Some(AirYardCategory::BehindLos)
        );
        assert_eq!(
            AirYardCategory::from_air_yards(0.0),
            Some(AirYardCategory::Short)
        );
        assert_eq!(
            AirYardCategory::from_air_yards(10.0),
            Some(AirYardCategory::Intermediate)
        );
        assert_eq!(
            AirYardCategory::from_air_yards(25.0),
            Some(AirYardCategory::Deep)
        );
    }

    #[test]
    fn test_air_yard_bin_edges() {
        assert_eq!(
            AirYardCategory::from_air_yards(-100.0),
            Some(AirYardCategory::BehindLos)
        );
        assert_eq!(
            AirYardCategory::from_air_yards(9.99),
            Some(AirYardCategory::Short)
        );
        assert_eq!(
            AirYardCategory::from_air_yards(20.0),
            Some(AirYardCategory::Deep)
        );
        assert_eq!(
            AirYardCategory::from_air_yards(100.0),
            Some(AirYardCategory::Deep)
        );
        assert_eq!(AirYardCategory::from_air_yards(100.5), None);
        assert_eq!(AirYardCategory::from_air_yards(-101.0), None);
        assert_eq!(AirYardCategory::from_air_yards(f64::NAN), None);
    }

    #[test]
    fn test_pass_location_parse() {
        assert_eq!(PassLocation::parse("left"), Some(PassLocation::Left));
        assert_eq!(PassLocation::parse("middle"), Some(PassLocation::Middle));
        assert_eq!(PassLocation::parse("Right"), None);
        assert_eq!(PassLocation::Right.to_string(), "right");
    }

    #[test]
    fn test_location_depth_table() {
        let mut table = LocationDepthTable::empty();
        table.add(Some(PassLocation::Left), Some(AirYardCategory::Short));
        table.add(Some(PassLocation::Left), Some(AirYardCategory::Short));
        table.add(Some(PassLocation::Right), Some(AirYardCategory::Deep));
        table.add(None, Some(AirYardCategory::Deep));

        assert_eq!(table.get(PassLocation::Left, AirYardCategory::Short), 2);
        assert_eq!(table.category_series(AirYardCategory::Deep), vec![0, 0, 1]);
        assert_eq!(table.classified_total(), 3);
        assert_eq!(table.unclassified, 1);
    }
}
