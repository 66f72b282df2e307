use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoffeeBrand {
    pub brand: String,
    pub popularity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnackBrand {
    pub name: String,
    pub share: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMood {
    pub week: String,
    pub happy: f64,
    pub tired: f64,
    pub stressed: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeeklyWorkout {
    pub week: String,
    pub running: f64,
    pub cycling: f64,
    pub stretching: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoffeeConsumptionSeries {
    pub cups: f64,
    pub bugs: f64,
    pub productivity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoffeeConsumptionTeam {
    pub team: String,
    pub series: Vec<CoffeeConsumptionSeries>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoffeeConsumption {
    pub teams: Vec<CoffeeConsumptionTeam>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnackImpactMetrics {
    pub snacks: f64,
    pub meetings_missed: f64,
    pub morale: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnackImpactDepartment {
    pub name: String,
    pub metrics: Vec<SnackImpactMetrics>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnackImpact {
    pub departments: Vec<SnackImpactDepartment>,
}

/// Display settings for one series of a chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub key: String,
    pub label: String,
    pub color: String,
    pub visible: bool,
}

pub const COLOR_PALETTE: [&str; 10] = [
    "#3b82f6", "#22c55e", "#eab308", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
    "#06b6d4", "#84cc16",
];

/// Builds visible series configs, coloring them from the palette in order.
pub fn default_series<'a>(series: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<SeriesConfig> {
    series
        .into_iter()
        .enumerate()
        .map(|(i, (key, label))| SeriesConfig {
            key: key.to_string(),
            label: label.to_string(),
            color: COLOR_PALETTE[i % COLOR_PALETTE.len()].to_string(),
            visible: true,
        })
        .collect()
}
