use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Endpoint {
    Login,
    Posts,
    Post(String),
    TopCoffeeBrands,
    PopularSnackBrands,
    WeeklyMoodTrend,
    WeeklyWorkoutTrend,
    CoffeeConsumption,
    SnackImpact,
}

impl Endpoint {
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self)
    }

    pub fn is_mock(&self) -> bool {
        matches!(
            self,
            Self::TopCoffeeBrands
                | Self::PopularSnackBrands
                | Self::WeeklyMoodTrend
                | Self::WeeklyWorkoutTrend
                | Self::CoffeeConsumption
                | Self::SnackImpact
        )
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "/auth/login"),
            Self::Posts => write!(f, "/posts"),
            Self::Post(id) => write!(f, "/posts/{}", id),
            Self::TopCoffeeBrands => write!(f, "/mock/top-coffee-brands"),
            Self::PopularSnackBrands => write!(f, "/mock/popular-snack-brands"),
            Self::WeeklyMoodTrend => write!(f, "/mock/weekly-mood-trend"),
            Self::WeeklyWorkoutTrend => write!(f, "/mock/weekly-workout-trend"),
            Self::CoffeeConsumption => write!(f, "/mock/coffee-consumption"),
            Self::SnackImpact => write!(f, "/mock/snack-impact"),
        }
    }
}
