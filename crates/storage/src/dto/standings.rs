use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::result::ResultView;

/// One row of the house ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HouseStanding {
    pub rank: u32,
    pub house_id: i64,
    pub name: String,
    pub color: Option<String>,
    pub points: i64,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MedalTally {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl MedalTally {
    pub fn from_standings(standings: &[HouseStanding]) -> Self {
        standings.iter().fold(Self::default(), |acc, row| Self {
            gold: acc.gold + row.gold,
            silver: acc.silver + row.silver,
            bronze: acc.bronze + row.bronze,
        })
    }
}

/// Everything the live display needs in a single poll.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreboardResponse {
    pub standings: Vec<HouseStanding>,
    pub medal_totals: MedalTally,
    pub recent_results: Vec<ResultView>,
}
