use std::cmp::Ordering;
use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::dto::standings::HouseStanding;
use crate::error::Result;
use crate::models::{Event, EventResult, House, PointsPolicy};

/// Everything the ranking is computed from, read in one transaction.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub houses: Vec<House>,
    pub events: Vec<Event>,
    pub results: Vec<EventResult>,
}

impl StoreSnapshot {
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        let mut tx = pool.begin().await?;

        let houses = sqlx::query_as::<_, House>("SELECT id, name, color FROM houses")
            .fetch_all(&mut *tx)
            .await?;

        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, COALESCE(category, '') AS category,
                   COALESCE(gender, '') AS gender, points_json
            FROM events
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let results = sqlx::query_as::<_, EventResult>(
            r#"
            SELECT id, event_id, house_id, position, performance, created_at
            FROM results
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            houses = houses.len(),
            events = events.len(),
            results = results.len(),
            "Store snapshot loaded"
        );

        Ok(Self {
            houses,
            events,
            results,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    points: i64,
    gold: u32,
    silver: u32,
    bronze: u32,
}

/// Ranks every house in the snapshot.
///
/// Each result earns its event's points for the position (zero when the
/// policy has no entry, or the event is unknown) and counts as gold, silver
/// or bronze for positions 1 to 3. Houses are ordered by points, then gold,
/// silver and bronze, all descending, then by name. Houses without results
/// are included with zero totals.
pub fn rank_houses(snapshot: &StoreSnapshot) -> Vec<HouseStanding> {
    let policies: HashMap<i64, PointsPolicy> = snapshot
        .events
        .iter()
        .map(|event| (event.id, event.policy().policy))
        .collect();

    let mut tallies: HashMap<i64, Tally> = snapshot
        .houses
        .iter()
        .map(|house| (house.id, Tally::default()))
        .collect();

    for result in &snapshot.results {
        let Some(tally) = tallies.get_mut(&result.house_id) else {
            continue;
        };

        let points = policies
            .get(&result.event_id)
            .map_or(0, |policy| policy.points_for(result.position));
        tally.points = tally.points.saturating_add(points);

        match result.position {
            1 => tally.gold += 1,
            2 => tally.silver += 1,
            3 => tally.bronze += 1,
            _ => {}
        }
    }

    let mut standings: Vec<HouseStanding> = snapshot
        .houses
        .iter()
        .map(|house| {
            let tally = tallies.get(&house.id).copied().unwrap_or_default();
            HouseStanding {
                rank: 0,
                house_id: house.id,
                name: house.name.clone(),
                color: house.color.clone(),
                points: tally.points,
                gold: tally.gold,
                silver: tally.silver,
                bronze: tally.bronze,
            }
        })
        .collect();

    standings.sort_by(compare_standings);

    for (index, standing) in standings.iter_mut().enumerate() {
        standing.rank = index as u32 + 1;
    }

    standings
}

fn compare_standings(a: &HouseStanding, b: &HouseStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.gold.cmp(&a.gold))
        .then(b.silver.cmp(&a.silver))
        .then(b.bronze.cmp(&a.bronze))
        .then_with(|| a.name.cmp(&b.name))
}

/// Recomputes the ranking from the current store contents.
pub async fn compute_standings(pool: &SqlitePool) -> Result<Vec<HouseStanding>> {
    let snapshot = StoreSnapshot::load(pool).await?;
    Ok(rank_houses(&snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(id: i64, name: &str) -> House {
        House {
            id,
            name: name.to_string(),
            color: None,
        }
    }

    fn event(id: i64, points_json: Option<&str>) -> Event {
        Event {
            id,
            name: format!("event-{id}"),
            category: "Balapan".to_string(),
            gender: "L".to_string(),
            points_json: points_json.map(String::from),
        }
    }

    fn result(id: i64, event_id: i64, house_id: i64, position: i64) -> EventResult {
        EventResult {
            id,
            event_id,
            house_id,
            position,
            performance: None,
            created_at: None,
        }
    }

    fn names(standings: &[HouseStanding]) -> Vec<&str> {
        standings.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_default_policy_scenario() {
        let snapshot = StoreSnapshot {
            houses: vec![house(1, "Red"), house(2, "Blue")],
            events: vec![event(1, None)],
            results: vec![result(1, 1, 1, 1), result(2, 1, 2, 2)],
        };

        let standings = rank_houses(&snapshot);

        assert_eq!(names(&standings), vec!["Red", "Blue"]);
        assert_eq!(standings[0].points, 5);
        assert_eq!(standings[0].gold, 1);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].points, 3);
        assert_eq!(standings[1].silver, 1);
        assert_eq!(standings[1].rank, 2);
    }

    #[test]
    fn test_houses_without_results_are_listed() {
        let snapshot = StoreSnapshot {
            houses: vec![house(1, "Merah"), house(2, "Biru"), house(3, "Hijau")],
            events: vec![event(1, None)],
            results: vec![result(1, 1, 2, 1)],
        };

        let standings = rank_houses(&snapshot);

        assert_eq!(standings.len(), 3);
        assert_eq!(standings[0].name, "Biru");
        assert!(standings[1..].iter().all(|s| s.points == 0 && s.gold == 0));
    }

    #[test]
    fn test_medals_break_points_ties() {
        // A: two silvers (6), B: one gold + one fourth with custom points (6)
        let snapshot = StoreSnapshot {
            houses: vec![house(1, "A"), house(2, "B")],
            events: vec![
                event(1, None),
                event(2, None),
                event(3, Some(r#"{"1": 5, "2": 3, "3": 1, "4": 1}"#)),
            ],
            results: vec![
                result(1, 1, 1, 2),
                result(2, 2, 1, 2),
                result(3, 1, 2, 1),
                result(4, 3, 2, 4),
            ],
        };

        let standings = rank_houses(&snapshot);

        assert_eq!(standings[0].points, standings[1].points);
        assert_eq!(names(&standings), vec!["B", "A"]);
        assert_eq!(standings[0].gold, 1);
        assert_eq!(standings[0].bronze, 0);
    }

    #[test]
    fn test_full_ties_are_adjacent_and_ordered_by_name() {
        // Zulu and Bravo both finish on 10 points, 2 gold, 0 silver, 0 bronze.
        let snapshot = StoreSnapshot {
            houses: vec![
                house(1, "Zulu"),
                house(2, "Mid"),
                house(3, "Alpha"),
                house(4, "Bravo"),
            ],
            events: vec![
                event(1, Some(r#"{"1": 5}"#)),
                event(2, Some(r#"{"1": 5}"#)),
                event(3, Some(r#"{"1": 10}"#)),
                event(4, Some("{}")),
            ],
            results: vec![
                result(1, 1, 1, 1),
                result(2, 2, 1, 1),
                result(3, 1, 3, 2),
                result(4, 2, 3, 2),
                result(5, 1, 2, 3),
                result(6, 3, 4, 1),
                result(7, 4, 4, 1),
            ],
        };

        let standings = rank_houses(&snapshot);

        assert_eq!(names(&standings), vec!["Bravo", "Zulu", "Alpha", "Mid"]);
        for row in &standings[..2] {
            assert_eq!((row.points, row.gold, row.silver, row.bronze), (10, 2, 0, 0));
        }
        assert_eq!((standings[0].rank, standings[1].rank), (1, 2));
    }

    #[test]
    fn test_positions_beyond_third_only_score_points() {
        let snapshot = StoreSnapshot {
            houses: vec![house(1, "Red")],
            events: vec![event(1, Some(r#"{"4": 2, "5": "1"}"#))],
            results: vec![result(1, 1, 1, 4)],
        };

        let standings = rank_houses(&snapshot);

        assert_eq!(standings[0].points, 2);
        assert_eq!(
            (standings[0].gold, standings[0].silver, standings[0].bronze),
            (0, 0, 0)
        );
    }

    #[test]
    fn test_malformed_policy_scores_with_default() {
        let snapshot = StoreSnapshot {
            houses: vec![house(1, "Red")],
            events: vec![event(1, Some("{oops"))],
            results: vec![result(1, 1, 1, 1)],
        };

        assert_eq!(rank_houses(&snapshot)[0].points, 5);
    }

    #[test]
    fn test_dangling_references_do_not_abort_ranking() {
        let snapshot = StoreSnapshot {
            houses: vec![house(1, "Red")],
            events: vec![event(1, None)],
            results: vec![result(1, 99, 1, 1), result(2, 1, 42, 2)],
        };

        let standings = rank_houses(&snapshot);

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].points, 0);
        assert_eq!(standings[0].gold, 1);
    }

    #[test]
    fn test_empty_store_ranks_nothing() {
        assert!(rank_houses(&StoreSnapshot::default()).is_empty());
    }
}
