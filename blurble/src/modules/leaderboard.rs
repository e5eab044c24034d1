use crate::modules::models::{response::LeaderboardEntry, tables::LeaderboardRow};
use crate::modules::store::ScoreStore;
use blurble_libs::{perf, window};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::{cmp::Ordering, sync::Arc};

pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// Produces the ranked "best run per user, today" view. The view is
/// recomputed from the store on every call; nothing is cached.
pub struct LeaderboardAggregator<S> {
    store: Arc<S>,
}

impl<S> LeaderboardAggregator<S>
where
    S: ScoreStore + Send + Sync,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Top `n` users by best WPM within the day window containing `now`.
    pub async fn top_n(
        &self,
        now: DateTime<Utc>,
        n: usize,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        let window = window::day_window_at(now);
        let rows = self.store.leaderboard_rows(window.start, window.end).await?;
        Ok(rank(rows, n))
    }
}

/// Reduces raw window rows to the ranked leaderboard: one entry per user,
/// holding that user's maximum-WPM run (accuracy and played_at come from
/// that same run, not from independent maxima), WPM descending, truncated
/// to `n`. Ties are broken by earlier played_at, then username, so the
/// ordering is deterministic.
pub fn rank(rows: Vec<LeaderboardRow>, n: usize) -> Vec<LeaderboardEntry> {
    let mut best: Vec<LeaderboardRow> = rows
        .into_iter()
        .into_group_map_by(|row| row.user_id)
        .into_values()
        .filter_map(best_run)
        .collect();

    best.sort_by(|a, b| {
        b.wpm
            .total_cmp(&a.wpm)
            .then_with(|| a.played_at.cmp(&b.played_at))
            .then_with(|| a.username.cmp(&b.username))
    });
    best.truncate(n);

    best.into_iter()
        .map(|row| LeaderboardEntry {
            time: row
                .quote_length
                .and_then(|length| perf::elapsed_seconds(length as usize, row.wpm))
                .map(|seconds| (seconds * 10.0).round() / 10.0),
            username: row.username,
            wpm: row.wpm,
            accuracy: row.accuracy,
            played_at: row.played_at,
        })
        .collect()
}

/// A user's best run: maximum WPM, earliest run on an exact WPM tie.
fn best_run(runs: Vec<LeaderboardRow>) -> Option<LeaderboardRow> {
    runs.into_iter().reduce(|best, run| match run.wpm.total_cmp(&best.wpm) {
        Ordering::Greater => run,
        Ordering::Equal if run.played_at < best.played_at => run,
        _ => best,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::models::tables::{
        AllTimeStats, BestScores, HistoryRow, HistoryStats, ScoreRecord,
    };
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};

    fn played(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 15, 0, 0).unwrap() + Duration::minutes(minute)
    }

    fn row(
        user_id: i64,
        username: &str,
        wpm: f64,
        accuracy: f64,
        minute: i64,
        quote_length: Option<i32>,
    ) -> LeaderboardRow {
        LeaderboardRow {
            user_id,
            username: String::from(username),
            wpm,
            accuracy,
            played_at: played(minute),
            quote_length,
        }
    }

    #[test]
    fn test_one_entry_per_user_at_max_wpm() {
        let rows = vec![
            row(1, "alice", 90.0, 97.0, 0, None),
            row(2, "bob", 95.0, 92.0, 1, None),
            row(1, "alice", 80.0, 99.0, 2, None),
            row(2, "bob", 70.0, 100.0, 3, None),
        ];

        let entries = rank(rows, 10);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].username, "bob");
        assert_eq!(entries[0].wpm, 95.0);
        assert_eq!(entries[1].username, "alice");
        assert_eq!(entries[1].wpm, 90.0);
    }

    #[test]
    fn test_accuracy_is_paired_with_the_winning_run() {
        // alice's best accuracy (99) is on a slower run; the entry must
        // report the accuracy of the 90 wpm run instead.
        let rows = vec![
            row(1, "alice", 90.0, 97.0, 0, None),
            row(1, "alice", 80.0, 99.0, 2, None),
        ];

        let entries = rank(rows, 10);
        assert_eq!(entries[0].accuracy, 97.0);
        assert_eq!(entries[0].played_at, played(0));
    }

    #[test]
    fn test_equal_wpm_rerun_does_not_displace_earlier_run() {
        let rows = vec![
            row(1, "alice", 90.0, 95.0, 5, None),
            row(1, "alice", 90.0, 98.0, 1, None),
        ];

        let entries = rank(rows, 10);
        assert_eq!(entries[0].played_at, played(1));
        assert_eq!(entries[0].accuracy, 98.0);
    }

    #[test]
    fn test_cross_user_ties_break_by_time_then_name() {
        let rows = vec![
            row(3, "carol", 90.0, 95.0, 2, None),
            row(1, "alice", 90.0, 95.0, 2, None),
            row(2, "bob", 90.0, 95.0, 1, None),
        ];

        let entries = rank(rows, 10);
        let names: Vec<&str> = entries.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice", "carol"]);
    }

    #[test]
    fn test_truncates_to_n() {
        let rows = (1..=15)
            .map(|i| row(i, &format!("user{:02}", i), 50.0 + i as f64, 90.0, i, None))
            .collect();

        let entries = rank(rows, 10);
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].wpm, 65.0);
        assert_eq!(entries[9].wpm, 56.0);
    }

    #[test]
    fn test_time_derived_from_quote_length() {
        // 200 chars at 80 wpm => 30s; quote-less run omits the field
        let rows = vec![
            row(1, "alice", 80.0, 97.0, 0, Some(200)),
            row(2, "bob", 60.0, 95.0, 1, None),
        ];

        let entries = rank(rows, 10);
        assert_eq!(entries[0].time, Some(30.0));
        assert_eq!(entries[1].time, None);
    }

    #[test]
    fn test_empty_window_is_an_empty_board() {
        assert!(rank(vec![], 10).is_empty());
    }

    struct FixedStore {
        rows: Vec<LeaderboardRow>,
    }

    #[async_trait]
    impl ScoreStore for FixedStore {
        async fn insert(
            &self,
            _user_id: i64,
            _wpm: f64,
            _accuracy: f64,
            _quote_id: Option<i64>,
        ) -> Result<i64, sqlx::Error> {
            unreachable!()
        }

        async fn query_range(
            &self,
            _user_id: i64,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<ScoreRecord>, sqlx::Error> {
            unreachable!()
        }

        async fn leaderboard_rows(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<LeaderboardRow>, sqlx::Error> {
            Ok(self
                .rows
                .iter()
                .filter(|row| row.played_at >= start && row.played_at <= end)
                .cloned()
                .collect())
        }

        async fn aggregate_best(
            &self,
            _user_id: i64,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<BestScores, sqlx::Error> {
            unreachable!()
        }

        async fn all_time_stats(&self, _user_id: i64) -> Result<AllTimeStats, sqlx::Error> {
            unreachable!()
        }

        async fn recent_with_quotes(
            &self,
            _user_id: i64,
            _limit: i64,
        ) -> Result<Vec<HistoryRow>, sqlx::Error> {
            unreachable!()
        }

        async fn history_stats(&self, _user_id: i64) -> Result<HistoryStats, sqlx::Error> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn test_top_n_scopes_to_the_current_day_window() {
        // one run well inside today's window, one the local day before
        let store = Arc::new(FixedStore {
            rows: vec![
                row(1, "alice", 90.0, 97.0, 0, None),
                LeaderboardRow {
                    user_id: 2,
                    username: String::from("bob"),
                    wpm: 120.0,
                    accuracy: 99.0,
                    played_at: played(0) - Duration::days(1),
                    quote_length: None,
                },
            ],
        });

        let aggregator = LeaderboardAggregator::new(store);
        let entries = aggregator
            .top_n(played(30), DEFAULT_LEADERBOARD_SIZE)
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].username, "alice");
    }
}
