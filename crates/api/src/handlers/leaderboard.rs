//! Public leaderboards.

use axum::extract::State;
use lisan_core::pagination::PageRequest;
use lisan_core::support::{rank_for, validate_period, PERIOD_ALL_TIME};
use lisan_db::models::leaderboard::{
    LeaderboardMetric, LeaderboardUser, PeriodicLeaderboardRow, StreakLeaderboardRow,
};
use lisan_db::repositories::LeaderboardRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppQuery;
use crate::query::{LimitParams, PageParams};
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

const DEFAULT_STREAK_LIMIT: i64 = 10;
const MAX_STREAK_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct MetricParams {
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    pub period: Option<String>,
}

/// A leaderboard row with its 1-based position.
#[derive(Debug, Serialize)]
pub struct Ranked<T: Serialize> {
    pub rank: i64,
    #[serde(flatten)]
    pub entry: T,
}

fn parse_metric(sort: Option<&str>) -> AppResult<LeaderboardMetric> {
    match sort {
        None | Some("xp") => Ok(LeaderboardMetric::Xp),
        Some("total_xp") => Ok(LeaderboardMetric::TotalXp),
        Some(other) => Err(AppError::BadRequest(format!(
            "Invalid sort '{other}'. Must be one of: xp, total_xp"
        ))),
    }
}

fn rank_rows<T: Serialize>(rows: Vec<T>, offset: i64) -> Vec<Ranked<T>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, entry)| Ranked {
            rank: rank_for(offset, index),
            entry,
        })
        .collect()
}

fn ranked_page<T: Serialize>(
    rows: Vec<T>,
    page: &PageRequest,
    total: i64,
) -> Paginated<Ranked<T>> {
    Paginated::new(rank_rows(rows, page.offset()), page, total)
}

/// GET /api/v1/leaderboard?sort=xp|total_xp
pub async fn live(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<MetricParams>,
) -> AppResult<ApiResponse<Paginated<Ranked<LeaderboardUser>>>> {
    let page = page.to_request()?;
    let metric = parse_metric(params.sort.as_deref())?;

    let rows = LeaderboardRepo::live(&state.pool, metric, &page).await?;
    let total = LeaderboardRepo::count_users(&state.pool).await?;
    Ok(ApiResponse::ok(
        "Leaderboard retrieved",
        ranked_page(rows, &page, total),
    ))
}

/// GET /api/v1/leaderboard/periodic?period=
pub async fn periodic(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<PeriodParams>,
) -> AppResult<ApiResponse<Paginated<Ranked<PeriodicLeaderboardRow>>>> {
    let page = page.to_request()?;
    let period = params.period.as_deref().unwrap_or(PERIOD_ALL_TIME);
    validate_period(period)?;

    let rows = LeaderboardRepo::periodic(&state.pool, period, &page).await?;
    let total = LeaderboardRepo::count_periodic(&state.pool, period).await?;
    Ok(ApiResponse::ok(
        "Leaderboard retrieved",
        ranked_page(rows, &page, total),
    ))
}

/// GET /api/v1/leaderboard/streak?limit=
pub async fn streak(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitParams>,
) -> AppResult<ApiResponse<Vec<Ranked<StreakLeaderboardRow>>>> {
    let limit = params.clamped(DEFAULT_STREAK_LIMIT, MAX_STREAK_LIMIT);
    let rows = LeaderboardRepo::streaks(&state.pool, limit).await?;
    Ok(ApiResponse::ok("Streak leaderboard retrieved", rank_rows(rows, 0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_defaults_to_xp() {
        assert_eq!(parse_metric(None).unwrap(), LeaderboardMetric::Xp);
        assert_eq!(parse_metric(Some("total_xp")).unwrap(), LeaderboardMetric::TotalXp);
        assert!(parse_metric(Some("level")).is_err());
    }

    #[test]
    fn ranks_continue_across_pages() {
        let ranked = rank_rows(vec!["a", "b"], 20);
        assert_eq!(ranked[0].rank, 21);
        assert_eq!(ranked[1].rank, 22);
    }
}
