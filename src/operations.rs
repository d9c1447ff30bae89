//! Search entry points.
//!
//! Each call is independent: it validates its input, composes one query,
//! runs it (plus a count query in [`PageMode::Exact`]) on the executor it was
//! given, and maps the rows. Nothing is cached or shared between calls, so
//! concurrent searches only contend inside the executor.

use crate::criteria::SearchCriteria;
use crate::errors::SearchError;
use crate::executor::QueryExecutor;
use crate::filtering::{PageMode, PageRequest, PageResult};
use crate::models::ResultRow;
use crate::query::compose;

/// Log and return an error
fn fail<T>(err: SearchError) -> Result<T, SearchError> {
    err.log_internal();
    Err(err)
}

/// All members matching `criteria`, ordered by member id.
///
/// # Errors
///
/// [`SearchError::InvalidRequest`] for inconsistent criteria,
/// [`SearchError::Execution`] when the executor fails.
pub async fn search<E>(executor: &E, criteria: &SearchCriteria) -> Result<Vec<ResultRow>, SearchError>
where
    E: QueryExecutor + ?Sized,
{
    let query = match compose(criteria, None) {
        Ok(query) => query,
        Err(err) => return fail(err),
    };

    let rows = match executor.run_query(&query).await {
        Ok(rows) => rows,
        Err(err) => return fail(SearchError::execution(err)),
    };

    tracing::debug!(rows = rows.len(), "Member search completed");
    Ok(rows.into_iter().map(ResultRow::from).collect())
}

/// One page of members matching `criteria`.
///
/// In [`PageMode::Simple`] the total is the number of rows on this page, so a
/// page past the end reports 0. In [`PageMode::Exact`] a count query over the
/// unwindowed filter supplies the true total.
///
/// # Errors
///
/// [`SearchError::InvalidRequest`] for inconsistent criteria,
/// [`SearchError::Execution`] when either query fails. A failed count is
/// never replaced by an estimate.
pub async fn search_page<E>(
    executor: &E,
    criteria: &SearchCriteria,
    page: &PageRequest,
    mode: PageMode,
) -> Result<PageResult<ResultRow>, SearchError>
where
    E: QueryExecutor + ?Sized,
{
    let query = match compose(criteria, Some(page)) {
        Ok(query) => query,
        Err(err) => return fail(err),
    };

    let mut rows = match executor.run_query(&query).await {
        Ok(rows) => rows,
        Err(err) => return fail(SearchError::execution(err)),
    };

    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    if rows.len() > limit {
        tracing::warn!(
            returned = rows.len(),
            limit = page.limit(),
            "Executor ignored the page limit, extra rows dropped"
        );
        rows.truncate(limit);
    }

    let (total, exact) = match mode {
        PageMode::Simple => (rows.len() as u64, false),
        PageMode::Exact => match executor.run_count(&query.count()).await {
            Ok(total) => (total, true),
            Err(err) => return fail(SearchError::execution(err)),
        },
    };

    tracing::debug!(
        ?mode,
        offset = page.offset(),
        limit = page.limit(),
        rows = rows.len(),
        total,
        "Member page search completed"
    );

    let content = rows.into_iter().map(ResultRow::from).collect();
    Ok(PageResult::new(content, total, page, exact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{member, team};
    use crate::executor::MemoryExecutor;
    use crate::models::RawRow;
    use crate::query::{ComposedQuery, CountQuery};
    use async_trait::async_trait;
    use sea_orm::{DbErr, RuntimeErr};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fixture() -> MemoryExecutor {
        let teams = vec![
            team::Model { id: 1, name: "teamA".into() },
            team::Model { id: 2, name: "teamB".into() },
        ];
        let members = [(1, "member1", 10, 1), (2, "member2", 40, 1), (3, "member3", 20, 2), (4, "member4", 30, 2)]
            .into_iter()
            .map(|(id, name, age, team)| member::Model {
                id,
                username: Some(name.to_string()),
                age,
                team_id: Some(team),
            })
            .collect();
        MemoryExecutor::new(teams, members)
    }

    /// Counts calls and fails the chosen query kind
    #[derive(Default)]
    struct FlakyExecutor {
        fail_query: bool,
        fail_count: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QueryExecutor for FlakyExecutor {
        async fn run_query(&self, _query: &ComposedQuery) -> Result<Vec<RawRow>, DbErr> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_query {
                return Err(DbErr::Conn(RuntimeErr::Internal("connection reset".into())));
            }
            Ok(Vec::new())
        }

        async fn run_count(&self, _query: &CountQuery) -> Result<u64, DbErr> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_count {
                return Err(DbErr::Custom("count failed".into()));
            }
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_search_without_criteria_returns_everything() {
        let rows = search(&fixture(), &SearchCriteria::new()).await.unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].member_id, 1);
    }

    #[tokio::test]
    async fn test_exact_page_reports_true_total() {
        let page = PageRequest::new(1, 2).unwrap();
        let result = search_page(&fixture(), &SearchCriteria::new(), &page, PageMode::Exact)
            .await
            .unwrap();
        assert_eq!(result.total_count(), 4);
        let ids: Vec<i64> = result.content().iter().map(|r| r.member_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(result.is_exact());
    }

    #[tokio::test]
    async fn test_simple_page_reports_page_size() {
        let page = PageRequest::new(1, 2).unwrap();
        let result = search_page(&fixture(), &SearchCriteria::new(), &page, PageMode::Simple)
            .await
            .unwrap();
        assert_eq!(result.total_count(), 2);
        assert!(!result.is_exact());
    }

    /// Ignores the window and returns every member
    struct UnwindowedExecutor(MemoryExecutor);

    #[async_trait]
    impl QueryExecutor for UnwindowedExecutor {
        async fn run_query(&self, query: &ComposedQuery) -> Result<Vec<RawRow>, DbErr> {
            let unwindowed = ComposedQuery {
                window: None,
                ..query.clone()
            };
            self.0.run_query(&unwindowed).await
        }

        async fn run_count(&self, query: &CountQuery) -> Result<u64, DbErr> {
            self.0.run_count(query).await
        }
    }

    #[tokio::test]
    async fn test_simple_total_matches_content_when_executor_over_returns() {
        let executor = UnwindowedExecutor(fixture());
        let page = PageRequest::new(0, 2).unwrap();
        let result = search_page(&executor, &SearchCriteria::new(), &page, PageMode::Simple)
            .await
            .unwrap();
        assert_eq!(result.content().len(), 2);
        assert_eq!(result.total_count(), 2);

        let exact = search_page(&executor, &SearchCriteria::new(), &page, PageMode::Exact)
            .await
            .unwrap();
        assert_eq!(exact.content().len(), 2);
        assert_eq!(exact.total_count(), 4);
    }

    #[tokio::test]
    async fn test_simple_mode_skips_count_query() {
        let executor = FlakyExecutor { fail_count: true, ..Default::default() };
        let page = PageRequest::new(0, 10).unwrap();
        let result = search_page(&executor, &SearchCriteria::new(), &page, PageMode::Simple).await;
        assert!(result.is_ok());
        assert_eq!(executor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_criteria_never_reach_executor() {
        let executor = FlakyExecutor::default();
        let criteria = SearchCriteria::new().min_age(30).max_age(20);

        assert!(search(&executor, &criteria).await.unwrap_err().is_invalid_request());
        let page = PageRequest::new(0, 10).unwrap();
        assert!(
            search_page(&executor, &criteria, &page, PageMode::Exact)
                .await
                .unwrap_err()
                .is_invalid_request()
        );
        assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_query_failure_propagates() {
        let executor = FlakyExecutor { fail_query: true, ..Default::default() };
        let err = search(&executor, &SearchCriteria::new()).await.unwrap_err();
        assert!(err.is_execution());
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_count_failure_is_not_masked() {
        let executor = FlakyExecutor { fail_count: true, ..Default::default() };
        let page = PageRequest::new(0, 10).unwrap();
        let err = search_page(&executor, &SearchCriteria::new(), &page, PageMode::Exact)
            .await
            .unwrap_err();
        assert!(err.is_execution());
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_executor_as_trait_object() {
        let executor: Box<dyn QueryExecutor> = Box::new(fixture());
        let rows = search(executor.as_ref(), &SearchCriteria::new().group_name("teamB"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }
}
