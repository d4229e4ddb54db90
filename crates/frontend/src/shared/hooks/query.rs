//! Cached data fetching.
//!
//! `QueryCache` is the pure per-key state machine, `run_query` drives one
//! fetch through any `StateCell`, and `use_query` wires both to signals,
//! effects and the refetch interval.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use crate::shared::config::DEFAULT_STALE_TIME_MS;
use crate::shared::error::AppError;
use crate::shared::state::StateCell;

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub data: Option<T>,
    pub error: Option<AppError>,
    pub is_loading: bool,
    /// Completion time of the last successful fetch, 0 when never or invalidated
    pub last_fetch_ms: i64,
    /// Generation of the newest fetch started for this key
    pub generation: u64,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
            last_fetch_ms: 0,
            generation: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    next_generation: u64,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_generation: 0,
        }
    }
}

impl<T> QueryCache<T> {
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    /// True when there is no data yet or the data is older than `stale_time_ms`
    pub fn needs_fetch(&self, key: &str, now_ms: i64, stale_time_ms: i64) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.data.is_some() => now_ms - entry.last_fetch_ms >= stale_time_ms,
            _ => true,
        }
    }

    /// Marks the entry as outdated, keeping its data
    pub fn invalidate(&mut self, key: &str) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.last_fetch_ms = 0;
        }
    }

    /// Starts a fetch and returns its generation
    pub fn begin(&mut self, key: &str) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.generation = generation;
        entry.is_loading = true;
        entry.error = None;
        generation
    }

    /// Applies a fetch result. Returns false when a newer fetch superseded it.
    pub fn settle(
        &mut self,
        key: &str,
        generation: u64,
        result: Result<T, AppError>,
        now_ms: i64,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if entry.generation != generation {
            return false;
        }
        entry.is_loading = false;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
                entry.last_fetch_ms = now_ms;
            }
            Err(error) => entry.error = Some(error),
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRun {
    /// Cached data was fresh, the fetcher was not called
    Fresh,
    Applied,
    /// A newer fetch for the same key started meanwhile
    Superseded,
    /// The state cell went away before the fetch could start
    Disposed,
}

/// Runs one fetch for `key` unless the cached data is still fresh.
///
/// `force` invalidates the entry first. `now_ms` is read before the freshness
/// check and again when stamping a successful completion.
pub async fn run_query<T, C, N, F, Fut, E>(
    cell: &C,
    key: String,
    force: bool,
    stale_time_ms: i64,
    now_ms: N,
    fetcher: F,
) -> QueryRun
where
    C: StateCell<QueryCache<T>>,
    N: Fn() -> i64,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<AppError>,
{
    let started_at = now_ms();
    let Some(should_fetch) =
        cell.peek(|cache| force || cache.needs_fetch(&key, started_at, stale_time_ms))
    else {
        return QueryRun::Disposed;
    };
    if !should_fetch {
        log::debug!("query {key}: cache fresh");
        return QueryRun::Fresh;
    }

    let mut generation = 0;
    cell.apply(|cache| {
        if force {
            cache.invalidate(&key);
        }
        generation = cache.begin(&key);
    });

    let result = fetcher(key.clone()).await.map_err(Into::into);
    if let Err(e) = &result {
        log::error!("query {key} failed: {e}");
    }

    let finished_at = now_ms();
    let mut applied = false;
    cell.apply(|cache| applied = cache.settle(&key, generation, result, finished_at));
    if applied {
        QueryRun::Applied
    } else {
        log::debug!("query {key}: dropped result of superseded fetch #{generation}");
        QueryRun::Superseded
    }
}

#[derive(Clone, Copy)]
pub struct QueryOptions {
    pub enabled: Signal<bool>,
    pub refetch_interval_ms: Option<u32>,
    pub stale_time_ms: i64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: Signal::stored(true),
            refetch_interval_ms: None,
            stale_time_ms: DEFAULT_STALE_TIME_MS,
        }
    }
}

impl QueryOptions {
    pub fn stale_time(mut self, stale_time_ms: i64) -> Self {
        self.stale_time_ms = stale_time_ms;
        self
    }

    pub fn refetch_every(mut self, interval_ms: u32) -> Self {
        self.refetch_interval_ms = Some(interval_ms);
        self
    }

    pub fn enabled(mut self, enabled: Signal<bool>) -> Self {
        self.enabled = enabled;
        self
    }
}

pub struct QueryResult<T: Send + Sync + 'static> {
    pub data: Signal<Option<T>>,
    pub is_loading: Signal<bool>,
    pub error: Signal<Option<AppError>>,
    refetch: Callback<()>,
}

impl<T: Send + Sync + 'static> Clone for QueryResult<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryResult<T> {}

impl<T: Send + Sync + 'static> QueryResult<T> {
    /// Fetches again regardless of staleness
    pub fn refetch(&self) {
        self.refetch.run(());
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Fetches `key` through `fetcher` and caches the result per key.
///
/// Refetches when the key or `enabled` changes and the cached entry is stale,
/// and on `refetch_interval_ms` while enabled.
pub fn use_query<T, F, Fut, E>(key: Signal<String>, fetcher: F, options: QueryOptions) -> QueryResult<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(String) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
    E: Into<AppError> + 'static,
{
    let QueryOptions {
        enabled,
        refetch_interval_ms,
        stale_time_ms,
    } = options;

    let cache = RwSignal::new(QueryCache::<T>::default());
    let fetcher = StoredValue::new_local(Rc::new(fetcher));

    let run = move |force: bool| {
        let (Some(current_key), Some(fetcher)) = (key.try_get_untracked(), fetcher.try_get_value())
        else {
            return;
        };
        spawn_local(async move {
            run_query(&cache, current_key, force, stale_time_ms, now_ms, move |k| fetcher(k)).await;
        });
    };

    Effect::new(move |_| {
        key.track();
        if enabled.get() {
            run(false);
        }
    });

    if let Some(interval_ms) = refetch_interval_ms {
        let timer = StoredValue::new_local(None::<Interval>);
        Effect::new(move |_| {
            let next = enabled.get().then(|| Interval::new(interval_ms, move || run(false)));
            timer.set_value(next);
        });
        on_cleanup(move || {
            timer.try_update_value(|timer| timer.take());
        });
    }

    QueryResult {
        data: Signal::derive(move || {
            let current = key.get();
            cache.with(|c| c.entry(&current).and_then(|e| e.data.clone()))
        }),
        is_loading: Signal::derive(move || {
            let current = key.get();
            // no entry yet: the first fetch is about to start
            cache.with(|c| c.entry(&current).map_or(enabled.get(), |e| e.is_loading))
        }),
        error: Signal::derive(move || {
            let current = key.get();
            cache.with(|c| c.entry(&current).and_then(|e| e.error.clone()))
        }),
        refetch: Callback::new(move |_| {
            if enabled.get_untracked() {
                run(true);
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    type Cache = Rc<RefCell<QueryCache<Vec<u32>>>>;

    fn clock(start: i64) -> Rc<Cell<i64>> {
        Rc::new(Cell::new(start))
    }

    async fn fetch(cache: &Cache, time: &Rc<Cell<i64>>, calls: &Cell<u32>, force: bool) -> QueryRun {
        let time = time.clone();
        run_query(cache, "parts".to_string(), force, 5_000, move || time.get(), |_| async {
            calls.set(calls.get() + 1);
            Ok::<_, AppError>(vec![calls.get()])
        })
        .await
    }

    #[tokio::test]
    async fn test_fresh_data_is_served_from_cache() {
        let cache: Cache = Rc::default();
        let time = clock(10_000);
        let calls = Cell::new(0);

        assert_eq!(fetch(&cache, &time, &calls, false).await, QueryRun::Applied);
        time.set(14_999);
        assert_eq!(fetch(&cache, &time, &calls, false).await, QueryRun::Fresh);
        assert_eq!(calls.get(), 1);

        time.set(15_000);
        assert_eq!(fetch(&cache, &time, &calls, false).await, QueryRun::Applied);
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_forced_fetch_ignores_staleness() {
        let cache: Cache = Rc::default();
        let time = clock(10_000);
        let calls = Cell::new(0);

        fetch(&cache, &time, &calls, false).await;
        assert_eq!(fetch(&cache, &time, &calls, true).await, QueryRun::Applied);
        assert_eq!(calls.get(), 2);
        let entry = cache.borrow().entry("parts").cloned().unwrap();
        assert_eq!(entry.data, Some(vec![2]));
        assert_eq!(entry.last_fetch_ms, 10_000);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_data() {
        let cache: Cache = Rc::default();
        let calls = Cell::new(0);
        let time = clock(100_000);
        fetch(&cache, &time, &calls, false).await;

        let run = run_query(&cache, "parts".to_string(), true, 5_000, || 102_000, |_| async {
            Err::<Vec<u32>, _>("timeout".to_string())
        })
        .await;

        assert_eq!(run, QueryRun::Applied);
        let entry = cache.borrow().entry("parts").cloned().unwrap();
        assert_eq!(entry.data, Some(vec![1]));
        assert_eq!(entry.error, Some(AppError::Unknown("timeout".into())));
        assert!(!entry.is_loading);
        // invalidated by the forced run, so the next access fetches again
        assert!(cache.borrow().needs_fetch("parts", 102_000, 5_000));
    }

    #[tokio::test]
    async fn test_superseded_result_is_ignored() {
        let cache: Cache = Rc::default();

        let slow = run_query(&cache, "parts".to_string(), true, 5_000, || 1_000, |_| async {
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            Ok::<_, AppError>(vec![1])
        });
        let fast = run_query(&cache, "parts".to_string(), true, 5_000, || 1_000, |_| async {
            Ok::<_, AppError>(vec![2])
        });
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow, QueryRun::Superseded);
        assert_eq!(fast, QueryRun::Applied);
        assert_eq!(cache.borrow().entry("parts").unwrap().data, Some(vec![2]));
    }

    #[test]
    fn test_entries_are_per_key() {
        let mut cache = QueryCache::<u32>::default();
        let g = cache.begin("a");
        assert!(cache.settle("a", g, Ok(1), 100));
        assert!(!cache.needs_fetch("a", 200, 5_000));
        assert!(cache.needs_fetch("b", 200, 5_000));
    }

    #[test]
    fn test_settle_after_newer_begin_is_rejected() {
        let mut cache = QueryCache::<u32>::default();
        let first = cache.begin("a");
        let second = cache.begin("a");
        assert!(!cache.settle("a", first, Ok(1), 10));
        assert!(cache.entry("a").unwrap().is_loading);
        assert!(cache.settle("a", second, Ok(2), 20));
        assert_eq!(cache.entry("a").unwrap().data, Some(2));
    }
}
