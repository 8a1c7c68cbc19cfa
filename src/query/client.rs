//! 查询缓存
//!
//! 读取按 [`QueryKey`] 缓存，同一个键的并发读取只发出一次请求，结果分发给所有调用方。
//! 写操作成功后按前缀失效，之后的读取重新请求。

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};

use crate::error::{ApiError, ApiResult};
use crate::query::key::QueryKey;
use crate::query::state::{QueryResult, QueryState};

type CachedValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<CachedValue, ApiError>>>;

struct CacheEntry {
    data: Option<CachedValue>,
    error: Option<ApiError>,
    fetched_at: Option<Instant>,
    updated_at: Option<DateTime<Utc>>,
    stale: bool,
}

impl CacheEntry {
    fn empty() -> Self {
        Self {
            data: None,
            error: None,
            fetched_at: None,
            updated_at: None,
            stale: false,
        }
    }

    fn fresh_data(&self, stale_time: Duration) -> Option<&CachedValue> {
        if self.stale {
            return None;
        }
        let fetched_at = self.fetched_at?;
        if fetched_at.elapsed() >= stale_time {
            return None;
        }
        self.data.as_ref()
    }
}

struct InFlight {
    id: u64,
    fetch: SharedFetch,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<QueryKey, CacheEntry>,
    in_flight: HashMap<QueryKey, InFlight>,
    next_fetch_id: u64,
}

/// 查询缓存客户端，克隆后共享同一份缓存
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Mutex<CacheInner>>,
    stale_time: Duration,
}

impl QueryClient {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner::default())),
            stale_time,
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        lock_inner(&self.inner)
    }

    /// 读取缓存，缓存过期或不存在时请求后端
    ///
    /// 已有同键请求在进行时直接等待它的结果。
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> ApiResult<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let fetch = {
            let mut inner = self.lock();

            if let Some(data) = inner
                .entries
                .get(&key)
                .and_then(|entry| entry.fresh_data(self.stale_time))
            {
                tracing::trace!(%key, "Query cache hit");
                return downcast(&key, data.clone());
            }

            if let Some(in_flight) = inner.in_flight.get(&key) {
                tracing::trace!(%key, "Joining in-flight query");
                in_flight.fetch.clone()
            } else {
                let id = inner.next_fetch_id;
                inner.next_fetch_id += 1;

                let request = fetcher();
                let cache = Arc::clone(&self.inner);
                let fetch_key = key.clone();
                let fetch = async move {
                    let result = request.await.map(|value| Arc::new(value) as CachedValue);
                    complete_fetch(&cache, &fetch_key, id, &result);
                    result
                }
                .boxed()
                .shared();

                tracing::debug!(%key, "Starting query fetch");
                inner.in_flight.insert(
                    key.clone(),
                    InFlight {
                        id,
                        fetch: fetch.clone(),
                    },
                );
                fetch
            }
        };

        let value = fetch.await?;
        downcast(&key, value)
    }

    /// 与 [`fetch`](Self::fetch) 相同，但把结果包装成带状态的 [`QueryResult`]
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryResult<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        match self.fetch(key.clone(), fetcher).await {
            Ok(data) => QueryResult::success(data),
            Err(error) => QueryResult::failure(error, self.get_data(&key)),
        }
    }

    /// 执行写操作，成功后让所有给定前缀下的缓存失效
    pub async fn mutate<T, Fut>(&self, invalidates: &[QueryKey], mutation: Fut) -> ApiResult<T>
    where
        Fut: Future<Output = ApiResult<T>>,
    {
        let result = mutation.await;
        if result.is_ok() {
            for prefix in invalidates {
                self.invalidate(prefix);
            }
        }
        result
    }

    /// 将前缀下的缓存标记为过期，并让进行中的请求不再写回缓存
    ///
    /// 返回受影响的缓存项数量。
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut inner = self.lock();
        let mut count = 0;
        for (key, entry) in inner.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.stale = true;
                count += 1;
            }
        }
        inner.in_flight.retain(|key, _| !key.starts_with(prefix));
        tracing::info!(%prefix, count, "Invalidated queries");
        count
    }

    /// 删除前缀下的缓存
    pub fn remove(&self, prefix: &QueryKey) {
        let mut inner = self.lock();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        inner.in_flight.retain(|key, _| !key.starts_with(prefix));
    }

    /// 清空全部缓存，登录和登出时调用
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.in_flight.clear();
        tracing::debug!("Query cache cleared");
    }

    /// 读取缓存数据（即使已过期），不发请求
    pub fn get_data<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let inner = self.lock();
        let data = inner.entries.get(key)?.data.clone()?;
        data.downcast::<T>().ok()
    }

    /// 直接写入缓存，例如用写操作的返回值更新详情
    pub fn set_data<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        let mut inner = self.lock();
        let entry = inner.entries.entry(key).or_insert_with(CacheEntry::empty);
        entry.data = Some(Arc::new(value));
        entry.error = None;
        entry.fetched_at = Some(Instant::now());
        entry.updated_at = Some(Utc::now());
        entry.stale = false;
    }

    pub fn state(&self, key: &QueryKey) -> QueryState {
        let inner = self.lock();
        let is_fetching = inner.in_flight.contains_key(key);
        match inner.entries.get(key) {
            Some(entry) => QueryState {
                has_data: entry.data.is_some(),
                is_stale: entry.fresh_data(self.stale_time).is_none(),
                is_fetching,
                error: entry.error.clone(),
                updated_at: entry.updated_at,
            },
            None => QueryState {
                is_fetching,
                ..QueryState::default()
            },
        }
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.lock().in_flight.contains_key(key)
    }
}

fn lock_inner(inner: &Mutex<CacheInner>) -> MutexGuard<'_, CacheInner> {
    match inner.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// 请求完成后写回缓存；请求已被失效或删除时丢弃结果
fn complete_fetch(
    cache: &Mutex<CacheInner>,
    key: &QueryKey,
    id: u64,
    result: &Result<CachedValue, ApiError>,
) {
    let mut inner = lock_inner(cache);
    if inner.in_flight.get(key).map(|f| f.id) != Some(id) {
        tracing::debug!(%key, "Discarding result of detached query fetch");
        return;
    }
    inner.in_flight.remove(key);

    let entry = inner
        .entries
        .entry(key.clone())
        .or_insert_with(CacheEntry::empty);
    match result {
        Ok(value) => {
            entry.data = Some(value.clone());
            entry.error = None;
            entry.fetched_at = Some(Instant::now());
            entry.updated_at = Some(Utc::now());
            entry.stale = false;
        }
        Err(error) => {
            entry.error = Some(error.clone());
        }
    }
}

fn downcast<T: Send + Sync + 'static>(key: &QueryKey, value: CachedValue) -> ApiResult<Arc<T>> {
    value.downcast::<T>().map_err(|_| {
        ApiError::InvalidRequest(format!("query {} is cached with a different type", key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counted(counter: &Arc<AtomicUsize>, value: u32) -> impl Future<Output = ApiResult<u32>> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(value)
        }
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_fetch() {
        let client = QueryClient::new(Duration::from_secs(60));
        let counter = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new("projects").with("list");

        let reads = (0..5).map(|_| client.fetch(key.clone(), || counted(&counter, 7)));
        let results = futures_util::future::join_all(reads).await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        for result in results {
            assert_eq!(*result.unwrap(), 7);
        }
        assert!(!client.is_fetching(&key));
    }

    #[tokio::test]
    async fn fresh_entry_is_served_from_cache() {
        let client = QueryClient::new(Duration::from_secs(60));
        let counter = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new("health").with("database");

        client.fetch(key.clone(), || counted(&counter, 1)).await.unwrap();
        client.fetch(key.clone(), || counted(&counter, 2)).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(client.get_data::<u32>(&key).as_deref(), Some(&1));
    }

    #[tokio::test]
    async fn invalidation_is_prefix_scoped() {
        let client = QueryClient::new(Duration::from_secs(60));
        let counter = Arc::new(AtomicUsize::new(0));
        let project_list = QueryKey::new("projects").with("list");
        let project_detail = QueryKey::new("projects").with("detail").with("1");
        let health = QueryKey::new("health").with("database");

        for key in [&project_list, &project_detail, &health] {
            client.fetch(key.clone(), || counted(&counter, 1)).await.unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        assert_eq!(client.invalidate(&QueryKey::new("projects")), 2);
        assert!(client.state(&project_list).is_stale);
        assert!(!client.state(&health).is_stale);

        client.fetch(project_list.clone(), || counted(&counter, 2)).await.unwrap();
        client.fetch(health.clone(), || counted(&counter, 2)).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 4);
        assert_eq!(client.get_data::<u32>(&project_list).as_deref(), Some(&2));
        assert_eq!(client.get_data::<u32>(&health).as_deref(), Some(&1));
    }

    #[tokio::test]
    async fn failed_mutation_does_not_invalidate() {
        let client = QueryClient::new(Duration::from_secs(60));
        let key = QueryKey::new("projects").with("list");
        client.set_data(key.clone(), 5u32);

        let result: ApiResult<()> = client
            .mutate(&[QueryKey::new("projects")], async {
                Err(ApiError::Status { status: 422, body: None })
            })
            .await;
        assert!(result.is_err());
        assert!(!client.state(&key).is_stale);

        client
            .mutate(&[QueryKey::new("projects")], async { Ok::<_, ApiError>(()) })
            .await
            .unwrap();
        assert!(client.state(&key).is_stale);
    }

    #[tokio::test]
    async fn errors_fan_out_and_keep_previous_data() {
        let client = QueryClient::new(Duration::ZERO);
        let key = QueryKey::new("tracking-errors").with("list");
        client.set_data(key.clone(), 3u32);

        let result = client
            .query(key.clone(), || async {
                Err::<u32, _>(ApiError::Network("connection refused".into()))
            })
            .await;

        assert!(result.is_error());
        assert_eq!(result.data(), Some(&3));
        assert!(client.state(&key).error.is_some());
    }

    #[tokio::test]
    async fn fetch_detached_by_invalidation_does_not_repopulate() {
        let client = QueryClient::new(Duration::from_secs(60));
        let key = QueryKey::new("projects").with("list");

        let slow = {
            let client = client.clone();
            let key = key.clone();
            tokio::spawn(async move {
                client
                    .fetch(key, || async {
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok::<u32, ApiError>(1)
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        client.invalidate(&QueryKey::new("projects"));

        assert_eq!(*slow.await.unwrap().unwrap(), 1);
        assert!(client.get_data::<u32>(&key).is_none());
    }

    #[tokio::test]
    async fn mismatched_type_is_reported() {
        let client = QueryClient::new(Duration::from_secs(60));
        let key = QueryKey::new("health").with("tables");
        client.set_data(key.clone(), String::from("cached"));

        let err = client
            .fetch(key, || async { Ok::<u32, ApiError>(1) })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
