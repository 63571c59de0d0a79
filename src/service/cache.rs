use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;

/// 时钟抽象, 便于测试注入
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 带过期时间的缓存, 进程内构建一次并以引用共享
pub struct TtlCache<K, V> {
    entries: DashMap<K, (DateTime<Utc>, V)>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    /// 未过期时返回缓存值, 过期项顺带移除
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let hit = self.entries.get(key).map(|e| (e.0, e.1.clone()))?;
        if now - hit.0 < self.ttl {
            return Some(hit.1);
        }
        self.entries.remove_if(key, |_, (stored_at, _)| now - *stored_at >= self.ttl);
        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(key, (self.clock.now(), value));
    }

    /// 命中且未过期时直接返回, 否则构建并写入
    ///
    /// 检查与构建都在 key 所在分片的锁内完成, 同一 key 的并发调用只构建一次。
    /// build 内不能再访问本缓存, 否则会在同一分片上死锁。
    pub fn get_or_insert_with<F>(&self, key: K, build: F) -> V
    where
        F: FnOnce() -> V,
    {
        let now = self.clock.now();
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if now - occupied.get().0 < self.ttl {
                    return occupied.get().1.clone();
                }
                let value = build();
                occupied.insert((now, value.clone()));
                value
            }
            Entry::Vacant(vacant) => {
                let value = build();
                vacant.insert((now, value.clone()));
                value
            }
        }
    }

    pub fn invalidate(&self, key: &K) {
        self.entries.remove(key);
    }

    /// 清理所有过期项, 返回清理数量
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, (stored_at, _)| now - *stored_at < self.ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
