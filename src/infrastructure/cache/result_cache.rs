// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CacheSettings;
use crate::domain::models::category::Category;
use crate::domain::models::search_result::ResultRecord;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub category: Category,
    pub query: String,
}

impl CacheKey {
    pub fn new(category: Category, query: &str) -> Self {
        Self {
            category,
            query: query.to_string(),
        }
    }
}

struct CacheEntry {
    results: Vec<ResultRecord>,
    inserted_at: Instant,
}

/// 搜索结果缓存
///
/// 容量受限的 LRU，条目超过 TTL 后视为未命中并被移除
pub struct ResultCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(settings.capacity, Duration::from_secs(settings.ttl_secs))
    }

    pub fn get(&self, key: &CacheKey) -> Option<Vec<ResultRecord>> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                return Some(entry.results.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    pub fn insert(&self, key: CacheKey, results: Vec<ResultRecord>) {
        self.entries.lock().put(
            key,
            CacheEntry {
                results,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
