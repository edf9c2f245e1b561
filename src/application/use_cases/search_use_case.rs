// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CacheSettings;
use crate::domain::models::category::Category;
use crate::domain::models::search_result::ResultRecord;
use crate::domain::search::provider::SearchProvider;
use crate::domain::services::search_service::{SearchService, SearchServiceError};
use crate::infrastructure::cache::result_cache::{CacheKey, ResultCache};
use std::sync::Arc;
use tracing::{debug, error};

/// 搜索用例
///
/// 在查询分发之上按 (类别, 查询) 记忆结果；命中缓存时不调用提供方，失败结果不缓存
pub struct SearchUseCase {
    service: SearchService<dyn SearchProvider>,
    cache: ResultCache,
}

impl SearchUseCase {
    pub fn new(provider: Arc<dyn SearchProvider>, cache: ResultCache) -> Self {
        Self {
            service: SearchService::new(provider),
            cache,
        }
    }

    pub fn from_settings(provider: Arc<dyn SearchProvider>, settings: &CacheSettings) -> Self {
        Self::new(provider, ResultCache::from_settings(settings))
    }

    /// 执行搜索
    ///
    /// 类别标签先于缓存查找解析，未知类别总是失败
    pub async fn execute(
        &self,
        tag: &str,
        query: &str,
    ) -> Result<(Category, Vec<ResultRecord>), SearchServiceError> {
        let category: Category = tag.parse()?;
        let key = CacheKey::new(category, query);

        if let Some(results) = self.cache.get(&key) {
            debug!(category = %category, query, "Serving search from cache");
            metrics::counter!("search_cache_hits_total", "category" => category.as_str())
                .increment(1);
            return Ok((category, results));
        }

        match self.service.dispatch(category, query).await {
            Ok(results) => {
                self.cache.insert(key, results.clone());
                Ok((category, results))
            }
            Err(e) => {
                error!(category = %category, query, error = %e, "Search failed");
                metrics::counter!("search_failures_total", "category" => category.as_str())
                    .increment(1);
                Err(e)
            }
        }
    }
}
