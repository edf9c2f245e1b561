// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::domain::models::search_result::ResultRecord;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// 会话状态
///
/// 最近一次有效提交的类别、查询及其结果，每次提交整体覆盖
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub category: Category,
    pub query: String,
    pub results: Vec<ResultRecord>,
}

struct StoredSession {
    state: SessionState,
    last_seen: Instant,
}

/// 会话存储
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, StoredSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取会话状态并刷新其活跃时间
    pub fn get(&self, id: &Uuid) -> Option<SessionState> {
        self.sessions.get_mut(id).map(|mut stored| {
            stored.last_seen = Instant::now();
            stored.state.clone()
        })
    }

    pub fn replace(&self, id: Uuid, state: SessionState) {
        self.sessions.insert(
            id,
            StoredSession {
                state,
                last_seen: Instant::now(),
            },
        );
    }

    pub fn remove(&self, id: &Uuid) -> Option<SessionState> {
        self.sessions.remove(id).map(|(_, stored)| stored.state)
    }

    /// 清理超过 `idle_timeout` 未访问的会话，返回清理数量
    pub fn purge_idle(&self, idle_timeout: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, stored| stored.last_seen.elapsed() < idle_timeout);
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            debug!(purged, "Purged idle sessions");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
