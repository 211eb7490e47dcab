// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::{Duration, Instant};

/// 请求时间预算
///
/// 跟踪单个请求相对于固定总时限的已用/剩余时间。
/// 每个阻塞阶段在调用前向预算申请自己的子超时。
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    /// 请求开始时刻
    started: Instant,
    /// 总时限
    total: Duration,
    /// 剩余时间下限
    floor: Duration,
}

impl Budget {
    /// 启动一个新的时间预算
    ///
    /// # 参数
    ///
    /// * `total` - 总时限（应保守地低于平台硬超时）
    /// * `floor` - 剩余时间下限
    pub fn start(total: Duration, floor: Duration) -> Self {
        Self {
            started: Instant::now(),
            total,
            floor,
        }
    }

    /// 计算剩余时间
    ///
    /// 剩余时间 = 总时限 - 已用时间，且不低于下限。
    /// 下游阶段因此总能拿到一个可用的正超时值。
    ///
    /// # 返回值
    ///
    /// 剩余时间
    pub fn remaining(&self) -> Duration {
        let elapsed = self.started.elapsed();
        let left = self.total.saturating_sub(elapsed);
        left.max(self.floor)
    }

    /// 计算单个阶段的子超时
    ///
    /// # 参数
    ///
    /// * `cap` - 该阶段自身的超时上限
    ///
    /// # 返回值
    ///
    /// `min(cap, remaining)`
    pub fn stage_timeout(&self, cap: Duration) -> Duration {
        self.remaining().min(cap)
    }
}

impl Default for Budget {
    fn default() -> Self {
        // 170s vs the common 180s platform deadline, leaving margin
        // for the final response to be written.
        Self::start(Duration::from_secs(170), Duration::from_secs(5))
    }
}
