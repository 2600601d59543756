// ==========================================
// 智能库存预测与补货预警系统 - 调度引擎
// ==========================================
// 职责: 周期/定点触发预警任务
// 设计: 显式的重复任务抽象 + 可注入时钟,测试可模拟时间推进
// 红线: 任务在调度上下文内同步顺序执行;慢任务只延后同批任务,
//       不阻塞交互路径;进程重启后全部日程从当前时间重新武装
// ==========================================

use chrono::{Duration, NaiveDateTime, NaiveTime};
use std::sync::Arc;
use tracing::{debug, info, warn};

// ==========================================
// Clock - 可注入时钟
// ==========================================
/// 可注入时钟（本地时间语义）
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// 系统时钟
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

// ==========================================
// Trigger - 触发规则
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// 固定间隔触发
    Every(Duration),
    /// 每日定点触发
    DailyAt(NaiveTime),
}

impl Trigger {
    /// 计算 now 之后的下一次到期时间
    fn next_due_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            Trigger::Every(interval) => now + *interval,
            Trigger::DailyAt(time) => {
                let candidate = now.date().and_time(*time);
                if candidate > now {
                    candidate
                } else {
                    candidate + Duration::days(1)
                }
            }
        }
    }
}

// ==========================================
// ScheduledJob - 已注册任务
// ==========================================
struct ScheduledJob {
    name: String,
    trigger: Trigger,
    next_due: NaiveDateTime,
    action: Box<dyn Fn() + Send>,
}

// ==========================================
// Scheduler - 调度引擎
// ==========================================
pub struct Scheduler {
    clock: Arc<dyn Clock>,
    jobs: Vec<ScheduledJob>,
    tick: std::time::Duration,
}

impl Scheduler {
    /// 默认轮询步长
    pub const DEFAULT_TICK: std::time::Duration = std::time::Duration::from_secs(1);

    /// 创建新的 Scheduler 实例
    ///
    /// # 参数
    /// - clock: 时钟（生产用 SystemClock,测试可注入手动时钟）
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            jobs: Vec::new(),
            tick: Self::DEFAULT_TICK,
        }
    }

    /// 覆盖轮询步长（测试用）
    pub fn with_tick(mut self, tick: std::time::Duration) -> Self {
        self.tick = tick;
        self
    }

    /// 注册任务
    ///
    /// # 参数
    /// - name: 任务名（日志标识）
    /// - trigger: 触发规则
    /// - action: 任务体（同步执行,内部自行吞掉业务失败）
    pub fn register<F>(&mut self, name: &str, trigger: Trigger, action: F)
    where
        F: Fn() + Send + 'static,
    {
        let next_due = trigger.next_due_after(self.clock.now());
        debug!(job = name, next_due = %next_due, "注册定时任务");
        self.jobs.push(ScheduledJob {
            name: name.to_string(),
            trigger,
            next_due,
            action: Box::new(action),
        });
    }

    /// 已注册任务数
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// 执行当前全部到期任务
    ///
    /// # 返回
    /// 本次执行的任务数
    ///
    /// # 说明
    /// - 到期任务按注册顺序同步执行
    /// - 重新武装以任务完成时刻为基准（慢任务不会积压补发）
    pub fn run_due(&mut self) -> usize {
        let now = self.clock.now();
        let mut ran = 0;

        for job in &mut self.jobs {
            if job.next_due > now {
                continue;
            }

            debug!(job = %job.name, "触发定时任务");
            (job.action)();

            let finished_at = self.clock.now();
            job.next_due = job.trigger.next_due_after(finished_at);
            ran += 1;
        }

        ran
    }

    /// 调度主循环（独立后台任务中运行）
    pub async fn run(mut self) {
        info!(jobs = self.jobs.len(), "调度器启动");
        loop {
            tokio::time::sleep(self.tick).await;
            self.run_due();
        }
    }
}

// ==========================================
// 配置辅助
// ==========================================

/// 解析 "HH:MM" 定点时刻,失败时回退默认值
pub fn parse_daily_time(raw: &str, fallback: NaiveTime) -> NaiveTime {
    match NaiveTime::parse_from_str(raw, "%H:%M") {
        Ok(t) => t,
        Err(e) => {
            warn!(raw, error = %e, "定点时刻解析失败,使用默认值");
            fallback
        }
    }
}
