// ==========================================
// Scheduler 引擎测试
// ==========================================
// 测试目标: 验证重复任务抽象与可注入时钟
// 覆盖范围: 间隔触发、每日定点触发、重新武装、顺序执行
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use smart_stock_aps::engine::scheduler::{Clock, Scheduler, Trigger};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ==========================================
// ManualClock - 手动推进时钟
// ==========================================
struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    fn starting_at(now: NaiveDateTime) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

#[test]
fn test_interval_job_fires_only_when_due() {
    let clock = ManualClock::starting_at(start_time());
    let mut scheduler = Scheduler::new(clock.clone());

    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    scheduler.register("low_stock_check", Trigger::Every(Duration::seconds(30)), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // 未到期
    clock.advance(Duration::seconds(10));
    assert_eq!(scheduler.run_due(), 0);
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    // 到期一次
    clock.advance(Duration::seconds(25));
    assert_eq!(scheduler.run_due(), 1);
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    // 执行后立即检查: 已重新武装,不会连发
    assert_eq!(scheduler.run_due(), 0);

    // 再过一个完整间隔
    clock.advance(Duration::seconds(31));
    assert_eq!(scheduler.run_due(), 1);
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_daily_job_fires_once_per_day() {
    let clock = ManualClock::starting_at(start_time());
    let mut scheduler = Scheduler::new(clock.clone());

    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    scheduler.register(
        "end_of_day_report",
        Trigger::DailyAt(NaiveTime::from_hms_opt(22, 57, 0).unwrap()),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    // 当天 22:57 前不触发
    clock.advance(Duration::hours(12));
    assert_eq!(scheduler.run_due(), 0);

    // 越过 22:57 触发一次
    clock.advance(Duration::hours(1));
    assert_eq!(scheduler.run_due(), 1);
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    // 当天不再触发
    clock.advance(Duration::minutes(30));
    assert_eq!(scheduler.run_due(), 0);

    // 次日 22:57 之后再次触发
    clock.advance(Duration::days(1));
    assert_eq!(scheduler.run_due(), 1);
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_due_jobs_run_sequentially_in_registration_order() {
    let clock = ManualClock::starting_at(start_time());
    let mut scheduler = Scheduler::new(clock.clone());

    let order = Arc::new(Mutex::new(Vec::new()));
    for name in ["first", "second", "third"] {
        let order = order.clone();
        scheduler.register(name, Trigger::Every(Duration::seconds(1)), move || {
            order.lock().unwrap().push(name);
        });
    }

    clock.advance(Duration::seconds(5));
    assert_eq!(scheduler.run_due(), 3);
    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn test_restart_rearms_from_registration_time() {
    // 注册时刻在定点之后: 首次触发应落到次日
    let late_evening = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(23, 30, 0)
        .unwrap();
    let clock = ManualClock::starting_at(late_evening);
    let mut scheduler = Scheduler::new(clock.clone());

    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    scheduler.register(
        "end_of_day_report",
        Trigger::DailyAt(NaiveTime::from_hms_opt(22, 57, 0).unwrap()),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    // 当晚剩余时间不触发
    clock.advance(Duration::minutes(20));
    assert_eq!(scheduler.run_due(), 0);

    // 次日定点后触发
    clock.advance(Duration::hours(24));
    assert_eq!(scheduler.run_due(), 1);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_job_count() {
    let clock = ManualClock::starting_at(start_time());
    let mut scheduler = Scheduler::new(clock);
    assert_eq!(scheduler.job_count(), 0);
    scheduler.register("noop", Trigger::Every(Duration::seconds(1)), || {});
    assert_eq!(scheduler.job_count(), 1);
}
