use crate::error::MonitorError;
use crate::services::collector::SnapshotCollector;
use crate::services::monitor::{Monitor, Tick};
use crate::state::{read_state, write_state, AppState};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::time::{self, MissedTickBehavior};

/// 定时采集并发布结果
///
/// 暂停时跳过定时 tick，`force` 被通知时无论是否暂停都立即刷新。
/// sysinfo 采集是同步阻塞调用，放到 blocking 线程池执行。
/// 采集过程中不持有锁，只在发布时短暂获取写锁。
pub async fn run<C>(state: AppState, mut monitor: Monitor<C>, force: Arc<Notify>)
where
    C: SnapshotCollector + 'static,
{
    let mut ticker = time::interval(monitor.config().refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let forced = tokio::select! {
            _ = ticker.tick() => false,
            _ = force.notified() => true,
        };

        let paused = read_state(&state).paused;
        if !forced && paused {
            continue;
        }

        monitor = match tokio::task::spawn_blocking(move || {
            let result = monitor.poll();
            (monitor, result)
        })
        .await
        {
            Ok((monitor, result)) => {
                publish_result(&state, result);
                monitor
            }
            Err(e) => {
                log::error!("❌ Collector task failed, stopping refresh: {}", e);
                write_state(&state).record_error(format!("collector stopped: {}", e));
                return;
            }
        };
    }
}

pub fn publish_result(state: &AppState, result: Result<Tick, MonitorError>) {
    match result {
        Ok(tick) => write_state(state).publish(tick),
        Err(e) => {
            log::warn!("Tick skipped: {}", e);
            write_state(state).record_error(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonitorConfig, ProcessSample, Snapshot};
    use crate::services::collector::StaticCollector;
    use crate::state::new_state;
    use std::time::Duration;

    fn snapshot(cpu: f64) -> Snapshot {
        Snapshot::new(vec![ProcessSample::new(1, 0, "nginx", cpu, 0)])
    }

    #[test]
    fn test_publish_result_publishes_and_records_errors() {
        let state = new_state(true);
        let collector = StaticCollector::new(vec![Ok(snapshot(10.0)), Err("boom".to_string())]);
        let mut monitor = Monitor::new(collector, MonitorConfig::default());

        publish_result(&state, monitor.poll());
        assert_eq!(read_state(&state).processes.len(), 1);

        publish_result(&state, monitor.poll());
        let inner = read_state(&state);
        assert_eq!(inner.processes.len(), 1);
        assert!(inner.last_error.as_deref().unwrap().contains("boom"));
    }

    #[tokio::test]
    async fn test_paused_loop_only_runs_on_force() {
        let state = new_state(true);
        write_state(&state).paused = true;

        let config = MonitorConfig {
            refresh_interval: Duration::from_millis(10),
            ..Default::default()
        };
        let collector = StaticCollector::new(vec![Ok(snapshot(10.0))]);
        let monitor = Monitor::new(collector, config);
        let force = Arc::new(Notify::new());

        let handle = tokio::spawn(run(state.clone(), monitor, force.clone()));
        time::sleep(Duration::from_millis(50)).await;
        assert!(read_state(&state).last_update.is_none());

        force.notify_one();
        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(read_state(&state).processes.len(), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_running_loop_publishes_from_blocking_pool() {
        let state = new_state(true);
        let config = MonitorConfig {
            refresh_interval: Duration::from_millis(10),
            ..Default::default()
        };
        let collector = StaticCollector::new(vec![Ok(snapshot(10.0)), Ok(snapshot(20.0))]);
        let monitor = Monitor::new(collector, config);

        let handle = tokio::spawn(run(state.clone(), monitor, Arc::new(Notify::new())));
        time::sleep(Duration::from_millis(100)).await;

        let inner = read_state(&state);
        assert!(inner.last_update.is_some());
        assert_eq!(inner.processes.len(), 1);
        assert_eq!(inner.processes[0].cpu_percent, 20.0);
        drop(inner);

        handle.abort();
    }
}
