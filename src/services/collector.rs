use crate::error::MonitorError;
use crate::models::{ProcessSample, Snapshot, SystemMetrics};
use sysinfo::{ProcessesToUpdate, System, ThreadKind};

/// 进程表采集接口，每个 tick 调用一次
pub trait SnapshotCollector: Send {
    fn collect(&mut self) -> Result<Snapshot, MonitorError>;
}

/// 基于 sysinfo 的采集器
///
/// 长期持有同一个 `System`，CPU 使用率是相邻两次刷新之间的差值，
/// 所以第一次采集的 CPU 值通常为 0。
pub struct SysinfoCollector {
    system: System,
}

impl SysinfoCollector {
    pub fn new() -> Self {
        Self {
            system: System::new_all(),
        }
    }

    fn system_metrics(&self) -> SystemMetrics {
        let sys = &self.system;
        SystemMetrics {
            cpu_percent: sys.global_cpu_usage() as f64,
            cpu_cores: sys.cpus().len(),
            memory_total: sys.total_memory(),
            memory_used: sys.used_memory(),
            memory_available: sys.available_memory(),
            swap_total: sys.total_swap(),
            swap_used: sys.used_swap(),
        }
    }
}

impl Default for SysinfoCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotCollector for SysinfoCollector {
    fn collect(&mut self) -> Result<Snapshot, MonitorError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MonitorError::CollectionFailure(
                "process listing is not supported on this platform".to_string(),
            ));
        }

        self.system.refresh_cpu_usage();
        self.system.refresh_memory();
        self.system.refresh_processes(ProcessesToUpdate::All, true);

        let mut processes = Vec::with_capacity(self.system.processes().len());
        let mut skipped = 0usize;

        for (pid, process) in self.system.processes() {
            // 线程与主进程共享 RSS，计入会重复统计
            if process.thread_kind() == Some(ThreadKind::Userland) {
                continue;
            }

            let name = process.name().to_string_lossy();
            if name.is_empty() {
                skipped += 1;
                continue;
            }

            processes.push(ProcessSample::new(
                pid.as_u32(),
                process.parent().map(|p| p.as_u32()).unwrap_or(0),
                name.into_owned(),
                normalize_cpu(process.cpu_usage()),
                process.memory(),
            ));
        }

        if processes.is_empty() {
            return Err(MonitorError::CollectionFailure("process table is empty".to_string()));
        }

        if skipped > 0 {
            log::debug!("Skipped {} inaccessible processes", skipped);
        }

        processes.sort_by_key(|p| p.pid);

        Ok(Snapshot {
            system: self.system_metrics(),
            ..Snapshot::new(processes)
        })
    }
}

fn normalize_cpu(cpu: f32) -> f64 {
    if cpu.is_finite() && cpu > 0.0 {
        cpu as f64
    } else {
        0.0
    }
}

/// 按顺序返回预先准备好的快照，用于测试
#[cfg(test)]
pub struct StaticCollector {
    ticks: std::collections::VecDeque<Result<Snapshot, String>>,
}

#[cfg(test)]
impl StaticCollector {
    pub fn new(ticks: Vec<Result<Snapshot, String>>) -> Self {
        Self { ticks: ticks.into() }
    }
}

#[cfg(test)]
impl SnapshotCollector for StaticCollector {
    fn collect(&mut self) -> Result<Snapshot, MonitorError> {
        match self.ticks.pop_front() {
            Some(Ok(snapshot)) => Ok(snapshot),
            Some(Err(reason)) => Err(MonitorError::CollectionFailure(reason)),
            None => Err(MonitorError::CollectionFailure("no more snapshots".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cpu() {
        assert_eq!(normalize_cpu(12.5), 12.5);
        assert_eq!(normalize_cpu(-1.0), 0.0);
        assert_eq!(normalize_cpu(f32::NAN), 0.0);
        assert_eq!(normalize_cpu(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_static_collector_replays_in_order() {
        let mut collector = StaticCollector::new(vec![
            Ok(Snapshot::new(vec![ProcessSample::new(1, 0, "a", 0.0, 0)])),
            Err("boom".to_string()),
        ]);

        assert_eq!(collector.collect().unwrap().len(), 1);
        assert!(matches!(collector.collect(), Err(MonitorError::CollectionFailure(r)) if r == "boom"));
        assert!(collector.collect().is_err());
    }

    #[test]
    fn test_sysinfo_collector_sees_current_process() {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return;
        }
        let mut collector = SysinfoCollector::new();
        let snapshot = collector.collect().unwrap();
        let me = std::process::id();
        assert!(snapshot.processes.iter().any(|p| p.pid == me));
    }
}
