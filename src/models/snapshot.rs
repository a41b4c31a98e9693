use crate::models::ProcessSample;
use serde::Serialize;

/// 系统整体资源
#[derive(Debug, Clone, Serialize, Default)]
pub struct SystemMetrics {
    /// 全局 CPU 使用率 (百分比，0-100)
    pub cpu_percent: f64,
    /// 逻辑核数
    pub cpu_cores: usize,
    pub memory_total: u64,
    pub memory_used: u64,
    pub memory_available: u64,
    pub swap_total: u64,
    pub swap_used: u64,
}

impl SystemMetrics {
    pub fn memory_percent(&self) -> f64 {
        percent(self.memory_used, self.memory_total)
    }

    pub fn swap_percent(&self) -> f64 {
        percent(self.swap_used, self.swap_total)
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total > 0 {
        used as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// 一次 tick 采集到的全部进程
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub processes: Vec<ProcessSample>,
    pub system: SystemMetrics,
}

impl Snapshot {
    pub fn new(processes: Vec<ProcessSample>) -> Self {
        Self {
            processes,
            system: SystemMetrics::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_percent_without_total() {
        let metrics = SystemMetrics::default();
        assert_eq!(metrics.memory_percent(), 0.0);
        assert_eq!(metrics.swap_percent(), 0.0);
    }

    #[test]
    fn test_memory_percent() {
        let metrics = SystemMetrics {
            memory_total: 200,
            memory_used: 50,
            ..Default::default()
        };
        assert_eq!(metrics.memory_percent(), 25.0);
    }

    #[test]
    fn test_swap_percent() {
        let metrics = SystemMetrics {
            swap_total: 400,
            swap_used: 100,
            ..Default::default()
        };
        assert_eq!(metrics.swap_percent(), 25.0);
    }
}
