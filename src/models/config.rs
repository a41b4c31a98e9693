use crate::services::classifier;
use std::time::Duration;

/// 默认视为系统根进程的进程名
pub const DEFAULT_SYSTEM_ROOTS: &[&str] = &["init", "systemd", "launchd", "kthreadd", "kernel_task"];

/// 监控配置
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// CPU 阈值 (百分比)
    pub cpu_threshold_percent: f64,
    /// 内存阈值 (字节)
    pub memory_threshold_bytes: u64,
    /// 刷新间隔
    pub refresh_interval: Duration,
    /// 展开时是否显示线程
    pub show_threads: bool,
    /// 不吸收任何后代的系统根进程名
    pub system_roots: Vec<String>,
}

impl MonitorConfig {
    /// 聚合值满足任一阈值即入选
    pub fn qualifies(&self, cpu_percent: f64, memory_bytes: u64) -> bool {
        cpu_percent >= self.cpu_threshold_percent || memory_bytes >= self.memory_threshold_bytes
    }

    pub fn is_system_root(&self, name: &str) -> bool {
        classifier::is_system_root(name, &self.system_roots)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cpu_threshold_percent: 5.0,
            memory_threshold_bytes: 50 * 1024 * 1024,
            refresh_interval: Duration::from_secs(1),
            show_threads: true,
            system_roots: DEFAULT_SYSTEM_ROOTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = MonitorConfig::default();
        assert_eq!(cfg.cpu_threshold_percent, 5.0);
        assert_eq!(cfg.memory_threshold_bytes, 50 * 1024 * 1024);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(1));
        assert!(cfg.show_threads);
        assert!(cfg.is_system_root("systemd"));
        assert!(cfg.is_system_root("launchd"));
        assert!(!cfg.is_system_root("chrome"));
    }

    #[test]
    fn test_qualifies_on_either_threshold() {
        let cfg = MonitorConfig::default();
        assert!(cfg.qualifies(5.0, 0));
        assert!(cfg.qualifies(0.0, 50 * 1024 * 1024));
        assert!(!cfg.qualifies(4.9, 50 * 1024 * 1024 - 1));
    }

    #[test]
    fn test_custom_system_root_matches_classifier() {
        let mut cfg = MonitorConfig::default();
        cfg.system_roots.push("runit".to_string());

        assert!(cfg.is_system_root("runit"));
        assert!(classifier::is_system_root("runit", &cfg.system_roots));
        assert!(!cfg.is_system_root("runit-svc"));
    }
}
