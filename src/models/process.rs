use serde::Serialize;
use std::fmt;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// 单个进程在某一时刻的采样（不可变）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSample {
    /// 进程 ID（同一 tick 内唯一，跨 tick 可能被复用）
    pub pid: u32,
    /// 父进程 ID，0 表示没有父进程
    pub ppid: u32,
    /// 可执行文件名
    pub name: String,
    /// CPU 使用率 (百分比，多核时可能超过 100)
    pub cpu_percent: f64,
    /// 常驻内存 (字节)
    pub memory_bytes: u64,
}

impl ProcessSample {
    pub fn new(pid: u32, ppid: u32, name: impl Into<String>, cpu_percent: f64, memory_bytes: u64) -> Self {
        Self {
            pid,
            ppid,
            name: name.into(),
            cpu_percent,
            memory_bytes,
        }
    }

    /// 父进程 ID，ppid 为 0 时返回 None
    pub fn parent(&self) -> Option<u32> {
        (self.ppid != 0).then_some(self.ppid)
    }
}

/// 归入父进程视图的子进程/线程
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildEntry {
    pub pid: u32,
    pub name: String,
    /// 子进程自身的聚合值（子进程也可能有后代）
    pub cpu_percent: f64,
    pub memory_bytes: u64,
    pub is_thread: bool,
}

/// 聚合后的进程节点
///
/// `cpu_percent` / `memory_bytes` 是显示用的聚合值，
/// `original_*` 保留进程自身的采样值，用于展开时的 "(parent)" 行。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessNode {
    pub pid: u32,
    pub ppid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_bytes: u64,
    pub original_cpu: f64,
    pub original_memory_bytes: u64,
    pub children: Vec<ChildEntry>,
    pub expanded: bool,
}

impl ProcessNode {
    /// 叶子节点：聚合值等于采样值
    pub fn leaf(sample: &ProcessSample) -> Self {
        Self {
            pid: sample.pid,
            ppid: sample.ppid,
            name: sample.name.clone(),
            cpu_percent: sample.cpu_percent,
            memory_bytes: sample.memory_bytes,
            original_cpu: sample.cpu_percent,
            original_memory_bytes: sample.memory_bytes,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// 是否发生了聚合（至少有一个相关子进程）
    pub fn is_aggregated(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn memory_mb(&self) -> f64 {
        self.memory_bytes as f64 / BYTES_PER_MB
    }

    pub fn level(&self) -> ResourceLevel {
        ResourceLevel::classify(self.cpu_percent, self.memory_mb())
    }
}

/// 资源占用等级，用于显示着色
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ResourceLevel {
    Low,
    Medium,
    High,
}

impl ResourceLevel {
    /// CPU >= 50 或内存 >= 500MB 为 High，CPU >= 20 或内存 >= 200MB 为 Medium
    pub fn classify(cpu_percent: f64, memory_mb: f64) -> Self {
        if cpu_percent >= 50.0 || memory_mb >= 500.0 {
            ResourceLevel::High
        } else if cpu_percent >= 20.0 || memory_mb >= 200.0 {
            ResourceLevel::Medium
        } else {
            ResourceLevel::Low
        }
    }
}

impl fmt::Display for ResourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLevel::Low => write!(f, "Low"),
            ResourceLevel::Medium => write!(f, "Medium"),
            ResourceLevel::High => write!(f, "High"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_level_boundaries() {
        assert_eq!(ResourceLevel::classify(0.0, 0.0), ResourceLevel::Low);
        assert_eq!(ResourceLevel::classify(19.9, 199.9), ResourceLevel::Low);
        assert_eq!(ResourceLevel::classify(20.0, 0.0), ResourceLevel::Medium);
        assert_eq!(ResourceLevel::classify(0.0, 200.0), ResourceLevel::Medium);
        assert_eq!(ResourceLevel::classify(50.0, 0.0), ResourceLevel::High);
        assert_eq!(ResourceLevel::classify(1.0, 500.0), ResourceLevel::High);
        assert_eq!(ResourceLevel::classify(150.0, 10.0), ResourceLevel::High);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(ResourceLevel::Low.to_string(), "Low");
        assert_eq!(ResourceLevel::Medium.to_string(), "Medium");
        assert_eq!(ResourceLevel::High.to_string(), "High");
    }

    #[test]
    fn test_leaf_preserves_sample() {
        let sample = ProcessSample::new(7, 1, "nginx", 12.5, 4096);
        let node = ProcessNode::leaf(&sample);
        assert_eq!(node.cpu_percent, 12.5);
        assert_eq!(node.original_cpu, 12.5);
        assert_eq!(node.memory_bytes, 4096);
        assert_eq!(node.original_memory_bytes, 4096);
        assert!(!node.is_aggregated());
        assert!(!node.expanded);
    }

    #[test]
    fn test_parent_zero_is_none() {
        assert_eq!(ProcessSample::new(1, 0, "init", 0.0, 0).parent(), None);
        assert_eq!(ProcessSample::new(2, 1, "sh", 0.0, 0).parent(), Some(1));
    }
}
