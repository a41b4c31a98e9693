use crate::error::MonitorError;
use crate::models::{MonitorConfig, ProcessNode, Snapshot, SystemMetrics};
use crate::services::aggregator::aggregate;
use crate::services::collector::SnapshotCollector;
use crate::services::expansion::ExpansionStore;
use crate::services::hierarchy::Hierarchy;
use crate::services::ranker::rank;
use std::collections::HashSet;

/// 一次聚合的结果
#[derive(Debug, Clone, Default)]
pub struct Tick {
    /// 排好序的顶层进程
    pub processes: Vec<ProcessNode>,
    pub system: SystemMetrics,
    /// 本次采样中出现过的全部 PID
    pub live_pids: HashSet<u32>,
}

/// 采集 -> 建树 -> 聚合 -> 过滤排序
pub struct Monitor<C: SnapshotCollector> {
    collector: C,
    config: MonitorConfig,
}

impl<C: SnapshotCollector> Monitor<C> {
    pub fn new(collector: C, config: MonitorConfig) -> Self {
        Self { collector, config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// 执行一次完整的聚合，不涉及展开状态
    pub fn poll(&mut self) -> Result<Tick, MonitorError> {
        let snapshot = self.collector.collect()?;
        let processes = build_forest(&snapshot, &self.config);

        log::debug!(
            "Aggregated {} processes into {} top-level entries",
            snapshot.len(),
            processes.len()
        );

        Ok(Tick {
            processes,
            live_pids: snapshot.processes.iter().map(|p| p.pid).collect(),
            system: snapshot.system,
        })
    }

    /// 聚合并从 `store` 恢复展开状态
    pub fn get_filtered_processes(&mut self, store: &mut ExpansionStore) -> Result<Vec<ProcessNode>, MonitorError> {
        let Tick {
            mut processes,
            live_pids,
            ..
        } = self.poll()?;

        store.retain_live(&live_pids);
        store.apply(&mut processes);
        Ok(processes)
    }
}

/// 对一份快照执行完整的聚合流程（纯计算）
pub fn build_forest(snapshot: &Snapshot, config: &MonitorConfig) -> Vec<ProcessNode> {
    let hierarchy = Hierarchy::build(&snapshot.processes);
    let nodes = aggregate(&hierarchy, &config.system_roots);
    rank(&hierarchy, nodes, config)
}
