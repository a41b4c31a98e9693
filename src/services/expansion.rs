use crate::models::ProcessNode;
use std::collections::{HashMap, HashSet};

/// 按 PID 记录的展开/折叠状态，只在本次会话内跨 tick 保留
///
/// PID 会被系统复用，每个 tick 都会丢弃已不存在的 PID，
/// 所以过期状态最多残留一个 tick。
#[derive(Debug, Clone, Default)]
pub struct ExpansionStore {
    expanded: HashMap<u32, bool>,
}

impl ExpansionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 翻转展开状态，返回翻转后的值
    pub fn toggle(&mut self, pid: u32) -> bool {
        let flag = self.expanded.entry(pid).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// 未记录的 PID 默认折叠
    pub fn is_expanded(&self, pid: u32) -> bool {
        self.expanded.get(&pid).copied().unwrap_or(false)
    }

    /// 把保存的状态写回本 tick 新建的节点
    pub fn apply(&self, nodes: &mut [ProcessNode]) {
        for node in nodes {
            node.expanded = self.is_expanded(node.pid);
        }
    }

    /// 丢弃本次采样中已经不存在的 PID
    pub fn retain_live(&mut self, live_pids: &HashSet<u32>) {
        self.expanded.retain(|pid, expanded| *expanded && live_pids.contains(pid));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }
}
