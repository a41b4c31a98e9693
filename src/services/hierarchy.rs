use crate::models::ProcessSample;
use std::collections::HashMap;

/// 当前 tick 的进程树索引
///
/// 进程按采样顺序存放在 arena 中，父子关系用 arena 下标表示。
/// 以下情况视为没有父进程（显示为顶层）：
/// - ppid 为 0
/// - ppid 不在本次采样中（父进程已退出）
/// - ppid 指向自己
/// - 处于 ppid 环上（采样期间 PID 复用导致）
pub struct Hierarchy<'a> {
    samples: Vec<&'a ProcessSample>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl<'a> Hierarchy<'a> {
    pub fn build(processes: &'a [ProcessSample]) -> Self {
        let mut samples = Vec::with_capacity(processes.len());
        let mut index = HashMap::with_capacity(processes.len());

        for sample in processes {
            if index.contains_key(&sample.pid) {
                log::debug!("Duplicate PID {} in snapshot, keeping first sample", sample.pid);
                continue;
            }
            index.insert(sample.pid, samples.len());
            samples.push(sample);
        }

        let mut parents: Vec<Option<usize>> = samples
            .iter()
            .enumerate()
            .map(|(idx, sample)| {
                sample
                    .parent()
                    .and_then(|ppid| index.get(&ppid).copied())
                    .filter(|&parent| parent != idx)
            })
            .collect();

        break_cycles(&mut parents);

        let mut children = vec![Vec::new(); samples.len()];
        for (idx, parent) in parents.iter().enumerate() {
            if let Some(parent) = parent {
                children[*parent].push(idx);
            }
        }

        Self {
            samples,
            parents,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn sample(&self, idx: usize) -> &'a ProcessSample {
        self.samples[idx]
    }

    #[cfg(test)]
    pub fn index_of(&self, pid: u32) -> Option<usize> {
        self.samples.iter().position(|s| s.pid == pid)
    }

    pub fn parent_of(&self, idx: usize) -> Option<usize> {
        self.parents[idx]
    }

    pub fn children_of(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    /// 父进程 PID -> 子进程 PID 列表
    #[cfg(test)]
    pub fn child_pids(&self, pid: u32) -> Vec<u32> {
        self.index_of(pid)
            .map(|idx| self.children[idx].iter().map(|&c| self.samples[c].pid).collect())
            .unwrap_or_default()
    }
}

/// 每个节点至多一条出边，沿 parent 链着色即可找出所有环并断开
fn break_cycles(parents: &mut [Option<usize>]) {
    const UNSEEN: u8 = 0;
    const ON_PATH: u8 = 1;
    const DONE: u8 = 2;

    let mut color = vec![UNSEEN; parents.len()];
    let mut path = Vec::new();

    for start in 0..parents.len() {
        if color[start] != UNSEEN {
            continue;
        }

        let mut current = Some(start);
        while let Some(idx) = current {
            match color[idx] {
                UNSEEN => {
                    color[idx] = ON_PATH;
                    path.push(idx);
                    current = parents[idx];
                }
                ON_PATH => {
                    // idx 是环的入口，path 中从 idx 开始的部分构成环
                    if let Some(pos) = path.iter().position(|&p| p == idx) {
                        for &member in &path[pos..] {
                            log::debug!("Breaking parent cycle at arena index {}", member);
                            parents[member] = None;
                        }
                    }
                    current = None;
                }
                _ => current = None,
            }
        }

        for idx in path.drain(..) {
            color[idx] = DONE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pid: u32, ppid: u32) -> ProcessSample {
        ProcessSample::new(pid, ppid, format!("p{}", pid), 0.0, 0)
    }

    #[test]
    fn test_children_index() {
        let processes = vec![sample(1, 0), sample(2, 1), sample(3, 1), sample(4, 2)];
        let h = Hierarchy::build(&processes);

        assert_eq!(h.len(), 4);
        assert_eq!(h.child_pids(1), vec![2, 3]);
        assert_eq!(h.child_pids(2), vec![4]);
        assert!(h.child_pids(4).is_empty());
        assert_eq!(h.parent_of(0), None);
    }

    #[test]
    fn test_missing_parent_is_top_level() {
        let processes = vec![sample(10, 999), sample(11, 10)];
        let h = Hierarchy::build(&processes);

        assert_eq!(h.parent_of(0), None);
        assert_eq!(h.parent_of(1), Some(0));
        for process in &processes {
            assert!(h.index_of(process.pid).is_some());
        }
    }

    #[test]
    fn test_self_parent_is_leaf() {
        let processes = vec![sample(5, 5)];
        let h = Hierarchy::build(&processes);

        assert_eq!(h.parent_of(0), None);
        assert!(h.children_of(0).is_empty());
    }

    #[test]
    fn test_two_node_cycle_is_broken() {
        let processes = vec![sample(1, 2), sample(2, 1)];
        let h = Hierarchy::build(&processes);

        assert_eq!(h.parent_of(0), None);
        assert_eq!(h.parent_of(1), None);
        assert!(h.children_of(0).is_empty());
        assert!(h.children_of(1).is_empty());
    }

    #[test]
    fn test_cycle_keeps_tail_attached() {
        // 7 -> 1 -> 2 -> 3 -> 1，只有环上的节点被断开
        let processes = vec![sample(1, 3), sample(2, 1), sample(3, 2), sample(7, 1)];
        let h = Hierarchy::build(&processes);

        assert_eq!(h.parent_of(0), None);
        assert_eq!(h.parent_of(1), None);
        assert_eq!(h.parent_of(2), None);
        assert_eq!(h.parent_of(3), Some(0));
        assert_eq!(h.child_pids(1), vec![7]);
    }

    #[test]
    fn test_duplicate_pid_keeps_first() {
        let processes = vec![sample(1, 0), ProcessSample::new(1, 0, "other", 1.0, 1)];
        let h = Hierarchy::build(&processes);

        assert_eq!(h.len(), 1);
        assert_eq!(h.sample(0).name, "p1");
        assert_eq!(h.index_of(1), Some(0));
    }
}
