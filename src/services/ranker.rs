use crate::models::{MonitorConfig, ProcessNode};
use crate::services::hierarchy::Hierarchy;

/// 过滤并排序顶层进程
///
/// 聚合值满足 CPU 或内存任一阈值即入选。只返回没有入选祖先的进程，
/// 即列表中不会同时出现一个进程和它的祖先。
/// 按聚合 CPU 降序稳定排序，相同值保持采样顺序。
pub fn rank(hierarchy: &Hierarchy<'_>, nodes: Vec<ProcessNode>, config: &MonitorConfig) -> Vec<ProcessNode> {
    let qualifying: Vec<bool> = nodes
        .iter()
        .map(|node| config.qualifies(node.cpu_percent, node.memory_bytes))
        .collect();
    let covered = qualifying_ancestors(hierarchy, &qualifying);

    let mut top_level: Vec<ProcessNode> = nodes
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| qualifying[*idx] && !covered[*idx])
        .map(|(_, node)| node)
        .collect();

    top_level.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    top_level
}

/// 每个节点是否存在入选的祖先
///
/// 沿 parent 链向上走，结果按路径回填，整体 O(n)。
/// 层级在建树时已去环，链一定会终止。
fn qualifying_ancestors(hierarchy: &Hierarchy<'_>, qualifying: &[bool]) -> Vec<bool> {
    let mut covered: Vec<Option<bool>> = vec![None; qualifying.len()];
    let mut path = Vec::new();

    for start in 0..qualifying.len() {
        let mut idx = start;
        let mut answer = false;

        while covered[idx].is_none() {
            match hierarchy.parent_of(idx) {
                Some(parent) if qualifying[parent] => {
                    answer = true;
                    break;
                }
                Some(parent) => {
                    path.push(idx);
                    idx = parent;
                }
                None => break,
            }
        }

        let answer = covered[idx].unwrap_or(answer);
        covered[idx] = Some(answer);
        for node in path.drain(..) {
            covered[node] = Some(answer);
        }
    }

    covered.into_iter().map(|c| c.unwrap_or(false)).collect()
}
