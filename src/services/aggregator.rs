use crate::models::{ChildEntry, ProcessNode};
use crate::services::classifier::{is_related_to_parent, is_thread};
use crate::services::hierarchy::Hierarchy;

/// 自底向上聚合资源
///
/// 返回的节点与 `hierarchy` 的 arena 下标一一对应。
/// 使用显式栈做后序遍历，进程树再深也不会栈溢出；
/// `visited` 保证每个节点只处理一次，重复入口是空操作。
pub fn aggregate(hierarchy: &Hierarchy<'_>, system_roots: &[String]) -> Vec<ProcessNode> {
    let len = hierarchy.len();
    let mut nodes: Vec<Option<ProcessNode>> = vec![None; len];
    let mut visited = vec![false; len];
    let mut stack: Vec<(usize, bool)> = Vec::new();

    for start in 0..len {
        if visited[start] {
            continue;
        }
        stack.push((start, false));

        while let Some((idx, children_done)) = stack.pop() {
            if children_done {
                let node = fold(hierarchy, idx, &nodes, system_roots);
                nodes[idx] = Some(node);
                continue;
            }
            if visited[idx] {
                continue;
            }
            visited[idx] = true;

            stack.push((idx, true));
            for &child in hierarchy.children_of(idx).iter().rev() {
                if !visited[child] {
                    stack.push((child, false));
                }
            }
        }
    }

    nodes.into_iter().flatten().collect()
}

/// 子进程均已聚合后计算 idx 的聚合值
fn fold(
    hierarchy: &Hierarchy<'_>,
    idx: usize,
    nodes: &[Option<ProcessNode>],
    system_roots: &[String],
) -> ProcessNode {
    let parent = hierarchy.sample(idx);
    let mut node = ProcessNode::leaf(parent);

    let mut total_cpu = parent.cpu_percent;
    let mut total_memory = parent.memory_bytes;

    for &child_idx in hierarchy.children_of(idx) {
        // 尚未完成的子节点只可能来自环，按叶子处理
        let Some(child_node) = nodes[child_idx].as_ref() else {
            continue;
        };
        let child = hierarchy.sample(child_idx);

        if !is_related_to_parent(child, parent, system_roots) {
            continue;
        }

        node.children.push(ChildEntry {
            pid: child.pid,
            name: child.name.clone(),
            cpu_percent: child_node.cpu_percent,
            memory_bytes: child_node.memory_bytes,
            is_thread: is_thread(child, parent),
        });

        total_cpu += child_node.cpu_percent;
        total_memory = total_memory.saturating_add(child_node.memory_bytes);
    }

    if !node.children.is_empty() {
        node.cpu_percent = total_cpu;
        node.memory_bytes = total_memory;
    }

    node
}
