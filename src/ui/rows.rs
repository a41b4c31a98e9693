use crate::models::{ProcessNode, ResourceLevel};
use crate::ui::format::{format_bytes, format_cpu};

/// 表格中一行的类型，决定前缀和颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Process(ResourceLevel),
    /// 展开后父进程自身的 "(parent)" 行
    Parent,
    Thread,
    Child,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub kind: RowKind,
    pub selected: bool,
    pub pid: String,
    pub cpu: String,
    pub memory: String,
    pub children: String,
    pub name: String,
}

/// 把顶层进程展开成表格行，同时返回选中行的下标
pub fn build_rows(processes: &[ProcessNode], selected: usize, show_threads: bool) -> (Vec<DisplayRow>, Option<usize>) {
    let mut rows = Vec::new();
    let mut selected_row = None;

    for (i, process) in processes.iter().enumerate() {
        let is_selected = i == selected;
        if is_selected {
            selected_row = Some(rows.len());
        }

        rows.push(DisplayRow {
            kind: RowKind::Process(process.level()),
            selected: is_selected,
            pid: process.pid.to_string(),
            cpu: format_cpu(process.cpu_percent),
            memory: format_bytes(process.memory_bytes),
            children: process.children.len().to_string(),
            name: format!("{} {}", status_icon(process), process.name),
        });

        if !process.expanded || !process.is_aggregated() {
            continue;
        }

        rows.push(DisplayRow {
            kind: RowKind::Parent,
            selected: false,
            pid: process.pid.to_string(),
            cpu: format_cpu(process.original_cpu),
            memory: format_bytes(process.original_memory_bytes),
            children: String::new(),
            name: format!("  ├─● {} (parent)", process.name),
        });

        for child in &process.children {
            if child.is_thread && !show_threads {
                continue;
            }
            let (kind, prefix, label) = if child.is_thread {
                (RowKind::Thread, "╠═", "thread")
            } else {
                (RowKind::Child, "├─", "child")
            };
            rows.push(DisplayRow {
                kind,
                selected: false,
                pid: child.pid.to_string(),
                cpu: format_cpu(child.cpu_percent),
                memory: format_bytes(child.memory_bytes),
                children: String::new(),
                name: format!("  {} {} ({})", prefix, child.name, label),
            });
        }
    }

    (rows, selected_row)
}

fn status_icon(process: &ProcessNode) -> &'static str {
    match (process.is_aggregated(), process.expanded) {
        (false, _) => "•",
        (true, true) => "▼",
        (true, false) => "▶",
    }
}
