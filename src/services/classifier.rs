use crate::models::ProcessSample;

/// 子进程内存低于父进程的这个比例时视为线程
const THREAD_MEMORY_RATIO: f64 = 0.10;

/// 判断子进程更像线程还是独立的子进程（仅用于显示）
///
/// 启发式规则：
/// 1. 与父进程同名
/// 2. 以父进程名为前缀（如 chrome -> chrome-gpu）
/// 3. 内存远小于父进程（线程共享地址空间）
pub fn is_thread(child: &ProcessSample, parent: &ProcessSample) -> bool {
    if child.name.starts_with(parent.name.as_str()) {
        return true;
    }

    parent.memory_bytes > 0
        && (child.memory_bytes as f64 / parent.memory_bytes as f64) < THREAD_MEMORY_RATIO
}

/// 判断子进程的资源是否并入父进程
///
/// 系统根进程（init/systemd/launchd 等）是整棵进程树的祖先，
/// 永远不吸收后代，否则它会把整台机器的资源算在自己头上。
pub fn is_related_to_parent(child: &ProcessSample, parent: &ProcessSample, system_roots: &[String]) -> bool {
    if is_system_root(&parent.name, system_roots) {
        return false;
    }

    // 空名称是任何名称的前缀，不能据此判断同族
    if child.name.is_empty() || parent.name.is_empty() {
        return false;
    }

    child.name.starts_with(parent.name.as_str()) || parent.name.starts_with(child.name.as_str())
}

pub fn is_system_root(name: &str, system_roots: &[String]) -> bool {
    system_roots.iter().any(|root| root == name)
}
