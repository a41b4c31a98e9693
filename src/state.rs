use crate::models::{ProcessNode, SystemMetrics};
use crate::services::expansion::ExpansionStore;
use crate::services::monitor::Tick;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

pub struct AppStateInner {
    /// 最近一次成功发布的顶层进程
    pub processes: Vec<ProcessNode>,
    pub expansion: ExpansionStore,
    pub system: SystemMetrics,
    pub selected: usize,
    pub paused: bool,
    pub show_threads: bool,
    /// 最近一次 tick 的采集错误，成功后清除
    pub last_error: Option<String>,
    pub last_update: Option<Instant>,
}

pub type AppState = Arc<RwLock<AppStateInner>>;

pub fn new_state(show_threads: bool) -> AppState {
    Arc::new(RwLock::new(AppStateInner {
        processes: Vec::new(),
        expansion: ExpansionStore::new(),
        system: SystemMetrics::default(),
        selected: 0,
        paused: false,
        show_threads,
        last_error: None,
        last_update: None,
    }))
}

pub fn read_state(state: &AppState) -> RwLockReadGuard<'_, AppStateInner> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write_state(state: &AppState) -> RwLockWriteGuard<'_, AppStateInner> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

impl AppStateInner {
    /// 发布新的一帧，展开状态以 store 为准
    pub fn publish(&mut self, tick: Tick) {
        let Tick {
            mut processes,
            system,
            live_pids,
        } = tick;

        self.expansion.retain_live(&live_pids);
        self.expansion.apply(&mut processes);

        self.processes = processes;
        self.system = system;
        self.last_error = None;
        self.last_update = Some(Instant::now());
        self.clamp_selection();
    }

    /// 采集失败时保留上一帧
    pub fn record_error(&mut self, error: String) {
        self.last_error = Some(error);
    }

    /// 不在当前列表中的 PID 直接忽略
    pub fn toggle_expanded(&mut self, pid: u32) {
        let Some(node) = self.processes.iter_mut().find(|n| n.pid == pid) else {
            return;
        };
        node.expanded = self.expansion.toggle(pid);
    }

    pub fn toggle_selected(&mut self) {
        if let Some(pid) = self.processes.get(self.selected).map(|n| n.pid) {
            self.toggle_expanded(pid);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// 上下移动光标，越界时回绕
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.processes.len();
        if len == 0 {
            return;
        }
        let len = len as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    /// None 表示最后一行
    pub fn set_cursor(&mut self, pos: Option<usize>) {
        let len = self.processes.len();
        if len == 0 {
            return;
        }
        self.selected = pos.map_or(len - 1, |p| p.min(len - 1));
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.processes.len().saturating_sub(1));
    }
}
