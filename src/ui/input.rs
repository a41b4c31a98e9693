use crate::state::{write_state, AppState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Continue,
    Quit,
}

/// 处理一次按键，展开/暂停/光标都在写锁内完成
pub fn handle_key(key: KeyEvent, state: &AppState, force: &Notify) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return InputAction::Quit,
        KeyCode::Char(' ') => write_state(state).toggle_pause(),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            log::debug!("Forced refresh requested");
            force.notify_one();
        }
        KeyCode::Up => write_state(state).move_cursor(-1),
        KeyCode::Down => write_state(state).move_cursor(1),
        KeyCode::Home => write_state(state).set_cursor(Some(0)),
        KeyCode::End => write_state(state).set_cursor(None),
        KeyCode::Enter => write_state(state).toggle_selected(),
        _ => {}
    }

    InputAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChildEntry, ProcessNode, ProcessSample, SystemMetrics};
    use crate::services::monitor::Tick;
    use crate::state::{new_state, read_state};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn populated_state() -> AppState {
        let state = new_state(true);
        let mut parent = ProcessNode::leaf(&ProcessSample::new(1, 0, "chrome", 10.0, 0));
        parent.children.push(ChildEntry {
            pid: 2,
            name: "chrome-gpu".to_string(),
            cpu_percent: 1.0,
            memory_bytes: 0,
            is_thread: true,
        });
        let other = ProcessNode::leaf(&ProcessSample::new(3, 0, "nginx", 6.0, 0));
        write_state(&state).publish(Tick {
            processes: vec![parent, other],
            system: SystemMetrics::default(),
            live_pids: [1, 2, 3].into_iter().collect(),
        });
        state
    }

    #[test]
    fn test_quit_keys() {
        let state = new_state(true);
        let force = Notify::new();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &state, &force), InputAction::Quit);
        assert_eq!(handle_key(key(KeyCode::Esc), &state, &force), InputAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c, &state, &force), InputAction::Quit);
        assert_eq!(handle_key(key(KeyCode::Char('c')), &state, &force), InputAction::Continue);
    }

    #[test]
    fn test_pause_toggle() {
        let state = new_state(true);
        let force = Notify::new();
        handle_key(key(KeyCode::Char(' ')), &state, &force);
        assert!(read_state(&state).paused);
        handle_key(key(KeyCode::Char(' ')), &state, &force);
        assert!(!read_state(&state).paused);
    }

    #[test]
    fn test_enter_expands_selected() {
        let state = populated_state();
        let force = Notify::new();

        handle_key(key(KeyCode::Enter), &state, &force);
        assert!(read_state(&state).processes[0].expanded);

        handle_key(key(KeyCode::Down), &state, &force);
        handle_key(key(KeyCode::Enter), &state, &force);
        let inner = read_state(&state);
        assert_eq!(inner.selected, 1);
        assert!(inner.processes[1].expanded);
    }

    #[test]
    fn test_navigation_keys() {
        let state = populated_state();
        let force = Notify::new();

        handle_key(key(KeyCode::End), &state, &force);
        assert_eq!(read_state(&state).selected, 1);
        handle_key(key(KeyCode::Down), &state, &force);
        assert_eq!(read_state(&state).selected, 0);
        handle_key(key(KeyCode::Up), &state, &force);
        assert_eq!(read_state(&state).selected, 1);
        handle_key(key(KeyCode::Home), &state, &force);
        assert_eq!(read_state(&state).selected, 0);
    }
}
