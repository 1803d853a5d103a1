use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Quit,
    Tab(usize),
    NextTab,
    PrevTab,
    Up,
    Down,
    Refresh,
    ToggleAutoRefresh,
    Clear,
    Export,
    CycleExportFormat,
    Help,
    Confirm,
    Cancel,
    None,
}

pub fn poll_event(timeout: Duration) -> std::io::Result<Event> {
    if event::poll(timeout)? {
        if let CrosstermEvent::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(map_key_event(key));
            }
        }
    }
    Ok(Event::None)
}

pub fn map_key_event(key: KeyEvent) -> Event {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Event::Quit,
        (KeyCode::Char('q'), _) => Event::Quit,
        (KeyCode::Char('1'), _) => Event::Tab(0),
        (KeyCode::Char('2'), _) => Event::Tab(1),
        (KeyCode::Char('3'), _) => Event::Tab(2),
        (KeyCode::Char('l'), _) | (KeyCode::Tab, _) | (KeyCode::Right, _) => Event::NextTab,
        (KeyCode::Char('h'), _) | (KeyCode::BackTab, _) | (KeyCode::Left, _) => Event::PrevTab,
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Event::Up,
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Event::Down,
        (KeyCode::Char('r'), _) => Event::Refresh,
        (KeyCode::Char('a'), _) => Event::ToggleAutoRefresh,
        (KeyCode::Char('c'), _) => Event::Clear,
        (KeyCode::Char('e'), _) => Event::Export,
        (KeyCode::Char('f'), _) => Event::CycleExportFormat,
        (KeyCode::Char('?'), _) => Event::Help,
        (KeyCode::Char('y'), _) | (KeyCode::Char('Y'), _) | (KeyCode::Enter, _) => {
            Event::Confirm
        }
        (KeyCode::Char('n'), _) | (KeyCode::Char('N'), _) | (KeyCode::Esc, _) => Event::Cancel,
        _ => Event::None,
    }
}
