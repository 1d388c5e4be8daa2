use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::tui::AppEvent;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick().await,
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.show_category_picker {
        handle_category_picker(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Next quote
        KeyCode::Char('n') | KeyCode::Enter | KeyCode::Right => app.request_next(),

        KeyCode::Char('c') => app.open_category_picker(),

        _ => {}
    }
}

fn handle_category_picker(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.show_category_picker = false,
        KeyCode::Char('j') | KeyCode::Down => app.category_picker_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.category_picker_nav_up(),
        KeyCode::Enter => app.confirm_category(),
        _ => {}
    }
}
