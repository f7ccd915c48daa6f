pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use app::{InputMode, Tab, TEXT_FIELDS};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    // Autosave interval is validated at startup; fall back defensively anyway.
    let autosave_interval = app
        .config
        .autosave_duration()
        .unwrap_or(Duration::from_secs(30));
    let mut events = EventHandler::new(250, autosave_interval);

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
            Event::Autosave => app.autosave_tick(),
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode.clone() {
        InputMode::Normal => {
            match key.code {
                // Quit (with confirmation when the form is dirty)
                KeyCode::Char('q') => app.request_quit(),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.request_quit()
                }

                KeyCode::Tab => app.next_tab(),
                KeyCode::Char('?') => app.input_mode = InputMode::Help,

                _ => match app.current_tab {
                    Tab::Entry => handle_entry_key(app, key),
                    Tab::Dashboard => handle_dashboard_key(app, key),
                    Tab::Matrix => {}
                },
            }
        }
        InputMode::EditingField => match key.code {
            KeyCode::Enter => app.commit_field(),
            KeyCode::Esc => app.cancel_field(),
            KeyCode::Backspace => {
                app.edit_buffer.pop();
            }
            KeyCode::Char(c) => app.edit_buffer.push(c),
            _ => {}
        },
        InputMode::ConfirmDelete(index) => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(index),
            KeyCode::Char('n') | KeyCode::Esc => app.input_mode = InputMode::Normal,
            _ => {}
        },
        InputMode::ConfirmQuit => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_quit(),
            KeyCode::Char('n') | KeyCode::Esc => app.input_mode = InputMode::Normal,
            _ => {}
        },
        InputMode::Help => {
            // Any key exits help
            app.input_mode = InputMode::Normal;
        }
    }
}

fn handle_entry_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.next_field(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_field(),

        // Text rows open the editor; rating rows nudge with h/l
        KeyCode::Enter => {
            if app.field_cursor < TEXT_FIELDS {
                app.start_edit_field();
            }
        }
        KeyCode::Char('h') | KeyCode::Left => app.adjust_rating(-1),
        KeyCode::Char('l') | KeyCode::Right => app.adjust_rating(1),

        KeyCode::Char('s') => app.save_use_case(),
        KeyCode::Char('n') => app.clear_form(),

        _ => {}
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.next_row(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
        KeyCode::Enter | KeyCode::Char('e') => app.edit_selected(),
        KeyCode::Char('d') => app.request_delete(),
        _ => {}
    }
}
