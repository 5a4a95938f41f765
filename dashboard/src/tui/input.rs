//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;
use crate::router::{Page, PageRouter};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // The modal owns the keyboard until dismissed
    if app.notification().is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.dismiss_notification();
        }
        return;
    }

    if navigate(app.router_mut(), key.code) {
        return;
    }

    if app.active_page() == Page::Rules {
        handle_rules_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            app.router_mut().show(Page::ALL[index]);
        }
        KeyCode::Up => menu_previous(app),
        KeyCode::Down => menu_next(app),
        KeyCode::Enter => app.start_current(),
        KeyCode::Char('x') => app.stop_current(),
        _ => {}
    }
}

/// Page switching shared by every page
fn navigate(router: &mut PageRouter, code: KeyCode) -> bool {
    match code {
        KeyCode::Tab => router.next(),
        KeyCode::BackTab => router.previous(),
        _ => return false,
    }
    true
}

fn handle_rules_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_rule(),
        KeyCode::Backspace => {
            app.rule_input.pop();
        }
        KeyCode::Esc => app.rule_input.clear(),
        KeyCode::Char(c) => app.rule_input.push(c),
        _ => {}
    }
}

fn menu_next(app: &mut App) {
    match app.active_page() {
        Page::Traffic => app.traffic_menu.select_next(),
        Page::Packets => app.packet_menu.select_next(),
        _ => {}
    }
}

fn menu_previous(app: &mut App) {
    match app.active_page() {
        Page::Traffic => app.traffic_menu.select_previous(),
        Page::Packets => app.packet_menu.select_previous(),
        _ => {}
    }
}
