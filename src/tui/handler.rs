//! Event handler for the TUI
//!
//! Routes keyboard events to the active dialog or the current step, and
//! feeds worker completions back into the app state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::wizard::Step;

use super::app::{ActiveDialog, App, CategoryLoad};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::CategoriesLoaded { generation, result } => {
            app.on_categories_loaded(generation, result);
            Ok(())
        }
        Event::SubmissionDone { generation, result } => {
            app.on_submission_done(generation, result);
            Ok(())
        }
        Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    // Dialogs swallow all input until dismissed
    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }

    // Global keys
    match key.code {
        // Direct step entry, resolved through the guards
        KeyCode::F(1) => {
            app.goto(Step::Personal);
            return Ok(());
        }
        KeyCode::F(2) => {
            app.goto(Step::Employment);
            return Ok(());
        }
        KeyCode::F(3) => {
            app.goto(Step::Loan);
            return Ok(());
        }
        KeyCode::Enter => {
            app.submit_current();
            return Ok(());
        }
        KeyCode::Esc => {
            if app.step == Step::Personal {
                app.quit();
            } else {
                app.go_back();
            }
            return Ok(());
        }
        KeyCode::Tab | KeyCode::Down => {
            focus_next(app);
            return Ok(());
        }
        KeyCode::BackTab | KeyCode::Up => {
            focus_prev(app);
            return Ok(());
        }
        _ => {}
    }

    match app.step {
        Step::Personal => handle_personal_key(app, key),
        Step::Employment => handle_employment_key(app, key),
        Step::Loan => handle_loan_key(app, key),
    }
}

/// Keys while a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let dismiss = match (&app.active_dialog, key.code) {
        (ActiveDialog::Confirm(_), KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => true,
        (ActiveDialog::Error(_), KeyCode::Enter | KeyCode::Esc) => true,
        _ => false,
    };
    if dismiss {
        app.close_dialog();
    }
    Ok(())
}

fn focus_next(app: &mut App) {
    match app.step {
        Step::Personal => app.personal.focus_next(),
        Step::Employment => app.employment.focus_next(),
        Step::Loan => app.loan.focus_next(),
    }
}

fn focus_prev(app: &mut App) {
    match app.step {
        Step::Personal => app.personal.focus_prev(),
        Step::Employment => app.employment.focus_prev(),
        Step::Loan => app.loan.focus_prev(),
    }
}

/// Keys on step 1
fn handle_personal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    use super::steps::personal::PersonalField;

    if app.personal.focused == PersonalField::Gender {
        match key.code {
            KeyCode::Left => app.personal.gender.prev(),
            KeyCode::Right | KeyCode::Char(' ') => app.personal.gender.next(),
            _ => {}
        }
        return Ok(());
    }

    if let Some(input) = app.personal.focused_input() {
        edit_text(input, key);
    }
    Ok(())
}

/// Keys on step 2
fn handle_employment_key(app: &mut App, key: KeyEvent) -> Result<()> {
    use super::steps::employment::EmploymentField;

    // Retry the category fetch; always re-fetches, ignoring the cache window
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        app.retry_categories();
        return Ok(());
    }

    match app.employment.focused {
        EmploymentField::Workplace => {
            // The select is withheld until the list is ready
            if !matches!(app.categories, CategoryLoad::Ready(_)) {
                return Ok(());
            }
            match key.code {
                KeyCode::Left => app.employment.workplace.prev(),
                KeyCode::Right | KeyCode::Char(' ') => app.employment.workplace.next(),
                _ => {}
            }
        }
        EmploymentField::Address => edit_text(&mut app.employment.address, key),
    }
    Ok(())
}

/// Keys on step 3
fn handle_loan_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let slider = app.loan.focused_slider();
    match key.code {
        KeyCode::Left | KeyCode::Char('-') => slider.decrease(),
        KeyCode::Right | KeyCode::Char('+') => slider.increase(),
        KeyCode::Home => slider.to_min(),
        KeyCode::End => slider.to_max(),
        _ => {}
    }
    Ok(())
}

/// Apply an editing key to a text input
fn edit_text(input: &mut super::widgets::TextInput, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogClient, CategoryOption};
    use crate::config::Settings;
    use std::sync::mpsc;

    fn test_app() -> (App, mpsc::Receiver<Event>) {
        let settings = Settings {
            api_base_url: "http://127.0.0.1:9".into(),
            ..Settings::default()
        };
        let client = CatalogClient::new(&settings).unwrap();
        let (sender, receiver) = mpsc::channel();
        (App::new(settings, client, sender, Step::Personal), receiver)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, Event::Key(key(KeyCode::Char(c)))).unwrap();
        }
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let (mut app, _rx) = test_app();
        type_text(&mut app, "0123 456 789");
        assert_eq!(app.personal.phone.value(), "0123 456 789");

        handle_event(&mut app, Event::Key(key(KeyCode::Tab))).unwrap();
        type_text(&mut app, "Ana");
        assert_eq!(app.personal.first_name.value(), "Ana");
    }

    #[test]
    fn test_enter_submits_and_shows_errors() {
        let (mut app, _rx) = test_app();
        handle_event(&mut app, Event::Key(key(KeyCode::Enter))).unwrap();
        assert_eq!(app.step, Step::Personal);
        assert!(app.personal.phone.error.is_some());
    }

    #[test]
    fn test_full_keyboard_flow_reaches_step3() {
        let (mut app, _rx) = test_app();
        type_text(&mut app, "0123 456 789");
        handle_event(&mut app, Event::Key(key(KeyCode::Tab))).unwrap();
        type_text(&mut app, "Ana");
        handle_event(&mut app, Event::Key(key(KeyCode::Tab))).unwrap();
        type_text(&mut app, "Pop");
        handle_event(&mut app, Event::Key(key(KeyCode::Tab))).unwrap();
        handle_event(&mut app, Event::Key(key(KeyCode::Right))).unwrap(); // Мужской
        handle_event(&mut app, Event::Key(key(KeyCode::Enter))).unwrap();
        assert_eq!(app.step, Step::Employment);

        // categories arrive
        handle_event(
            &mut app,
            Event::CategoriesLoaded {
                generation: 1,
                result: Ok(vec![CategoryOption {
                    value: "smartphones".into(),
                    label: "Smartphones".into(),
                }]),
            },
        )
        .unwrap();
        handle_event(&mut app, Event::Key(key(KeyCode::Right))).unwrap(); // pick category
        handle_event(&mut app, Event::Key(key(KeyCode::Tab))).unwrap();
        type_text(&mut app, "Str. X 1");
        handle_event(&mut app, Event::Key(key(KeyCode::Enter))).unwrap();
        assert_eq!(app.step, Step::Loan);

        // adjust sliders: amount 200 -> 500, term 10 -> 15
        for _ in 0..3 {
            handle_event(&mut app, Event::Key(key(KeyCode::Right))).unwrap();
        }
        assert_eq!(app.loan.amount.value, 500);
        handle_event(&mut app, Event::Key(key(KeyCode::Tab))).unwrap();
        for _ in 0..5 {
            handle_event(&mut app, Event::Key(key(KeyCode::Right))).unwrap();
        }
        assert_eq!(app.loan.term.value, 15);
    }

    #[test]
    fn test_esc_goes_back_and_quits_from_step1() {
        let (mut app, _rx) = test_app();
        handle_event(&mut app, Event::Key(key(KeyCode::Esc))).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let (mut app, _rx) = test_app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_event(&mut app, Event::Key(ctrl_c)).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_dialog_swallows_input_until_dismissed() {
        let (mut app, _rx) = test_app();
        app.active_dialog = ActiveDialog::Confirm("ok".into());
        type_text(&mut app, "x");
        assert_eq!(app.personal.phone.value(), "");

        handle_event(&mut app, Event::Key(key(KeyCode::Enter))).unwrap();
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_slider_clamps_via_keys() {
        let (mut app, _rx) = test_app();
        app.form.merge(crate::form::FormPatch::personal(
            "0123 456 789".into(),
            "Ana".into(),
            "Pop".into(),
            crate::form::Gender::Male,
        ));
        app.form
            .merge(crate::form::FormPatch::employment("a".into(), "b".into()));
        app.goto(Step::Loan);
        assert_eq!(app.step, Step::Loan);

        handle_event(&mut app, Event::Key(key(KeyCode::Left))).unwrap();
        assert_eq!(app.loan.amount.value, 200);
        handle_event(&mut app, Event::Key(key(KeyCode::End))).unwrap();
        assert_eq!(app.loan.amount.value, 1000);
        handle_event(&mut app, Event::Key(key(KeyCode::Right))).unwrap();
        assert_eq!(app.loan.amount.value, 1000);
    }
}
