use std::time::Instant;

use ratatui::crossterm::event::{Event, KeyEventKind};
use tokio::sync::mpsc;

use super::keybindings::{KeyAction, KeyBindings};
use super::ChatState;
use crate::api::{ApiError, HealthResponse, PredictResponse};
use crate::core::controller::PredictTicket;

pub enum AppAction {
    Key(KeyAction),
    EditInput(tui_textarea::Input),
    Paste(String),
    Redraw,
    HealthChecked(Result<HealthResponse, ApiError>),
    PredictFinished(Result<PredictResponse, ApiError>),
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AppCommand {
    SpawnPredict(PredictTicket),
}

pub(crate) fn sanitize_pasted_text(text: &str) -> String {
    let without_crlf = text.replace("\r\n", "\n");
    let without_cr = without_crlf.replace('\r', "\n");
    let expanded_tabs = without_cr.replace('\t', "    ");
    expanded_tabs
        .chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect()
}

/// Translate a terminal event into the action it triggers, if any.
pub fn action_for_event(event: Event, bindings: &KeyBindings) -> Option<AppAction> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(
            bindings
                .resolve(&key)
                .map(AppAction::Key)
                .unwrap_or_else(|| AppAction::EditInput(tui_textarea::Input::from(key))),
        ),
        Event::Paste(text) => {
            let sanitized = sanitize_pasted_text(&text);
            (!sanitized.is_empty()).then_some(AppAction::Paste(sanitized))
        }
        Event::Resize(_, _) => Some(AppAction::Redraw),
        _ => None,
    }
}

pub fn apply_actions(
    state: &mut ChatState,
    actions: impl IntoIterator<Item = AppAction>,
    now: Instant,
) -> Vec<AppCommand> {
    actions
        .into_iter()
        .filter_map(|action| apply_action(state, action, now))
        .collect()
}

pub fn apply_action(state: &mut ChatState, action: AppAction, now: Instant) -> Option<AppCommand> {
    let page = state.transcript_height.saturating_sub(1).max(1);
    let max_offset = state.max_scroll_offset;
    let controller = &mut state.controller;

    match action {
        AppAction::Key(KeyAction::Submit) => {
            return controller.begin_submit(now).map(AppCommand::SpawnPredict);
        }
        AppAction::Key(KeyAction::InsertNewline) => {
            controller.composer_mut().insert_newline();
        }
        AppAction::Key(KeyAction::DismissNotification) => {
            controller.dismiss_notification();
        }
        AppAction::Key(KeyAction::ScrollLineUp) => controller.scroll_mut().scroll_up(1),
        AppAction::Key(KeyAction::ScrollLineDown) => {
            controller.scroll_mut().scroll_down(1, max_offset)
        }
        AppAction::Key(KeyAction::PageUp) => controller.scroll_mut().scroll_up(page),
        AppAction::Key(KeyAction::PageDown) => controller.scroll_mut().scroll_down(page, max_offset),
        AppAction::Key(KeyAction::ScrollToTop) => controller.scroll_mut().scroll_to_top(),
        AppAction::Key(KeyAction::ScrollToBottom) => controller.scroll_mut().scroll_to_end(),
        AppAction::Key(KeyAction::Quit) => state.exit_requested = true,
        AppAction::EditInput(input) => {
            controller.composer_mut().apply_input(input);
        }
        AppAction::Paste(text) => {
            controller.composer_mut().insert_str(&text);
        }
        AppAction::Redraw => {}
        AppAction::HealthChecked(result) => {
            controller.apply_health_result(result, now);
        }
        AppAction::PredictFinished(result) => {
            controller.finish_submit(result, now);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Prediction;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn type_text(state: &mut ChatState, bindings: &KeyBindings, text: &str) {
        let actions: Vec<AppAction> = text
            .chars()
            .filter_map(|ch| action_for_event(press(KeyCode::Char(ch), KeyModifiers::NONE), bindings))
            .collect();
        apply_actions(state, actions, Instant::now());
    }

    #[test]
    fn typed_keys_reach_the_composer() {
        let bindings = KeyBindings::new();
        let mut state = ChatState::new();
        type_text(&mut state, &bindings, "hola");
        assert_eq!(state.controller.composer().text(), "hola");
        assert_eq!(state.controller.composer().counter_text(), "4/1000");
    }

    #[test]
    fn rapid_double_submit_spawns_one_request() {
        let bindings = KeyBindings::new();
        let mut state = ChatState::new();
        type_text(&mut state, &bindings, "Me siento ansioso");

        let enter = || {
            action_for_event(press(KeyCode::Enter, KeyModifiers::NONE), &bindings)
                .expect("enter is bound")
        };
        let first = apply_actions(&mut state, [enter()], Instant::now());
        type_text(&mut state, &bindings, "otra vez");
        let second = apply_actions(&mut state, [enter(), enter()], Instant::now());

        assert_eq!(
            first,
            vec![AppCommand::SpawnPredict(PredictTicket {
                message: "Me siento ansioso".into()
            })]
        );
        assert!(second.is_empty());
        assert!(state.controller.is_processing());
    }

    #[test]
    fn predict_result_releases_guard() {
        let mut state = ChatState::new();
        state.controller.composer_mut().set_text("hola");
        apply_action(&mut state, AppAction::Key(KeyAction::Submit), Instant::now());
        apply_action(
            &mut state,
            AppAction::PredictFinished(Ok(PredictResponse {
                prediction: Prediction {
                    label: "Neutro".into(),
                    confidence: 0.6,
                },
                response: "Gracias".into(),
            })),
            Instant::now(),
        );
        assert!(!state.controller.is_processing());
        assert_eq!(state.controller.history().len(), 1);
    }

    #[test]
    fn paste_is_sanitized_and_inserted() {
        let bindings = KeyBindings::new();
        let mut state = ChatState::new();
        let action = action_for_event(Event::Paste("uno\r\ndos\tx\u{7}".into()), &bindings)
            .expect("non-empty paste");
        apply_action(&mut state, action, Instant::now());
        assert_eq!(state.controller.composer().text(), "uno\ndos    x");
    }

    #[test]
    fn empty_paste_is_dropped() {
        let bindings = KeyBindings::new();
        assert!(action_for_event(Event::Paste("\u{1b}".into()), &bindings).is_none());
    }

    #[test]
    fn quit_key_requests_exit() {
        let bindings = KeyBindings::new();
        let mut state = ChatState::new();
        let action = action_for_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL), &bindings)
            .expect("ctrl+c is bound");
        apply_action(&mut state, action, Instant::now());
        assert!(state.exit_requested);
    }
}
