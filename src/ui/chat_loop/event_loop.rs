//! Event polling, dispatching, and UI rendering loop.
//!
//! Terminal input is read on a background task and forwarded over a channel.
//! Network calls run as Tokio tasks that report back through the
//! [`AppActionDispatcher`]; the controller itself is only touched here, so
//! the processing flag needs no synchronisation.

use std::{
    error::Error,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::actions::{
    action_for_event, apply_actions, AppAction, AppActionDispatcher, AppCommand,
};
use super::keybindings::KeyBindings;
use super::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use super::ChatState;
use crate::api::MoodService;
use crate::core::controller::PredictTicket;
use crate::ui::renderer::ui;

const MAX_FPS: u64 = 60;
const TICK_INTERVAL: Duration = Duration::from_millis(50);

fn spawn_health_check(service: Arc<dyn MoodService>, dispatcher: AppActionDispatcher) {
    tokio::spawn(async move {
        let result = service.health().await;
        dispatcher.dispatch(AppAction::HealthChecked(result));
    });
}

fn spawn_predict(
    service: Arc<dyn MoodService>,
    dispatcher: AppActionDispatcher,
    ticket: PredictTicket,
) {
    tokio::spawn(async move {
        let result = service.predict(&ticket.message).await;
        dispatcher.dispatch(AppAction::PredictFinished(result));
    });
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<Event>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

fn try_draw_frame(
    state: &mut ChatState,
    terminal: &mut ChatTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> std::io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    terminal.draw(|f| ui(f, state))?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

pub async fn run_chat(service: Arc<dyn MoodService>) -> Result<(), Box<dyn Error>> {
    let mut state = ChatState::new();
    let bindings = KeyBindings::new();

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let dispatcher = AppActionDispatcher::new(action_tx);
    spawn_health_check(service.clone(), dispatcher.clone());

    let mut terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    info!("chat session started");

    let result: Result<(), Box<dyn Error>> = loop {
        let mut pending = Vec::new();
        tokio::select! {
            Some(ev) = event_rx.recv() => {
                pending.extend(action_for_event(ev, &bindings));
                while let Ok(ev) = event_rx.try_recv() {
                    pending.extend(action_for_event(ev, &bindings));
                }
            }
            Some(action) = action_rx.recv() => {
                pending.push(action);
                while let Ok(action) = action_rx.try_recv() {
                    pending.push(action);
                }
            }
            _ = ticker.tick() => {}
        }

        let now = Instant::now();
        if !pending.is_empty() {
            request_redraw = true;
            for command in apply_actions(&mut state, pending, now) {
                match command {
                    AppCommand::SpawnPredict(ticket) => {
                        spawn_predict(service.clone(), dispatcher.clone(), ticket);
                    }
                }
            }
        }

        if state.controller.tick(now) {
            request_redraw = true;
        }

        if state.exit_requested {
            debug!("exit requested");
            break Ok(());
        }

        if let Err(err) = try_draw_frame(
            &mut state,
            &mut terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        ) {
            break Err(err.into());
        }
    };

    event_reader_handle.abort();
    restore_terminal(&mut terminal)?;
    info!(turns = state.controller.history().len(), "chat session ended");
    result
}
