use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::controller::ExchangeController;
use crate::core::message::{ChatEntry, ERROR_HEADLINE, ERROR_RETRY_HINT, RESULT_CAPTION};
use crate::core::notification::Notification;
use crate::ui::chat_loop::ChatState;
use crate::ui::theme::Theme;
use crate::utils::scroll::ScrollCalculator;

const USER_PREFIX: &str = "You: ";
const BOT_PREFIX: &str = "MoodBot: ";
const CONTINUATION: &str = "  ";
const NOTIFICATION_MAX_WIDTH: u16 = 52;

pub const WELCOME_TITLE: &str = "Welcome to MoodBot";
pub const WELCOME_TEXT: &str = "Tell me how you are feeling. Each message is analysed and labelled with the emotional state it most likely expresses.";
pub const LOADING_TEXT: &str = "MoodBot is analysing your message...";

pub fn ui(f: &mut Frame, state: &mut ChatState) {
    let theme = state.theme.clone();
    let controller = &mut state.controller;
    let composer_rows = controller.composer().height_rows();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(composer_rows + 2),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_title(f, chunks[0], controller, &theme);

    let transcript_area = chunks[1];
    let lines = build_transcript_lines(controller, &theme);
    let wrapped = ScrollCalculator::prewrap_lines(&lines, transcript_area.width);
    let offset = controller
        .scroll_mut()
        .resolve(wrapped.len(), transcript_area.height);
    state.transcript_height = transcript_area.height;
    state.max_scroll_offset = ScrollCalculator::scroll_to_bottom(wrapped.len(), transcript_area.height);

    f.render_widget(Paragraph::new(wrapped).scroll((offset, 0)), transcript_area);

    let border_style = if controller.composer().is_focused() {
        theme.input_border_style
    } else {
        theme.input_border_idle_style
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Message");
    let input_inner = input_block.inner(chunks[2]);
    f.render_widget(input_block, chunks[2]);
    f.render_widget(controller.composer().textarea(), input_inner);

    render_footer(f, chunks[3], controller, &theme);

    if let Some(notice) = controller.notification() {
        render_notification(f, f.area(), notice, &theme);
    }
}

fn render_title(f: &mut Frame, area: Rect, controller: &ExchangeController, theme: &Theme) {
    let status = controller.status();
    let line = Line::from(vec![
        Span::styled(
            format!("MoodBot v{}  ", env!("CARGO_PKG_VERSION")),
            theme.title_style,
        ),
        Span::styled(
            crate::core::constants::STATUS_GLYPH,
            Style::default().fg(status.color()),
        ),
        Span::styled(format!(" {}", status.label()), theme.title_style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_footer(f: &mut Frame, area: Rect, controller: &ExchangeController, theme: &Theme) {
    let composer = controller.composer();
    let submit_style = if controller.can_submit() {
        theme.submit_enabled_style
    } else {
        theme.submit_disabled_style
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(18)])
        .split(area);

    let hints = Line::from(vec![
        Span::styled("[Enter] send", submit_style),
        Span::styled(
            "  Alt+Enter newline  PgUp/PgDn scroll  Esc dismiss  Ctrl+C quit",
            theme.hint_style,
        ),
    ]);
    f.render_widget(Paragraph::new(hints), chunks[0]);

    let counter = Line::from(Span::styled(
        composer.counter_text(),
        Style::default().fg(composer.counter_tier().color()),
    ))
    .right_aligned();
    f.render_widget(Paragraph::new(counter), chunks[1]);
}

fn render_notification(f: &mut Frame, screen: Rect, notice: &Notification, theme: &Theme) {
    let width = NOTIFICATION_MAX_WIDTH.min(screen.width.saturating_sub(2));
    if width < 10 {
        return;
    }
    let inner_width = width.saturating_sub(2);
    let body = vec![
        Line::from(Span::styled(
            notice.message.clone(),
            theme.notification_text_style,
        )),
        Line::from(Span::styled("[Esc] dismiss", theme.hint_style)),
    ];
    let body_height = ScrollCalculator::prewrap_lines(&body, inner_width).len() as u16;
    let height = (body_height + 2).min(screen.height.saturating_sub(1));

    let area = Rect {
        x: screen.x + screen.width.saturating_sub(width + 1),
        y: screen.y + 1,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.notification_border_style)
        .title(format!("{} {}", crate::core::constants::STATUS_GLYPH, notice.title));
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Transcript lines before width-wrapping.
pub fn build_transcript_lines(controller: &ExchangeController, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if controller.is_welcome_visible() {
        lines.push(Line::from(Span::styled(
            WELCOME_TITLE,
            theme.welcome_title_style,
        )));
        lines.push(Line::from(Span::styled(
            WELCOME_TEXT,
            theme.welcome_text_style,
        )));
        lines.push(Line::from(""));
    }

    for entry in controller.entries() {
        push_entry_lines(&mut lines, entry, theme);
    }

    if controller.is_loading_visible() {
        lines.push(Line::from(vec![
            Span::styled(BOT_PREFIX, theme.bot_prefix_style),
            Span::styled(LOADING_TEXT, theme.loading_style),
        ]));
    }

    lines
}

fn push_prefixed_text(
    lines: &mut Vec<Line<'static>>,
    prefix: &'static str,
    prefix_style: Style,
    text: &str,
    text_style: Style,
) {
    for (idx, text_line) in text.split('\n').enumerate() {
        let lead = if idx == 0 {
            Span::styled(prefix, prefix_style)
        } else {
            Span::raw(CONTINUATION)
        };
        lines.push(Line::from(vec![
            lead,
            Span::styled(text_line.to_string(), text_style),
        ]));
    }
}

fn push_entry_lines(lines: &mut Vec<Line<'static>>, entry: &ChatEntry, theme: &Theme) {
    match entry {
        ChatEntry::User { text } => {
            push_prefixed_text(
                lines,
                USER_PREFIX,
                theme.user_prefix_style,
                text,
                theme.user_text_style,
            );
        }
        ChatEntry::Bot { text, card } => {
            push_prefixed_text(
                lines,
                BOT_PREFIX,
                theme.bot_prefix_style,
                text,
                theme.bot_text_style,
            );
            lines.push(Line::from(vec![
                Span::raw(CONTINUATION),
                Span::styled(card.category.glyph(), Style::default().fg(card.category.color())),
                Span::styled(format!(" {}", card.label), theme.card_label_style),
                Span::styled(
                    format!(" ({})  ", card.category.as_str()),
                    theme.card_caption_style,
                ),
                Span::styled(card.confidence_text.clone(), theme.card_label_style),
            ]));
            lines.push(Line::from(vec![
                Span::raw(CONTINUATION),
                Span::styled(RESULT_CAPTION, theme.card_caption_style),
            ]));
        }
        ChatEntry::Error { description } => {
            push_prefixed_text(
                lines,
                BOT_PREFIX,
                theme.error_prefix_style,
                ERROR_HEADLINE,
                theme.error_text_style,
            );
            push_prefixed_text(
                lines,
                CONTINUATION,
                Style::default(),
                description,
                theme.error_text_style,
            );
            lines.push(Line::from(vec![
                Span::raw(CONTINUATION),
                Span::styled(ERROR_RETRY_HINT, theme.error_text_style),
            ]));
        }
    }
    lines.push(Line::from(""));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Prediction, PredictResponse};
    use crate::core::category::MoodCategory;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Instant;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn exchange(label: &str, confidence: f64) -> ExchangeController {
        let mut controller = ExchangeController::new();
        controller.composer_mut().set_text("Me siento ansioso");
        controller.begin_submit(Instant::now());
        controller.finish_submit(
            Ok(PredictResponse {
                prediction: Prediction {
                    label: label.into(),
                    confidence,
                },
                response: "Entiendo...".into(),
            }),
            Instant::now(),
        );
        controller
    }

    #[test]
    fn welcome_is_shown_until_first_message() {
        let controller = ExchangeController::new();
        let lines = plain(&build_transcript_lines(&controller, &Theme::default()));
        assert_eq!(lines[0], WELCOME_TITLE);

        let controller = exchange("Neutro", 0.5);
        let lines = plain(&build_transcript_lines(&controller, &Theme::default()));
        assert!(!lines.iter().any(|line| line == WELCOME_TITLE));
    }

    #[test]
    fn bot_entry_shows_card_with_category_color() {
        let controller = exchange("Ansiedad", 0.91);
        let built = build_transcript_lines(&controller, &Theme::default());
        let lines = plain(&built);
        assert_eq!(lines[0], "You: Me siento ansioso");
        assert_eq!(lines[2], "MoodBot: Entiendo...");
        assert_eq!(lines[3], "  ● Ansiedad (anxiety)  91.0%");
        assert_eq!(
            built[3].spans[1].style.fg,
            Some(MoodCategory::Anxiety.color())
        );
        assert_eq!(lines[4], format!("  {RESULT_CAPTION}"));
    }

    #[test]
    fn multi_line_messages_are_indented() {
        let mut controller = ExchangeController::new();
        controller.composer_mut().set_text("uno\ndos");
        controller.begin_submit(Instant::now());
        let lines = plain(&build_transcript_lines(&controller, &Theme::default()));
        assert_eq!(lines[0], "You: uno");
        assert_eq!(lines[1], "  dos");
        assert_eq!(lines[3], format!("MoodBot: {LOADING_TEXT}"));
    }

    #[test]
    fn error_entry_lists_description_and_hint() {
        let mut controller = ExchangeController::new();
        controller.composer_mut().set_text("hola");
        controller.begin_submit(Instant::now());
        controller.finish_submit(
            Err(ApiError::Malformed("missing field `response`".into())),
            Instant::now(),
        );
        let lines = plain(&build_transcript_lines(&controller, &Theme::default()));
        assert_eq!(lines[2], format!("MoodBot: {ERROR_HEADLINE}"));
        assert_eq!(
            lines[3],
            "  Malformed response: missing field `response`"
        );
        assert_eq!(lines[4], format!("  {ERROR_RETRY_HINT}"));
    }

    #[test]
    fn frame_renders_status_counter_and_notification() {
        let mut state = ChatState::new();
        state.controller.apply_health_result(
            Err(ApiError::Status {
                code: 503,
                reason: "Service Unavailable".into(),
            }),
            Instant::now(),
        );
        state.controller.composer_mut().set_text(&"a".repeat(42));

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| ui(f, &mut state)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("API unavailable"));
        assert!(text.contains("42/1000"));
        assert!(text.contains("Notice"));
        assert!(text.contains(WELCOME_TITLE));
        assert_eq!(state.transcript_height, 24 - 1 - 3 - 1);
    }

    #[test]
    fn composer_border_dims_while_request_in_flight() {
        let mut state = ChatState::new();
        let composer_top: u16 = 24 - 1 - 3;
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();

        terminal.draw(|f| ui(f, &mut state)).unwrap();
        assert_eq!(
            terminal.backend().buffer()[(0u16, composer_top)].fg,
            state.theme.input_border_style.fg.unwrap()
        );

        state.controller.composer_mut().set_text("hola");
        state.controller.begin_submit(Instant::now());
        terminal.draw(|f| ui(f, &mut state)).unwrap();
        assert_eq!(
            terminal.backend().buffer()[(0u16, composer_top)].fg,
            state.theme.input_border_idle_style.fg.unwrap()
        );
    }
}
