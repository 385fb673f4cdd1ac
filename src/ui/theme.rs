use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Transcript
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub bot_prefix_style: Style,
    pub bot_text_style: Style,
    pub card_label_style: Style,
    pub card_caption_style: Style,
    pub error_prefix_style: Style,
    pub error_text_style: Style,
    pub welcome_title_style: Style,
    pub welcome_text_style: Style,
    pub loading_style: Style,

    // Chrome
    pub title_style: Style,
    pub input_border_style: Style,
    /// Composer border while a request is in flight.
    pub input_border_idle_style: Style,
    pub hint_style: Style,
    pub submit_enabled_style: Style,
    pub submit_disabled_style: Style,
    pub notification_border_style: Style,
    pub notification_text_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}

impl Theme {
    pub fn dark_default() -> Self {
        let slate = Color::Rgb(0x64, 0x74, 0x8b);
        let red = Color::Rgb(0xdc, 0x26, 0x26);
        Theme {
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            bot_prefix_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::White),
            card_label_style: Style::default().add_modifier(Modifier::BOLD),
            card_caption_style: Style::default().fg(slate),
            error_prefix_style: Style::default().fg(red).add_modifier(Modifier::BOLD),
            error_text_style: Style::default().fg(Color::LightRed),
            welcome_title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            welcome_text_style: Style::default().fg(slate),
            loading_style: Style::default().fg(slate).add_modifier(Modifier::ITALIC),

            title_style: Style::default().fg(Color::Gray),
            input_border_style: Style::default().fg(Color::Gray),
            input_border_idle_style: Style::default().fg(Color::DarkGray),
            hint_style: Style::default().fg(Color::DarkGray),
            submit_enabled_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            submit_disabled_style: Style::default().fg(Color::DarkGray),
            notification_border_style: Style::default().fg(red),
            notification_text_style: Style::default().fg(Color::White),
        }
    }
}
