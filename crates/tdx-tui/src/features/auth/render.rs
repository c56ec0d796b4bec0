use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{AuthField, AuthMode, AuthState};

const FORM_WIDTH: u16 = 50;

fn label(field: AuthField) -> &'static str {
    match field {
        AuthField::Email => "Email",
        AuthField::Username => "Username",
        AuthField::Password => "Password",
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(middle);
    center
}

/// Renders the login or register form.
pub fn render_auth(frame: &mut Frame, auth: &AuthState, area: Rect) {
    let title = match auth.mode {
        AuthMode::Login => " Login ",
        AuthMode::Register => " Register ",
    };

    let mut lines: Vec<Line> = Vec::new();

    if let Some(error) = &auth.error {
        lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)));
        lines.push(Line::default());
    } else if let Some(notice) = &auth.notice {
        lines.push(Line::styled(
            notice.clone(),
            Style::default().fg(Color::Green),
        ));
        lines.push(Line::default());
    }

    for field in auth.fields() {
        let focused = *field == auth.focus;
        let value = auth.field(*field);
        let marker = if focused { "> " } else { "  " };
        let mut line = Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{:<9}", label(*field)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(value.display()),
        ]);
        if focused {
            line = line.style(Style::default().add_modifier(Modifier::BOLD));
            line.push_span(Span::styled("▏", Style::default().fg(Color::Cyan)));
        }
        lines.push(line);
    }

    lines.push(Line::default());
    let hint = match auth.mode {
        AuthMode::Login => "Don't have an account? Ctrl+R to register",
        AuthMode::Register => "Already have an account? Ctrl+R to login",
    };
    lines.push(Line::styled(hint, Style::default().fg(Color::DarkGray)));
    lines.push(Line::styled(
        "Tab next field · Enter submit · Esc back/quit",
        Style::default().fg(Color::DarkGray),
    ));

    let height = lines.len() as u16 + 2;
    let form_area = centered(area, FORM_WIDTH.min(area.width), height.min(area.height));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title).centered());
    frame.render_widget(Paragraph::new(lines).block(block), form_area);
}
