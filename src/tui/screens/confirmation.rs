//! Order confirmation screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::Action;

/// Handles a key on the confirmation screen.
pub fn handle_confirmation_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::FinishOrder,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

/// Renders the confirmation screen for `order_id`.
#[mutants::skip]
pub fn draw_confirmation(order_id: Option<&str>, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Order Placed ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let id_line = match order_id {
        Some(id) => Line::from(vec![
            Span::raw("Order number: "),
            Span::styled(
                id.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from("Order number unavailable"),
    };

    let lines = vec![
        Line::from(""),
        Line::from("Thank you! Your order was placed."),
        Line::from(""),
        id_line,
        Line::from(""),
        Line::from(Span::styled(
            "Enter: back to cart  q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
