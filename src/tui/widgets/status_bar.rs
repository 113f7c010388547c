//! Status bar widget: checkout progress and cart summary on one line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::format_price;
use crate::order::Screen;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// The screen currently shown.
    pub screen: Screen,
    /// Number of items in the cart.
    pub item_count: usize,
    /// Cart total in cents.
    pub total: u64,
}

/// Renders the checkout steps with the current one highlighted, followed by
/// the cart size and total:
///
/// `Cart > Delivery > Payment > Order Placed   3 items  R$ 172,40`
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let current = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let cyan = Style::default().fg(Color::Cyan);

    let mut spans: Vec<Span> = Vec::new();
    for (i, screen) in Screen::all().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", dim));
        }
        let style = if *screen == ctx.screen { current } else { dim };
        spans.push(Span::styled(screen.label(), style));
    }

    if ctx.item_count > 0 {
        let noun = if ctx.item_count == 1 { "item" } else { "items" };
        spans.push(Span::styled(
            format!("   {} {noun}  {}", ctx.item_count, format_price(ctx.total)),
            cyan,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
