//! Cart screen: lists items with prices and the total.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::{Product, cart_total, format_price};
use crate::order::{OrderState, Screen};
use crate::tui::action::Action;

/// State for the cart screen.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    /// Cached cart contents from the order state.
    items: Vec<Product>,
    /// Index of the highlighted item, or `None` if the cart is empty.
    selected: Option<usize>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads the cart from `store`, keeping the selection in range.
    pub fn load(&mut self, store: &impl OrderState) {
        self.items = store.cart_items();
        self.selected = match (self.items.len(), self.selected) {
            (0, _) => None,
            (len, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.select_prev();
                Action::None
            }
            KeyCode::Down => {
                self.select_next();
                Action::None
            }
            KeyCode::Char('d') | KeyCode::Delete => self.remove_current(),
            KeyCode::Enter if !self.items.is_empty() => Action::Navigate(Screen::AddressForm),
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Sum of item prices in cents.
    pub fn total(&self) -> u64 {
        cart_total(&self.items)
    }

    fn remove_current(&self) -> Action {
        self.selected
            .and_then(|i| self.items.get(i))
            .map_or(Action::None, |item| Action::RemoveItem(item.id))
    }

    fn select_prev(&mut self) {
        self.selected = match self.selected {
            Some(i) if i > 0 => Some(i - 1),
            other => other,
        };
    }

    fn select_next(&mut self) {
        self.selected = match self.selected {
            Some(i) if i + 1 < self.items.len() => Some(i + 1),
            other => other,
        };
    }
}

/// Renders the cart screen.
#[mutants::skip]
pub fn draw_cart(state: &CartState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Cart ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if state.items().is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from("Your cart is empty."),
            Line::from("Press q to quit."),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new(vec!["Item", "Price"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = state
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if state.selected() == Some(i) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            Row::new(vec![item.name.clone(), format_price(item.price)]).style(style)
        })
        .collect();

    let widths = [Constraint::Min(20), Constraint::Length(16)];
    let table = Table::new(rows, widths).header(header);

    let [table_area, total_area, footer_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(table, table_area);

    let total = Paragraph::new(format!("Total: {}", format_price(state.total())))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Right);
    frame.render_widget(total, total_area);

    let footer = Paragraph::new("Enter: checkout  d: remove item  q: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::InMemoryOrderStore;
    use crate::tui::testing::{press, render};

    fn products() -> Vec<Product> {
        vec![
            Product::new(1, "Cafeteira", 15990),
            Product::new(2, "Filtro de papel", 1250),
            Product::new(3, "Moedor manual", 189900),
        ]
    }

    fn make_populated_state() -> CartState {
        let mut state = CartState::new();
        state.load(&InMemoryOrderStore::with_cart(products()));
        state
    }

    mod load {
        use super::*;

        #[test]
        fn selects_first_item() {
            let state = make_populated_state();
            assert_eq!(state.items().len(), 3);
            assert_eq!(state.selected(), Some(0));
            assert_eq!(state.total(), 207140);
        }

        #[test]
        fn empty_cart_has_no_selection() {
            let mut state = CartState::new();
            state.load(&InMemoryOrderStore::new());
            assert_eq!(state.selected(), None);
        }

        #[test]
        fn reload_clamps_selection() {
            let store = InMemoryOrderStore::with_cart(products());
            let mut state = CartState::new();
            state.load(&store);
            state.selected = Some(2);
            store.remove_item(3);
            state.load(&store);
            assert_eq!(state.selected(), Some(1));
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn down_then_up() {
            let mut state = make_populated_state();
            assert_eq!(state.handle_key(press(KeyCode::Down)), Action::None);
            assert_eq!(state.selected(), Some(1));
            state.handle_key(press(KeyCode::Up));
            assert_eq!(state.selected(), Some(0));
        }

        #[test]
        fn stops_at_ends() {
            let mut state = make_populated_state();
            state.handle_key(press(KeyCode::Up));
            assert_eq!(state.selected(), Some(0));
            state.selected = Some(2);
            state.handle_key(press(KeyCode::Down));
            assert_eq!(state.selected(), Some(2));
        }
    }

    mod actions {
        use super::*;

        #[test]
        fn enter_starts_checkout() {
            let mut state = make_populated_state();
            assert_eq!(
                state.handle_key(press(KeyCode::Enter)),
                Action::Navigate(Screen::AddressForm)
            );
        }

        #[test]
        fn enter_on_empty_cart_is_noop() {
            let mut state = CartState::new();
            assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
        }

        #[test]
        fn d_removes_selected_item() {
            let mut state = make_populated_state();
            state.handle_key(press(KeyCode::Down));
            assert_eq!(
                state.handle_key(press(KeyCode::Char('d'))),
                Action::RemoveItem(2)
            );
        }

        #[test]
        fn q_quits() {
            let mut state = make_populated_state();
            assert_eq!(state.handle_key(press(KeyCode::Char('q'))), Action::Quit);
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn renders_items_and_total() {
            let state = make_populated_state();
            let output = render(60, 12, |frame| draw_cart(&state, frame, frame.area()));
            assert!(output.contains("Cafeteira"), "{output}");
            assert!(output.contains("R$ 159,90"), "{output}");
            assert!(output.contains("R$ 1.899,00"), "{output}");
            assert!(output.contains("Total: R$ 2.071,40"), "{output}");
            assert!(output.contains("Enter: checkout"), "{output}");
        }

        #[test]
        fn renders_empty_cart() {
            let state = CartState::new();
            let output = render(60, 8, |frame| draw_cart(&state, frame, frame.area()));
            assert!(output.contains("Your cart is empty"), "{output}");
        }
    }
}
