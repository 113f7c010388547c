//! Card form screen: card details and the amount to pay.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tracing::debug;

use crate::checkout::{PaymentField, PaymentFormController};
use crate::form::FocusRequest;
use crate::model::format_price;
use crate::order::{InMemoryOrderStore, Screen};
use crate::purchase::SimulatedCheckout;
use crate::tui::action::Action;
use crate::tui::widgets::form::{FormCursor, draw_form, edit_value};

type Controller = PaymentFormController<InMemoryOrderStore, SimulatedCheckout>;

/// State for the card form screen.
pub struct CardFormState {
    controller: Rc<Controller>,
    cursor: FormCursor<PaymentField>,
    focus: FocusRequest<PaymentField>,
    /// Message from the last failed purchase, shared with the running submission.
    error: Rc<RefCell<Option<String>>>,
}

impl CardFormState {
    /// Wraps `controller`; `focus` must be the request its failed submits report to.
    pub fn new(controller: Rc<Controller>, focus: FocusRequest<PaymentField>) -> Self {
        let cursor = FormCursor::new(&controller.form());
        Self {
            controller,
            cursor,
            focus,
            error: Rc::default(),
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab => {
                self.blur_focused();
                self.cursor.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.blur_focused();
                self.cursor.focus_prev();
                Action::None
            }
            KeyCode::Enter | KeyCode::Esc if self.controller.is_submitting() => Action::None,
            KeyCode::Enter => Action::PlaceOrder,
            KeyCode::Esc => Action::Navigate(Screen::AddressForm),
            code => {
                if let Some(field) = self.cursor.focused() {
                    let edited = edit_value(self.controller.form().value(field), code);
                    if let Some(value) = edited {
                        self.controller.update_field(field, value);
                    }
                }
                Action::None
            }
        }
    }

    /// Returns the submission to run on the local task set.
    ///
    /// Clears the previous error. A purchase failure is kept for display;
    /// validation failures leave a focus request for [`sync_focus`](Self::sync_focus).
    pub fn place_order(&self) -> impl Future<Output = ()> + 'static {
        let controller = Rc::clone(&self.controller);
        let error = Rc::clone(&self.error);
        error.replace(None);
        async move {
            match controller.submit().await {
                Ok(outcome) => debug!(?outcome, "payment submit finished"),
                Err(e) => {
                    error.replace(Some(e.to_string()));
                }
            }
        }
    }

    /// Moves the cursor to the field a failed submit asked to focus, if any.
    pub fn sync_focus(&mut self) {
        if let Some(field) = self.focus.take() {
            self.cursor.focus_field(field);
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn cursor(&self) -> &FormCursor<PaymentField> {
        &self.cursor
    }

    /// Message from the last failed purchase.
    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    /// Copies an inline card from the stored delivery, if there is one.
    pub fn prefill(&mut self) {
        if self.controller.prefill_from_delivery() {
            self.cursor.reset();
        }
    }

    /// Clears the form, the error, and returns focus to the first field.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.cursor.reset();
        self.error.replace(None);
    }

    fn blur_focused(&self) {
        if let Some(field) = self.cursor.focused() {
            self.controller.blur_field(field);
        }
    }
}

/// Renders the card form screen.
#[mutants::skip]
pub fn draw_card_form(state: &CardFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Payment ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [amount_area, form_area, status_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let amount = Paragraph::new(Line::from(vec![
        Span::raw("Amount due: "),
        Span::styled(
            format_price(state.controller().amount_due()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(amount, amount_area);

    draw_form(&state.controller().form(), state.cursor(), frame, form_area);

    if state.controller().is_submitting() {
        let status = Paragraph::new("Placing order...").style(Style::default().fg(Color::Yellow));
        frame.render_widget(status, status_area);
    } else if let Some(err) = state.error() {
        let status = Paragraph::new(err).style(Style::default().fg(Color::Red));
        frame.render_widget(status, status_area);
    }

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  Enter: place order  Esc: back to address",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
