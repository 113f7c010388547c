//! Address form screen: receiver and delivery address (plus contact and card
//! in the extended variant).

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::checkout::{DeliveryField, DeliveryFormController};
use crate::form::{FocusRequest, SubmitOutcome};
use crate::order::{InMemoryOrderStore, Screen};
use crate::tui::action::Action;
use crate::tui::widgets::form::{FormCursor, draw_form, edit_value};

type Controller = DeliveryFormController<InMemoryOrderStore>;

/// State for the address form screen.
pub struct AddressFormState {
    controller: Rc<Controller>,
    cursor: FormCursor<DeliveryField>,
    focus: FocusRequest<DeliveryField>,
}

impl AddressFormState {
    /// Wraps `controller`; `focus` must be the request its failed submits report to.
    pub fn new(controller: Rc<Controller>, focus: FocusRequest<DeliveryField>) -> Self {
        let cursor = FormCursor::new(&controller.form());
        Self {
            controller,
            cursor,
            focus,
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
            KeyCode::Esc => Action::Navigate(Screen::Cart),
            KeyCode::Enter => self.submit(),
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

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn cursor(&self) -> &FormCursor<DeliveryField> {
        &self.cursor
    }

    /// Clears the form and returns focus to the first field.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.cursor.reset();
    }

    fn blur_focused(&self) {
        if let Some(field) = self.cursor.focused() {
            self.controller.blur_field(field);
        }
    }

    fn submit(&mut self) -> Action {
        match self.controller.submit() {
            SubmitOutcome::Submitted(_) => Action::DeliveryAccepted,
            SubmitOutcome::Invalid { .. } => {
                if let Some(field) = self.focus.take() {
                    self.cursor.focus_field(field);
                }
                Action::None
            }
            SubmitOutcome::Busy => Action::None,
        }
    }
}

/// Renders the address form screen.
#[mutants::skip]
pub fn draw_address_form(state: &AddressFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Delivery Address ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [form_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    draw_form(&state.controller().form(), state.cursor(), frame, form_area);

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  Enter: continue to payment  Esc: back to cart",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
