//! Form widget: a focus cursor over a form's fields, and rendering of a
//! [`FormController`]'s values and visible errors.

use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::form::{FieldId, FormController};

/// Which field of a form has keyboard focus.
#[derive(Debug, Clone)]
pub struct FormCursor<F> {
    fields: Vec<F>,
    focus: usize,
}

impl<F: FieldId> FormCursor<F> {
    /// Creates a cursor over the fields `form` declares. Focus starts on the first field.
    pub fn new(form: &FormController<F>) -> Self {
        Self {
            fields: form.fields().iter().map(|(f, _)| *f).collect(),
            focus: 0,
        }
    }

    /// Returns the index of the focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Returns the focused field, or `None` if the form has no fields.
    pub fn focused(&self) -> Option<F> {
        self.fields.get(self.focus).copied()
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Moves focus to `field`. Unknown fields leave focus unchanged.
    pub fn focus_field(&mut self, field: F) {
        if let Some(index) = self.fields.iter().position(|f| *f == field) {
            self.focus = index;
        }
    }

    pub fn reset(&mut self) {
        self.focus = 0;
    }
}

/// Applies a typing key to `value`: characters append, Backspace deletes the
/// last character. Returns `None` for any other key.
pub fn edit_value(value: &str, code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(ch) => {
            let mut edited = value.to_string();
            edited.push(ch);
            Some(edited)
        }
        KeyCode::Backspace => {
            let mut edited = value.to_string();
            edited.pop();
            Some(edited)
        }
        _ => None,
    }
}

/// Renders every field of `form`, highlighting the one under `cursor`.
///
/// Errors are shown only for touched fields.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form<F: FieldId>(
    form: &FormController<F>,
    cursor: &FormCursor<F>,
    frame: &mut Frame,
    area: Rect,
) {
    let row_height = 3_u16;
    let constraints: Vec<Constraint> = form
        .fields()
        .iter()
        .map(|_| Constraint::Length(row_height))
        .collect();

    let rows = Layout::vertical(constraints).split(area);

    for (i, (field, state)) in form.fields().iter().enumerate() {
        let is_focused = i == cursor.focus();
        let error = state.visible_error();

        let border_color = if error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let label = if field.required() {
            format!("{} *", field.label())
        } else {
            field.label().to_string()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = vec![Span::raw(state.value())];
        if is_focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, rows[i]);

        // Error overlaps the bottom border of its row.
        if let Some(err) = error {
            let error_line = Paragraph::new(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            ));
            let err_area = Rect {
                x: rows[i].x + 2,
                y: rows[i].y + row_height.saturating_sub(1),
                width: rows[i].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}
