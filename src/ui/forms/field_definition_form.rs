//! Field definition form rendering

use super::field_renderer::{
    draw_help_text, draw_radio_group, draw_text_field, TextFieldView, FIELD_HEIGHT,
};
use crate::app::App;
use crate::platform::{ADD_ROW_SHORTCUT, REMOVE_ROW_SHORTCUT, SAVE_SHORTCUT};
use crate::state::{AppState, FieldPath, FieldType, FocusTarget, RowList};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the field definition form
pub fn draw_field_definition(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let form = &state.form;
    let active = state.active_target();
    let rows = form.visible_rows();

    let mut constraints = vec![
        Constraint::Length(FIELD_HEIGHT), // Name / Code
        Constraint::Length(FIELD_HEIGHT), // Type
    ];
    if rows.is_some() {
        constraints.push(Constraint::Min(FIELD_HEIGHT)); // Rows
        constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Add value
    } else {
        constraints.push(Constraint::Min(0));
    }
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Save / Cancel
    constraints.push(Constraint::Length(1)); // Help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(" Field Definition ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    draw_name_and_code(frame, chunks[0], state, active);

    let options: Vec<(&str, bool)> = FieldType::ALL
        .iter()
        .map(|ty| (ty.label(), *ty == form.selected_type()))
        .collect();
    draw_radio_group(
        frame,
        chunks[1],
        "Type",
        &options,
        active == FocusTarget::FieldType,
    );

    let actions = if let Some(rows) = rows {
        draw_rows(frame, chunks[2], state, rows, active);
        let add_area = Rect {
            width: chunks[3].width.min(17),
            ..chunks[3]
        };
        render_button(
            frame,
            add_area,
            "+ Add value",
            active == FocusTarget::AddRow,
            true,
        );
        4
    } else {
        3
    };

    draw_actions(frame, chunks[actions], state, active);
    draw_help_text(frame, chunks[actions + 1], &hints_for(active));
}

fn draw_name_and_code(frame: &mut Frame, area: Rect, state: &AppState, active: FocusTarget) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let form = state.form.state();
    let name_error = state.visible_error(FieldPath::Name);
    draw_text_field(
        frame,
        halves[0],
        TextFieldView {
            label: "Name",
            value: &form.name,
            placeholder: "Department",
            is_active: active == FocusTarget::Name,
            error: name_error.as_deref(),
        },
    );

    let code_error = state.visible_error(FieldPath::Code);
    draw_text_field(
        frame,
        halves[1],
        TextFieldView {
            label: "Code",
            value: &form.code,
            placeholder: "DEP",
            is_active: active == FocusTarget::Code,
            error: code_error.as_deref(),
        },
    );
}

/// First row to draw so that the focused row stays on screen
fn scroll_offset(focused: Option<usize>, capacity: usize) -> usize {
    match focused {
        Some(index) if index >= capacity => index + 1 - capacity,
        _ => 0,
    }
}

fn draw_rows(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    rows: &RowList,
    active: FocusTarget,
) {
    if rows.is_empty() {
        let (message, color) = match state.visible_error(FieldPath::Rows) {
            Some(error) => (error, Color::Red),
            None => (
                format!("No values yet. Press {ADD_ROW_SHORTCUT} to add one."),
                Color::DarkGray,
            ),
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(color)),
            area,
        );
        return;
    }

    let capacity = usize::from((area.height / FIELD_HEIGHT).max(1));
    let offset = scroll_offset(active.row_index(), capacity);

    for (slot, (index, row)) in rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(capacity)
        .enumerate()
    {
        let y = area.y + slot as u16 * FIELD_HEIGHT;
        if y + FIELD_HEIGHT > area.y + area.height {
            break;
        }
        let row_area = Rect {
            y,
            height: FIELD_HEIGHT,
            ..area
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(48),
                Constraint::Percentage(40),
                Constraint::Min(6),
            ])
            .split(row_area);

        let name_error = state.visible_error(FieldPath::RowName(index));
        draw_text_field(
            frame,
            cells[0],
            TextFieldView {
                label: "Field name",
                value: &row.name,
                placeholder: "Engineering",
                is_active: active == FocusTarget::RowName(index),
                error: name_error.as_deref(),
            },
        );

        let value_error = state.visible_error(FieldPath::RowValue(index));
        draw_text_field(
            frame,
            cells[1],
            TextFieldView {
                label: "Value",
                value: &row.value,
                placeholder: "ENG",
                is_active: active == FocusTarget::RowValue(index),
                error: value_error.as_deref(),
            },
        );

        render_button(
            frame,
            cells[2],
            "Del",
            active == FocusTarget::RemoveRow(index),
            true,
        );
    }
}

fn draw_actions(frame: &mut Frame, area: Rect, state: &AppState, active: FocusTarget) {
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(10), // Cancel
            Constraint::Length(8),  // Save
        ])
        .split(area);

    render_button(
        frame,
        buttons[1],
        "Cancel",
        active == FocusTarget::Cancel,
        true,
    );
    render_button(
        frame,
        buttons[2],
        "Save",
        active == FocusTarget::Save,
        state.form.can_submit(),
    );
}

fn hints_for(active: FocusTarget) -> Vec<(&'static str, &'static str)> {
    match active {
        FocusTarget::FieldType => vec![
            ("←/→", "choose type"),
            ("Space", "toggle"),
            ("Tab", "next field"),
            (SAVE_SHORTCUT, "save"),
            ("Esc", "cancel"),
        ],
        FocusTarget::RowName(_) | FocusTarget::RowValue(_) | FocusTarget::RemoveRow(_) => vec![
            ("Tab", "next field"),
            (ADD_ROW_SHORTCUT, "add value"),
            (REMOVE_ROW_SHORTCUT, "remove value"),
            (SAVE_SHORTCUT, "save"),
            ("Esc", "cancel"),
        ],
        FocusTarget::AddRow | FocusTarget::Save | FocusTarget::Cancel => vec![
            ("Enter", "press"),
            ("Tab", "next field"),
            (SAVE_SHORTCUT, "save"),
            ("Esc", "cancel"),
        ],
        FocusTarget::Name | FocusTarget::Code => vec![
            ("Tab", "next field"),
            (SAVE_SHORTCUT, "save"),
            ("Esc", "cancel"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_keeps_focused_row_visible() {
        assert_eq!(scroll_offset(None, 3), 0);
        assert_eq!(scroll_offset(Some(2), 3), 0);
        assert_eq!(scroll_offset(Some(3), 3), 1);
        assert_eq!(scroll_offset(Some(9), 4), 6);
    }

    #[test]
    fn test_row_hints_mention_shortcuts() {
        let hints = hints_for(FocusTarget::RowValue(0));
        assert!(hints.iter().any(|(key, _)| *key == ADD_ROW_SHORTCUT));
        assert!(hints.iter().any(|(key, _)| *key == REMOVE_ROW_SHORTCUT));
    }
}
