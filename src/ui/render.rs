use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::editor::{Field, TextField};

use super::{ITEM_HEIGHT, overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let (main, toast_area, status_area) = super::split_body(area);
    let columns = super::split_main_columns(main);

    render_list(model, frame, columns[0]);
    render_editor(model, frame, area);
    status::render_toast_bar(model, frame, toast_area);
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_list(model: &Model, frame: &mut Frame, area: Rect) {
    let dragging = model.ordering.is_dragging();
    let block = Block::default()
        .title(format!("Sections ({})", model.store.len()))
        .borders(Borders::ALL)
        .border_style(if dragging {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if model.store.is_empty() {
        let hint = if model.loaded {
            "No sections yet. Ctrl+N to write one."
        } else {
            "Loading..."
        };
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let width = inner.width as usize;
    let lifted = model.ordering.lifted();
    let selected = model.store.selected();
    let rows = super::visible_item_count(inner);

    let mut lines: Vec<Line> = Vec::new();
    for section in model
        .visible_sections()
        .into_iter()
        .skip(model.list_scroll)
        .take(rows)
    {
        let is_lifted = lifted == Some(&section.id);
        let marker = if is_lifted {
            "= "
        } else if selected == Some(&section.id) {
            "> "
        } else {
            "  "
        };
        let mut title_style = Style::default().add_modifier(Modifier::BOLD);
        if is_lifted {
            title_style = title_style.reversed();
        } else if selected == Some(&section.id) {
            title_style = title_style.fg(Color::Yellow);
        }
        let title = truncate_to_width(&format!("{marker}{}", section.title), width);
        lines.push(Line::styled(title, title_style));

        let preview = section.preview().replace(['\r', '\n'], " ");
        let preview = truncate_to_width(&format!("  {preview}"), width);
        lines.push(Line::styled(preview, Style::default().fg(Color::Indexed(245))));

        for _ in 2..ITEM_HEIGHT {
            lines.push(Line::raw(""));
        }
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let (title_area, content_area) = super::editor_field_areas(area);
    let focus = model.editor.focus();
    let heading = model
        .store
        .selected()
        .map_or_else(|| "Title (new section)".to_string(), |id| format!("Title (#{id})"));

    render_field(
        frame,
        title_area,
        &heading,
        model.editor.title(),
        focus == Field::Title,
    );
    render_field(
        frame,
        content_area,
        "Content",
        model.editor.content(),
        focus == Field::Content,
    );
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, field: &TextField, focused: bool) {
    let block = Block::default()
        .title(label.to_string())
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(field_lines(field, focused, inner.height as usize)),
        inner,
    );
}

/// Visible lines of a field, scrolled so the cursor line is on screen.
fn field_lines(field: &TextField, focused: bool, height: usize) -> Vec<Line<'static>> {
    let cursor = field.cursor();
    let start = (cursor.line + 1).saturating_sub(height.max(1));
    let end = (start + height).min(field.line_count());

    (start..end)
        .map(|line_idx| {
            let text = field.line_at(line_idx).unwrap_or_default();
            if !focused || line_idx != cursor.line {
                return Line::raw(text);
            }
            let col = cursor.col.min(text.len());
            let before = text.get(..col).unwrap_or_default().to_string();
            let rest = text.get(col..).unwrap_or_default();
            let mut chars = rest.chars();
            let under = chars.next().map_or_else(|| " ".to_string(), String::from);
            let after: String = chars.collect();
            Line::from(vec![
                Span::raw(before),
                Span::styled(under, Style::default().bg(Color::White).fg(Color::Black)),
                Span::raw(after),
            ])
        })
        .collect()
}

/// Cut `text` to at most `width` terminal columns.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
