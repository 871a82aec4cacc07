//! Syntax tree pane rendering

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::parser::parse::ParseError;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Split an outline row into its connector prefix and node label.
fn outline_row(row: &str) -> Line<'static> {
    let label_start = row
        .char_indices()
        .find(|(_, c)| !matches!(c, ' ' | '│' | '├' | '└' | '─'))
        .map_or(row.len(), |(i, _)| i);
    let (prefix, label) = row.split_at(label_start);

    let (kind, rest) = label.split_once(' ').unwrap_or((label, ""));
    let mut spans = vec![
        Span::styled(prefix.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(kind.to_string(), Style::default().fg(DEFAULT_THEME.type_name)),
    ];
    if !rest.is_empty() {
        spans.push(Span::styled(
            format!(" {rest}"),
            Style::default().fg(DEFAULT_THEME.fg),
        ));
    }
    Line::from(spans)
}

/// Render the syntax tree outline, or the parse error when parsing failed.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    outline: &[String],
    error: Option<&ParseError>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Syntax Tree ", is_focused);

    if let Some(error) = error {
        *scroll_offset = 0;
        let lines = vec![
            Line::from(Span::styled(
                "Parsing failed",
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(DEFAULT_THEME.error),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_height(area);
    clamp_scroll(scroll_offset, outline.len(), visible_height);

    let visible_lines: Vec<Line> = outline
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|row| outline_row(row))
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
