//! Back end output pane rendering

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render generated code. `text` is `None` when there is no tree to render.
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    text: Option<&str>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(title, is_focused);

    let Some(text) = text else {
        *scroll_offset = 0;
        let paragraph = Paragraph::new("(no output: parsing failed)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = text
        .lines()
        .map(|line| {
            ListItem::new(Line::from(line.to_string())).style(Style::default().fg(DEFAULT_THEME.fg))
        })
        .collect();

    let visible_height = visible_height(area);
    clamp_scroll(scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
