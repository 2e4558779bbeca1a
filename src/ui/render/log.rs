use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget according to state, newest entries at the bottom.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .title("Log")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let capacity = size.height.saturating_sub(2) as usize;
    let entries = state.log_entries();
    let skip = entries.len().saturating_sub(capacity);
    let items: Vec<ListItem> = entries
        .iter()
        .skip(skip)
        .map(|entry| {
            let style = if entry.contains("[ERROR]") {
                styling::error_text_style(theme)
            } else if entry.contains("[WARN]") {
                styling::normal_text_style(theme).fg(theme.warning.to_color())
            } else {
                styling::normal_text_style(theme)
            };
            ListItem::new(Line::from(Span::styled(entry.as_str(), style)))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .block(block);
    frame.render_widget(list, size);
}
