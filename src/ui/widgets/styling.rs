use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};

/// Return the border style for the focused control.
///
pub fn active_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_active.to_color())
}

/// Return the border style for unfocused controls.
///
pub fn normal_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_normal.to_color())
}

/// Return the border style for a control with a visible error.
///
pub fn error_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.error.to_color())
}

/// Pick the border style of a form control.
///
pub fn field_border_style(theme: &Theme, focused: bool, has_error: bool) -> Style {
    let style = if has_error {
        error_block_border_style(theme)
    } else if focused {
        active_block_border_style(theme)
    } else {
        normal_block_border_style(theme)
    };
    if focused {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for the option under the picker cursor.
///
pub fn cursor_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.highlight_bg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for chosen picker options.
///
pub fn selected_item_style(theme: &Theme) -> Style {
    normal_text_style(theme)
        .fg(theme.primary.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

/// Return the style for hints that call out a conditional rule.
///
pub fn accent_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.accent.to_color())
}

pub fn error_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.error.to_color())
}

/// Return the style for the banner.
///
pub fn banner_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.banner.to_color())
        .add_modifier(Modifier::BOLD)
}
