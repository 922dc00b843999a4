//! Rendering of the form onto a ratatui frame.

use allfields::{Choice, Country, Field, FieldKind, Gender, RATING_MAX, Role, SLIDER_MAX};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    },
};

use crate::backend::Theme;
use crate::view::{Focus, FormView, ROLE_ENTRIES};

/// Vertical space between two fields.
const FIELD_SPACING: u16 = 1;

/// Visible lines of the description box.
const DESCRIPTION_LINES: u16 = 4;

fn field_height(field: Field) -> u16 {
    match field.kind() {
        FieldKind::Multiline => 2 + DESCRIPTION_LINES,
        // selection, query, then one line per country
        FieldKind::Autocomplete => 4 + Country::OPTIONS.len() as u16,
        FieldKind::Select => 2 + ROLE_ENTRIES as u16,
        FieldKind::File => 4,
        _ => 3,
    }
}

/// Top of `target` in content coordinates.
fn field_y(target: Field) -> u16 {
    let mut y = 0;
    for field in Field::ALL {
        if field == target {
            break;
        }
        y += field_height(field) + FIELD_SPACING;
    }
    y
}

fn total_height() -> u16 {
    Field::ALL
        .into_iter()
        .map(field_height)
        .sum::<u16>()
        + FIELD_SPACING * (Field::ALL.len() as u16 - 1)
}

/// Adjust the scroll offset so the focused field is fully visible.
///
/// A field taller than the viewport is pinned to the top and clipped at the
/// bottom.
fn adjust_scroll(view: &mut FormView, viewport_height: u16) {
    let Some(field) = view.focus().field() else {
        return;
    };
    let top = field_y(field);
    let height = field_height(field);
    let bottom = top + height;

    if height > viewport_height {
        view.scroll_offset = top;
        return;
    }
    if top < view.scroll_offset {
        view.scroll_offset = top;
    }
    if bottom > view.scroll_offset + viewport_height {
        view.scroll_offset = bottom.saturating_sub(viewport_height);
    }
}

pub(crate) fn draw_form(frame: &mut Frame, view: &mut FormView, title: &str, theme: &Theme) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Fields
            Constraint::Length(3), // Buttons
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    let title = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(title, chunks[0]);

    draw_fields(frame, view, chunks[1], theme);
    draw_buttons(frame, view.focus(), chunks[2], theme);

    let help_text =
        "Tab: Next  ↑/↓: Options  ←/→: Adjust  Space: Toggle  F2: Show password  F10: Submit  Ctrl+L: Clear  Esc: Cancel";
    let help = Paragraph::new(help_text).style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[3]);
}

fn draw_fields(frame: &mut Frame, view: &mut FormView, form_area: Rect, theme: &Theme) {
    // 1 column left margin, 1 for the scrollbar
    let content_width = form_area.width.saturating_sub(2);
    let viewport_height = form_area.height;

    adjust_scroll(view, viewport_height);
    let scroll_offset = view.scroll_offset;
    let total_height = total_height();

    for field in Field::ALL {
        let top = field_y(field);
        let height = field_height(field);

        // Fields clipped at the top are skipped entirely
        if top < scroll_offset {
            continue;
        }
        if top >= scroll_offset + viewport_height {
            break;
        }

        let visible_top = top - scroll_offset;
        let area = Rect {
            x: form_area.x + 1,
            y: form_area.y + visible_top,
            width: content_width,
            height: height.min(viewport_height - visible_top),
        };
        draw_field(frame, view, field, area, theme);
    }

    if total_height > viewport_height {
        let scrollbar_area = Rect {
            x: form_area.x + form_area.width.saturating_sub(1),
            y: form_area.y,
            width: 1,
            height: viewport_height,
        };

        let mut scrollbar_state = ScrollbarState::new(total_height as usize)
            .position(scroll_offset as usize)
            .viewport_content_length(viewport_height as usize);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

fn draw_buttons(frame: &mut Frame, focus: Focus, area: Rect, theme: &Theme) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (label, target, rect) in [
        ("Submit", Focus::Submit, halves[0]),
        ("Clear", Focus::Clear, halves[1]),
    ] {
        let focused = focus == target;
        let (text, style) = if focused {
            (
                format!("[ {label} ]"),
                Style::default()
                    .fg(theme.text)
                    .bg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                label.to_string(),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let button = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(if focused {
                        theme.primary
                    } else {
                        theme.border
                    })),
            );
        frame.render_widget(button, rect);
    }
}

fn draw_field(frame: &mut Frame, view: &FormView, field: Field, area: Rect, theme: &Theme) {
    let is_focused = view.focus() == Focus::Field(field);
    let error = view.error(field);

    let border_color = if error.is_some() {
        theme.error
    } else if is_focused {
        theme.primary
    } else {
        theme.border
    };
    let label = if field.is_required() {
        format!(" {} * ", field.label())
    } else {
        format!(" {} ", field.label())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(label)
        .title_style(Style::default().fg(if is_focused {
            theme.highlight
        } else {
            theme.text
        }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = view.form().state();
    let text_style = Style::default().fg(theme.text);

    match field.kind() {
        FieldKind::Password => {
            let text = state.text(field).unwrap_or_default();
            let shown = if view.show_password() {
                text.to_string()
            } else {
                "●".repeat(text.chars().count())
            };
            frame.render_widget(Paragraph::new(shown).style(text_style), inner);
            if is_focused {
                place_cursor(frame, inner, 0, view.cursor(field));
            }
        }
        FieldKind::Multiline => {
            let text = state.text(field).unwrap_or_default();
            let before: Vec<char> = text.chars().take(view.cursor(field)).collect();
            let line = before.iter().filter(|c| **c == '\n').count() as u16;
            let col = before.iter().rev().take_while(|c| **c != '\n').count();
            let scroll = line.saturating_sub(inner.height.saturating_sub(1));

            let paragraph = Paragraph::new(text.to_string())
                .style(text_style)
                .scroll((scroll, 0));
            frame.render_widget(paragraph, inner);
            if is_focused {
                place_cursor(frame, inner, line - scroll, col);
            }
        }
        kind if kind.is_text() => {
            let text = state.text(field).unwrap_or_default();
            frame.render_widget(Paragraph::new(text.to_string()).style(text_style), inner);
            if is_focused {
                place_cursor(frame, inner, 0, view.cursor(field));
            }
        }
        FieldKind::Autocomplete => {
            let selected = state.country.map(|c| c.label()).unwrap_or("-");
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Selected: ", Style::default().fg(theme.border)),
                    Span::styled(selected, Style::default().fg(theme.highlight)),
                ]),
                Line::from(vec![
                    Span::styled("Search: ", Style::default().fg(theme.border)),
                    Span::styled(view.country_query().to_string(), text_style),
                ]),
            ];
            for (idx, country) in view.country_matches().into_iter().enumerate() {
                let style = if is_focused && idx == view.country_highlight() {
                    Style::default()
                        .fg(theme.text)
                        .bg(theme.selected_bg)
                        .add_modifier(Modifier::BOLD)
                } else if state.country == Some(country) {
                    Style::default().fg(theme.highlight)
                } else {
                    text_style
                };
                lines.push(Line::styled(format!("  {}", country.label()), style));
            }
            frame.render_widget(Paragraph::new(lines), inner);
            if is_focused {
                place_cursor(frame, inner, 1, "Search: ".len() + view.cursor(field));
            }
        }
        FieldKind::Select => {
            let selected = state.role.map(|r| r.index() + 1).unwrap_or(0);
            let entries =
                std::iter::once("Select Role").chain(Role::OPTIONS.iter().map(|r| r.label()));
            let items: Vec<ListItem> = entries
                .enumerate()
                .map(|(idx, name)| {
                    let marker = if selected == idx { "(●)" } else { "( )" };
                    let style = if is_focused && idx == view.role_highlight() {
                        Style::default()
                            .fg(theme.text)
                            .bg(theme.selected_bg)
                            .add_modifier(Modifier::BOLD)
                    } else if selected == idx {
                        Style::default().fg(theme.highlight)
                    } else {
                        text_style
                    };
                    ListItem::new(format!("{marker} {name}")).style(style)
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        }
        FieldKind::Radio => {
            let spans: Vec<Span> = Gender::OPTIONS
                .iter()
                .enumerate()
                .flat_map(|(idx, gender)| {
                    let checked = state.gender == Some(*gender);
                    let marker = if checked { "(●)" } else { "( )" };
                    let style = if is_focused && idx == view.gender_highlight() {
                        Style::default()
                            .fg(theme.text)
                            .bg(theme.selected_bg)
                            .add_modifier(Modifier::BOLD)
                    } else if checked {
                        Style::default().fg(theme.highlight)
                    } else {
                        text_style
                    };
                    [
                        Span::styled(format!("{marker} {}", gender.label()), style),
                        Span::raw("   "),
                    ]
                })
                .collect();
            frame.render_widget(Paragraph::new(Line::from(spans)), inner);
        }
        FieldKind::File => {
            let attached = match &state.file {
                Some(file) => match file.size() {
                    Some(size) => format!("Attached: {} ({size} bytes)", file.name()),
                    None => format!("Attached: {}", file.name()),
                },
                None => "No file attached (.png, .jpg, .pdf)".to_string(),
            };
            let lines = vec![
                Line::styled(
                    attached,
                    Style::default().fg(if state.file.is_some() {
                        theme.success
                    } else {
                        theme.border
                    }),
                ),
                Line::from(vec![
                    Span::styled("Path: ", Style::default().fg(theme.border)),
                    Span::styled(view.file_input().to_string(), text_style),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
            if is_focused {
                place_cursor(frame, inner, 1, "Path: ".len() + view.cursor(field));
            }
        }
        FieldKind::Slider => {
            let filled = usize::from(state.slider / 10);
            let empty = usize::from(SLIDER_MAX / 10) - filled;
            let bar = format!(
                "◀ {}{} ▶ {}",
                "█".repeat(filled),
                "░".repeat(empty),
                state.slider
            );
            frame.render_widget(
                Paragraph::new(bar).style(Style::default().fg(theme.secondary)),
                inner,
            );
        }
        FieldKind::Rating => {
            let stars = format!(
                "{}{} {}/{RATING_MAX}",
                "★".repeat(usize::from(state.rating)),
                "☆".repeat(usize::from(RATING_MAX - state.rating)),
                state.rating
            );
            frame.render_widget(
                Paragraph::new(stars).style(Style::default().fg(theme.highlight)),
                inner,
            );
        }
        FieldKind::Checkbox => {
            let checkbox = if state.agree { "[✓]" } else { "[ ]" };
            let text = Paragraph::new(format!("{checkbox} {}", field.label())).style(
                Style::default().fg(if state.agree {
                    theme.success
                } else {
                    theme.text
                }),
            );
            frame.render_widget(text, inner);
        }
        FieldKind::Switch => {
            let switch = if state.notifications { "◉ On" } else { "○ Off" };
            let text = Paragraph::new(switch).style(Style::default().fg(
                if state.notifications {
                    theme.success
                } else {
                    theme.text
                },
            ));
            frame.render_widget(text, inner);
        }
        // Remaining text kinds are handled by the guard arm above
        _ => {}
    }

    if let Some(error) = error {
        let error_text =
            Paragraph::new(format!("⚠ {error}")).style(Style::default().fg(theme.error));
        let error_area = Rect {
            x: area.x + 1,
            y: area.y + area.height - 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(error_text, error_area);
    }
}

fn place_cursor(frame: &mut Frame, inner: Rect, row: u16, col: usize) {
    let cursor_x = inner.x + col.min(u16::MAX as usize) as u16;
    let cursor_y = inner.y + row;
    if cursor_x < inner.x + inner.width && cursor_y < inner.y + inner.height {
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}
