use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::BANNER_BORDER;
use crate::ui::labels::TextLabel;

/// Draws a visible banner label as a centered popup. Hidden labels draw nothing.
pub fn render_banner(frame: &mut Frame<'_>, area: Rect, banner: &TextLabel, accent: Color) {
    if !banner.is_visible() {
        return;
    }

    let popup = centered_popup(area, 50, 30);
    frame.render_widget(Clear, popup);

    let mut lines = banner.text().lines();
    let mut body = Vec::new();
    if let Some(title) = lines.next() {
        body.push(Line::styled(
            title.to_owned(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
        body.push(Line::from(""));
    }
    body.extend(lines.map(|line| Line::from(line.to_owned())));
    body.push(Line::styled(
        "[Q]/[Esc] Quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(
        Paragraph::new(body).alignment(Alignment::Center).block(
            Block::bordered()
                .border_set(BANNER_BORDER)
                .border_style(Style::default().fg(accent)),
        ),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
