use crate::app::{App, Tooltip};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use tui_globe::braille::{BrailleCanvas, BrailleSurface};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into map area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Globe ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let map_widget = MapWidget {
        surface: &app.surface,
        tooltip: app.tooltip(),
    };
    frame.render_widget(map_widget, inner);
}

/// Braille globe layers with the tooltip overlaid
struct MapWidget<'a> {
    surface: &'a BrailleSurface,
    tooltip: Option<&'a Tooltip>,
}

impl MapWidget<'_> {
    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row_str) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row_str.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }

    fn render_tooltip(tooltip: &Tooltip, area: Rect, buf: &mut Buffer) {
        if tooltip.row >= area.height || tooltip.col >= area.width {
            return;
        }
        let style = Style::default().fg(Color::Black).bg(Color::White);
        let y = area.y + tooltip.row;
        let max_len = (area.width - tooltip.col) as usize;
        for (i, ch) in tooltip.text.chars().take(max_len).enumerate() {
            buf[(area.x + tooltip.col + i as u16, y)]
                .set_char(ch)
                .set_style(style);
        }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: water, land, markers
        Self::render_layer(&self.surface.water, Color::Blue, area, buf);
        Self::render_layer(&self.surface.land, Color::Green, area, buf);
        Self::render_layer(&self.surface.markers, Color::Red, area, buf);

        if let Some(tooltip) = self.tooltip {
            Self::render_tooltip(tooltip, area, buf);
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let spin_color = match app.spin_label() {
        "spinning" => Color::Green,
        "paused" => Color::Yellow,
        _ => Color::DarkGray,
    };

    let status = Line::from(vec![
        Span::styled(" Spin: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.spin_label(), Style::default().fg(spin_color)),
        Span::styled(" | Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" (", Style::default().fg(Color::DarkGray)),
        Span::styled(app.lod_label(), Style::default().fg(Color::Magenta)),
        Span::styled(") | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(
            " | drag:rotate wheel,+/-:zoom r:reset q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(status);
    frame.render_widget(paragraph, area);
}
