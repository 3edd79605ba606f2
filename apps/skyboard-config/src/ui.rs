//! UI rendering for the Skyboard configurator.

use crate::app::{App, InputMode, Mode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_keys(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);

    if app.input_mode != InputMode::None {
        draw_input_dialog(f, app);
    }

    if app.show_quit_confirm {
        draw_quit_confirm(f);
    }

    if app.show_help {
        draw_help(f);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let modified_indicator = if app.modified { " [+]" } else { "" };
    let header_text = format!(
        " Skyboard - {} | Number of Keys: {}{}",
        app.file_name(),
        app.configuration.num_keys(),
        modified_indicator
    );
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
    f.render_widget(header, area);
}

fn draw_keys(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .configuration
        .keys()
        .iter()
        .map(|key| {
            let i = key.index;
            let selected = i == app.selected;

            let keybind_span = if selected && app.mode == Mode::Editing {
                Span::styled(
                    format!("{}_", app.input_buffer),
                    Style::default().fg(Color::Black).bg(Color::Yellow),
                )
            } else if key.is_configured() {
                Span::styled(key.keybind.to_string(), Style::default().fg(Color::White))
            } else {
                Span::styled("unconfigured", Style::default().fg(Color::DarkGray))
            };

            let mut style = Style::default();
            if selected {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" Key {:<3}", key.key_number()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw("Preset: "),
                Span::styled(
                    format!("{:<40}", app.preset_label(i)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw("Keybind: "),
                keybind_span,
            ]))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys (use \"+\", e.g. F3+C) ")
            .border_style(Style::default().fg(Color::Green)),
    );

    f.render_widget(list, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Editing => "EDITING",
    };

    let info = Line::from(vec![
        Span::raw(format!(" {} | ", mode_str)),
        Span::raw(format!(
            "Key {}/{} | ",
            app.selected + 1,
            app.configuration.num_keys()
        )),
        Span::styled(
            format!("{} configured", app.configuration.configured_count()),
            Style::default().fg(Color::Green),
        ),
    ]);
    let info_widget = Paragraph::new(info).block(Block::default().borders(Borders::ALL));
    f.render_widget(info_widget, chunks[0]);

    let msg = app
        .message
        .clone()
        .unwrap_or_else(|| "? help | e edit | Ctrl+S save | x export".to_string());
    let msg_widget = Paragraph::new(msg).block(Block::default().borders(Borders::ALL));
    f.render_widget(msg_widget, chunks[1]);
}

fn draw_input_dialog(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 15, f.area());
    f.render_widget(Clear, area);

    let title = match app.input_mode {
        InputMode::OpenFile => " Load Config ",
        InputMode::SaveAs => " Save Config As ",
        InputMode::ExportFirmware => " Export Firmware ",
        InputMode::None => " Input ",
    };

    let input = Paragraph::new(app.input_buffer.as_str())
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(input, area);
}

fn draw_quit_confirm(f: &mut Frame) {
    let area = centered_rect(40, 20, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from("Unsaved changes will be lost."),
        Line::from(""),
        Line::from("Quit anyway? (y/n)"),
    ];

    let dialog = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Confirm Quit "))
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: false });
    f.render_widget(dialog, area);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let help_text = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  j/k          Select key"),
        Line::from("  +/-          More/fewer keys"),
        Line::from("  h/l          Previous/next preset"),
        Line::from("  e, Enter     Edit keybind (F3+C)"),
        Line::from("  d            Clear keybind"),
        Line::from(""),
        Line::from(Span::styled("Files", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Ctrl+S       Save config"),
        Line::from("  S            Save config as"),
        Line::from("  o            Load config"),
        Line::from("  x            Export firmware"),
        Line::from(""),
        Line::from(Span::styled("Other", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Esc          Cancel edit"),
        Line::from("  q            Quit"),
    ];

    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    fn new_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let app = App::with_settings(dir.path().join("hackpad_config.json"), Settings::default());
        (dir, app)
    }

    #[test]
    fn test_renders_every_slot() {
        let (_dir, app) = new_app();
        let screen = render(&app);
        assert!(screen.contains("hackpad_config.json"));
        assert!(screen.contains("Number of Keys: 6"));
        for n in 1..=6 {
            assert!(screen.contains(&format!("Key {:<3}", n)), "Key {n}");
        }
        assert!(screen.contains("unconfigured"));
        assert!(screen.contains("0 configured"));
    }

    #[test]
    fn test_renders_keybind_and_preset() {
        let (_dir, mut app) = new_app();
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        let screen = render(&app);
        assert!(screen.contains("F3+C - Copy Coordinates"));
        assert!(screen.contains("Keybind: F3+C"));
        assert!(screen.contains("1 configured"));
        assert!(screen.contains("[+]"));
    }

    #[test]
    fn test_renders_export_dialog() {
        let (_dir, mut app) = new_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        let screen = render(&app);
        assert!(screen.contains("Export Firmware"));
        assert!(screen.contains("code.py"));
    }
}
