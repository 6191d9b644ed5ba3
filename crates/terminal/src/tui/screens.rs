use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

use termduel::{MatchState, MenuOption, PlayerId};

pub const INSTRUCTIONS: &str = "A/D: Move, J: Shoot, Q: Quit";
pub const RESTART_PROMPT: &str = "Press R to restart or Q to quit";
const BULLET_GLYPH: char = '^';

pub fn player_color(id: PlayerId) -> Color {
    match id {
        PlayerId::One => Color::Yellow,
        PlayerId::Two => Color::Magenta,
    }
}

pub fn outcome_message(state: &MatchState) -> Option<String> {
    if !state.game_over {
        return None;
    }
    Some(match state.winner {
        Some(id) => format!("Player {} Wins!", id),
        None => "GAME OVER".to_string(),
    })
}

/// Writes `text` starting at arena cell (`x`, `y`), dropping whatever falls
/// outside `area`.
fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, text: &str, style: Style) {
    if y < 0 || y >= i32::from(area.height) {
        return;
    }
    for (offset, ch) in text.chars().enumerate() {
        let cx = x + offset as i32;
        if cx < 0 || cx >= i32::from(area.width) {
            continue;
        }
        let pos = (area.x + cx as u16, area.y + y as u16);
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char(ch).set_style(style);
        }
    }
}

fn put_centered(buf: &mut Buffer, area: Rect, y: i32, text: &str, style: Style) {
    let x = i32::from(area.width) / 2 - text.chars().count() as i32 / 2;
    put(buf, area, x, y, text, style);
}

pub fn render_match(frame: &mut Frame, state: &MatchState) {
    let area = frame.area();
    frame.render_widget(Clear, area);
    let buf = frame.buffer_mut();

    for (row, player) in state.players.iter().enumerate() {
        let style = Style::default().fg(player_color(player.id));

        if player.alive {
            let x = player.x as i32;
            let y = player.y as i32;
            for (line, text) in player.sprite.iter().enumerate() {
                put(buf, area, x, y + line as i32, text, style);
            }
        }

        let health = format!("P{}: {}", player.id, player.health);
        put(buf, area, 0, row as i32 * 2, &health, style);
    }

    let bullet_style = Style::default().fg(Color::White);
    for bullet in &state.bullets {
        put(
            buf,
            area,
            bullet.x as i32,
            bullet.y as i32,
            &BULLET_GLYPH.to_string(),
            bullet_style,
        );
    }

    put(
        buf,
        area,
        0,
        i32::from(state.height) - 1,
        INSTRUCTIONS,
        Style::default().fg(Color::Cyan),
    );

    if let Some(message) = outcome_message(state) {
        put_centered(
            buf,
            area,
            i32::from(state.height) / 2,
            &message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        );
    }
}

pub fn render_end(frame: &mut Frame, state: Option<&MatchState>, message: &str) {
    let area = frame.area();
    match state {
        Some(state) => render_match(frame, state),
        None => frame.render_widget(Clear, area),
    }

    let buf = frame.buffer_mut();
    let middle = i32::from(area.height) / 2;
    put_centered(
        buf,
        area,
        middle + 1,
        message,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    );
    put_centered(
        buf,
        area,
        middle + 2,
        RESTART_PROMPT,
        Style::default().fg(Color::White),
    );
}

pub fn render_menu(frame: &mut Frame, selected: MenuOption) {
    let area = frame.area();

    let block = Block::default()
        .title(" Termduel ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let title = Paragraph::new("ONLINE SHOOTER DUEL")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = MenuOption::ALL
        .iter()
        .map(|option| {
            let item = ListItem::new(format!("  {}", option.label()));
            if *option == selected {
                item.style(
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item.style(Style::default().fg(Color::White))
            }
        })
        .collect();

    let menu = List::new(items).block(
        Block::default()
            .title(" Menu ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(menu, centered_rect(30, 5, chunks[1]));

    let help = Paragraph::new("Use Arrows to select, Enter to confirm")
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}

pub fn render_waiting(frame: &mut Frame, title: &str, lines: &[String]) {
    let area = frame.area();
    let height = lines.len() as u16 + 4;
    let dialog_area = centered_rect(50, height, area);
    frame.render_widget(Clear, dialog_area);

    let dialog = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text: Vec<Line> = lines.iter().map(|line| Line::from(line.as_str())).collect();
    let body = Paragraph::new(text)
        .block(dialog)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    frame.render_widget(body, dialog_area);
}

pub fn render_address_prompt(frame: &mut Frame, input: &str) {
    let area = frame.area();
    let dialog_area = centered_rect(50, 8, area);
    frame.render_widget(Clear, dialog_area);

    let dialog = Block::default()
        .title(" Join Room ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(dialog, dialog_area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(dialog_area);

    let label = Paragraph::new("Enter host IP (default: localhost):")
        .style(Style::default().fg(Color::White));
    frame.render_widget(label, inner[0]);

    let input_text = Paragraph::new(format!("{}_", input))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(input_text, inner[1]);

    let help = Paragraph::new("Enter Connect  Esc Cancel")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, inner[2]);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
