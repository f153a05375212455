use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    PlayerOne,
    PlayerTwo,
    Start,
    Quit,
}

const ITEMS: [MenuItem; 4] = [
    MenuItem::PlayerOne,
    MenuItem::PlayerTwo,
    MenuItem::Start,
    MenuItem::Quit,
];

/// Main menu: seat the two players, then start a session.
#[derive(Debug, Default)]
pub struct MenuState {
    selected: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to a key press. Returns a choice once the menu is done.
    pub fn handle_key(&mut self, code: KeyCode, config: &mut AppConfig) -> Option<MenuChoice> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(MenuChoice::Quit),
            KeyCode::Char('s') => return Some(MenuChoice::Start),
            KeyCode::Up => self.selected = (self.selected + ITEMS.len() - 1) % ITEMS.len(),
            KeyCode::Down | KeyCode::Tab => self.selected = (self.selected + 1) % ITEMS.len(),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                match ITEMS[self.selected] {
                    MenuItem::PlayerOne => config.player_one.kind = config.player_one.kind.cycle(),
                    MenuItem::PlayerTwo => config.player_two.kind = config.player_two.kind.cycle(),
                    MenuItem::Start => return Some(MenuChoice::Start),
                    MenuItem::Quit => return Some(MenuChoice::Quit),
                }
            }
            _ => {}
        }
        None
    }
}

pub fn render(frame: &mut Frame, state: &MenuState, config: &AppConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Items
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    let title = Paragraph::new("4Wins")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let lines: Vec<Line> = ITEMS
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let text = match item {
                MenuItem::PlayerOne => format!(
                    "{} (white): {}",
                    config.player_one.name,
                    config.player_one.kind.label()
                ),
                MenuItem::PlayerTwo => format!(
                    "{} (black): {}",
                    config.player_two.name,
                    config.player_two.kind.label()
                ),
                MenuItem::Start => "Start".to_string(),
                MenuItem::Quit => "Quit".to_string(),
            };
            if i == state.selected {
                Line::from(Span::styled(
                    format!("> {text} <"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect();
    let items = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Menu"));
    frame.render_widget(items, chunks[1]);

    let controls = Paragraph::new("↑/↓: Select  |  Enter/←/→: Change  |  S: Start  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::PlayerKind;

    #[test]
    fn test_cycles_player_kinds() {
        let mut config = AppConfig::default();
        let mut menu = MenuState::new();
        assert_eq!(config.player_one.kind, PlayerKind::Human);

        assert_eq!(menu.handle_key(KeyCode::Enter, &mut config), None);
        assert_eq!(config.player_one.kind, PlayerKind::IPlayer);

        menu.handle_key(KeyCode::Down, &mut config);
        menu.handle_key(KeyCode::Right, &mut config);
        assert_eq!(config.player_two.kind, PlayerKind::Human);
        assert_eq!(config.player_one.kind, PlayerKind::IPlayer);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut config = AppConfig::default();
        let mut menu = MenuState::new();
        menu.handle_key(KeyCode::Up, &mut config);
        assert_eq!(menu.handle_key(KeyCode::Enter, &mut config), Some(MenuChoice::Quit));
        menu.handle_key(KeyCode::Up, &mut config);
        assert_eq!(menu.handle_key(KeyCode::Enter, &mut config), Some(MenuChoice::Start));
    }

    #[test]
    fn test_shortcuts() {
        let mut config = AppConfig::default();
        let mut menu = MenuState::new();
        assert_eq!(menu.handle_key(KeyCode::Char('s'), &mut config), Some(MenuChoice::Start));
        assert_eq!(menu.handle_key(KeyCode::Esc, &mut config), Some(MenuChoice::Quit));
        assert_eq!(menu.handle_key(KeyCode::Char('x'), &mut config), None);
    }
}
