use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{BoardPos, MeepleColor};
use crate::play::{Game, LoopState, MatchOutcome, MenuButton};
use crate::scene::{self, Rgb};

pub fn render(frame: &mut Frame, game: &Game) {
    let area = frame.area();
    let canvas = game.layout().canvas;

    if let Some(header) = clip(Rect::new(0, 0, canvas.x as u16, 3), area) {
        render_header(frame, game, header);
    }
    render_board(frame, game, area);
    render_meeples(frame, game, area);
    if game.loop_state() == LoopState::DisplayEndScreen {
        render_buttons(frame, game, area);
    }
    if let Some(footer) = clip(Rect::new(0, canvas.y as u16 - 1, canvas.x as u16, 1), area) {
        render_controls(frame, footer);
    }
}

/// One-line description of what is going on
pub fn status_line(game: &Game) -> String {
    let players = game.players();
    match game.outcome() {
        Some(MatchOutcome::Winner(winner)) => return format!("{} wins!", players[winner].name()),
        Some(MatchOutcome::Tie) => return "Tie! The board is full.".to_string(),
        None => {}
    }

    let active = players[game.active_player()].name();
    let doing = match game.loop_state() {
        LoopState::Init | LoopState::CheckEndCondition => "next turn",
        LoopState::SelectMeepleHuman => "pick a meeple for your opponent",
        LoopState::SelectPositionHuman => "drag the meeple onto a free field",
        LoopState::SelectMeepleAiSync
        | LoopState::SelectMeepleAiAsyncStart
        | LoopState::SelectMeepleAiAsyncWait
        | LoopState::SelectPositionAiSync
        | LoopState::SelectPositionAiAsyncStart
        | LoopState::SelectPositionAiAsyncWait => "thinking...",
        LoopState::HighlightSelectedMeeple => "hands over a meeple",
        LoopState::MoveMeepleToPosition => "places the meeple",
        LoopState::DisplayEndScreen => "match over",
    };
    format!("{active}: {doing}")
}

fn render_header(frame: &mut Frame, game: &Game, area: Rect) {
    let style = match game.outcome() {
        Some(_) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    };
    let header = Paragraph::new(status_line(game))
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("4Wins"));
    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game: &Game, area: Rect) {
    for pos in BoardPos::all() {
        let Some(cell) = to_cells(game.layout().field_rect(pos), area) else {
            continue;
        };
        let border = if game.hovered_field() == Some(pos) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(Block::default().borders(Borders::ALL).border_style(border), cell);
    }
}

fn render_meeples(frame: &mut Frame, game: &Game, area: Rect) {
    let scene = game.scene();
    for handle in scene.draw_order() {
        let meeple = scene.get(handle);
        let Some(cell) = to_cells(meeple.bounds(), area) else {
            continue;
        };
        let (fg, bg) = match meeple.meeple().color {
            MeepleColor::White => (Color::Black, Color::White),
            MeepleColor::Black => (Color::White, Color::DarkGray),
        };
        let style = match meeple.glow() {
            Some(glow) => Style::default().fg(Color::Black).bg(to_color(glow)),
            None => Style::default().fg(fg).bg(bg),
        };
        let body = Paragraph::new(vec![Line::from(meeple.meeple().label()), Line::from("")])
            .style(style.add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(Clear, cell);
        frame.render_widget(body, cell);
    }
}

fn render_buttons(frame: &mut Frame, game: &Game, area: Rect) {
    let rects = game.layout().end_screen_buttons();
    for (button, rect) in MenuButton::ALL.into_iter().zip(rects) {
        let Some(cell) = to_cells(rect, area) else {
            continue;
        };
        let style = if game.hovered_button() == Some(button) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let widget = Paragraph::new(button.label())
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(Clear, cell);
        frame.render_widget(widget, cell);
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("Mouse: pick and drag meeples  |  q/Esc: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls, area);
}

/// Terminal cells covered by a logical rectangle, clipped to the frame
fn to_cells(rect: scene::Rect, area: Rect) -> Option<Rect> {
    let x = rect.origin.x.round().max(0.0) as u16;
    let y = rect.origin.y.round().max(0.0) as u16;
    let cells = Rect::new(
        x,
        y,
        rect.size.x.round().max(0.0) as u16,
        rect.size.y.round().max(0.0) as u16,
    );
    clip(cells, area)
}

fn clip(rect: Rect, area: Rect) -> Option<Rect> {
    let clipped = rect.intersection(area);
    (!clipped.is_empty()).then_some(clipped)
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::{Controller, GameSettings, Player};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn human_game() -> Game {
        Game::new(
            [
                Player::new("Ada", Controller::Human, MeepleColor::White),
                Player::new("Bob", Controller::Human, MeepleColor::Black),
            ],
            GameSettings::default(),
        )
        .unwrap()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_status_line_names_active_player() {
        let game = human_game();
        assert_eq!(status_line(&game), "Ada: next turn");
    }

    #[test]
    fn test_render_draws_header_and_meeples() {
        let mut game = human_game();
        game.tick(&Default::default(), 0.0).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(70, 22)).unwrap();
        terminal.draw(|frame| render(frame, &game)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("4Wins"));
        assert!(text.contains("Ada: pick a meeple for your opponent"));
        assert!(text.contains("Bo*"));
        assert!(!text.contains("Restart"));
    }

    #[test]
    fn test_render_survives_tiny_terminal() {
        let game = human_game();
        let mut terminal = Terminal::new(TestBackend::new(12, 4)).unwrap();
        terminal.draw(|frame| render(frame, &game)).unwrap();
    }

    #[test]
    fn test_to_cells_clips_to_area() {
        let area = Rect::new(0, 0, 10, 10);
        let inside = scene::Rect::new(scene::Vec2::new(2.0, 3.0), scene::Vec2::new(5.0, 2.0));
        assert_eq!(to_cells(inside, area), Some(Rect::new(2, 3, 5, 2)));
        let outside = scene::Rect::new(scene::Vec2::new(20.0, 3.0), scene::Vec2::new(5.0, 2.0));
        assert_eq!(to_cells(outside, area), None);
    }
}
