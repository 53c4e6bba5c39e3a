use crate::game::GameState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{board_lines, piece_color};

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    message: &Option<String>,
    status: &str,
) {
    let board_height = game_state.board().rows() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(board_height),    // Board
            Constraint::Length(3),            // Message
            Constraint::Length(3),            // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, status, chunks[0]);
    render_board(frame, game_state, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(
        frame,
        "←/→ or 1-9: Select  |  Enter: Drop  |  R: Restart  |  D: Difficulty  |  Q: Quit",
        chunks[3],
    );
}

/// Difficulty prompt shown before a game starts.
pub fn render_difficulty(frame: &mut Frame, max_difficulty: usize, message: &Option<String>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new("Connect Four")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let prompt = vec![
        Line::from(format!("Choose difficulty level (0-{max_difficulty}):")),
        Line::from(""),
        Line::from("Higher levels look further ahead and take longer to move."),
    ];
    let body = Paragraph::new(prompt)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Difficulty"));
    frame.render_widget(body, chunks[1]);

    render_message(frame, message, chunks[2]);
    render_controls(frame, "0-9: Choose  |  Q: Quit", chunks[3]);
}

fn render_header(frame: &mut Frame, game_state: &GameState, status: &str, area: Rect) {
    let piece = game_state.current_piece();

    let text = if game_state.is_terminal() {
        format!("Game Over  |  {status}")
    } else {
        format!("To move: {piece}  |  {status}")
    };

    let header = Paragraph::new(text)
        .style(
            Style::default()
                .fg(piece_color(piece))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game_state: &GameState, selected_column: usize, area: Rect) {
    let widget =
        Paragraph::new(board_lines(game_state.board(), selected_column)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, text: &str, area: Rect) {
    let controls = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_game_shows_pieces_and_status() {
        let mut state = GameState::initial();
        state.apply_move(4).unwrap();
        let message = Some("I played in column 4.".to_string());

        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        terminal
            .draw(|f| render(f, &state, 3, &message, "Difficulty 3"))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("To move: O"));
        assert!(text.contains("Difficulty 3"));
        assert!(text.contains("I played in column 4."));
        assert!(text.contains('X'));
    }

    #[test]
    fn test_render_difficulty_prompt() {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|f| render_difficulty(f, 6, &None)).unwrap();
        assert!(screen_text(&terminal).contains("Choose difficulty level (0-6):"));
    }
}
