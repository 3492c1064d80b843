pub mod game_common;
pub mod round_scene;

use numcrunch::core::GameSnapshot;
use ratatui::Frame;

/// Draw the whole screen for one frame.
pub fn draw_ui(frame: &mut Frame, snapshot: &GameSnapshot, show_help: bool) {
    let area = frame.size();
    round_scene::render_round(frame, area, snapshot);
    if show_help {
        round_scene::render_help(frame, area);
    }
}
