//! Frame rendering
//!
//! The game draws through the [`Surface`] trait: clear, filled rectangles and
//! text. The browser backend wraps a 2D canvas context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::{Aabb, GameState};

pub const PLAYER_COLOR: &str = "green";
pub const OBSTACLE_COLOR: &str = "red";
pub const SCORE_COLOR: &str = "white";
pub const GAME_OVER_COLOR: &str = "orange";

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Vertical anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

/// Drop shadow behind text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: &'static str,
    pub blur: f64,
}

/// How a line of text is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: &'static str,
    pub font: &'static str,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub shadow: Option<Shadow>,
}

const SCORE_STYLE: TextStyle = TextStyle {
    color: SCORE_COLOR,
    font: "bold 32px Arial",
    align: TextAlign::Left,
    baseline: TextBaseline::Alphabetic,
    shadow: None,
};

const GAME_OVER_STYLE: TextStyle = TextStyle {
    color: GAME_OVER_COLOR,
    font: "bold 48px Arial",
    align: TextAlign::Center,
    baseline: TextBaseline::Middle,
    shadow: Some(Shadow {
        color: "black",
        blur: 10.0,
    }),
};

/// A 2D drawing target
pub trait Surface {
    /// Erase the whole drawing area
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Aabb, color: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}

/// Surface that discards everything (headless runs)
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}
    fn fill_rect(&mut self, _rect: Aabb, _color: &str) {}
    fn fill_text(&mut self, _text: &str, _x: f32, _y: f32, _style: &TextStyle) {}
}

/// Paint one frame of the world. Never mutates the state.
pub fn draw_frame<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.clear();

    surface.fill_rect(state.player.bounds(), PLAYER_COLOR);

    for obstacle in &state.obstacles {
        surface.fill_rect(obstacle.bounds(), OBSTACLE_COLOR);
    }

    surface.fill_text(&format!("Score: {}", state.score), 10.0, 30.0, &SCORE_STYLE);

    if state.is_game_over() {
        let cx = CANVAS_WIDTH / 2.0;
        let cy = CANVAS_HEIGHT / 2.0;
        surface.fill_text("Game Over!", cx, cy - 40.0, &GAME_OVER_STYLE);
        surface.fill_text("Click Restart to Play Again", cx, cy + 10.0, &GAME_OVER_STYLE);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sim::{GamePhase, Obstacle};
    use crate::tuning::Tuning;

    /// Draw call captured by [`RecordingSurface`]
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear,
        Rect(Aabb, String),
        Text(String, f32, f32, TextStyle),
    }

    /// Surface that remembers every call
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Text(t, ..) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.push(DrawCall::Clear);
        }

        fn fill_rect(&mut self, rect: Aabb, color: &str) {
            self.calls.push(DrawCall::Rect(rect, color.to_string()));
        }

        fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
            self.calls.push(DrawCall::Text(text.to_string(), x, y, *style));
        }
    }

    #[test]
    fn test_running_frame() {
        let mut state = GameState::new(0, Tuning::default());
        state.score = 7;
        state.obstacles.push(Obstacle::at_right_edge());
        let mut surface = RecordingSurface::default();

        draw_frame(&state, &mut surface);

        assert_eq!(surface.calls[0], DrawCall::Clear);
        assert_eq!(
            surface.calls[1],
            DrawCall::Rect(state.player.bounds(), PLAYER_COLOR.to_string())
        );
        assert_eq!(
            surface.calls[2],
            DrawCall::Rect(state.obstacles[0].bounds(), OBSTACLE_COLOR.to_string())
        );
        assert_eq!(surface.texts(), vec!["Score: 7"]);
        assert_eq!(surface.calls.len(), 4);
    }

    #[test]
    fn test_game_over_frame_adds_centered_message() {
        let mut state = GameState::new(0, Tuning::default());
        state.phase = GamePhase::GameOver;
        let mut surface = RecordingSurface::default();

        draw_frame(&state, &mut surface);

        assert_eq!(
            surface.texts(),
            vec!["Score: 0", "Game Over!", "Click Restart to Play Again"]
        );
        let Some(DrawCall::Text(_, x, y, style)) = surface.calls.last() else {
            panic!("expected text");
        };
        assert_eq!((*x, *y), (450.0, 260.0));
        assert_eq!(style.align, TextAlign::Center);
        assert!(style.shadow.is_some());
    }
}
