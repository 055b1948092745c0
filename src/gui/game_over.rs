//! Game Over Banner
//!
//! Dims the frozen scene and shows the final score once the player hits a
//! bomb. There's no restart: the only way out is closing the window.

use crate::text::{draw_text, text_width};
use sdl2::pixels::Color;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

/// Colors and sizes for the banner
#[derive(Debug, Clone)]
pub struct GameOverStyle {
    /// Overlay darkness (0-255, higher = darker)
    pub overlay_alpha: u8,

    pub title_color: Color,
    pub title_size: u32,

    pub score_color: Color,
    pub score_size: u32,

    pub hint_color: Color,
    pub hint_size: u32,
}

impl Default for GameOverStyle {
    fn default() -> Self {
        GameOverStyle {
            overlay_alpha: 160,
            title_color: Color::RGB(255, 50, 50),
            title_size: 48,
            score_color: Color::RGB(255, 255, 100),
            score_size: 24,
            hint_color: Color::RGB(220, 220, 230),
            hint_size: 16,
        }
    }
}

/// One line of banner text, already positioned
#[derive(Debug, Clone, PartialEq)]
struct BannerLine {
    text: String,
    x: i32,
    y: i32,
    size: u32,
    color: Color,
}

/// Overlay shown after game over.
///
/// # Example
///
/// ```ignore
/// let mut banner = GameOverBanner::new();
///
/// if scene.is_over() {
///     banner.show(scene.score());
/// }
///
/// banner.render(&mut canvas)?;
/// ```
pub struct GameOverBanner {
    final_score: Option<u32>,
    style: GameOverStyle,
}

impl GameOverBanner {
    pub fn new() -> Self {
        GameOverBanner {
            final_score: None,
            style: GameOverStyle::default(),
        }
    }

    /// Show the banner with the score the run ended on
    pub fn show(&mut self, score: u32) {
        self.final_score = Some(score);
    }

    pub fn is_visible(&self) -> bool {
        self.final_score.is_some()
    }

    /// Lines centered on a `width` x `height` screen
    fn layout(&self, score: u32, width: u32, height: u32) -> Vec<BannerLine> {
        let center_x = width as i32 / 2;
        let center_y = height as i32 / 2;
        let style = &self.style;

        let centered = |text: String, y: i32, size: u32, color: Color| BannerLine {
            x: center_x - text_width(&text, size) as i32 / 2,
            y,
            size,
            color,
            text,
        };

        vec![
            centered("GAME OVER".to_string(), center_y - 60, style.title_size, style.title_color),
            centered(format!("Score: {}", score), center_y + 10, style.score_size, style.score_color),
            centered("ESC to quit".to_string(), center_y + 70, style.hint_size, style.hint_color),
        ]
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let Some(score) = self.final_score else {
            return Ok(());
        };

        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, self.style.overlay_alpha));
        canvas.fill_rect(None)?;
        canvas.set_blend_mode(BlendMode::None);

        // Logical size, not the physical window size
        let (width, height) = canvas.logical_size();
        for line in self.layout(score, width, height) {
            draw_text(canvas, &line.text, line.x, line.y, line.size, line.color)?;
        }

        Ok(())
    }
}

impl Default for GameOverBanner {
    fn default() -> Self {
        Self::new()
    }
}
