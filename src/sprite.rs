use sdl2::rect::Rect;

/// Frame layout of a spritesheet texture.
///
/// Frames are laid out left to right, top to bottom, starting at the
/// top-left corner. Frame `n` is the n-th cell in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub frame_width: u32,
    pub frame_height: u32,
    pub texture_width: u32,
    pub texture_height: u32,
}

impl SpriteSheet {
    pub fn new(frame_width: u32, frame_height: u32, texture_width: u32, texture_height: u32) -> Self {
        SpriteSheet {
            frame_width,
            frame_height,
            texture_width,
            texture_height,
        }
    }

    pub fn columns(&self) -> u32 {
        (self.texture_width / self.frame_width.max(1)).max(1)
    }

    pub fn rows(&self) -> u32 {
        (self.texture_height / self.frame_height.max(1)).max(1)
    }

    pub fn frame_count(&self) -> u32 {
        self.columns() * self.rows()
    }

    /// Source rectangle of a frame, or `None` if the sheet has no such frame
    pub fn frame_rect(&self, frame: u32) -> Option<Rect> {
        if frame >= self.frame_count() {
            return None;
        }

        let column = frame % self.columns();
        let row = frame / self.columns();

        Some(Rect::new(
            (column * self.frame_width) as i32,
            (row * self.frame_height) as i32,
            self.frame_width,
            self.frame_height,
        ))
    }
}
