/// Display-list renderer
///
/// Rendering happens in two steps:
///
/// 1. `plan_frame()` walks the scene's display list and turns every visible
///    entry into a `DrawCommand` with its final source/destination rectangles.
///    This part is pure: no canvas, no textures, so it's unit-tested.
/// 2. `render_frame()` clears to the background color and executes the plan
///    against the SDL2 canvas, then adds debug outlines if enabled.
///
/// # Draw Order
///
/// Entries are drawn in the order the scene created them (painter's
/// algorithm without sorting): the sky first, then platforms, player, stars,
/// the score label, and bombs as they spawn.
use crate::arcade::{BodyId, BodyKind};
use crate::assets::TextureStore;
use crate::collision::{Aabb, Collidable};
use crate::scene::{DisplayEntry, SceneContext};
use crate::text::draw_text;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const DEBUG_DYNAMIC_COLOR: Color = Color::RGB(255, 0, 255);
const DEBUG_STATIC_COLOR: Color = Color::RGB(0, 255, 0);

/// One resolved draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Texture {
        texture: String,
        /// `None` copies the whole texture
        src: Option<Rect>,
        dest: Rect,
        tint: Option<Color>,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        font_size: u32,
        color: Color,
    },
}

/// Resolves the display list into draw commands, in draw order.
///
/// Hidden bodies are skipped. Sprites on a spritesheet use their animation's
/// current frame, or frame 0 before any clip has played.
pub fn plan_frame(ctx: &SceneContext) -> Result<Vec<DrawCommand>, String> {
    let mut commands = Vec::with_capacity(ctx.display.entries().len());

    for entry in ctx.display.entries() {
        match *entry {
            DisplayEntry::Image(index) => {
                let image = ctx.display.image(index);
                let info = ctx.textures().get(&image.texture).map_err(|e| e.to_string())?;
                let bounds = Aabb::from_center(image.x, image.y, info.width as f32, info.height as f32);
                commands.push(DrawCommand::Texture {
                    texture: image.texture.clone(),
                    src: None,
                    dest: bounds.to_rect(),
                    tint: None,
                });
            }
            DisplayEntry::Sprite(body_id) => {
                if let Some(command) = plan_sprite(ctx, body_id)? {
                    commands.push(command);
                }
            }
            DisplayEntry::Text(id) => {
                let label = ctx.display.text(id);
                commands.push(DrawCommand::Text {
                    text: label.text.clone(),
                    x: label.x,
                    y: label.y,
                    font_size: label.font_size,
                    color: label.color,
                });
            }
        }
    }

    Ok(commands)
}

fn plan_sprite(ctx: &SceneContext, body_id: BodyId) -> Result<Option<DrawCommand>, String> {
    let body = ctx.world.body(body_id);
    if !body.visible {
        return Ok(None);
    }

    let Some(sprite) = ctx.display.sprite(body_id) else {
        return Ok(None);
    };
    let info = ctx.textures().get(&sprite.texture).map_err(|e| e.to_string())?;

    let src = match info.sheet {
        Some(sheet) => {
            let frame = sprite.anim.current_frame(&ctx.anims).unwrap_or(0);
            Some(
                sheet
                    .frame_rect(frame)
                    .ok_or_else(|| format!("{} has no frame {}", sprite.texture, frame))?,
            )
        }
        None => None,
    };

    Ok(Some(DrawCommand::Texture {
        texture: sprite.texture.clone(),
        src,
        dest: body.get_bounds().to_rect(),
        tint: sprite.tint,
    }))
}

/// Draws one frame of the scene. Does not present.
pub fn render_frame(
    canvas: &mut Canvas<Window>,
    store: &mut TextureStore,
    ctx: &SceneContext,
    background: Color,
    debug_draw: bool,
) -> Result<(), String> {
    canvas.set_draw_color(background);
    canvas.clear();

    for command in plan_frame(ctx)? {
        match command {
            DrawCommand::Texture {
                texture,
                src,
                dest,
                tint,
            } => {
                let texture = store
                    .texture_mut(&texture)
                    .ok_or_else(|| format!("texture '{}' was never loaded", texture))?;

                match tint {
                    Some(color) => {
                        texture.set_color_mod(color.r, color.g, color.b);
                        canvas.copy(texture, src, dest)?;
                        texture.set_color_mod(255, 255, 255);
                    }
                    None => canvas.copy(texture, src, dest)?,
                }
            }
            DrawCommand::Text {
                text,
                x,
                y,
                font_size,
                color,
            } => draw_text(canvas, &text, x, y, font_size, color)?,
        }
    }

    if debug_draw {
        draw_body_outlines(canvas, ctx)?;
    }

    Ok(())
}

fn draw_body_outlines(canvas: &mut Canvas<Window>, ctx: &SceneContext) -> Result<(), String> {
    for (_, body) in ctx.world.bodies().filter(|(_, body)| body.enabled) {
        canvas.set_draw_color(match body.kind {
            BodyKind::Dynamic => DEBUG_DYNAMIC_COLOR,
            BodyKind::Static => DEBUG_STATIC_COLOR,
        });
        canvas.draw_rect(body.get_bounds().to_rect())?;
    }
    Ok(())
}
