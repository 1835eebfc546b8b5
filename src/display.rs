/// Rendering layer: all terminal output lives here.
///
/// The arena is scaled onto whatever grid the terminal offers and each
/// sprite's text art is painted from the cell under its rectangle's top-left
/// corner.  No game logic is performed; this module only translates a
/// `Scene` into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use triangle_adventure::assets::SpriteSheet;
use triangle_adventure::constants::BACKGROUND_RGB;
use triangle_adventure::geometry::Rect;
use triangle_adventure::render::{DrawItem, Hud, Renderer, Scene, SpriteId};

/// Smallest terminal the game agrees to start in.
pub const MIN_COLS: u16 = 80;
pub const MIN_ROWS: u16 = 24;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Rgb { r: BACKGROUND_RGB.0, g: BACKGROUND_RGB.1, b: BACKGROUND_RGB.2 };
const C_HUD: Color = Color::Rgb { r: 255, g: 0, b: 255 };

fn sprite_color(sprite: SpriteId) -> Color {
    match sprite {
        SpriteId::Player => Color::Rgb { r: 30, g: 40, b: 120 },
        SpriteId::PlayerHit => Color::Rgb { r: 200, g: 30, b: 30 },
        SpriteId::AllyProjectile => Color::Rgb { r: 20, g: 110, b: 40 },
        SpriteId::EnemyProjectile => Color::Rgb { r: 140, g: 20, b: 110 },
        SpriteId::Enemy => Color::Rgb { r: 90, g: 40, b: 20 },
        SpriteId::EnemyHit => Color::Rgb { r: 250, g: 250, b: 250 },
    }
}

// ── Scaling ───────────────────────────────────────────────────────────────────

/// Terminal cell containing arena point (`x`, `y`).  `None` when the point
/// falls outside the grid.
pub fn cell_for(arena: &Rect, cols: u16, rows: u16, x: f64, y: f64) -> Option<(u16, u16)> {
    let fx = (x - arena.x) / arena.w;
    let fy = (y - arena.y) / arena.h;
    if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
        return None;
    }
    Some(((fx * cols as f64) as u16, (fy * rows as f64) as u16))
}

// ── Screen setup ──────────────────────────────────────────────────────────────

/// Switch to the alternate screen and hide the cursor.  Raw mode must
/// already be on.
pub fn enter_game_screen<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    Ok(())
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalDisplay<W: Write> {
    out: W,
    sprites: SpriteSheet,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, sprites: SpriteSheet, cols: u16, rows: u16) -> Self {
        Self { out, sprites, cols, rows }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    fn draw_item(&mut self, arena: &Rect, item: &DrawItem) -> std::io::Result<()> {
        // Anchor may sit a few pixels outside the arena for bouncing enemies.
        let x = item.rect.x.clamp(arena.left(), arena.right() - 1.0);
        let y = item.rect.y.clamp(arena.top(), arena.bottom() - 1.0);
        let Some((col, row)) = cell_for(arena, self.cols, self.rows, x, y) else {
            return Ok(());
        };
        let Some(sprite) = self.sprites.get(item.sprite, item.mirrored) else {
            return Ok(());
        };

        self.out.queue(style::SetForegroundColor(sprite_color(item.sprite)))?;
        for (dy, line) in sprite.rows().iter().enumerate() {
            let r = row as usize + dy;
            if r >= self.rows as usize {
                break;
            }
            for (dx, ch) in line.chars().enumerate() {
                let c = col as usize + dx;
                if c >= self.cols as usize {
                    break;
                }
                if ch == ' ' {
                    continue;
                }
                self.out.queue(cursor::MoveTo(c as u16, r as u16))?;
                self.out.queue(Print(ch))?;
            }
        }
        Ok(())
    }

    fn draw_hud(&mut self, hud: &Hud) -> std::io::Result<()> {
        self.out.queue(style::SetForegroundColor(C_HUD))?;
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(Print(format!("HP: {}", hud.health)))?;
        self.out.queue(cursor::MoveTo(1, 1))?;
        self.out.queue(Print(format!("Score: {}", hud.score)))?;
        if hud.dead {
            self.out.queue(cursor::MoveTo(1, 3))?;
            self.out.queue(Print("Press R to restart."))?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalDisplay<W> {
    type Error = std::io::Error;

    /// Render one complete frame.
    fn draw_scene(&mut self, scene: &Scene) -> std::io::Result<()> {
        self.out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        for item in &scene.items {
            self.draw_item(&scene.arena, item)?;
        }
        self.draw_hud(&scene.hud)?;

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}
