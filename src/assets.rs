//! Sprite art loaded once at startup.
//!
//! Each sprite is a small text-art file `<name>.txt` in the data directory.
//! Spaces are transparent.  A sprite that is missing, unreadable or blank
//! fails the whole load; the game does not start without its art.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::info;

use crate::render::SpriteId;

/// Environment variable overriding the sprite directory.
pub const DATA_DIR_ENV: &str = "TRIANGLE_DATA_DIR";

/// `$TRIANGLE_DATA_DIR`, or `data/` next to the crate manifest.
pub fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<String>,
}

impl Sprite {
    /// Parse text art.  Trailing blank lines are dropped; a sprite with no
    /// visible character is rejected.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut rows: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        if rows.iter().all(|r| r.trim().is_empty()) {
            bail!("sprite has no visible characters");
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Horizontal flip.  Rows are padded to a common width first so the art
    /// stays aligned, and directional glyphs swap with their partners.
    pub fn mirrored(&self) -> Self {
        let width = self.width();
        let rows = self
            .rows
            .iter()
            .map(|r| {
                let mut padded: Vec<char> = r.chars().collect();
                padded.resize(width, ' ');
                let flipped: String = padded.into_iter().rev().map(mirror_char).collect();
                flipped.trim_end().to_string()
            })
            .collect();
        Self { rows }
    }
}

fn mirror_char(c: char) -> char {
    match c {
        '/' => '\\',
        '\\' => '/',
        '<' => '>',
        '>' => '<',
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '◀' => '▶',
        '▶' => '◀',
        other => other,
    }
}

/// All six sprites, plus mirrored copies for the ones that can face right.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    sprites: HashMap<SpriteId, Sprite>,
    mirrored: HashMap<SpriteId, Sprite>,
}

impl SpriteSheet {
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let mut sprites = HashMap::new();
        let mut mirrored = HashMap::new();
        for id in SpriteId::ALL {
            let path = dir.join(format!("{}.txt", id.file_stem()));
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot load sprite {}", path.display()))?;
            let sprite = Sprite::parse(&text)
                .with_context(|| format!("corrupt sprite {}", path.display()))?;
            mirrored.insert(id, sprite.mirrored());
            sprites.insert(id, sprite);
        }
        info!(dir = %dir.display(), count = sprites.len(), "sprites loaded");
        Ok(Self { sprites, mirrored })
    }

    pub fn get(&self, id: SpriteId, mirrored: bool) -> Option<&Sprite> {
        if mirrored {
            self.mirrored.get(&id)
        } else {
            self.sprites.get(&id)
        }
    }
}
