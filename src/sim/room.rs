//! Rooms and tile collision
//!
//! A room is a fixed grid of tiles plus the mutable lists of enemies and
//! collectibles that live in it. The grid is assembled by [`RoomBuilder`] and
//! is read-only once the room is built.

use std::fmt;
use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collectible::{Collectible, CollectibleKind};
use super::enemy::Enemy;

/// Identifier of a room in the world graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u8);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tile symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    /// Platforms block movement exactly like walls (no one-way semantics)
    Platform,
}

impl Tile {
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, Tile::Empty)
    }

    /// Display glyph
    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '█',
            Tile::Platform => '=',
        }
    }
}

/// Fixed-size tile map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    /// Row-major, `y * width + x`
    tiles: Vec<Tile>,
}

impl TileGrid {
    fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Tile at a cell. Out-of-bounds cells read as empty.
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map(|i| self.tiles[i]).unwrap_or_default()
    }

    /// Whether a cell blocks movement. Out-of-bounds cells are always solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.index(x, y)
            .map(|i| self.tiles[i].is_solid())
            .unwrap_or(true)
    }

    /// Solid check for a continuous point, sampled at its containing cell
    #[inline]
    pub fn is_solid_at(&self, pos: Vec2) -> bool {
        self.is_solid(cell(pos.x), cell(pos.y))
    }

    /// Whether a continuous point lies inside `[0, width) × [0, height)`
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x < self.width as f32 && pos.y < self.height as f32
    }

    /// Clamp a point into the grid (`0..=width-1`, `0..=height-1`)
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, (self.width - 1) as f32),
            pos.y.clamp(0.0, (self.height - 1) as f32),
        )
    }

    /// Glyph rows, top to bottom
    pub fn rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|t| t.glyph()).collect())
            .collect()
    }
}

/// Cell coordinate containing a continuous coordinate
#[inline]
pub fn cell(v: f32) -> i32 {
    v.floor() as i32
}

/// Span of columns open in a ceiling or floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitGap {
    pub start: i32,
    pub end: i32,
}

impl ExitGap {
    pub fn contains(&self, x: f32) -> bool {
        let col = cell(x);
        col >= self.start && col < self.end
    }
}

impl From<Range<i32>> for ExitGap {
    fn from(r: Range<i32>) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}

/// Directional neighbor links
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exits {
    pub left: Option<RoomId>,
    pub right: Option<RoomId>,
    pub up: Option<RoomId>,
    pub down: Option<RoomId>,
}

impl Exits {
    pub fn iter(&self) -> impl Iterator<Item = RoomId> + '_ {
        [self.left, self.right, self.up, self.down].into_iter().flatten()
    }
}

/// A room: immutable tile grid, mutable entity lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    grid: TileGrid,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub exits: Exits,
    /// Open ceiling span for the up exit (`None` = no restriction)
    pub ceiling_gap: Option<ExitGap>,
    /// Open floor span for the down exit (`None` = no restriction)
    pub floor_gap: Option<ExitGap>,
}

impl Room {
    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.grid.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.grid.height
    }

    /// Borrow the grid alongside the mutable entity lists
    pub fn split_mut(&mut self) -> (&TileGrid, &mut Vec<Enemy>, &mut Vec<Collectible>) {
        (&self.grid, &mut self.enemies, &mut self.collectibles)
    }
}

/// Authoring-time room construction
#[derive(Debug, Clone)]
pub struct RoomBuilder {
    id: RoomId,
    name: String,
    grid: TileGrid,
    enemies: Vec<Enemy>,
    collectibles: Vec<Collectible>,
    exits: Exits,
    ceiling_gap: Option<ExitGap>,
    floor_gap: Option<ExitGap>,
}

impl RoomBuilder {
    pub fn new(id: RoomId, name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            id,
            name: name.into(),
            grid: TileGrid::new(width, height),
            enemies: Vec::new(),
            collectibles: Vec::new(),
            exits: Exits::default(),
            ceiling_gap: None,
            floor_gap: None,
        }
    }

    /// Set a single tile (out-of-bounds writes are ignored)
    pub fn set_tile(mut self, x: i32, y: i32, tile: Tile) -> Self {
        self.grid.set(x, y, tile);
        self
    }

    pub fn fill_row(mut self, y: i32, xs: Range<i32>, tile: Tile) -> Self {
        for x in xs {
            self.grid.set(x, y, tile);
        }
        self
    }

    pub fn fill_column(mut self, x: i32, ys: Range<i32>, tile: Tile) -> Self {
        for y in ys {
            self.grid.set(x, y, tile);
        }
        self
    }

    /// Wall off the border: floor, ceiling, left and right walls
    pub fn enclosed(self) -> Self {
        let (w, h) = (self.grid.width, self.grid.height);
        self.fill_row(0, 0..w, Tile::Wall)
            .fill_row(h - 1, 0..w, Tile::Wall)
            .fill_column(0, 0..h, Tile::Wall)
            .fill_column(w - 1, 0..h, Tile::Wall)
    }

    pub fn platform(self, y: i32, xs: Range<i32>) -> Self {
        self.fill_row(y, xs, Tile::Platform)
    }

    pub fn block(self, y: i32, xs: Range<i32>) -> Self {
        self.fill_row(y, xs, Tile::Wall)
    }

    /// Open the left wall over `rows` and link it to `to`
    pub fn left_exit(mut self, to: RoomId, rows: Range<i32>) -> Self {
        self.exits.left = Some(to);
        self.fill_column(0, rows, Tile::Empty)
    }

    /// Open the right wall over `rows` and link it to `to`
    pub fn right_exit(mut self, to: RoomId, rows: Range<i32>) -> Self {
        self.exits.right = Some(to);
        let x = self.grid.width - 1;
        self.fill_column(x, rows, Tile::Empty)
    }

    /// Open the ceiling over `cols` and link it to `to`
    pub fn up_exit(mut self, to: RoomId, cols: Range<i32>) -> Self {
        self.exits.up = Some(to);
        self.ceiling_gap = Some(cols.clone().into());
        self.fill_row(0, cols, Tile::Empty)
    }

    /// Open the floor over `cols` and link it to `to`
    pub fn down_exit(mut self, to: RoomId, cols: Range<i32>) -> Self {
        self.exits.down = Some(to);
        self.floor_gap = Some(cols.clone().into());
        let y = self.grid.height - 1;
        self.fill_row(y, cols, Tile::Empty)
    }

    pub fn enemy(mut self, enemy: Enemy) -> Self {
        self.enemies.push(enemy);
        self
    }

    pub fn collectible(mut self, kind: CollectibleKind, x: f32, y: f32) -> Self {
        self.collectibles.push(Collectible::new(kind, x, y));
        self
    }

    pub fn build(self) -> Room {
        Room {
            id: self.id,
            name: self.name,
            grid: self.grid,
            enemies: self.enemies,
            collectibles: self.collectibles,
            exits: self.exits,
            ceiling_gap: self.ceiling_gap,
            floor_gap: self.floor_gap,
        }
    }
}
