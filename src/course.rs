//! Course data: terrain grid, holes and their play order
//!
//! The editor paints tiles and places tees/cups; the simulation only reads
//! from here.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CLUB_NAME, GRID_HEIGHT, GRID_WIDTH};
use crate::error::CourseError;
use crate::sim::TerrainKind;

/// Integer cell coordinate (may lie outside the grid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A single painted tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TerrainKind,
    /// Elevation in pixels (visual only for the shot model)
    #[serde(default)]
    pub height: f32,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            kind: TerrainKind::Grass,
            height: 0.0,
        }
    }
}

/// Row-major tile storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Default for TerrainGrid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

impl TerrainGrid {
    /// Grid of plain grass tiles
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, cell: GridCoord) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.width || cell.y >= self.height {
            return None;
        }
        Some((cell.y * self.width + cell.x) as usize)
    }

    pub fn contains(&self, cell: GridCoord) -> bool {
        self.index(cell).is_some()
    }

    pub fn tile(&self, cell: GridCoord) -> Option<&Tile> {
        self.index(cell).and_then(|i| self.tiles.get(i))
    }

    /// Terrain under a cell; anything off the grid is `Out`
    pub fn terrain_at(&self, cell: GridCoord) -> TerrainKind {
        self.tile(cell).map(|t| t.kind).unwrap_or(TerrainKind::Out)
    }

    /// Tile elevation, zero off the grid
    pub fn height_at(&self, cell: GridCoord) -> f32 {
        self.tile(cell).map(|t| t.height).unwrap_or(0.0)
    }

    /// Paint one cell. Returns false when the cell is off the grid.
    pub fn set_terrain(&mut self, cell: GridCoord, kind: TerrainKind) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.tiles[i].kind = kind;
                true
            }
            None => false,
        }
    }

    /// Paint an inclusive rectangle, clipped to the grid
    pub fn fill_rect(&mut self, min: GridCoord, max: GridCoord, kind: TerrainKind) {
        for y in min.y.min(max.y)..=min.y.max(max.y) {
            for x in min.x.min(max.x)..=min.x.max(max.x) {
                self.set_terrain(GridCoord::new(x, y), kind);
            }
        }
    }

    pub fn set_height(&mut self, cell: GridCoord, height: f32) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.tiles[i].height = height;
                true
            }
            None => false,
        }
    }
}

/// One hole; playable once both tee and cup are placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    pub number: u32,
    pub tee: Option<GridCoord>,
    pub cup: Option<GridCoord>,
}

impl Hole {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            tee: None,
            cup: None,
        }
    }

    pub fn with_tee(mut self, tee: GridCoord) -> Self {
        self.tee = Some(tee);
        self
    }

    pub fn with_cup(mut self, cup: GridCoord) -> Self {
        self.cup = Some(cup);
        self
    }

    /// Tee and cup, or the configuration error that blocks play
    pub fn endpoints(&self) -> Result<(GridCoord, GridCoord), CourseError> {
        let tee = self.tee.ok_or(CourseError::MissingTee { hole: self.number })?;
        let cup = self.cup.ok_or(CourseError::MissingCup { hole: self.number })?;
        Ok((tee, cup))
    }

    pub fn is_playable(&self) -> bool {
        self.endpoints().is_ok()
    }
}

/// A club's course: terrain plus holes in play order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub club_name: String,
    pub terrain: TerrainGrid,
    pub holes: Vec<Hole>,
}

impl Default for Course {
    fn default() -> Self {
        Self::new(DEFAULT_CLUB_NAME, TerrainGrid::default())
    }
}

impl Course {
    pub fn new(club_name: impl Into<String>, terrain: TerrainGrid) -> Self {
        Self {
            club_name: club_name.into(),
            terrain,
            holes: Vec::new(),
        }
    }

    /// Number the next hole would get
    pub fn next_hole_number(&self) -> u32 {
        self.holes.len() as u32 + 1
    }

    /// Tee and cup of `hole`, both required to sit on painted terrain
    pub fn playable_endpoints(
        &self,
        hole: &Hole,
    ) -> Result<(GridCoord, GridCoord), CourseError> {
        let (tee, cup) = hole.endpoints()?;
        if self.terrain.terrain_at(tee) == TerrainKind::Out {
            return Err(CourseError::TeeOffGrid { hole: hole.number });
        }
        if self.terrain.terrain_at(cup) == TerrainKind::Out {
            return Err(CourseError::CupOffGrid { hole: hole.number });
        }
        Ok((tee, cup))
    }

    /// Append a finished hole. Refuses holes without a tee or cup, or with
    /// either off the course.
    pub fn finalize_hole(&mut self, hole: Hole) -> Result<(), CourseError> {
        if let Err(err) = self.playable_endpoints(&hole) {
            log::warn!("Refusing to finalize hole {}: {}", hole.number, err);
            return Err(err);
        }
        log::info!("Hole {} finalized", hole.number);
        self.holes.push(hole);
        Ok(())
    }

    /// Three-hole practice course used by the demo runner
    pub fn practice() -> Self {
        let mut terrain = TerrainGrid::default();
        let c = GridCoord::new;

        // Hole 1: straight down the left diagonal
        terrain.fill_rect(c(29, 31), c(31, 33), TerrainKind::Fairway);
        terrain.fill_rect(c(28, 34), c(32, 38), TerrainKind::Green);
        // Hole 2: guarded by a bunker and a pond
        terrain.fill_rect(c(41, 29), c(43, 31), TerrainKind::Fairway);
        terrain.fill_rect(c(44, 28), c(48, 32), TerrainKind::Green);
        terrain.fill_rect(c(43, 33), c(45, 34), TerrainKind::Sand);
        terrain.fill_rect(c(36, 36), c(39, 39), TerrainKind::Water);
        // Hole 3: through the rough
        terrain.fill_rect(c(18, 48), c(28, 60), TerrainKind::Rough);
        terrain.fill_rect(c(23, 53), c(28, 58), TerrainKind::Green);

        let holes = [(c(30, 30), c(30, 36)), (c(40, 30), c(46, 30)), (c(20, 50), c(26, 56))];
        let mut course = Self::new("Practice Links", terrain);
        for (tee, cup) in holes {
            course.terrain.set_terrain(tee, TerrainKind::Tee);
            let hole = Hole::new(course.next_hole_number()).with_tee(tee).with_cup(cup);
            course.holes.push(hole);
        }
        course
    }

    /// Checks required before entering play mode; yields the first tee and cup
    pub fn validate_for_play(&self) -> Result<(GridCoord, GridCoord), CourseError> {
        let first = self.holes.first().ok_or(CourseError::NoHoles)?;
        self.playable_endpoints(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_outside_grid_is_out() {
        let grid = TerrainGrid::new(4, 4);
        assert_eq!(grid.terrain_at(GridCoord::new(0, 0)), TerrainKind::Grass);
        assert_eq!(grid.terrain_at(GridCoord::new(-1, 0)), TerrainKind::Out);
        assert_eq!(grid.terrain_at(GridCoord::new(0, 4)), TerrainKind::Out);
        assert_eq!(grid.terrain_at(GridCoord::new(400, -7)), TerrainKind::Out);
    }

    #[test]
    fn test_fill_rect_clips_to_grid() {
        let mut grid = TerrainGrid::new(4, 4);
        grid.fill_rect(GridCoord::new(2, 2), GridCoord::new(9, 9), TerrainKind::Sand);

        assert_eq!(grid.terrain_at(GridCoord::new(3, 3)), TerrainKind::Sand);
        assert_eq!(grid.terrain_at(GridCoord::new(1, 1)), TerrainKind::Grass);
        assert!(!grid.set_terrain(GridCoord::new(9, 9), TerrainKind::Water));
    }

    #[test]
    fn test_finalize_hole_requires_tee_and_cup() {
        let mut course = Course::default();

        let err = course.finalize_hole(Hole::new(1)).unwrap_err();
        assert_eq!(err, CourseError::MissingTee { hole: 1 });
        assert_eq!(err.finalize_message(), "Cannot finish: Missing Tee!");

        let err = course
            .finalize_hole(Hole::new(1).with_tee(GridCoord::new(1, 1)))
            .unwrap_err();
        assert_eq!(err, CourseError::MissingCup { hole: 1 });
        assert!(course.holes.is_empty());

        let hole = Hole::new(1)
            .with_tee(GridCoord::new(1, 1))
            .with_cup(GridCoord::new(5, 5));
        assert!(course.finalize_hole(hole).is_ok());
        assert_eq!(course.next_hole_number(), 2);
    }

    #[test]
    fn test_practice_course_is_playable() {
        let course = Course::practice();
        assert_eq!(course.holes.len(), 3);
        assert!(course.validate_for_play().is_ok());
        for (i, hole) in course.holes.iter().enumerate() {
            assert_eq!(hole.number, i as u32 + 1);
            let (tee, cup) = hole.endpoints().unwrap();
            assert_eq!(course.terrain.terrain_at(tee), TerrainKind::Tee);
            assert_eq!(course.terrain.terrain_at(cup), TerrainKind::Green);
        }
    }

    #[test]
    fn test_off_grid_endpoints_are_refused() {
        let mut course = Course::new("Tiny", TerrainGrid::new(10, 10));
        let hole = Hole::new(1)
            .with_tee(GridCoord::new(-5, -5))
            .with_cup(GridCoord::new(5, 5));
        assert_eq!(
            course.finalize_hole(hole.clone()),
            Err(CourseError::TeeOffGrid { hole: 1 })
        );

        course.holes.push(hole);
        assert_eq!(
            course.validate_for_play(),
            Err(CourseError::TeeOffGrid { hole: 1 })
        );

        course.holes[0].tee = Some(GridCoord::new(1, 1));
        course.holes[0].cup = Some(GridCoord::new(10, 3));
        assert_eq!(
            course.validate_for_play(),
            Err(CourseError::CupOffGrid { hole: 1 })
        );

        // Out tiles painted inside the grid count as off the course too
        course.holes[0].cup = Some(GridCoord::new(3, 3));
        course
            .terrain
            .set_terrain(GridCoord::new(1, 1), TerrainKind::Out);
        assert_eq!(
            course.validate_for_play(),
            Err(CourseError::TeeOffGrid { hole: 1 })
        );
    }

    #[test]
    fn test_empty_grid_cannot_be_played() {
        let mut course = Course::new("Nowhere", TerrainGrid::new(0, 0));
        course.holes.push(
            Hole::new(1)
                .with_tee(GridCoord::new(0, 0))
                .with_cup(GridCoord::new(0, 0)),
        );
        assert_eq!(
            course.validate_for_play(),
            Err(CourseError::TeeOffGrid { hole: 1 })
        );
    }

    #[test]
    fn test_validate_for_play() {
        let mut course = Course::default();
        assert_eq!(course.validate_for_play(), Err(CourseError::NoHoles));

        course.holes.push(Hole::new(1).with_cup(GridCoord::new(3, 3)));
        assert_eq!(
            course.validate_for_play(),
            Err(CourseError::MissingTee { hole: 1 })
        );
    }
}
