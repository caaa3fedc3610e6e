// world.rs - Game of Life world state and the generation transition

use rand::Rng;

use crate::grid::{Dimensions, NEIGHBOURS};
use crate::patterns::Pattern;
use crate::surface::RenderSurface;

/// Bounded Game of Life grid. Each generation is a fresh buffer that replaces
/// the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    dims: Dimensions,
    cells: Vec<bool>,
    generation: u64,
}

/// Next state of one cell. Rules are checked in order; the first match wins.
pub fn next_state(alive: bool, pop: usize) -> bool {
    match pop {
        p if p < 2 => false,              // Underpopulation
        2 | 3 if alive => true,           // Survival
        p if p > 3 => false,              // Overpopulation
        3 => true,                        // Birth
        _ => false,                       // Stays dead
    }
}

impl World {
    /// All-dead grid with no seeding.
    pub fn empty(width: usize, height: usize) -> Self {
        let dims = Dimensions::new(width, height);
        Self { dims, cells: vec![false; dims.len()], generation: 0 }
    }

    /// Grid seeded with `max_initial_live_cells` random placements.
    pub fn new(width: usize, height: usize, max_initial_live_cells: usize) -> Self {
        Self::with_rng(width, height, max_initial_live_cells, &mut rand::thread_rng())
    }

    /// Placements are drawn with replacement, so duplicates simply land on a
    /// cell that is already alive.
    pub fn with_rng<R: Rng>(
        width: usize,
        height: usize,
        max_initial_live_cells: usize,
        rng: &mut R,
    ) -> Self {
        let mut world = Self::empty(width, height);
        if world.dims.is_empty() {
            return world;
        }
        for _ in 0..max_initial_live_cells {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            world.set_alive(x, y, true);
        }
        world
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of transitions applied since creation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.dims.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Off-grid coordinates are ignored.
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) {
        if let Some(i) = self.dims.index(x, y) {
            self.cells[i] = alive;
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| self.dims.point(i))
    }

    /// Live cells in the Moore neighbourhood of (x, y). Neighbours beyond
    /// the edge are absent.
    pub fn neighbour_count(&self, x: usize, y: usize) -> usize {
        NEIGHBOURS
            .iter()
            .filter_map(|&(dx, dy)| self.dims.offset(x, y, dx, dy))
            .filter(|&(nx, ny)| self.is_alive(nx, ny))
            .count()
    }

    /// Advance one generation.
    pub fn update(&mut self) {
        let next: Vec<bool> = (0..self.dims.len())
            .map(|i| {
                let (x, y) = self.dims.point(i);
                next_state(self.cells[i], self.neighbour_count(x, y))
            })
            .collect();
        self.cells = next;
        self.generation += 1;
    }

    /// Places `pattern` with its top-left corner at (x, y); cells falling
    /// outside the grid are clipped.
    pub fn stamp(&mut self, pattern: &Pattern, x: usize, y: usize) {
        for &(row, col) in pattern.cells {
            self.set_alive(x + col, y + row, true);
        }
    }

    /// Sets one pixel per live cell using the surface's current fill colour.
    pub fn paint<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for (x, y) in self.live_cells() {
            surface.set_pixel(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{self, GLIDER};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn world_with(width: usize, height: usize, live: &[(usize, usize)]) -> World {
        let mut world = World::empty(width, height);
        for &(x, y) in live {
            world.set_alive(x, y, true);
        }
        world
    }

    #[test]
    fn rule_order() {
        for pop in 0..=8 {
            let expected_alive = matches!(pop, 2 | 3);
            let expected_dead = pop == 3;
            assert_eq!(next_state(true, pop), expected_alive, "alive with {pop}");
            assert_eq!(next_state(false, pop), expected_dead, "dead with {pop}");
        }
    }

    #[test]
    fn lonely_cells_die() {
        // Two isolated cells and one pair: all have 0 or 1 neighbours.
        let mut world = world_with(10, 10, &[(1, 1), (8, 8), (4, 5), (5, 5)]);
        world.update();
        assert_eq!(world.population(), 0);
    }

    #[test]
    fn survivors_with_two_or_three_neighbours() {
        // Block: every cell has exactly 3 live neighbours.
        let block = [(2, 2), (3, 2), (2, 3), (3, 3)];
        let mut world = world_with(6, 6, &block);
        world.update();
        for &(x, y) in &block {
            assert!(world.is_alive(x, y));
        }
        assert_eq!(world.population(), 4);

        // Centre of a horizontal line of three has 2 neighbours.
        let mut line = world_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        assert_eq!(line.neighbour_count(2, 2), 2);
        line.update();
        assert!(line.is_alive(2, 2));
    }

    #[test]
    fn crowded_cells_die() {
        // Centre of a plus shape has 4 neighbours.
        let mut world = world_with(5, 5, &[(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)]);
        assert_eq!(world.neighbour_count(2, 2), 4);
        world.update();
        assert!(!world.is_alive(2, 2));

        let mut dead_centre = world_with(5, 5, &[(1, 2), (3, 2), (2, 1), (2, 3)]);
        assert_eq!(dead_centre.neighbour_count(2, 2), 4);
        dead_centre.update();
        assert!(!dead_centre.is_alive(2, 2));
    }

    #[test]
    fn dead_cell_with_three_neighbours_is_born() {
        let mut world = world_with(5, 5, &[(1, 1), (3, 1), (2, 3)]);
        assert_eq!(world.neighbour_count(2, 2), 3);
        world.update();
        assert!(world.is_alive(2, 2));
    }

    #[test]
    fn empty_world_stays_empty() {
        for (w, h) in [(1, 1), (3, 7), (64, 48)] {
            let mut world = World::empty(w, h);
            world.update();
            assert_eq!(world.population(), 0);
            assert_eq!((world.width(), world.height()), (w, h));
            assert_eq!(world.generation(), 1);
        }
    }

    #[test]
    fn update_preserves_dimensions() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut world = World::with_rng(33, 17, 200, &mut rng);
        for _ in 0..5 {
            world.update();
            assert_eq!(world.dimensions(), Dimensions::new(33, 17));
        }
    }

    #[test]
    fn glider_translates_after_four_generations() {
        let mut world = World::empty(20, 20);
        world.stamp(&GLIDER, 5, 5);
        let before: Vec<_> = world.live_cells().collect();
        for _ in 0..4 {
            world.update();
        }
        let after: Vec<_> = world.live_cells().collect();
        let shifted: Vec<_> = before.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        assert_eq!(after, shifted);
    }

    #[test]
    fn corner_sees_no_wrapped_neighbours() {
        let mut world = World::empty(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                world.set_alive(x, y, true);
            }
        }
        assert_eq!(world.neighbour_count(0, 0), 3);
        assert_eq!(world.neighbour_count(3, 3), 3);
        assert_eq!(world.neighbour_count(1, 0), 5);

        // Opposite corners must not see each other through a wrap.
        let mut corners = world_with(4, 4, &[(0, 0), (3, 0), (0, 3), (3, 3)]);
        assert_eq!(corners.neighbour_count(0, 0), 0);
        corners.update();
        assert_eq!(corners.population(), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let Some(blinker) = patterns::find("Blinker") else {
            panic!("blinker pattern missing");
        };
        let mut world = World::empty(7, 7);
        world.stamp(blinker, 2, 3);
        let start = world.clone();
        world.update();
        assert!(world.is_alive(3, 2) && world.is_alive(3, 3) && world.is_alive(3, 4));
        world.update();
        assert_eq!(world.live_cells().collect::<Vec<_>>(), start.live_cells().collect::<Vec<_>>());
    }

    #[test]
    fn random_seeding_is_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        let world = World::with_rng(10, 10, 30, &mut rng);
        assert!(world.population() <= 30);
        assert!(world.population() > 0);

        let again = World::with_rng(10, 10, 30, &mut StdRng::seed_from_u64(42));
        assert_eq!(world, again);
    }

    #[test]
    fn stamp_clips_at_edges() {
        let Some(blinker) = patterns::find("Blinker") else {
            panic!("blinker pattern missing");
        };
        let mut world = World::empty(3, 3);
        world.stamp(blinker, 2, 2);
        assert_eq!(world.live_cells().collect::<Vec<_>>(), vec![(2, 2)]);
        world.set_alive(10, 10, true);
        assert_eq!(world.population(), 1);
    }
}
