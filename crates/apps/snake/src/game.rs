use rand::Rng;

pub(crate) const TILE_COUNT: i32 = 20;
pub(crate) const TILE_PX: i32 = 15;
const START: Tile = Tile { x: 10, y: 10 };
const FIRST_FOOD: Tile = Tile { x: 5, y: 5 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tile {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub(crate) fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// No direction chosen yet; the snake waits.
    Waiting,
    Moved,
    Ate,
    HitWall,
    HitSelf,
}

impl StepOutcome {
    pub(crate) fn is_game_over(self) -> bool {
        matches!(self, Self::HitWall | Self::HitSelf)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SnakeGame {
    body: Vec<Tile>,
    food: Tile,
    direction: Option<Direction>,
    score: u32,
    over: bool,
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self {
            body: vec![START],
            food: FIRST_FOOD,
            direction: None,
            score: 0,
            over: false,
        }
    }
}

impl SnakeGame {
    pub(crate) fn body(&self) -> &[Tile] {
        &self.body
    }

    pub(crate) fn food(&self) -> Tile {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn is_over(&self) -> bool {
        self.over
    }

    /// Turns unless the request reverses straight into the neck.
    pub(crate) fn turn(&mut self, next: Direction) {
        if self.direction.is_some_and(|current| current.opposite() == next) {
            return;
        }
        self.direction = Some(next);
    }

    pub(crate) fn step(&mut self, rng: &mut impl Rng) -> StepOutcome {
        if self.over {
            return StepOutcome::HitWall;
        }
        let Some(direction) = self.direction else {
            return StepOutcome::Waiting;
        };
        let (dx, dy) = direction.delta();
        let head = self.body[0];
        let next = Tile {
            x: head.x + dx,
            y: head.y + dy,
        };

        if !(0..TILE_COUNT).contains(&next.x) || !(0..TILE_COUNT).contains(&next.y) {
            self.over = true;
            return StepOutcome::HitWall;
        }
        if self.body.contains(&next) {
            self.over = true;
            return StepOutcome::HitSelf;
        }

        self.body.insert(0, next);
        if next == self.food {
            self.score += 1;
            self.food = self.free_tile(rng);
            StepOutcome::Ate
        } else {
            self.body.pop();
            StepOutcome::Moved
        }
    }

    fn free_tile(&self, rng: &mut impl Rng) -> Tile {
        loop {
            let tile = Tile {
                x: rng.gen_range(0..TILE_COUNT),
                y: rng.gen_range(0..TILE_COUNT),
            };
            if !self.body.contains(&tile) {
                return tile;
            }
        }
    }
}
