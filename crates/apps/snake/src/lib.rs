//! Snake easter-egg mini-app.
//!
//! The game advances on [`AppInput::Tick`] from a runtime-owned repeating timer. The host
//! owns that timer's lifetime: it starts it on "start", and stops it on collision and on
//! unmount.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod game;

use desktop_app_contract::{AppCommand, AppContext, AppHost, AppInput};
use game::{Direction, SnakeGame, StepOutcome, TILE_COUNT, TILE_PX};
use rand::{rngs::SmallRng, SeedableRng};

const EASTER_EGG_REMARK: &str = "You found a secret! There are easter eggs hidden all over this desktop.";

/// Snake window host.
#[derive(Debug)]
pub struct SnakeApp {
    game: SnakeGame,
    rng: SmallRng,
    tick_ms: u32,
    timer_running: bool,
}

impl SnakeApp {
    /// Creates an idle board ticking every `tick_ms` once started; `seed` drives food placement.
    pub fn new(tick_ms: u32, seed: u64) -> Self {
        Self {
            game: SnakeGame::default(),
            rng: SmallRng::seed_from_u64(seed),
            tick_ms,
            timer_running: false,
        }
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.game.score()
    }

    /// Whether the repeating timer is expected to be running.
    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    fn start(&mut self, ctx: &mut AppContext) {
        self.game = SnakeGame::default();
        if !self.timer_running {
            ctx.send(AppCommand::StartTimer {
                interval_ms: self.tick_ms,
            });
            self.timer_running = true;
        }
        ctx.speak(EASTER_EGG_REMARK, Some("sounds/companion/easter_egg.mp3"));
    }

    fn stop_timer(&mut self, ctx: &mut AppContext) {
        if self.timer_running {
            ctx.send(AppCommand::StopTimer);
            self.timer_running = false;
        }
    }

    fn tick(&mut self, ctx: &mut AppContext) {
        if !self.timer_running {
            return;
        }
        let outcome = self.game.step(&mut self.rng);
        if outcome.is_game_over() {
            self.stop_timer(ctx);
            let text = match outcome {
                StepOutcome::HitSelf => format!("Oops! You ate yourself. Score: {}", self.score()),
                _ => format!("Game Over! You hit a wall. Your score: {}", self.score()),
            };
            ctx.speak(text, None);
        }
    }
}

impl AppHost for SnakeApp {
    fn mount(&mut self, _ctx: &mut AppContext) {}

    fn unmount(&mut self, ctx: &mut AppContext) {
        self.stop_timer(ctx);
    }

    fn handle_input(&mut self, input: AppInput, ctx: &mut AppContext) {
        match input {
            AppInput::Button(button) if button == "start" => self.start(ctx),
            AppInput::Key(key) => {
                if let Some(direction) = Direction::from_key(&key) {
                    self.game.turn(direction);
                }
            }
            AppInput::Tick => self.tick(ctx),
            _ => {}
        }
    }

    fn render(&self) -> String {
        let side = TILE_COUNT * TILE_PX;
        let cell = TILE_PX - 1;
        let mut html = format!(
            r#"<div class="snake-game"><div class="snake-board" style="position:relative;width:{side}px;height:{side}px;background:#111">"#
        );
        for tile in self.game.body() {
            html.push_str(&format!(
                r#"<div class="snake-seg" style="position:absolute;left:{}px;top:{}px;width:{cell}px;height:{cell}px;background:#00ff00"></div>"#,
                tile.x * TILE_PX,
                tile.y * TILE_PX
            ));
        }
        let food = self.game.food();
        html.push_str(&format!(
            r#"<div class="snake-food" style="position:absolute;left:{}px;top:{}px;width:{cell}px;height:{cell}px;background:#ff0000"></div></div>"#,
            food.x * TILE_PX,
            food.y * TILE_PX
        ));
        let state = if self.game.is_over() { " | Game Over" } else { "" };
        html.push_str(&format!(
            r#"<div class="snake-info"><span>Score: {}{state}</span><button class="xp-btn" data-app-button="start">Start Game</button></div><p class="snake-hint">Use Arrow Keys to move</p></div>"#,
            self.score()
        ));
        html
    }
}
