//! Session state machine
//!
//! ```text
//! Start --start_run--> Playing --crash--> Results --start_run--> Playing
//!                                           |
//!                                           +--go_to_menu--> Start
//! ```
//!
//! The session owns the simulation context, the best score, and the tick
//! driver. The driver runs only while `Playing` and is stopped in the same
//! call that leaves it.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::best_score::BestScore;
use crate::driver::TickDriver;
use crate::persistence::KeyValueStore;
use crate::settings::Tuning;
use crate::sim::kinematics::{JumpOutcome, land_due, trigger_jump};
use crate::sim::rng::{RandomSource, pcg_from};
use crate::sim::state::{Collectible, GameState, JumpPhase, Obstacle};
use crate::sim::{Spawner, TickReport, tick};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Start,
    Playing,
    Results,
}

/// Read-only snapshot for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub screen: Screen,
    pub score: u32,
    pub best_score: u32,
    pub last_score: u32,
    /// Results screen celebrates a run that matched or beat the record
    pub trophy: bool,
    pub character_x: f32,
    pub character_offset: f32,
    pub character_size: f32,
    pub jump_phase: JumpPhase,
    pub obstacle_size: f32,
    pub obstacles: Vec<Obstacle>,
    pub collectible_size: f32,
    pub collectibles: Vec<Collectible>,
    /// Left edge of the first background tile; the second follows at +tile_width
    pub scroll_offset: f32,
    pub tile_width: f32,
}

/// One player's game session
pub struct Session<S: KeyValueStore, R: RandomSource = Pcg32> {
    tuning: Tuning,
    spawner: Spawner,
    state: GameState,
    screen: Screen,
    best: BestScore,
    last_score: u32,
    driver: TickDriver,
    store: S,
    rng: R,
}

impl<S: KeyValueStore> Session<S, Pcg32> {
    /// Session with a PCG spawner stream (seeded from tuning, or OS entropy)
    pub fn new(tuning: Tuning, store: S) -> Self {
        let rng = pcg_from(tuning.seed);
        Self::with_rng(tuning, store, rng)
    }
}

impl<S: KeyValueStore, R: RandomSource> Session<S, R> {
    /// Session on the start screen with the stored best score loaded
    ///
    /// A tuning that fails [`Tuning::validate`] is replaced by the defaults.
    pub fn with_rng(tuning: Tuning, store: S, rng: R) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning ({}), using defaults", e);
                Tuning::default()
            }
        };
        let best = BestScore::load(&store);
        Self {
            spawner: Spawner::from_tuning(&tuning),
            state: GameState::new(&tuning),
            screen: Screen::Start,
            best,
            last_score: 0,
            driver: TickDriver::new(tuning.tick_interval_ms, tuning.max_ticks_per_pump),
            tuning,
            store,
            rng,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best.value
    }

    pub fn last_score(&self) -> u32 {
        self.last_score
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_ticking(&self) -> bool {
        self.driver.is_running()
    }

    /// Spacing of the tick grid in ms
    pub fn tick_interval_ms(&self) -> u64 {
        self.driver.interval_ms()
    }

    /// Begin a fresh run (from the start screen or as a replay)
    ///
    /// Returns false if a run is already in progress.
    pub fn start_run(&mut self, now_ms: u64) -> bool {
        if self.screen == Screen::Playing {
            log::debug!("start_run ignored: already playing");
            return false;
        }
        self.state = GameState::new(&self.tuning);
        self.screen = Screen::Playing;
        self.driver.start(now_ms);
        log::info!("Run started (best {})", self.best.value);
        true
    }

    /// Leave the results screen for the start screen
    pub fn go_to_menu(&mut self) -> bool {
        if self.screen != Screen::Results {
            return false;
        }
        self.screen = Screen::Start;
        true
    }

    /// Player input; only meaningful while playing
    pub fn trigger(&mut self, now_ms: u64) -> JumpOutcome {
        if self.screen != Screen::Playing {
            return JumpOutcome::Ignored;
        }
        // A landing that came due since the last tick applies first
        land_due(&mut self.state.character, now_ms);
        trigger_jump(&mut self.state.character, &self.tuning.jump, now_ms)
    }

    /// Run one tick at `now_ms`
    ///
    /// Landings due by then are applied before the tick, so the collision
    /// passes read a single character height. Returns `None` unless playing.
    pub fn step(&mut self, now_ms: u64) -> Option<TickReport> {
        if self.screen != Screen::Playing {
            return None;
        }
        land_due(&mut self.state.character, now_ms);
        let report = tick(&mut self.state, &self.spawner, &mut self.rng);
        if let Some(obstacle) = report.crashed_into {
            log::debug!("hit obstacle {} on tick {}", obstacle, self.state.time_ticks);
            self.finish_run();
        }
        Some(report)
    }

    /// Run every tick the driver has due at `now_ms`
    ///
    /// Returns the number of ticks run.
    pub fn pump(&mut self, now_ms: u64) -> u32 {
        let mut ran = 0;
        while let Some(at) = self.driver.poll(now_ms) {
            self.step(at);
            ran += 1;
        }
        ran
    }

    /// Playing -> Results: stop ticking, freeze the score, update the record
    fn finish_run(&mut self) {
        self.driver.stop();
        self.last_score = self.state.score;
        self.screen = Screen::Results;

        if self.best.record(self.last_score) {
            log::info!("Run over: {} (new best)", self.last_score);
            self.best.save(&mut self.store);
        } else {
            log::info!("Run over: {} (best {})", self.last_score, self.best.value);
        }
    }

    /// Snapshot for rendering
    pub fn frame(&self) -> Frame {
        let geometry = &self.state.geometry;
        Frame {
            screen: self.screen,
            score: self.state.score,
            best_score: self.best.value,
            last_score: self.last_score,
            trophy: self.screen == Screen::Results && self.last_score >= self.best.value,
            character_x: geometry.character_x,
            character_offset: self.state.character.offset,
            character_size: geometry.character_size,
            jump_phase: self.state.character.phase,
            obstacle_size: geometry.obstacle_size,
            obstacles: self.state.world.obstacles.clone(),
            collectible_size: geometry.collectible_size,
            collectibles: self.state.world.collectibles.clone(),
            scroll_offset: self.state.world.scroll_offset,
            tile_width: geometry.tile_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::rng::ScriptedSource;
    use crate::sim::state::{CollectibleVariant, Lane, ObstacleVariant};

    const TICK: u64 = 16;

    fn quiet_session(best: Option<u32>) -> Session<MemoryStore, ScriptedSource> {
        let store = match best {
            Some(b) => MemoryStore::with_entry(BestScore::STORAGE_KEY, &b.to_string()),
            None => MemoryStore::new(),
        };
        Session::with_rng(Tuning::default().without_spawns(), store, ScriptedSource::quiet())
    }

    fn stored_best(session: &Session<MemoryStore, ScriptedSource>) -> Option<String> {
        session.store().get(BestScore::STORAGE_KEY).unwrap()
    }

    /// Put `n` collectibles right on the character
    fn feed(session: &mut Session<MemoryStore, ScriptedSource>, n: usize) {
        for _ in 0..n {
            session
                .state_mut()
                .world
                .place_collectible(129.0, 45.0, Lane::Low, CollectibleVariant::Grain);
        }
    }

    /// Obstacle whose left edge passes the character's right edge on tick `k`
    fn obstacle_hitting_on(session: &mut Session<MemoryStore, ScriptedSource>, k: u32) {
        let x = 192.0 + 5.0 * k as f32 - 1.0;
        session
            .state_mut()
            .world
            .place_obstacle(x, ObstacleVariant::Rock);
    }

    #[test]
    fn test_starts_on_start_screen() {
        let session = quiet_session(Some(3));
        assert_eq!(session.screen(), Screen::Start);
        assert_eq!(session.best_score(), 3);
        assert!(!session.is_ticking());
    }

    #[test]
    fn test_input_ignored_outside_play() {
        let mut session = quiet_session(None);
        assert_eq!(session.trigger(0), JumpOutcome::Ignored);
        assert!(session.step(0).is_none());
        assert!(!session.go_to_menu());
        assert_eq!(session.state().character.offset, 0.0);
    }

    #[test]
    fn test_crash_on_tick_fifty() {
        let mut session = quiet_session(Some(0));
        assert!(session.start_run(0));
        obstacle_hitting_on(&mut session, 50);

        for i in 1..=100u64 {
            let report = session.step(i * TICK);
            if i < 50 {
                assert!(!report.expect("playing").crashed(), "early crash at {}", i);
            } else if i == 50 {
                assert!(report.expect("playing").crashed());
                assert_eq!(session.screen(), Screen::Results);
            } else {
                assert!(report.is_none());
            }
        }
        assert_eq!(session.state().time_ticks, 50);
        assert_eq!(session.last_score(), 0);
        assert_eq!(session.best_score(), 0);
        assert!(!session.is_ticking());
        assert_eq!(stored_best(&session).as_deref(), Some("0"));
    }

    #[test]
    fn test_score_frozen_at_crash() {
        let mut session = quiet_session(None);
        session.start_run(0);
        obstacle_hitting_on(&mut session, 10);
        feed(&mut session, 3);
        session.step(TICK);
        assert_eq!(session.score(), 3);

        for i in 2..=10u64 {
            session.step(i * TICK);
        }
        assert_eq!(session.screen(), Screen::Results);
        assert_eq!(session.last_score(), 3);
        // Collectibles placed after the crash change nothing
        feed(&mut session, 2);
        assert!(session.step(11 * TICK).is_none());
        assert_eq!(session.last_score(), 3);
    }

    #[test]
    fn test_worse_run_keeps_best() {
        let mut session = quiet_session(Some(10));
        session.start_run(0);
        feed(&mut session, 7);
        obstacle_hitting_on(&mut session, 5);
        for i in 1..=5u64 {
            session.step(i * TICK);
        }
        assert_eq!(session.screen(), Screen::Results);
        assert_eq!(session.last_score(), 7);
        assert_eq!(session.best_score(), 10);
        assert_eq!(stored_best(&session).as_deref(), Some("10"));
        assert!(!session.frame().trophy);
    }

    #[test]
    fn test_better_run_persists_best() {
        let mut session = quiet_session(Some(5));
        session.start_run(0);
        feed(&mut session, 8);
        obstacle_hitting_on(&mut session, 5);
        for i in 1..=5u64 {
            session.step(i * TICK);
        }
        assert_eq!(session.last_score(), 8);
        assert_eq!(session.best_score(), 8);
        assert_eq!(stored_best(&session).as_deref(), Some("8"));
        assert!(session.frame().trophy);
    }

    #[test]
    fn test_replay_resets_everything() {
        let mut session = quiet_session(None);
        session.start_run(0);
        feed(&mut session, 2);
        obstacle_hitting_on(&mut session, 40);
        session.step(TICK);
        assert_eq!(session.score(), 2);
        session.trigger(20);
        assert_eq!(session.state_mut().world.place_obstacle(900.0, ObstacleVariant::Box), 1);
        for i in 2..=40u64 {
            session.step(i * TICK);
        }
        assert_eq!(session.screen(), Screen::Results);

        assert!(session.start_run(1_000));
        assert_eq!(session.screen(), Screen::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.last_score(), 2);
        let state = session.state();
        assert!(state.world.obstacles.is_empty());
        assert!(state.world.collectibles.is_empty());
        assert_eq!(state.world.scroll_offset, 0.0);
        assert_eq!(state.character.offset, 0.0);
        assert!(state.character.is_grounded());
        // Id counters restart
        assert_eq!(session.state_mut().world.place_obstacle(900.0, ObstacleVariant::Box), 0);
    }

    #[test]
    fn test_menu_from_results() {
        let mut session = quiet_session(None);
        session.start_run(0);
        assert!(!session.start_run(0));
        obstacle_hitting_on(&mut session, 1);
        session.step(TICK);
        assert!(session.go_to_menu());
        assert_eq!(session.screen(), Screen::Start);
        assert_eq!(session.last_score(), 0);
    }

    #[test]
    fn test_jump_through_session() {
        let mut session = quiet_session(None);
        session.start_run(0);
        assert_eq!(session.trigger(100), JumpOutcome::Single);
        assert_eq!(session.state().character.offset, 130.0);
        assert_eq!(session.trigger(200), JumpOutcome::Double);
        assert_eq!(session.state().character.offset, 200.0);

        // The single jump's landing (520) is stale
        session.step(528);
        assert_eq!(session.state().character.offset, 200.0);
        // Double lands at 700
        session.step(696);
        assert_eq!(session.state().character.offset, 200.0);
        session.step(704);
        assert_eq!(session.state().character.offset, 0.0);
    }

    #[test]
    fn test_trigger_sees_landing_between_ticks() {
        let mut session = quiet_session(None);
        session.start_run(0);
        session.trigger(0);
        // Landed at 420 even though no tick ran since
        assert_eq!(session.trigger(430), JumpOutcome::Single);
    }

    #[test]
    fn test_pump_drives_ticks_until_crash() {
        let mut session = quiet_session(None);
        session.start_run(0);
        obstacle_hitting_on(&mut session, 20);
        assert_eq!(session.pump(15), 0);
        assert_eq!(session.pump(16 * 5), 5);
        // A long stall is capped at 8 ticks per pump
        assert_eq!(session.pump(16 * 100), 8);
        assert_eq!(session.state().time_ticks, 13);
        // Keep pumping; the run ends on tick 20 and the driver stops
        let mut now = 16 * 100;
        while session.screen() == Screen::Playing {
            now += 16;
            session.pump(now);
        }
        assert_eq!(session.state().time_ticks, 20);
        assert!(!session.is_ticking());
        assert_eq!(session.pump(now + 1_000), 0);
    }

    #[test]
    fn test_frame_snapshot() {
        let mut session = quiet_session(Some(4));
        session.start_run(0);
        session
            .state_mut()
            .world
            .place_obstacle(700.0, ObstacleVariant::Box);
        session.step(TICK);
        let frame = session.frame();
        assert_eq!(frame.screen, Screen::Playing);
        assert_eq!(frame.best_score, 4);
        assert_eq!(frame.obstacles.len(), 1);
        assert_eq!(frame.obstacles[0].x, 695.0);
        assert_eq!(frame.scroll_offset, -5.0);
        assert_eq!(frame.character_x, 112.0);
        assert!(!frame.trophy);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"screen\":\"Playing\""));
    }

    #[test]
    fn test_unreadable_store_starts_at_zero() {
        let store = MemoryStore::with_entry(BestScore::STORAGE_KEY, "NaN");
        let session = Session::with_rng(Tuning::default(), store, ScriptedSource::quiet());
        assert_eq!(session.best_score(), 0);
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let tuning = Tuning {
            scroll_speed: 0.0,
            tick_interval_ms: 20,
            ..Tuning::default()
        };
        let session = Session::with_rng(tuning, MemoryStore::new(), ScriptedSource::quiet());
        assert_eq!(session.tuning(), &Tuning::default());
        assert_eq!(session.tick_interval_ms(), 16);
        assert_eq!(session.state().geometry.scroll_speed, 5.0);
    }

    #[test]
    fn test_valid_tuning_is_kept() {
        let tuning = Tuning {
            tick_interval_ms: 20,
            ..Tuning::default().without_spawns()
        };
        let session = Session::with_rng(tuning.clone(), MemoryStore::new(), ScriptedSource::quiet());
        assert_eq!(session.tuning(), &tuning);
        assert_eq!(session.tick_interval_ms(), 20);
    }
}
