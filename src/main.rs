//! Hen Hop entry point
//!
//! The native build has no window: it plays a few headless runs with the
//! autopilot on a simulated clock and logs the outcome. The web build is
//! driven from JavaScript through `hen_hop::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use hen_hop::persistence::JsonFileStore;
    use hen_hop::sim::autopilot::should_jump;
    use hen_hop::{Screen, Session, Tuning};

    env_logger::init();
    log::info!("Hen Hop (native) starting...");

    let tuning = match std::env::var_os("HEN_HOP_TUNING") {
        Some(path) => Tuning::load_from(&PathBuf::from(path)),
        None => Tuning::default(),
    };
    let scores_path = std::env::var_os("HEN_HOP_SCORES")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("hen_hop_scores.json"));
    let runs: u32 = std::env::var("HEN_HOP_RUNS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);

    let store = JsonFileStore::new(scores_path);
    log::info!("Scores file: {}", store.path().display());
    let mut session = Session::new(tuning, store);
    let interval = session.tick_interval_ms();
    println!("Best score so far: {}", session.best_score());

    // One minute of play per run at most
    let max_ticks = 60_000 / interval;
    let mut now = 0u64;
    for run in 1..=runs {
        session.start_run(now);
        for _ in 0..max_ticks {
            now += interval;
            if should_jump(session.state(), session.tuning(), now) {
                session.trigger(now);
            }
            session.pump(now);
            if session.screen() != Screen::Playing {
                break;
            }
        }

        if session.screen() == Screen::Playing {
            // Only a crash ends a run, so a survivor never reaches results
            println!("Run {}: still alive after a minute with {} points", run, session.score());
            break;
        }
        println!(
            "Run {}: crashed after {} ticks with {} points",
            run,
            session.state().time_ticks,
            session.last_score()
        );
        session.go_to_menu();
    }

    println!("Best score: {}", session.best_score());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is hen_hop::web::wasm_main, this is just to satisfy the compiler
}
