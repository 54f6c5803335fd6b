//! Iso Golf entry point
//!
//! Native demo: plays the practice course with the seeded demo golfer at a
//! fixed frame delta and prints the event stream and final scorecard.
//!
//! Flags: `--seed N`, `--scatter PX`, `--settings PATH`, `--max-frames N`

use iso_golf::consts::FRAME_MS;
use iso_golf::sim::{AutoGolfer, GameEvent, ShotController};
use iso_golf::{Course, Scorecard, Settings};

struct Args {
    seed: u64,
    scatter: f32,
    settings: Option<String>,
    max_frames: usize,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            seed: 1,
            scatter: 3.0,
            settings: None,
            max_frames: 20_000,
        }
    }
}

fn parse_args(argv: impl IntoIterator<Item = String>) -> Args {
    let mut args = Args::default();
    let mut it = argv.into_iter().peekable();
    while let Some(flag) = it.next() {
        if !matches!(
            flag.as_str(),
            "--seed" | "--scatter" | "--settings" | "--max-frames"
        ) {
            log::warn!("Ignoring argument {}", flag);
            continue;
        }
        let Some(value) = it.next_if(|v| !v.starts_with("--")) else {
            log::warn!("Missing value for {}", flag);
            continue;
        };
        match flag.as_str() {
            "--seed" => args.seed = value.parse().unwrap_or(args.seed),
            "--scatter" => args.scatter = value.parse().unwrap_or(args.scatter),
            "--settings" => args.settings = Some(value),
            _ => args.max_frames = value.parse().unwrap_or(args.max_frames),
        }
    }
    args
}

fn main() {
    env_logger::init();
    log::info!("Iso Golf (native demo) starting...");

    let args = parse_args(std::env::args().skip(1));
    let settings = match args.settings.as_deref() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let mut controller = ShotController::new(settings);
    let mut golfer = AutoGolfer::new(args.seed).with_scatter(args.scatter);

    if !controller.enter_play_mode(Course::practice()) {
        for event in controller.drain_events() {
            println!("{:?}", event);
        }
        return;
    }

    for frame in 0..args.max_frames {
        golfer.play(&mut controller);
        controller.update(FRAME_MS);

        for event in controller.drain_events() {
            match event {
                GameEvent::Notify { message, tone } => {
                    println!("[{:>6}ms] {} ({})", frame as f32 * FRAME_MS, message, tone.color())
                }
                GameEvent::Hud(hud) => println!(
                    "           Hole {}/{} | Strokes: {}",
                    hud.hole_number, hud.total_holes, hud.strokes_this_hole
                ),
                GameEvent::CourseComplete(summary) => {
                    println!("\n{}", Scorecard::from_summary(&summary).render());
                }
                other => log::debug!("{:?}", other),
            }
        }

        if !controller.is_playing() {
            return;
        }
    }

    log::warn!("Stopped after {} frames without finishing", args.max_frames);
    controller.exit_play_mode();
}
