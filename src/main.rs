//! Swing Platformer headless runner
//!
//! Runs the simulation without a window: the seeded autoplay pilot supplies
//! input, the render values are logged instead of drawn, and the run walks
//! through the same screen flow a windowed build would.
//!
//! Usage: swing-platformer [--map FILE] [--settings FILE] [--ticks N] [--seed N] [--realtime]

use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use swing_platformer::flow::{FlowEvent, Screen};
use swing_platformer::highscores::HighScores;
use swing_platformer::settings::Settings;
use swing_platformer::sim::{FixedStep, GameEvent, GameState, MapData, Pilot, tick};

/// Built-in level used when no map file is given
const DEMO_LEVEL: &[&str] = &[
    "########################################",
    "#......................................#",
    "#...######..........#######.....####...#",
    "#......................................#",
    "#..............H.......................#",
    "#.....###......H...........H.....###...#",
    "#..............H...........H...........#",
    "#..............H.....####..H...........#",
    "#.........######...........H.....#.....#",
    "#..........................H.....#.....#",
    "#..S.......................H...........#",
    "#########.......########################",
];

struct Args {
    map: Option<PathBuf>,
    settings: Option<PathBuf>,
    ticks: u64,
    seed: u64,
    realtime: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        map: None,
        settings: None,
        ticks: 1800,
        seed: 1,
        realtime: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| iter.next().ok_or_else(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--map" => args.map = Some(PathBuf::from(value("--map")?)),
            "--settings" => args.settings = Some(PathBuf::from(value("--settings")?)),
            "--ticks" => {
                args.ticks = value("--ticks")?
                    .parse()
                    .map_err(|e| format!("bad --ticks: {e}"))?
            }
            "--seed" => {
                args.seed = value("--seed")?
                    .parse()
                    .map_err(|e| format!("bad --seed: {e}"))?
            }
            "--realtime" => args.realtime = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn main() {
    env_logger::init();
    log::info!("Swing Platformer (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("swing-platformer: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;

    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let map = match &args.map {
        Some(path) => MapData::load(path)?,
        None => MapData::from_ascii(DEMO_LEVEL, 32)?,
    };

    let mut high_scores = HighScores::new();
    let mut screen = Screen::MainMenu;

    screen = advance(screen, FlowEvent::NewGame)?;
    let mut state = GameState::from_map(&map, settings)?;
    log::info!("Running {} ticks with seed {}", args.ticks, args.seed);
    play(&mut state, &args);

    let score = state.score();
    screen = advance(screen, FlowEvent::RunEnded { score })?;
    if let Some(rank) = high_scores.add_score("pilot", score) {
        log::info!("New high score {score}, rank {rank}");
    }

    screen = advance(screen, FlowEvent::OpenHighScores)?;
    print!("{}", high_scores.to_text());
    screen = advance(screen, FlowEvent::Back)?;
    if screen.apply(FlowEvent::Quit).is_none() {
        log::info!("Exiting from {screen:?}");
    }

    println!(
        "Finished: {} ticks, score {}, {} respawns",
        state.time_ticks, score, state.respawns
    );
    Ok(())
}

/// Feed one flow event; `Err` means the flow exited
fn advance(screen: Screen, event: FlowEvent) -> Result<Screen, String> {
    screen
        .apply(event)
        .ok_or_else(|| format!("flow exited on {event:?}"))
}

/// Drive the session with the autoplay pilot
fn play(state: &mut GameState, args: &Args) {
    let mut pilot = Pilot::new(args.seed);
    let mut clock = FixedStep::default();
    let mut last = Instant::now();

    while state.time_ticks < args.ticks {
        let steps = if args.realtime {
            std::thread::sleep(Duration::from_millis(2));
            let now = Instant::now();
            let elapsed = now.duration_since(last).as_secs_f32();
            last = now;
            clock.advance(elapsed)
        } else {
            1
        };

        for _ in 0..steps {
            if state.time_ticks >= args.ticks {
                break;
            }
            let input = pilot.next_input(state);
            for event in tick(state, input) {
                match event {
                    GameEvent::Respawned => log::info!("tick {}: respawned", state.time_ticks),
                    other => log::debug!("tick {}: {:?}", state.time_ticks, other),
                }
            }

            let frame = state.render_frame(input.aim);
            log::trace!(
                "actor at ({:.1}, {:.1}) camera ({:.0}, {:.0}) rope {:?}",
                frame.actor_pos.x,
                frame.actor_pos.y,
                frame.camera.x,
                frame.camera.y,
                frame.rope_line
            );
        }
    }
}
