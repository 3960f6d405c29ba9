use std::path::PathBuf;

use clap::Parser;
use terramaze::{
    game::MoveOutcome, logging, settings::Settings, Algorithm, Direction, GameError, GameSession,
    PathInfo, Pos,
};

#[derive(Parser, Debug)]
#[clap(version, about, name = "terramaze")]
struct Args {
    #[clap(short, long, help = "Number of rows, overrides settings")]
    rows: Option<usize>,
    #[clap(short, long, help = "Number of columns, overrides settings")]
    cols: Option<usize>,
    #[clap(short, long, help = "Seed for deterministic generation")]
    seed: Option<u64>,
    #[clap(
        short,
        long,
        default_value = "all",
        help = "bfs, dfs, dijkstra, astar or all to compare them"
    )]
    algorithm: String,
    #[clap(
        short,
        long,
        help = "Moves to make before solving, as a string of U, R, D, L"
    )]
    walk: Option<String>,
    #[clap(
        long,
        num_args = 2,
        value_names = ["ROW", "COL"],
        allow_negative_numbers = true,
        help = "Solve from this cell instead of the player position"
    )]
    start: Option<Vec<i32>>,
    #[clap(long, help = "Print the full path, not just its summary")]
    print_path: bool,
    #[clap(long, help = "Settings file to use instead of the default one")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More logging, repeatable")]
    verbose: u8,
}

fn parse_walk(walk: &str) -> Vec<Direction> {
    walk.chars()
        .filter_map(|c| match c.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'R' => Some(Direction::Right),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            other => {
                log::warn!("ignoring unknown move '{}'", other);
                None
            }
        })
        .collect()
}

fn print_info(algorithm: Algorithm, info: &PathInfo, print_path: bool) {
    if !info.is_found() {
        println!("{}: goal unreachable", algorithm);
        return;
    }

    println!(
        "{}: {} steps, cost {}, explored {}",
        algorithm, info.length, info.total_cost, info.explored
    );
    if print_path {
        let path: Vec<_> = info.path.iter().map(Pos::to_string).collect();
        println!("  {}", path.join(" -> "));
    }
}

fn main() -> Result<(), GameError> {
    let args = Args::parse();
    logging::init(logging::level_from_verbosity(args.verbose));

    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.show_config_path {
        println!("{}", settings_path.display());
        return Ok(());
    }

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    better_panic::install();

    // `None` compares all of them
    let algorithm = if args.algorithm.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(args.algorithm.parse::<Algorithm>()?)
    };

    let settings = match args.config {
        Some(ref path) => Settings::load(path)?,
        None => Settings::load_or_default(&settings_path),
    };

    let rows = args.rows.unwrap_or_else(|| settings.get_rows());
    let cols = args.cols.unwrap_or_else(|| settings.get_cols());
    let seed = args.seed.or_else(|| settings.get_seed());

    let mut game = GameSession::generate(rows, cols, seed, settings.generator_params())?;
    println!("{}x{} maze, goal at {}", rows, cols, game.goal_pos());

    if let Some(algorithm) = settings.get_hint_algorithm() {
        game.set_hint(algorithm)?;
    }

    for dir in parse_walk(args.walk.as_deref().unwrap_or_default()) {
        match game.try_move(dir)? {
            MoveOutcome::Blocked => log::info!("{:?} blocked at {}", dir, game.player_pos()),
            MoveOutcome::Moved(_) => {}
            MoveOutcome::Finished(pos) => {
                println!("Finish! Maze solved at {} in {} moves", pos, game.move_count());
                break;
            }
        }
    }
    println!("player at {}", game.player_pos());

    if let Some(&[row, col]) = args.start.as_deref() {
        match algorithm {
            None => println!("{}", terramaze::compare_all(game.maze(), row, col)?),
            Some(algorithm) => {
                let info = terramaze::solve(game.maze(), algorithm, row, col)?;
                print_info(algorithm, &info, args.print_path);
            }
        }
        return Ok(());
    }

    match algorithm {
        None => {
            let comparison = game.compare()?;
            if args.print_path {
                for (algorithm, info) in comparison.iter() {
                    print_info(algorithm, info, true);
                }
            }
            println!("{}", comparison);
        }
        Some(algorithm) => {
            let info = game.set_hint(algorithm)?;
            print_info(algorithm, info, args.print_path);
        }
    }

    Ok(())
}
