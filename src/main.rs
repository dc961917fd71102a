//! Battle Math entry point
//!
//! Native: line-oriented terminal game with saves in `.battle-math/`.
//! WASM: boots a session against LocalStorage.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, BufRead, Write};
    use std::time::Instant;

    use battle_math::persistence::FileStorage;
    use battle_math::sim::{Action, Difficulty, Mode, NumberFormat};
    use battle_math::{Session, Settings};

    const SAVE_DIR: &str = ".battle-math";

    const HELP: &str = "\
Commands:
  <number>             answer the current problem
  mode <name>          addition | subtraction | multiplication | division
  difficulty <name>    easy | medium | hard
  format <name>        whole | decimal
  auto                 toggle auto-difficulty
  restart              start over, keeping your choices
  finish               end the game
  help                 show this help
  quit                 leave (progress is saved)";

    fn unknown<'a>(what: &str, arg: &str, choices: impl Iterator<Item = &'a str>) -> String {
        let choices: Vec<&str> = choices.collect();
        format!("unknown {what} '{arg}' (choose {})", choices.join(", "))
    }

    /// Map a command line to an action, or a message for the player
    fn parse_command(line: &str) -> Result<Option<Action>, String> {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Ok(None);
        };
        let arg = parts.next().unwrap_or("");

        let action = match cmd {
            "mode" => Action::SetMode(Mode::from_str(arg).ok_or_else(|| {
                unknown("mode", arg, Mode::ALL.iter().map(Mode::as_str))
            })?),
            "difficulty" | "diff" => {
                Action::SetDifficulty(Difficulty::from_str(arg).ok_or_else(|| {
                    unknown("difficulty", arg, Difficulty::ALL.iter().map(Difficulty::as_str))
                })?)
            }
            "format" => Action::SetNumberFormat(NumberFormat::from_str(arg).ok_or_else(|| {
                unknown("format", arg, NumberFormat::ALL.iter().map(NumberFormat::as_str))
            })?),
            "auto" => Action::ToggleAutoDifficulty,
            "restart" => Action::Restart,
            "finish" => Action::FinishGame,
            _ => return Err(format!("unknown command '{cmd}', try 'help'")),
        };
        Ok(Some(action))
    }

    fn print_status(session: &Session<FileStorage>) {
        let state = session.state();
        println!(
            "\nWave {} | Enemies {} | Answered {} | {} {} {} | auto {}",
            state.wave_number,
            state.enemy_count,
            state.questions_answered,
            state.mode.as_str(),
            state.difficulty.as_str(),
            state.number_format.as_str(),
            if state.auto_difficulty_enabled { "on" } else { "off" },
        );
        if state.won {
            println!("Victory! Type 'restart' to play again.");
        } else {
            print!("{}", state.problem_text());
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let storage = FileStorage::open(SAVE_DIR)?;
        let settings = Settings::load(&storage);
        let mut session = Session::boot(
            storage,
            battle_math::sim::OperandGenerator::from_entropy(),
            settings,
        )?;

        let started = Instant::now();
        let now_ms = || started.elapsed().as_secs_f64() * 1000.0;

        println!("Battle Math\n{HELP}");
        if !session.settings().autosave {
            println!("Autosave is off; progress is saved only when you quit.");
        }
        print_status(&session);
        io::stdout().flush()?;

        for line in io::stdin().lock().lines() {
            let line = line?;
            let line = line.trim();

            match line {
                "quit" | "exit" => break,
                "help" => println!("{HELP}"),
                _ if line.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
                    if session.state().won {
                        println!("The game is over. Type 'restart' to play again.");
                    } else {
                        session.dispatch(Action::SetAnswer(line.to_string()), now_ms())?;
                        if session.state().answer != line {
                            println!("Answers may only contain digits and one '.'");
                        } else {
                            session.dispatch(Action::CheckAnswer, now_ms())?;
                        }
                    }
                }
                _ => match parse_command(line) {
                    Ok(Some(action)) => {
                        session.dispatch(action, now_ms())?;
                    }
                    Ok(None) => {}
                    Err(msg) => println!("{msg}"),
                },
            }

            if let Some(msg) = session.feedback(now_ms()) {
                println!("{}", msg.text);
            }
            print_status(&session);
            io::stdout().flush()?;
        }

        session.persist();
        log::info!("Bye");
        Ok(())
    }

}

#[cfg(target_arch = "wasm32")]
mod web {
    use battle_math::persistence::LocalStorage;
    use battle_math::sim::OperandGenerator;
    use battle_math::{Session, Settings};

    pub fn run() {
        let storage = match LocalStorage::open() {
            Ok(storage) => storage,
            Err(e) => {
                log::error!("Cannot start without storage: {}", e);
                return;
            }
        };
        let settings = Settings::load(&storage);
        match Session::boot(storage, OperandGenerator::from_entropy(), settings) {
            Ok(session) => {
                let state = session.state();
                log::info!(
                    "Wave {}: {} enemies, problem {}",
                    state.wave_number,
                    state.enemy_count,
                    state.problem_text()
                );
            }
            Err(e) => log::error!("Failed to start session: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Battle Math (native) starting...");

    if let Err(e) = terminal::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
