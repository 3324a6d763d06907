//! Term Pong entry point
//!
//! Prints one frame per tick until the paddle misses or the tick limit is
//! reached. An optional first argument names a JSON settings file.

use std::io::{self, Write};
use std::process::ExitCode;
use std::thread::sleep;
use std::time::Duration;

use term_pong::Settings;

fn main() -> ExitCode {
    env_logger::init();

    let settings = match std::env::args_os().nth(1) {
        Some(path) => match Settings::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let mut pong = match settings.build_game() {
        Ok(pong) => pong,
        Err(err) => {
            log::error!("Cannot start game: {err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Term Pong starting...");

    let interval = Duration::from_millis(settings.frame_interval_ms);
    let stdout = io::stdout();
    loop {
        let mut out = stdout.lock();
        if let Err(err) = out.write_all(pong.as_str().as_bytes()).and_then(|()| out.flush()) {
            log::error!("Cannot write frame: {err}");
            return ExitCode::FAILURE;
        }
        drop(out);

        if pong.ticks() >= settings.max_ticks {
            log::info!("Stopped after {} ticks", pong.ticks());
            break;
        }
        sleep(interval);
        if !pong.step() {
            log::info!("Paddle missed after {} ticks", pong.ticks());
            print!("{pong}");
            break;
        }
    }

    ExitCode::SUCCESS
}
