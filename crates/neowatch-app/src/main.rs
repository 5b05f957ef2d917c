//! The neowatch binary.

use std::io;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use neowatch_app::{AppError, Command, FIXED_DT, PlatformDirs, Viewer, read_commands};
use neowatch_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("neowatch: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match &args.config {
        Some(root) => PlatformDirs {
            config_dir: root.clone(),
            log_dir: root.join("logs"),
        },
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;

    neowatch_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(
        config_dir = %dirs.config_dir.display(),
        base_url = %config.feed.base_url,
        "neowatch starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("neowatch-fetch")
        .build()
        .map_err(AppError::Runtime)?;

    let mut viewer = Viewer::new(&config, io::stdout(), runtime.handle().clone());
    if !config.feed.default_date.is_empty() {
        viewer.submit(&config.feed.default_date);
    }

    // A frame budget means a scripted run: stdin is not read.
    let (command_tx, command_rx) = crossbeam_channel::unbounded();
    if args.frames.is_none() {
        let _ = viewer.handle(Command::Help);
        thread::Builder::new()
            .name("console".into())
            .spawn(move || read_commands(io::stdin().lock(), command_tx))
            .map_err(AppError::Console)?;
    }

    let frame_period = Duration::from_secs_f64(FIXED_DT);
    'frames: loop {
        for command in command_rx.try_iter() {
            if viewer.handle(command).is_break() {
                break 'frames;
            }
        }
        viewer.frame();
        if args.frames.is_some_and(|limit| viewer.frame_count() >= limit) {
            break;
        }
        thread::sleep(frame_period);
    }

    info!(
        frames = viewer.frame_count(),
        asteroids = viewer.context().asteroid_count(),
        "neowatch stopped"
    );
    runtime.shutdown_timeout(Duration::from_secs(1));
    Ok(())
}
