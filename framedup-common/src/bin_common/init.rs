use std::{io::IsTerminal, path::Path};

use color_eyre::{
    config::{HookBuilder, Theme},
    eyre::{self, Context},
};
use fern::colors::{Color, ColoredLevelConfig};

pub fn init_eyre() -> eyre::Result<()> {
    let eyre_color = if std::io::stderr().is_terminal() {
        Theme::dark()
    } else {
        Theme::new()
    };

    let (stderr_panic_hook, eyre_hook) =
        HookBuilder::default().theme(eyre_color).into_hooks();
    eyre_hook
        .install()
        .wrap_err("failed to install eyre hook")?;

    let (log_panic_hook, _) = HookBuilder::default().theme(Theme::new()).into_hooks();

    std::panic::set_hook(Box::new(move |info| {
        eprintln!("{}", stderr_panic_hook.panic_report(info));

        log::error!(target: "panic", "{}", log_panic_hook.panic_report(info));
    }));

    Ok(())
}

fn thread_name() -> String {
    let current = std::thread::current();
    current.name().unwrap_or("unnamed").to_string()
}

/// Logs to stdout, and additionally to `logfile` if given. The file never gets any
/// colors.
pub fn init_logger(logfile: Option<&Path>) -> eyre::Result<()> {
    let colors = std::io::stdout()
        .is_terminal()
        .then(|| ColoredLevelConfig::new().info(Color::Green).debug(Color::Blue));

    let mut dispatch = fern::Dispatch::new()
        .level(log::LevelFilter::Debug)
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let level = match colors {
                        Some(colors) => colors.color(record.level()).to_string(),
                        None => record.level().to_string(),
                    };
                    out.finish(format_args!(
                        "[{level} {} {}] {message}",
                        thread_name(),
                        record.target(),
                    ))
                })
                .chain(std::io::stdout()),
        );

    if let Some(logfile) = logfile {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} [{} {} {}] {message}",
                        humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                        record.level(),
                        thread_name(),
                        record.target(),
                    ))
                })
                .chain(fern::log_file(logfile).wrap_err_with(|| {
                    format!("failed to open the log file at: {logfile:?}")
                })?),
        );
    }

    dispatch.apply().wrap_err("failed to set the logger")?;

    Ok(())
}
