use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use tracing::info;

use starlink_dash::config::DEFAULT_CONFIG_FILE;
use starlink_dash::logging::{self, DashboardLog};
use starlink_dash::{
    CommandSource, DiagnosticsSource, Mode, Palette, RefreshLoop, Settings, SignalShutdown,
    StopReason,
};

#[derive(Parser, Debug)]
#[command(name = "starlink-dash")]
#[command(about = "Terminal dashboard for monitoring Starlink dish link health")]
struct Args {
    /// Data mode: status shows signal quality, ping_drop shows outages
    #[arg(short, long, value_enum, default_value_t = Mode::Status)]
    mode: Mode,

    /// Show a startup notice and pause before the first frame
    #[arg(long)]
    debug: bool,

    /// Path to an optional TOML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Startup failed: {:#}", e);
            eprintln!("[ERROR] Startup failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let settings = Settings::load(&args.config)?;
    let palette = Palette::starlink();

    logging::init_error_log(&settings.errors_log())?;
    let frame_log = DashboardLog::create(&settings.dashboard_log())?;
    let mut shutdown = SignalShutdown::install()?;

    let mut stdout = io::stdout();
    clear_screen(&mut stdout)?;

    if args.debug {
        println!(
            "{}",
            palette.label(&format!(
                "Debug mode enabled. Raw data logged to {}.",
                settings.errors_log().display()
            ))
        );
        println!("{}", palette.label("Starting dashboard..."));
        thread::sleep(Duration::from_secs(1));
        clear_screen(&mut stdout)?;
    }

    let source = CommandSource::from_settings(&settings);
    info!("Starting dashboard in {} mode using {}", args.mode, source.description());

    let mut refresh = RefreshLoop::new(source, args.mode, palette, stdout, frame_log);
    let reason = refresh.run(&mut shutdown);

    let logs = format!(
        "{} and {}",
        settings.errors_log().display(),
        settings.dashboard_log().display()
    );
    match reason {
        StopReason::Interrupted => {
            println!(
                "\n{}",
                palette.label(&format!("[INFO] Transmission ended. Check {} for details.", logs))
            );
            Ok(ExitCode::SUCCESS)
        }
        StopReason::Failed(message) => {
            println!(
                "\n{}",
                palette.label(&format!("[ERROR] Unexpected error: {}. Check {}.", message, logs))
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}
