use std::io::Write;

use clap::Subcommand;
use focusroom_core::timer::{format_time, DurationRef, SchedulingMode};
use focusroom_core::{Config, Event, FocusApp};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state as JSON
    Status,
    /// Start the current interval and run it to completion
    Run {
        /// Don't print the countdown
        #[arg(short, long)]
        quiet: bool,
    },
    /// Stop and rewind to a fresh focus interval
    Reset,
    /// Restart the pomodoro cycle from the first interval
    ResetCycle,
    /// Switch scheduling mode (toggles when no mode is given)
    Mode {
        /// "pomodoro" or "flexible"
        mode: Option<SchedulingMode>,
    },
    /// Select the flexible focus length, e.g. "preset:3" or "custom:1"
    Select {
        reference: DurationRef,
    },
    /// Custom duration management
    Custom {
        #[command(subcommand)]
        action: CustomAction,
    },
}

#[derive(Subcommand)]
pub enum CustomAction {
    /// List presets and custom durations
    List,
    /// Add a custom duration
    Add {
        /// Length in minutes
        minutes: i64,
        /// Label (defaults to "<minutes>min")
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Remove a custom duration
    Remove {
        /// Custom duration ID
        id: u32,
    },
}

pub async fn run(action: TimerAction, config: &Config) -> CliResult {
    let mut app = open_app(config)?;
    let result = apply(&mut app, action).await;
    app.shutdown().await;
    result
}

async fn apply(app: &mut FocusApp, action: TimerAction) -> CliResult {
    match action {
        TimerAction::Status => print_json(&app.snapshot())?,
        TimerAction::Run { quiet } => run_interval(app, quiet).await?,
        TimerAction::Reset => print_json(&app.reset())?,
        TimerAction::ResetCycle => match app.reset_cycle() {
            Some(event) => print_json(&event)?,
            None => print_json(&app.snapshot())?,
        },
        TimerAction::Mode { mode: None } => print_json(&app.toggle_scheduling_mode())?,
        TimerAction::Mode { mode: Some(mode) } => match app.set_scheduling_mode(mode) {
            Some(event) => print_json(&event)?,
            None => print_json(&app.snapshot())?,
        },
        TimerAction::Select { reference } => print_json(&app.select_duration(reference)?)?,
        TimerAction::Custom { action } => match action {
            CustomAction::List => print_json(&app.engine().catalog_entries())?,
            CustomAction::Add { minutes, label } => {
                let id = app.add_custom_duration(&label, minutes)?;
                let added = app.engine().catalog().customs().iter().find(|c| c.id == id);
                print_json(&added)?;
            }
            CustomAction::Remove { id } => {
                let removed = app.remove_custom_duration(id)?;
                print_json(&removed)?;
            }
        },
    }
    Ok(())
}

/// Start the timer and drive it until the interval completes, then wait
/// out the celebration banner after a focus interval.
async fn run_interval(app: &mut FocusApp, quiet: bool) -> CliResult {
    let started = app
        .toggle_running()
        .ok_or("timer is already running")?;
    print_json(&started)?;

    while let Some(signal) = app.next_signal().await {
        let event = app.handle(signal);
        if !quiet {
            eprint!("\r{}", format_time(app.engine().remaining_secs()));
            let _ = std::io::stderr().flush();
        }
        if let Some(event) = event.filter(Event::is_completion) {
            if !quiet {
                eprintln!();
            }
            print_json(&event)?;
            break;
        }
    }

    if app.is_celebrating() {
        while let Some(event) = app.next_event().await {
            match event {
                Event::CelebrationStarted { .. } => {
                    eprintln!("Well done! {}", app.engine().phase().banner());
                }
                Event::CelebrationCleared { .. } => break,
                _ => {}
            }
        }
    }
    Ok(())
}
