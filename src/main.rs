use std::path::PathBuf;

use clap::Parser;
use rocket_telemetry::*;

/// A command to send once mission time reaches `time`.
#[derive(Debug, Clone)]
struct ScriptedCommand {
    time: f64,
    command: RocketCommand,
}

fn parse_scripted_command(arg: &str) -> Result<ScriptedCommand, String> {
    let (time, token) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected TIME:COMMAND, got '{arg}'"))?;
    let time = time
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid command time '{time}'"))?;
    let command = token.parse::<RocketCommand>().map_err(|err| err.to_string())?;
    Ok(ScriptedCommand { time, command })
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless launch telemetry run", long_about = None)]
struct Cli {
    /// JSON configuration file; the built-in two-stage profile when omitted
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed for reproducible sensor noise
    #[arg(long)]
    seed: Option<u64>,

    /// Playback speed multiplier
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Command to send at a mission time, e.g. `30:throttle:80` or
    /// `120:emergency:fuel_leak: Isolate Fuel Lines`. Repeatable.
    #[arg(long = "command", value_name = "TIME:COMMAND", value_parser = parse_scripted_command)]
    commands: Vec<ScriptedCommand>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Print every recorded sample before the summary
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if !(cli.speed > 0.0) {
        return Err(format!("speed must be positive for a headless run, got {}", cli.speed).into());
    }

    let mut script = cli.commands;
    script.sort_by(|a, b| a.time.total_cmp(&b.time));
    let mut script = script.into_iter().peekable();

    let mut engine = SimulationEngine::new(config, SimulationOptions::silent())?;
    let mut recorder = TelemetryRecorder::new();

    engine.set_speed(cli.speed);
    engine.set_time(0.0);
    if let Some(data) = engine.snapshot() {
        recorder.collect_data(data);
    }

    engine.start();
    while engine.is_running() {
        while let Some(scripted) = script.next_if(|s| s.time <= engine.current_time()) {
            let effect = engine.dispatch(scripted.command.clone());
            println!(
                "[{}] {} -> {:?}",
                TelemetryRecorder::format_time(engine.current_time()),
                scripted.command,
                effect
            );
        }

        engine.update();
        if let Some(data) = engine.snapshot() {
            recorder.collect_data(data);
        }
    }

    for skipped in script {
        println!(
            "Command '{}' at {} not sent: simulation stopped",
            skipped.command,
            TelemetryRecorder::format_time(skipped.time)
        );
    }

    recorder.display_data(cli.verbose);

    if cli.json {
        if let Some(data) = engine.snapshot() {
            println!("{}", data.to_json_pretty()?);
        }
    }

    Ok(())
}
