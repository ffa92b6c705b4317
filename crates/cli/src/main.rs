//! Host-side tool for the shared GPIO segment.
//!
//! This binary plays the external consumer of the GPIO bridge. It performs:
//! 1. **Inspection:** `dump` the record as JSON or `watch` the mapped pins for changes.
//! 2. **Injection:** `press` a button on an Input pin, read an `led` on an Output pin.
//! 3. **Probing:** `latency` measures the input-to-output round trip through a guest loop.
//! 4. **Loopback:** Runs an in-process device whose guest program mirrors inputs onto outputs.
//! 5. **Administration:** `release` marks the segment for removal.
//!
//! Pins on the command line use the narrow 0-7 numbering of the front-ends.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use std::{process, thread};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use pibridge_core::common::error::{ConfigError, PinError, SegmentError};
use pibridge_core::common::pin::{PinFunction, PinIndex};
use pibridge_core::config::Config;
use pibridge_core::shared::{PIN_MAP, SharedState, SharedStatePort, ShmSegment, native_pin};
use pibridge_core::soc::System;
use pibridge_core::soc::devices::gpio::function::encode_function;
use pibridge_core::soc::devices::gpio::regs::{Reg, offset_of};

#[derive(Parser, Debug)]
#[command(
    name = "pibridge",
    author,
    version,
    about = "Inspect and drive the shared GPIO segment",
    long_about = "Attach to the shared GPIO segment published by the emulated BCM2835 GPIO block.\n\nExamples:\n  pibridge watch\n  pibridge press 4\n  pibridge led 0 --follow\n  pibridge loopback &\n  pibridge latency --trials 100"
)]
struct Cli {
    /// JSON configuration file (rendezvous key and device placement).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the shared record as JSON.
    Dump,

    /// Print the mapped pins at start and whenever a function or output changes.
    Watch {
        /// Polling interval in milliseconds.
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },

    /// Click a button on an Input pin.
    Press {
        /// Narrow pin number (0-7).
        pin: u32,

        /// How long the level stays high, in milliseconds.
        #[arg(long, default_value_t = 100)]
        duration_ms: u64,
    },

    /// Report whether the LED on a pin is lit.
    Led {
        /// Narrow pin number (0-7).
        pin: u32,

        /// Keep polling and print every change.
        #[arg(long)]
        follow: bool,

        /// Polling interval in milliseconds when following.
        #[arg(long, default_value_t = 10)]
        refresh_ms: u64,
    },

    /// Measure input-to-output latency through a running guest loop.
    Latency {
        /// Number of round trips.
        #[arg(long, default_value_t = 1000)]
        trials: u32,

        /// Narrow pin driven by this tool.
        #[arg(long, default_value_t = 4)]
        input: u32,

        /// Narrow pin the guest mirrors the input onto.
        #[arg(long, default_value_t = 0)]
        output: u32,

        /// Give up on a trial after this many milliseconds.
        #[arg(long, default_value_t = 1000)]
        timeout_ms: u64,
    },

    /// Run an in-process device whose guest mirrors narrow pins 4-7 onto 0-3.
    Loopback {
        /// Stop after this many passes (runs forever if omitted).
        #[arg(long)]
        iterations: Option<u64>,

        /// Pause between passes in microseconds.
        #[arg(long, default_value_t = 100)]
        interval_us: u64,
    },

    /// Mark the segment for removal once every process has detached.
    Release,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Segment(#[from] SegmentError),
    #[error(transparent)]
    Pin(#[from] PinError),
    #[error("cannot encode record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("register {0} is not in the register map")]
    Unmapped(&'static str),
    #[error("GPIO device missing from the bus")]
    NoGpio,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = std::error::Error::source(cause);
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Dump => cmd_dump(&config),
        Commands::Watch { interval_ms } => cmd_watch(&config, Duration::from_millis(interval_ms)),
        Commands::Press { pin, duration_ms } => {
            cmd_press(&config, pin, Duration::from_millis(duration_ms))
        }
        Commands::Led {
            pin,
            follow,
            refresh_ms,
        } => cmd_led(&config, pin, follow, Duration::from_millis(refresh_ms)),
        Commands::Latency {
            trials,
            input,
            output,
            timeout_ms,
        } => cmd_latency(
            &config,
            trials,
            input,
            output,
            Duration::from_millis(timeout_ms),
        ),
        Commands::Loopback {
            iterations,
            interval_us,
        } => cmd_loopback(&config, iterations, Duration::from_micros(interval_us)),
        Commands::Release => cmd_release(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::default()),
    }
}

/// Attaches as a consumer: the segment must already exist.
fn attach_consumer(config: &Config) -> Result<ShmSegment, CliError> {
    let mut shared = config.shared.clone();
    shared.create = false;
    Ok(ShmSegment::attach(&shared)?)
}

fn cmd_dump(config: &Config) -> Result<(), CliError> {
    let segment = attach_consumer(config)?;
    let state = segment.snapshot();
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn print_table(state: &SharedState) -> Result<(), CliError> {
    println!("{:>4} {:>6} {:>8} {:>5} {:>6}", "Pin", "GPIO", "Function", "Level", "Output");
    for narrow in 0..PIN_MAP.len() as u32 {
        let pin = native_pin(narrow)?;
        println!(
            "{:>4} {:>6} {:>8} {:>5} {:>6}",
            narrow,
            pin.val(),
            state.function(pin).label(),
            u8::from(state.level(pin)),
            u8::from(state.output(pin)),
        );
    }
    println!();
    Ok(())
}

fn cmd_watch(config: &Config, interval: Duration) -> Result<(), CliError> {
    let segment = attach_consumer(config)?;
    let mut last: Option<SharedState> = None;
    loop {
        let state = segment.snapshot();
        if last.is_none_or(|prev| state.config_differs(&prev)) {
            print_table(&state)?;
        }
        last = Some(state);
        thread::sleep(interval);
    }
}

fn cmd_press(config: &Config, narrow: u32, duration: Duration) -> Result<(), CliError> {
    let pin = native_pin(narrow)?;
    let segment = attach_consumer(config)?;
    let function = segment.snapshot().function(pin);
    if function != PinFunction::Input {
        println!("pin {} ({}) is {}, not an input; nothing pressed", narrow, pin, function);
        return Ok(());
    }
    segment.drive_level(pin, true);
    thread::sleep(duration);
    segment.drive_level(pin, false);
    println!("pin {} ({}) pressed for {:?}", narrow, pin, duration);
    Ok(())
}

/// An LED is lit only when its pin is an output driven high.
fn led_lit(state: &SharedState, pin: PinIndex) -> bool {
    state.function(pin) == PinFunction::Output && state.output(pin)
}

fn cmd_led(config: &Config, narrow: u32, follow: bool, refresh: Duration) -> Result<(), CliError> {
    let pin = native_pin(narrow)?;
    let segment = attach_consumer(config)?;
    let describe = |lit: bool| if lit { "on" } else { "off" };

    let mut lit = led_lit(&segment.snapshot(), pin);
    println!("pin {} ({}): {}", narrow, pin, describe(lit));
    if !follow {
        return Ok(());
    }
    loop {
        thread::sleep(refresh);
        let now = led_lit(&segment.snapshot(), pin);
        if now != lit {
            println!("pin {} ({}): {}", narrow, pin, describe(now));
            lit = now;
        }
    }
}

/// Spins until the output bit of `pin` reads `high` or `timeout` elapses.
fn wait_output(segment: &ShmSegment, pin: PinIndex, high: bool, timeout: Duration) -> Option<Duration> {
    let start = Instant::now();
    loop {
        if segment.snapshot().output(pin) == high {
            return Some(start.elapsed());
        }
        if start.elapsed() >= timeout {
            return None;
        }
        std::hint::spin_loop();
    }
}

fn cmd_latency(
    config: &Config,
    trials: u32,
    input: u32,
    output: u32,
    timeout: Duration,
) -> Result<(), CliError> {
    let input = native_pin(input)?;
    let output = native_pin(output)?;
    let segment = attach_consumer(config)?;

    let mut samples = Vec::with_capacity(trials as usize);
    let mut timeouts = 0u32;
    for trial in 0..trials {
        segment.drive_level(input, false);
        if wait_output(&segment, output, false, timeout).is_none() {
            tracing::warn!(trial, "output did not settle low");
        }
        thread::sleep(Duration::from_micros(10));

        let start = Instant::now();
        segment.drive_level(input, true);
        match wait_output(&segment, output, true, timeout) {
            Some(_) => {
                let nanos = start.elapsed().as_nanos();
                println!("trial {}: {} ns", trial, nanos);
                samples.push(nanos);
            }
            None => {
                println!("trial {}: timed out", trial);
                timeouts += 1;
            }
        }
    }
    segment.drive_level(input, false);

    if samples.is_empty() {
        println!("no completed trials ({} timed out)", timeouts);
    } else {
        let mean = samples.iter().sum::<u128>() / samples.len() as u128;
        println!(
            "mean {} ns over {} trials ({} timed out)",
            mean,
            samples.len(),
            timeouts
        );
    }
    Ok(())
}

fn reg_addr(base: u64, reg: Reg) -> Result<u64, CliError> {
    offset_of(reg)
        .map(|offset| base + offset)
        .ok_or(CliError::Unmapped(reg.name()))
}

/// Guest program: narrow pins 0-3 are outputs, 4-7 inputs, output `i` follows input `i + 4`.
fn cmd_loopback(config: &Config, iterations: Option<u64>, interval: Duration) -> Result<(), CliError> {
    let mut system = System::new(config);
    if system.gpio_mut().is_none() {
        return Err(CliError::NoGpio);
    }
    let base = config.gpio.base;
    let half = PIN_MAP.len() as u32 / 2;

    let mut pairs = Vec::with_capacity(half as usize);
    for narrow in 0..half {
        pairs.push((native_pin(narrow + half)?, native_pin(narrow)?));
    }

    for &(input, output) in &pairs {
        for (pin, function) in [(output, PinFunction::Output), (input, PinFunction::Input)] {
            let addr = reg_addr(base, Reg::Fsel(pin.fsel_register()))?;
            let word = system.bus.read_u32(addr);
            system.bus.write_u32(addr, encode_function(word, pin, function));
        }
    }
    let lev = [reg_addr(base, Reg::Lev(0))?, reg_addr(base, Reg::Lev(1))?];
    let set = [reg_addr(base, Reg::Set(0))?, reg_addr(base, Reg::Set(1))?];
    let clr = [reg_addr(base, Reg::Clr(0))?, reg_addr(base, Reg::Clr(1))?];
    tracing::info!(pairs = pairs.len(), "loopback running");

    let mut pass = 0u64;
    while iterations.is_none_or(|limit| pass < limit) {
        let levels = [system.bus.read_u32(lev[0]), system.bus.read_u32(lev[1])];
        let mut set_mask = [0u32; 2];
        let mut clr_mask = [0u32; 2];
        for &(input, output) in &pairs {
            if levels[input.bank()] & input.mask() != 0 {
                set_mask[output.bank()] |= output.mask();
            } else {
                clr_mask[output.bank()] |= output.mask();
            }
        }
        for bank in 0..2 {
            if set_mask[bank] != 0 {
                system.bus.write_u32(set[bank], set_mask[bank]);
            }
            if clr_mask[bank] != 0 {
                system.bus.write_u32(clr[bank], clr_mask[bank]);
            }
        }
        pass += 1;
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    if let Some(gpio) = system.gpio_mut() {
        println!("loopback done: {} passes, {} bus writes", pass, gpio.write_count());
    }
    Ok(())
}

fn cmd_release(config: &Config) -> Result<(), CliError> {
    let segment = attach_consumer(config)?;
    segment.remove()?;
    println!("segment {} (key {:#x}) marked for removal", segment.id(), segment.key());
    Ok(())
}
