use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use tracing::info;

use intcode::controllers::{Arcade, Joystick, PaintingRobot, RepairDroid};
use intcode::pipeline::best_phase_setting;
use intcode::program::load_program;
use intcode::search::find_noun_verb;
use intcode::{logger, InputBatch, Value, VirtualMachine};

#[derive(Parser, Debug)]
#[command(name = "intcode", version, about = "Run integer programs on a resumable VM.")]
struct Cli {
    /// Log filter directives, e.g. `info` or `intcode::vm=trace`. Falls back to RUST_LOG.
    #[arg(long, env = "INTCODE_LOG", global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a program and print everything it outputs.
    Run {
        /// Path to the program image.
        program: PathBuf,

        /// Input queued before the first instruction, e.g. `1,2,3`.
        #[arg(short, long, allow_hyphen_values = true)]
        input: Option<InputBatch>,

        /// Patch a memory cell before running.
        #[arg(long = "set", value_name = "ADDR=VALUE", value_parser = parse_patch)]
        patches: Vec<(Value, Value)>,

        /// Print a memory cell after the run.
        #[arg(long = "show", value_name = "ADDR")]
        show: Vec<Value>,

        /// Read more input from stdin whenever the program blocks.
        #[arg(long)]
        interactive: bool,
    },
    /// Search the best phase setting for a chain of amplifiers.
    Amplify {
        program: PathBuf,

        /// Wire the last amplifier back into the first (phases 5..=9).
        #[arg(long)]
        feedback: bool,
    },
    /// Run the hull painting robot.
    Paint {
        program: PathBuf,

        #[arg(long)]
        start_white: bool,
    },
    /// Run the arcade cabinet.
    Arcade {
        program: PathBuf,

        /// Insert quarters and let the joystick follow the ball.
        #[arg(long)]
        free_play: bool,
    },
    /// Map the area around the repair droid.
    Droid { program: PathBuf },
    /// Find the noun (address 1) and verb (address 2) that make address 0 equal the target.
    Search {
        program: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        target: Value,
    },
}

fn parse_patch(s: &str) -> Result<(Value, Value), String> {
    let (address, value) = s.split_once('=').ok_or_else(|| format!("expected ADDR=VALUE, got {s:?}"))?;
    let address = address.trim().parse().map_err(|e| format!("bad address {address:?}: {e}"))?;
    let value = value.trim().parse().map_err(|e| format!("bad value {value:?}: {e}"))?;
    Ok((address, value))
}

fn load_vm(path: &Path) -> Result<VirtualMachine> {
    let program = load_program(path).with_context(|| format!("loading {}", path.display()))?;
    Ok(VirtualMachine::new(program))
}

fn run(
    path: &Path,
    input: Option<InputBatch>,
    patches: &[(Value, Value)],
    show: &[Value],
    interactive: bool,
) -> Result<()> {
    let mut vm = load_vm(path)?;
    for &(address, value) in patches {
        vm.write(address, value).with_context(|| format!("patching address {address}"))?;
    }
    if let Some(input) = input {
        vm.feed_input(input)?;
    }

    let mut lines = io::stdin().lock().lines();
    loop {
        let output = match vm.process() {
            Ok(output) => output,
            Err(e) => {
                vm.dump_registers();
                return Err(e).with_context(|| {
                    format!(
                        "program failed at ip {} (relative base {})",
                        vm.instruction_pointer(),
                        vm.relative_base()
                    )
                });
            }
        };
        if !output.is_empty() {
            println!("{}", output.iter().join(","));
        }
        if vm.is_terminated() {
            break;
        }
        if !interactive {
            bail!("program is waiting for input at address {}", vm.instruction_pointer());
        }

        let batch = loop {
            eprint!("input> ");
            io::stderr().flush()?;
            let line = lines.next().context("stdin closed while the program was waiting for input")??;
            let batch: InputBatch = line.parse()?;
            if !batch.is_empty() {
                break batch;
            }
        };
        vm.feed_input(batch)?;
    }

    for &address in show {
        println!("[{address}] = {}", vm.read(address)?);
    }
    Ok(())
}

fn execute(command: Command) -> Result<()> {
    match command {
        Command::Run { program, input, patches, show, interactive } => {
            run(&program, input, &patches, &show, interactive)?;
        }
        Command::Amplify { program, feedback } => {
            let program = load_program(&program)?;
            let phases = if feedback { 5..=9 } else { 0..=4 };
            let (signal, order) = best_phase_setting(&program, phases, feedback)?;
            info!(feedback, "phase search complete");
            println!("highest signal {signal} with phases {}", order.iter().join(","));
        }
        Command::Paint { program, start_white } => {
            let vm = load_vm(&program)?;
            let mut robot =
                if start_white { PaintingRobot::starting_on_white(vm) } else { PaintingRobot::new(vm) };
            robot.run()?;
            println!("{} panels painted", robot.panels_painted());
            println!("{}", robot.render());
        }
        Command::Arcade { program, free_play } => {
            let vm = load_vm(&program)?;
            if free_play {
                let mut arcade = Arcade::free_play(vm)?;
                let score = arcade.run(Joystick::Track)?;
                println!("{}", arcade.render());
                println!("final score {score}");
            } else {
                let mut arcade = Arcade::new(vm);
                arcade.run(Joystick::Neutral)?;
                println!("{}", arcade.render());
                println!("{} blocks on screen", arcade.block_count());
            }
        }
        Command::Droid { program } => {
            let map = RepairDroid::new(load_vm(&program)?).explore()?;
            println!("{}", map.render());
            match (map.steps_to_oxygen(), map.fill_minutes()) {
                (Some(steps), Some(minutes)) => {
                    println!("oxygen system {steps} steps away, area filled after {minutes} minutes");
                }
                _ => println!("no oxygen system found"),
            }
        }
        Command::Search { program, target } => {
            let program = load_program(&program)?;
            match find_noun_verb(&program, target)? {
                Some((noun, verb)) => println!("noun {noun}, verb {verb} ({})", 100 * noun + verb),
                None => bail!("no noun/verb pair leaves {target} in address 0"),
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logger::setup_logger(cli.log.as_deref());

    if let Err(e) = execute(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
