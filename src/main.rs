use std::path::PathBuf;
use std::{fs, process};

use anyhow::{Context, Result, bail};
use serde::Serialize;

use scene_script::{
    Config, Engine,
    engine::{command::CommandList, geometry::GeometryBuilder},
    sampler::Sampler,
    types::{Animation, Program, Step},
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const COMPILE_USAGE: &str = "scene-script [--config <config.json>] compile <commands.json> <program.json>";
const SAMPLE_USAGE: &str = "scene-script [--config <config.json>] sample <commands.json> <frames.json>";
const SUMMARY_USAGE: &str = "scene-script [--config <config.json>] summary <commands.json>";

fn run() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let config_path = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            if i + 1 >= args.len() {
                bail!("--config needs a path");
            }
            let path = PathBuf::from(args.remove(i + 1));
            args.remove(i);
            Some(path)
        }
        None => None,
    };
    let config = Config::load(config_path.as_deref());

    let mut args = args.into_iter();
    match args.next().as_deref() {
        Some("compile") => {
            let source_path = args.next().context(COMPILE_USAGE)?;
            let output_path = args.next().context(COMPILE_USAGE)?;
            compile(&source_path, &output_path, &config)
        }
        Some("sample") => {
            let source_path = args.next().context(SAMPLE_USAGE)?;
            let output_path = args.next().context(SAMPLE_USAGE)?;
            sample(&source_path, &output_path, &config)
        }
        Some("summary") => {
            let source_path = args.next().context(SUMMARY_USAGE)?;
            summary(&source_path, &config)
        }
        _ => bail!(
            "Scene Script — command interpreter and animation scheduler\n\nUsage:\n  {COMPILE_USAGE}\n  {SAMPLE_USAGE}\n  {SUMMARY_USAGE}"
        ),
    }
}

fn load_program(source_path: &str, config: &Config) -> Result<Program> {
    let json =
        fs::read_to_string(source_path).with_context(|| format!("Failed to read {source_path}"))?;
    let commands =
        CommandList::from_json(&json).with_context(|| format!("Failed to parse {source_path}"))?;
    Engine::compile(&commands, config).with_context(|| format!("Failed to interpret {source_path}"))
}

fn write_json<T: Serialize>(value: &T, output_path: &str, config: &Config) -> Result<()> {
    let json = if config.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    fs::write(output_path, &json).with_context(|| format!("Failed to write {output_path}"))
}

fn compile(source_path: &str, output_path: &str, config: &Config) -> Result<()> {
    let program = load_program(source_path, config)?;
    write_json(&program, output_path, config)?;

    eprintln!(
        "Compiled {} objects and {} steps ({:.2}s) from {} -> {}",
        program.objects.len(),
        program.steps.len(),
        program.duration(),
        source_path,
        output_path,
    );

    Ok(())
}

fn sample(source_path: &str, output_path: &str, config: &Config) -> Result<()> {
    let program = load_program(source_path, config)?;
    let timeline = Sampler::sample(&program, config.fps, config.max_frames)
        .with_context(|| format!("Failed to sample {source_path}"))?;
    write_json(&timeline, output_path, config)?;

    eprintln!(
        "Sampled {} frames at {} fps from {} -> {}",
        timeline.frames.len(),
        timeline.fps,
        source_path,
        output_path,
    );

    Ok(())
}

fn summary(source_path: &str, config: &Config) -> Result<()> {
    let program = load_program(source_path, config)?;

    for object in &program.objects {
        let extent = GeometryBuilder::extent(&object.geometry)
            .map(|e| format!("{:.3}x{:.3}", e.x, e.y))
            .unwrap_or_else(|| "text".into());
        println!(
            "object {:>3} {:?} {extent} {:?} at ({:.3}, {:.3})",
            object.id.0, object.key, object.color, object.center.x, object.center.y,
        );
    }

    for step in &program.steps {
        match step {
            Step::Add { objects } => println!("add    {} objects", objects.len()),
            Step::Wait { duration } => println!("wait   {duration:.3}s"),
            Step::Play(plan) => {
                let key = program
                    .objects
                    .get(plan.target.0)
                    .map(|o| o.key.as_str())
                    .unwrap_or("?");
                let what = match &plan.animation {
                    Animation::Rotate { .. } => "rotate",
                    Animation::MoveTo { .. } => "move-to",
                    Animation::Orbit { .. } => "orbit",
                };
                println!(
                    "play   {what} {key:?} {:.3}s {:?}",
                    plan.duration, plan.rate
                );
            }
        }
    }

    println!("total  {:.3}s", program.duration());
    Ok(())
}
