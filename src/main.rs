use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dem2bvh::config::Config;
use dem2bvh::convert::{convert_file, has_demo_extension, CancelFlag};
use dem2bvh::goldsrc::GoldSrcDecoder;
use dem2bvh::{logger, Error};
use log::{error, warn};

const USAGE: &str = "Analyze GoldSrc demo file and convert to BVH

Usage: dem2bvh <demo_file> [-fps fps_value] [-config config_file]

Arguments:
  <demo_file>          Path to the demo file (*.dem)
  -fps fps_value       Target FPS (default: 30)
  -config config_file  TOML file overriding the default settings
";

#[derive(Debug, PartialEq)]
struct Args {
    demo_file: PathBuf,
    fps: Option<u32>,
    config: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Run(Args),
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    if args.is_empty() {
        return Ok(Command::Help);
    }

    let mut demo_file = None;
    let mut fps = None;
    let mut config = None;
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-fps" | "--fps" => {
                let value = it.next().ok_or("-fps requires a value")?;
                let value: u32 = value
                    .parse()
                    .map_err(|_| format!("invalid fps value '{}'", value))?;
                if value == 0 {
                    return Err("fps must be positive".to_string());
                }
                fps = Some(value);
            }
            "-config" | "--config" => {
                let value = it.next().ok_or("-config requires a value")?;
                config = Some(PathBuf::from(value));
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("unknown option '{}'", flag));
            }
            path => {
                if demo_file.is_some() {
                    return Err(format!("unexpected argument '{}'", path));
                }
                demo_file = Some(PathBuf::from(path));
            }
        }
    }

    let demo_file = demo_file.ok_or("missing <demo_file>")?;
    Ok(Command::Run(Args {
        demo_file,
        fps,
        config,
    }))
}

fn load_config(args: &Args) -> Result<Config, Error> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(fps) = args.fps {
        config.target_fps = fps;
    }
    Ok(config)
}

fn run(args: &Args, cancel: &AtomicBool) -> Result<(), Error> {
    let input: &Path = &args.demo_file;
    if !input.exists() {
        return Err(Error::NotFound(input.to_path_buf()));
    }
    if !has_demo_extension(input) {
        warn!("File does not have .dem extension");
    }
    let config = load_config(args)?;

    let summary = convert_file(input, &config, &GoldSrcDecoder, cancel)?;
    println!("Camera motion saved to: {}", summary.output.display());
    println!("Total frames: {}", summary.frames);
    println!(
        "Frame time: {:.6} ({} fps)",
        summary.frame_time, summary.target_fps
    );
    Ok(())
}

fn main() -> ExitCode {
    logger::init_logger();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(Command::Help) => {
            print!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(args)) => args,
        Err(message) => {
            eprintln!("Error: {}\n", message);
            eprint!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let cancel: CancelFlag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        warn!("could not install Ctrl-C handler: {}", e);
    }

    match run(&args, &cancel) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ Error::NotFound(_)) => {
            eprintln!("Error: {}", e);
            ExitCode::SUCCESS
        }
        Err(Error::Cancelled) => {
            println!("\nOperation cancelled by user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
