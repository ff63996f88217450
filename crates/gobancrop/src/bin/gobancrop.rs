//! Thin command-line driver: decode an image, run the pipeline, write the
//! rectified board as a file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use gobancrop::{interop, GobanDetector, LogObserver};

#[derive(Parser, Debug)]
#[command(name = "gobancrop", about = "Crop and rectify a 19x19 goban from a photo or screenshot")]
struct Args {
    /// Input image (PNG, JPEG, ...).
    input: PathBuf,

    /// Output image path; format follows the extension.
    #[arg(short, long, default_value = "board.png")]
    output: PathBuf,

    /// Side length of the square output in pixels.
    #[arg(long, default_value_t = 512)]
    size: usize,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let img = interop::load_rgba(&args.input)?;
    let detector = GobanDetector::default();
    let board = detector.locate_and_rectify(&img.view(), args.size, &LogObserver)?;
    interop::save_rgba(&board, &args.output)?;
    println!("{}", args.output.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = gobancrop_core::init_with_level(level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gobancrop: {err}");
            ExitCode::FAILURE
        }
    }
}
