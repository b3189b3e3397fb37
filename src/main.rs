pub mod error;
pub mod ffmpeg;
pub mod fstools;
pub mod job;
pub mod passlog;
pub mod pipeline;
pub mod planner;
pub mod report;

use std::process::ExitCode;

use rustop::opts;
use tracing::Level;

use error::JobError;
use job::{EncodeJob, JobOptions};
use pipeline::Outcome;
use report::SizeVerdict;

const USAGE: &str = "Usage: encode-16mb -i INPUT [-o OUTPUT] [-t TARGET_MB] [-a AUDIO_KBPS] [--keep-logs] [--dry-run] [-v] [-h]";

fn main() -> ExitCode {
    let parsed = opts! {
        synopsis "Re-encode a video to fit 15-16 MB with two-pass H.264/AAC.";
        auto_shorts false;
        opt input:Option<String>, short:'i', long:"input", desc:"Input video file.";
        opt output:Option<String>, short:'o', long:"output", desc:"Output file. [default: <input>-16mb.mp4]";
        opt target_mb:f64=job::DEFAULT_TARGET_MB, short:'t', long:"target-mb", desc:"Target size in MB.";
        opt audio_kbps:f64=job::DEFAULT_AUDIO_KBPS, short:'a', long:"audio-kbps", desc:"Audio bitrate in kbps.";
        opt keep_logs:bool=false, long:"keep-logs", desc:"Keep the two-pass log files.";
        opt dry_run:bool=false, short:'d', long:"dry-run", desc:"Print the plan and ffmpeg commands without encoding.";
        opt verbose:bool=false, short:'v', long:"verbose", desc:"Log debug details to stderr.";
    }.parse();

    let (args, rest) = match parsed {
        Ok(parsed) => parsed,
        Err(rustop::Error::Help(help)) => {
            println!("{help}");
            return ExitCode::SUCCESS;
        },
        Err(err) => return fail(JobError::Usage(format!("{err}."))),
    };

    init_logging(args.verbose);

    if let Some(extra) = rest.first() {
        return fail(JobError::Usage(format!("Unexpected argument {extra:?}.")));
    }

    let job = match EncodeJob::from_options(JobOptions {
        input: args.input,
        output: args.output,
        target_mb: args.target_mb,
        audio_kbps: args.audio_kbps,
        keep_logs: args.keep_logs,
        dry_run: args.dry_run,
    }) {
        Ok(job) => job,
        Err(err) => return fail(err),
    };

    match pipeline::run(&job) {
        Ok(Outcome::DryRun) => ExitCode::SUCCESS,
        Ok(Outcome::Encoded(report)) => {
            match report.verdict {
                SizeVerdict::Within => println!("{report}"),
                SizeVerdict::Above | SizeVerdict::Below => eprintln!("{report}"),
            }
            ExitCode::SUCCESS
        },
        Err(err) => fail(err),
    }
}

fn fail(err: JobError) -> ExitCode {
    eprintln!("{err}");
    if err.is_usage() {
        eprintln!("{USAGE}");
    }
    ExitCode::FAILURE
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();
}
