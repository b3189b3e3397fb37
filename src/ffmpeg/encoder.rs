use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use human_repr::HumanCount;
use kdam::{term, tqdm, BarExt};
use tracing::{debug, info};

use crate::error::JobError;
use crate::passlog::PassLog;
use super::parameters::{command_line, Pass, PassParameters};

#[derive(Debug, PartialEq)]
struct EncodeProgress {
    pub out_time_ms: usize,
    pub speed: Option<String>,
    pub total_size: usize,
}

impl EncodeProgress {
    pub fn new() -> Self {
        EncodeProgress {
            out_time_ms: 0,
            speed: None,
            total_size: 0,
        }
    }
}

#[derive(Debug, PartialEq)]
enum FFmpegStdoutResult {
    Continue,
    Render,
    End,
}

/// Runs the analysis pass and then the final pass of one job.
pub struct TwoPassEncoder<'a> {
    ffmpeg: &'a Path,
    parameters: PassParameters<'a>,
    duration_secs: f64,
}

impl<'a> TwoPassEncoder<'a> {
    pub fn new(ffmpeg: &'a Path, parameters: PassParameters<'a>, duration_secs: f64) -> Self {
        TwoPassEncoder {
            ffmpeg,
            parameters,
            duration_secs,
        }
    }

    /// Both passes must succeed; `passlog` is marked complete only then.
    pub fn encode(&self, passlog: &mut PassLog) -> Result<(), JobError> {
        self.run_pass(Pass::Analysis)?;
        self.run_pass(Pass::Final)?;
        passlog.mark_complete();
        Ok(())
    }

    pub fn describe(&self, pass: Pass) -> String {
        command_line(self.ffmpeg, &self.parameters.parameters(pass))
    }

    fn run_pass(&self, pass: Pass) -> Result<(), JobError> {
        let args = self.parameters.parameters(pass);
        info!(pass = pass.number(), "starting ffmpeg pass");
        debug!("{}", command_line(self.ffmpeg, &args));

        let mut child = Command::new(self.ffmpeg)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| failed(pass, &format!("unable to execute ffmpeg ({e})")))?;

        if let Some(stdout) = child.stdout.take() {
            term::init(false);

            let total_ms = (self.duration_secs * 1000.0).round().max(1.0) as usize;
            let mut pbar = tqdm!(
                total = total_ms,
                desc = format!("pass {}/2", pass.number()),
                position = 0,
                force_refresh = true
            );
            let mut progress = EncodeProgress::new();
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                match handle_ffmpeg_stdout_line(&line, &mut progress) {
                    FFmpegStdoutResult::Continue => continue,
                    FFmpegStdoutResult::Render | FFmpegStdoutResult::End => {
                        pbar.set_postfix(format!("{} speed={}",
                            progress.total_size.human_count_bytes(),
                            progress.speed.as_deref().unwrap_or("?")));
                        let _ = pbar.update_to(progress.out_time_ms.min(total_ms));
                    },
                }
            }
            eprintln!();
        }

        let status = child.wait()
            .map_err(|e| failed(pass, &format!("error waiting for ffmpeg ({e})")))?;
        match status.code() {
            Some(0) => {
                info!(pass = pass.number(), "ffmpeg pass finished");
                Ok(())
            },
            Some(code) => Err(failed(pass, &format!("ffmpeg exited with {code}"))),
            None => Err(failed(pass, "ffmpeg was terminated by a signal")),
        }
    }
}

fn failed(pass: Pass, reason: &str) -> JobError {
    JobError::EncodePass {
        pass: pass.number(),
        reason: String::from(reason),
    }
}

/// Folds one `key=value` line of `-progress` output into `progress`.
fn handle_ffmpeg_stdout_line(line: &str, progress: &mut EncodeProgress) -> FFmpegStdoutResult {
    let Some((key, value)) = line.split_once('=') else {
        return FFmpegStdoutResult::Continue;
    };
    let value = value.trim();
    match key.trim() {
        // out_time_ms is in microseconds as well, despite the name
        "out_time_us" | "out_time_ms" => {
            if let Ok(us) = value.parse::<usize>() {
                progress.out_time_ms = us / 1000;
            }
            FFmpegStdoutResult::Continue
        },
        "total_size" => {
            progress.total_size = value.parse().unwrap_or(progress.total_size);
            FFmpegStdoutResult::Continue
        },
        "speed" => {
            progress.speed = Some(String::from(value));
            FFmpegStdoutResult::Continue
        },
        "progress" if value == "end" => FFmpegStdoutResult::End,
        "progress" => FFmpegStdoutResult::Render,
        _ => FFmpegStdoutResult::Continue,
    }
}
