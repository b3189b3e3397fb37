use std::path::{Path, PathBuf};

use crate::planner::BitratePlan;

pub const OUTPUT_HEIGHT: u32 = 720;
pub const AUDIO_CHANNELS: u32 = 2;
pub const AUDIO_SAMPLE_RATE: u32 = 48_000;

#[cfg(windows)]
const NULL_SINK: &str = "NUL";
#[cfg(not(windows))]
const NULL_SINK: &str = "/dev/null";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pass {
    /// Video-only statistics pass; output is discarded.
    Analysis,
    /// Real encode with audio, muxed into the output file.
    Final,
}

impl Pass {
    pub fn number(&self) -> u8 {
        match self {
            Pass::Analysis => 1,
            Pass::Final => 2,
        }
    }
}

/// Builds the ffmpeg argument list for either pass of one job.
pub struct PassParameters<'a> {
    input: &'a Path,
    output: &'a Path,
    passlog_prefix: &'a Path,
    plan: &'a BitratePlan,
    audio_kbps: f64,
}

impl<'a> PassParameters<'a> {
    pub fn new(input: &'a Path, output: &'a Path, passlog_prefix: &'a Path, plan: &'a BitratePlan, audio_kbps: f64) -> Self {
        PassParameters {
            input,
            output,
            passlog_prefix,
            plan,
            audio_kbps,
        }
    }

    pub fn parameters(&self, pass: Pass) -> Vec<PathBuf> {
        let mut args = vec![
            PathBuf::from("-y"),
            PathBuf::from("-hide_banner"), PathBuf::from("-nostats"),
            PathBuf::from("-loglevel"), PathBuf::from("warning"),
            PathBuf::from("-progress"), PathBuf::from("pipe:1"),
            PathBuf::from("-i"), PathBuf::from(self.input),
        ];
        args.extend(self.video_parameters(pass));

        match pass {
            Pass::Analysis => {
                args.push(PathBuf::from("-an"));
                args.push(PathBuf::from("-f"));
                args.push(PathBuf::from("mp4"));
                args.push(PathBuf::from(NULL_SINK));
            },
            Pass::Final => {
                args.extend([
                    PathBuf::from("-pix_fmt"), PathBuf::from("yuv420p"),
                    PathBuf::from("-c:a"), PathBuf::from("aac"),
                    PathBuf::from("-b:a"), PathBuf::from(format!("{}k", self.audio_kbps)),
                    PathBuf::from("-ac"), PathBuf::from(AUDIO_CHANNELS.to_string()),
                    PathBuf::from("-ar"), PathBuf::from(AUDIO_SAMPLE_RATE.to_string()),
                    PathBuf::from("-movflags"), PathBuf::from("+faststart"),
                ]);
                args.push(PathBuf::from(self.output));
            },
        }
        args
    }

    fn video_parameters(&self, pass: Pass) -> Vec<PathBuf> {
        let video = format!("{}k", self.plan.video_kbps_rounded());
        vec![
            // -2 keeps the aspect ratio with an even width
            PathBuf::from("-vf"), PathBuf::from(format!("scale=-2:{OUTPUT_HEIGHT}")),
            PathBuf::from("-c:v"), PathBuf::from("libx264"),
            PathBuf::from("-b:v"), PathBuf::from(&video),
            PathBuf::from("-maxrate"), PathBuf::from(&video),
            PathBuf::from("-bufsize"), PathBuf::from(format!("{}k", self.plan.buffer_kbps)),
            PathBuf::from("-pass"), PathBuf::from(pass.number().to_string()),
            PathBuf::from("-passlogfile"), PathBuf::from(self.passlog_prefix),
        ]
    }
}

/// Renders an argument list the way it would be typed in a shell.
pub fn command_line(program: &Path, args: &[PathBuf]) -> String {
    let mut parts = vec![program.display().to_string()];
    for arg in args {
        let arg = arg.to_string_lossy();
        if arg.contains(|c: char| c.is_whitespace() || c == '\'') {
            parts.push(format!("'{}'", arg.replace('\'', r"'\''")));
        } else {
            parts.push(arg.into_owned());
        }
    }
    parts.join(" ")
}
