use tracing::info;

use crate::error::JobError;
use crate::ffmpeg::encoder::TwoPassEncoder;
use crate::ffmpeg::parameters::{Pass, PassParameters};
use crate::ffmpeg::probe::probe_duration;
use crate::ffmpeg::Toolchain;
use crate::fstools::require_regular_file;
use crate::job::EncodeJob;
use crate::passlog::PassLog;
use crate::planner::BitratePlan;
use crate::report::SizeReport;

#[derive(Debug)]
pub enum Outcome {
    Encoded(SizeReport),
    DryRun,
}

/// Validate, probe, plan, encode, report. Any error aborts the job.
pub fn run(job: &EncodeJob) -> Result<Outcome, JobError> {
    require_regular_file(&job.input)?;
    let tools = Toolchain::locate()?;

    let duration = probe_duration(&tools.ffprobe, &job.input)?;
    if !(duration > 0.0) {
        return Err(JobError::DurationUnreadable {
            path: job.input.clone(),
            reason: format!("duration is {duration}s"),
        });
    }

    let plan = BitratePlan::compute(duration, job.target_mb, job.audio_kbps);
    if !plan.is_viable() {
        return Err(JobError::Planning(duration));
    }
    info!(?plan, "planned bitrates");
    print_plan(job, duration, &plan);

    let prefix = job.passlog_prefix();
    let parameters = PassParameters::new(&job.input, &job.output, &prefix, &plan, job.audio_kbps);
    let encoder = TwoPassEncoder::new(&tools.ffmpeg, parameters, duration);

    if job.dry_run {
        println!("{}", encoder.describe(Pass::Analysis));
        println!("{}", encoder.describe(Pass::Final));
        return Ok(Outcome::DryRun);
    }

    let mut passlog = PassLog::new(prefix.clone(), job.keep_logs);
    encoder.encode(&mut passlog)?;
    let report = SizeReport::for_file(&job.output)?;
    Ok(Outcome::Encoded(report))
}

fn print_plan(job: &EncodeJob, duration: f64, plan: &BitratePlan) {
    println!("Input:    {:?} ({:.2}s)", job.input, duration);
    println!("Output:   {:?}", job.output);
    println!("Target:   {} MB", job.target_mb);
    println!("Bitrate:  total {} kbps, video {} kbps, audio {} kbps, buffer {} kbps",
        plan.total_kbps_display(),
        plan.video_kbps_rounded(),
        job.audio_kbps,
        plan.buffer_kbps);
}
