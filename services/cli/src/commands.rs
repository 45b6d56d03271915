use crate::render::{render_json, render_lookup, render_text};
use clap::{Args, ValueEnum};
use gradebook::config::{AppConfig, CourseConfig};
use gradebook::error::AppError;
use gradebook::grading::{BatchOutcome, StudentId};
use gradebook::ingest::{read_marks_from_path, write_grades};
use gradebook::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct BatchSource {
    /// Headerless marks file with rows of `id,mark,mark,...`
    #[arg(long)]
    pub(crate) marks: PathBuf,
    /// Course definition (JSON); falls back to GRADEBOOK_COURSE, then the standard course
    #[arg(long)]
    pub(crate) course: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    #[command(flatten)]
    pub(crate) source: BatchSource,
    /// Also write `Student ID,Total Marks,Grade` rows to this CSV file
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Report format printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Grade against the configured cutoffs without moderation
    #[arg(long)]
    pub(crate) no_moderation: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LookupArgs {
    #[command(flatten)]
    pub(crate) source: BatchSource,
    /// Student id to look up
    #[arg(long)]
    pub(crate) student: u64,
}

pub(crate) fn run_grade(args: GradeArgs) -> Result<(), AppError> {
    let GradeArgs {
        source,
        output,
        format,
        no_moderation,
    } = args;

    let (course, outcome) = grade_batch(&source, no_moderation)?;

    if let Some(path) = output {
        let file = std::fs::File::create(&path)?;
        write_grades(&outcome, file)?;
        info!(path = %path.display(), "grades written");
    }

    let summary = outcome.summary(&course.name);
    match format {
        OutputFormat::Text => render_text(&summary),
        OutputFormat::Json => render_json(&summary)?,
    }

    Ok(())
}

pub(crate) fn run_lookup(args: LookupArgs) -> Result<(), AppError> {
    let (_, outcome) = grade_batch(&args.source, false)?;
    let result = outcome.student(StudentId(args.student))?;
    render_lookup(result, outcome.final_policy());
    Ok(())
}

fn grade_batch(
    source: &BatchSource,
    no_moderation: bool,
) -> Result<(CourseConfig, BatchOutcome), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let course = match &source.course {
        Some(path) => CourseConfig::from_path(path)?,
        None => config.course()?,
    };
    let records = read_marks_from_path(&source.marks)?;
    info!(course = %course.name, records = records.len(), "marks loaded");

    let engine = course.engine();
    let moderation = engine.moderation_enabled() && !no_moderation;
    let outcome = engine.with_moderation(moderation).run(&records)?;
    Ok((course, outcome))
}
