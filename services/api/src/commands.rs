use crate::infra::open_manager;
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use wolf_hire::error::AppError;
use wolf_hire::workflows::hiring::router::parse_state_filter;
use wolf_hire::workflows::hiring::{
    ApplicationId, Command, CommandKind, HiringManager, ManagerError,
};

#[derive(Args, Debug)]
pub(crate) struct PositionsFileArgs {
    /// Positions file to read (and write back after changes)
    #[arg(long)]
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ApplicationFileArgs {
    /// Positions file to read (and write back after changes)
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Position to work on. Defaults to the first position in the file.
    #[arg(long)]
    pub(crate) position: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct AddPositionArgs {
    #[command(flatten)]
    pub(crate) target: PositionsFileArgs,
    /// Unique position name
    #[arg(long)]
    pub(crate) name: String,
    /// Weekly hours (5-20)
    #[arg(long)]
    pub(crate) hours: u32,
    /// Hourly pay rate (7-35)
    #[arg(long)]
    pub(crate) pay: u32,
    /// First applicant's first name. Positions are only stored once they hold an application.
    #[arg(long, requires_all = ["surname", "unity_id"])]
    pub(crate) first_name: Option<String>,
    #[arg(long, requires = "first_name")]
    pub(crate) surname: Option<String>,
    #[arg(long, requires = "first_name")]
    pub(crate) unity_id: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ListApplicationsArgs {
    #[command(flatten)]
    pub(crate) target: ApplicationFileArgs,
    /// Only list applications in this state ("All" lists everything)
    #[arg(long)]
    pub(crate) state: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitApplicationArgs {
    #[command(flatten)]
    pub(crate) target: ApplicationFileArgs,
    #[arg(long)]
    pub(crate) first_name: String,
    #[arg(long)]
    pub(crate) surname: String,
    #[arg(long)]
    pub(crate) unity_id: String,
}

#[derive(Args, Debug)]
pub(crate) struct UpdateApplicationArgs {
    #[command(flatten)]
    pub(crate) target: ApplicationFileArgs,
    #[arg(long)]
    pub(crate) id: u32,
    /// assign, reject, resubmit, return, schedule, process, hire or terminate
    #[arg(long)]
    pub(crate) command: CommandKind,
    /// Reviewer for assign, reason for reject and terminate
    #[arg(long)]
    pub(crate) payload: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteApplicationArgs {
    #[command(flatten)]
    pub(crate) target: ApplicationFileArgs,
    #[arg(long)]
    pub(crate) id: u32,
}

pub(crate) fn list_positions(args: PositionsFileArgs) -> Result<String, AppError> {
    let manager = open_manager(&args.file)?;
    let mut output = String::new();

    if manager.positions().is_empty() {
        output.push_str("No positions found\n");
    }
    for position in manager.positions() {
        let _ = writeln!(
            output,
            "{} ({} h/week, ${}/h): {} applications",
            position.name(),
            position.hours_per_week(),
            position.pay_rate(),
            position.applications().len()
        );
    }
    Ok(output)
}

pub(crate) fn add_position(args: AddPositionArgs) -> Result<String, AppError> {
    let AddPositionArgs {
        target,
        name,
        hours,
        pay,
        first_name,
        surname,
        unity_id,
    } = args;

    let mut manager = open_manager(&target.file)?;
    manager.add_new_position(&name, hours, pay)?;
    let mut output = format!("Added position {name}\n");

    match (first_name, surname, unity_id) {
        (Some(first_name), Some(surname), Some(unity_id)) => {
            let id = manager.add_application_to_position(&first_name, &surname, &unity_id)?;
            manager.save_positions_to_file(&target.file)?;
            let _ = writeln!(output, "Submitted application {id}");
        }
        _ => output.push_str("Position has no applications yet, so the file is unchanged\n"),
    }
    Ok(output)
}

pub(crate) fn list_applications(args: ListApplicationsArgs) -> Result<String, AppError> {
    let filter = parse_state_filter(args.state.as_deref()).map_err(ManagerError::from)?;
    let manager = select_position(&args.target)?;
    let rows = manager.application_rows(filter)?;

    let mut output = String::new();
    if let Some(name) = manager.active_position_name() {
        let _ = writeln!(output, "Applications for {name}");
    }
    for row in rows {
        let _ = writeln!(
            output,
            "{:>4}  {:<12}  {:<12}  {}",
            row.id,
            row.state.label(),
            row.unity_id,
            row.reviewer
        );
    }
    Ok(output)
}

pub(crate) fn submit_application(args: SubmitApplicationArgs) -> Result<String, AppError> {
    let mut manager = select_position(&args.target)?;
    let id =
        manager.add_application_to_position(&args.first_name, &args.surname, &args.unity_id)?;
    manager.save_positions_to_file(&args.target.file)?;
    Ok(format!("Submitted application {id}\n"))
}

pub(crate) fn update_application(args: UpdateApplicationArgs) -> Result<String, AppError> {
    let command = Command::new(args.command, args.payload).map_err(ManagerError::from)?;
    let mut manager = select_position(&args.target)?;

    let record = manager
        .execute_command(ApplicationId(args.id), &command)?
        .record();
    manager.save_positions_to_file(&args.target.file)?;

    let mut output = format!("Application {} is now {}\n", record.id, record.state);
    if !record.reviewer.is_empty() {
        let _ = writeln!(output, "Reviewer: {}", record.reviewer);
    }
    if !record.note.is_empty() {
        let _ = writeln!(output, "Note: {}", record.note);
    }
    Ok(output)
}

pub(crate) fn delete_application(args: DeleteApplicationArgs) -> Result<String, AppError> {
    let mut manager = select_position(&args.target)?;
    let id = ApplicationId(args.id);

    if manager.delete_application_by_id(id).is_none() {
        return Ok(format!("Application {id} not found; nothing changed\n"));
    }
    manager.save_positions_to_file(&args.target.file)?;
    Ok(format!("Deleted application {id}\n"))
}

fn select_position(target: &ApplicationFileArgs) -> Result<HiringManager, AppError> {
    let mut manager = open_manager(&target.file)?;
    if let Some(name) = &target.position {
        manager.load_position(name)?;
    }
    Ok(manager)
}
