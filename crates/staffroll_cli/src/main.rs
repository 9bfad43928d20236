//! Staffroll command-line boundary.
//!
//! Usage: staffroll [--db <PATH>] <department|sport|employee> <ACTION>
//!
//! Successful results print as pretty JSON on stdout. Rejected requests
//! print the error body on stderr and exit with status 1.

mod api;
mod config;

use anyhow::{Context, Result};
use api::{Api, ApiResult};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use config::AppConfig;
use log::info;
use serde::Serialize;
use staffroll_core::db::open_db;
use staffroll_core::{DepartmentDto, EmployeeDto, SportDto};
use std::process::ExitCode;

/// Staffroll - employee, department and sport records
#[derive(Parser, Debug)]
#[command(name = "staffroll")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage departments
    Department {
        #[command(subcommand)]
        action: DepartmentCommand,
    },
    /// Manage sports
    Sport {
        #[command(subcommand)]
        action: SportCommand,
    },
    /// Manage employees and their sports
    Employee {
        #[command(subcommand)]
        action: EmployeeCommand,
    },
}

#[derive(Subcommand, Debug)]
enum DepartmentCommand {
    /// Create a department
    Add { name: String },
    /// List departments that are not deleted
    List,
    /// Show one department
    Get { id: i64 },
    /// Rename a department
    Update { id: i64, name: String },
    /// Soft-delete a department
    Delete { id: i64 },
    /// List active employees of a department
    Employees { id: i64 },
}

#[derive(Subcommand, Debug)]
enum SportCommand {
    /// Create a sport
    Add { name: String },
    /// List active sports
    List,
    /// Show one sport
    Get { id: i64 },
    /// Rename a sport
    Update { id: i64, name: String },
    /// Deactivate a sport
    Delete { id: i64 },
    /// List active employees enrolled in a sport
    Employees { id: i64 },
}

#[derive(Subcommand, Debug)]
enum EmployeeCommand {
    /// Create an employee
    Add(EmployeeArgs),
    /// List active employees
    List,
    /// Show one employee
    Get { id: i64 },
    /// Replace an employee's details
    Update {
        id: i64,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
    /// Deactivate an employee
    Delete { id: i64 },
    /// Enroll an employee in a sport
    AddSport { employee_id: i64, sport_id: i64 },
    /// Withdraw an employee from a sport
    RemoveSport { employee_id: i64, sport_id: i64 },
}

#[derive(Args, Debug)]
struct EmployeeArgs {
    #[arg(long)]
    name: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    dob: NaiveDate,

    #[arg(long)]
    email: String,

    #[arg(long)]
    department_id: i64,

    #[arg(long)]
    street: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    state: String,

    #[arg(long)]
    zip: String,
}

impl EmployeeArgs {
    fn into_dto(self) -> EmployeeDto {
        EmployeeDto {
            id: 0,
            name: self.name,
            dob: self.dob,
            age: 0,
            email: self.email,
            department_id: self.department_id,
            department_name: None,
            street: self.street,
            city: self.city,
            state: self.state,
            zip: self.zip,
            sports: Vec::new(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    cli.config.init_logging()?;
    let conn = open_db(&cli.config.db_path)
        .with_context(|| format!("failed to open database {}", cli.config.db_path.display()))?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        staffroll_core::core_version()
    );

    let api = Api::new(&conn);
    match cli.command {
        Command::Department { action } => run_department(&api, action),
        Command::Sport { action } => run_sport(&api, action),
        Command::Employee { action } => run_employee(&api, action),
    }
}

fn run_department(api: &Api<'_>, action: DepartmentCommand) -> Result<ExitCode> {
    match action {
        DepartmentCommand::Add { name } => render(api.add_department(&DepartmentDto::named(name))),
        DepartmentCommand::List => render(api.list_departments()),
        DepartmentCommand::Get { id } => render(api.get_department(id)),
        DepartmentCommand::Update { id, name } => {
            render(api.update_department(id, &DepartmentDto { id, name }))
        }
        DepartmentCommand::Delete { id } => render_empty(api.delete_department(id)),
        DepartmentCommand::Employees { id } => render(api.department_employees(id)),
    }
}

fn run_sport(api: &Api<'_>, action: SportCommand) -> Result<ExitCode> {
    match action {
        SportCommand::Add { name } => render(api.add_sport(&SportDto::named(name))),
        SportCommand::List => render(api.list_sports()),
        SportCommand::Get { id } => render(api.get_sport(id)),
        SportCommand::Update { id, name } => render(api.update_sport(id, &SportDto { id, name })),
        SportCommand::Delete { id } => render_empty(api.delete_sport(id)),
        SportCommand::Employees { id } => render(api.sport_employees(id)),
    }
}

fn run_employee(api: &Api<'_>, action: EmployeeCommand) -> Result<ExitCode> {
    match action {
        EmployeeCommand::Add(fields) => render(api.add_employee(&fields.into_dto())),
        EmployeeCommand::List => render(api.list_employees()),
        EmployeeCommand::Get { id } => render(api.get_employee(id)),
        EmployeeCommand::Update { id, fields } => {
            let mut dto = fields.into_dto();
            dto.id = id;
            render(api.update_employee(id, &dto))
        }
        EmployeeCommand::Delete { id } => render_empty(api.delete_employee(id)),
        EmployeeCommand::AddSport {
            employee_id,
            sport_id,
        } => render(api.add_sport_to_employee(employee_id, sport_id)),
        EmployeeCommand::RemoveSport {
            employee_id,
            sport_id,
        } => render(api.remove_sport_from_employee(employee_id, sport_id)),
    }
}

fn render<T: Serialize>(result: ApiResult<T>) -> Result<ExitCode> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => render_error(&error),
    }
}

fn render_empty(result: ApiResult<()>) -> Result<ExitCode> {
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => render_error(&error),
    }
}

fn render_error(error: &api::ApiError) -> Result<ExitCode> {
    eprintln!("{}", serde_json::to_string_pretty(error)?);
    Ok(ExitCode::FAILURE)
}
