//! evaltrack CLI
//!
//! Command-line client for the student evaluation backend:
//! - Log in and out
//! - Browse and submit assignments
//! - Keep the internship diary
//! - Manage courses, cohorts and enrollments (teachers)

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use evaltrack::api::{assignments, classes, courses, stagedays, users};
use evaltrack::auth;
use evaltrack::config::{self, Config};
use evaltrack::logging;
use evaltrack::models::{self, DiaryDraft, LoginForm, NewCohort, NewCourse, NewSubject, RegisterForm};
use evaltrack::render::{render_list, render_one, OutputFormat};
use evaltrack::views::{AssignmentDetail, BoardError, CourseBoard, Diary, StudentDashboard};
use evaltrack::{ApiClient, ApiError, FileSession, SessionStore};

#[derive(Parser)]
#[command(name = "evaltrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Client for the student evaluation backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and EVALTRACK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Config file (default: searched in standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and log in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// Password (prompted twice when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List your assignments
    Assignments {
        /// Only show assignments with this status
        #[arg(short, long, value_enum)]
        status: Option<StatusFilter>,
    },

    /// Show one assignment
    Assignment { id: String },

    /// Submit links for an open assignment
    Submit {
        id: String,
        /// GitHub repository URL (keeps the stored one when omitted)
        #[arg(long)]
        github: Option<String>,
        /// Publication URL (keeps the stored one when omitted)
        #[arg(long)]
        publication: Option<String>,
    },

    /// Internship diary
    Diary {
        #[command(subcommand)]
        command: DiaryCommand,
    },

    /// Courses, subjects and enrollments
    Courses {
        #[command(subcommand)]
        command: CourseCommand,
    },

    /// Cohorts
    Classes {
        #[command(subcommand)]
        command: ClassCommand,
    },

    /// List accounts
    Users {
        /// Only students
        #[arg(long)]
        students: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum DiaryCommand {
    /// List entries, newest first
    List,
    /// Log a day
    Add {
        /// Day (YYYY-MM-DD or "today")
        #[arg(short, long, value_parser = parse_day, default_value = "today")]
        date: NaiveDate,
        #[arg(short = 'm', long)]
        description: String,
        /// Image URL
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Change an entry; omitted fields keep their value
    Edit {
        id: String,
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
        #[arg(short = 'm', long)]
        description: Option<String>,
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Remove an entry
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum CourseCommand {
    /// List your courses
    List,
    /// Create a course
    Create {
        name: String,
    },
    /// Add a subject to a course
    AddSubject {
        course_id: String,
        name: String,
    },
    /// Enroll a student in a course
    Enroll {
        course_id: String,
        student_id: String,
    },
}

#[derive(Subcommand)]
pub enum ClassCommand {
    /// List cohorts
    List {
        /// Only cohorts of this course
        #[arg(long)]
        course: Option<String>,
    },
    /// Create a cohort for a course
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        program: String,
        #[arg(long)]
        course: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Upcoming,
    Completed,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let session: Arc<dyn SessionStore> = Arc::new(FileSession::new(&config.session.file));
    tracing::debug!(api = %config.api.base_url, session = %config.session.file, "Starting");

    // A 401 while logging in means bad credentials, not an expired session
    let authenticating = matches!(cli.command, Commands::Login { .. } | Commands::Register { .. });

    match run(cli, &config, Arc::clone(&session)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match api_error(&e) {
                Some(api_err)
                    if !authenticating && auth::handle_error(session.as_ref(), api_err).is_some() =>
                {
                    eprintln!("Session expired, please log in again");
                }
                _ => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_with_env(path).context("Could not load config"),
        None => Config::load_default().context("Could not load config"),
    }
}

/// The API error behind a command failure, if any
fn api_error(err: &anyhow::Error) -> Option<&ApiError> {
    if let Some(api_err) = err.downcast_ref::<ApiError>() {
        return Some(api_err);
    }
    match err.downcast_ref::<BoardError>() {
        Some(BoardError::Api(api_err)) => Some(api_err),
        _ => None,
    }
}

async fn run(cli: Cli, config: &Config, session: Arc<dyn SessionStore>) -> anyhow::Result<()> {
    let format = cli.format;

    let client = ApiClient::new(config.api.client_config(), session)?;
    let out = io::stdout();

    match cli.command {
        Commands::Config { output } => {
            let content = config::generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Could not write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            users::login(&client, &LoginForm { email, password }).await?;

            let user = users::me(&client).await?;
            println!("Logged in as {} ({})", user.full_name(), auth::landing_route(&user));
        }

        Commands::Register {
            first_name,
            last_name,
            email,
            phone,
            password,
        } => {
            let (password, confirm_password) = match password {
                Some(p) => (p.clone(), p),
                None => (prompt("Password: ")?, prompt("Repeat password: ")?),
            };
            let form = RegisterForm {
                first_name,
                last_name,
                email,
                phone,
                password,
                confirm_password,
            };
            users::register(&client, &form).await?;
            println!("Account created for {}", form.email.trim());
        }

        Commands::Logout => {
            users::logout(&client)?;
            println!("Logged out");
        }

        Commands::Whoami => {
            require_login(&client)?;
            let user = users::me(&client).await?;
            render_one(&user, format, out)?;
        }

        Commands::Assignments { status } => {
            require_login(&client)?;
            let dashboard = StudentDashboard::from_assignments(assignments::list(&client).await?);
            let shown = match status {
                Some(StatusFilter::Upcoming) => dashboard.upcoming,
                Some(StatusFilter::Completed) => dashboard.completed,
                None => [dashboard.upcoming, dashboard.completed].concat(),
            };
            if shown.is_empty() && format == OutputFormat::Table {
                println!("No assignments.");
            } else {
                render_list(&shown, format, out)?;
            }
        }

        Commands::Assignment { id } => {
            require_login(&client)?;
            let detail = AssignmentDetail::load(&client, &id).await?;
            let assignment = detail.assignment();
            render_one(assignment, format, out)?;

            if format == OutputFormat::Table {
                if !assignment.description.is_empty() {
                    println!();
                    println!("{}", assignment.description);
                }
                println!();
                match &detail {
                    AssignmentDetail::Graded(a) => {
                        println!("Feedback: {}", a.feedback.as_deref().unwrap_or("-"));
                        println!("GitHub: {}", a.github_url.as_deref().unwrap_or("-"));
                        println!("Publication: {}", a.publication_url.as_deref().unwrap_or("-"));
                    }
                    AssignmentDetail::Open { submission, .. } => {
                        println!("GitHub: {}", or_dash(&submission.github_url));
                        println!("Publication: {}", or_dash(&submission.publication_url));
                        println!();
                        println!("Submit with: evaltrack submit {} --github <url>", id);
                    }
                }
            }
        }

        Commands::Submit {
            id,
            github,
            publication,
        } => {
            require_login(&client)?;
            let mut detail = AssignmentDetail::load(&client, &id).await?;
            let Some(submission) = detail.submission_mut() else {
                bail!("Assignment {} has already been graded", id);
            };
            if let Some(url) = github {
                submission.github_url = url;
            }
            if let Some(url) = publication {
                submission.publication_url = url;
            }
            detail.submit(&client).await?;
            println!("Submission saved for {}", detail.assignment().name);
        }

        Commands::Diary { command } => {
            require_login(&client)?;
            run_diary(&client, command, format, out).await?;
        }

        Commands::Courses { command } => {
            require_login(&client)?;
            run_courses(&client, command, format, out).await?;
        }

        Commands::Classes { command } => {
            require_login(&client)?;
            match command {
                ClassCommand::List { course } => {
                    let cohorts = classes::list(&client, course.as_deref()).await?;
                    render_list(&cohorts, format, out)?;
                }
                ClassCommand::Create {
                    name,
                    program,
                    course,
                } => {
                    let cohort = NewCohort {
                        name,
                        program,
                        course_id: course,
                    };
                    let created = classes::create(&client, &cohort).await?;
                    println!("Created cohort {} ({})", created.name, created.id);
                }
            }
        }

        Commands::Users { students } => {
            require_login(&client)?;
            let mut accounts = users::list(&client).await?;
            if students {
                accounts = models::students(accounts);
            }
            render_list(&accounts, format, out)?;
        }
    }

    Ok(())
}

async fn run_diary<W: Write>(
    client: &ApiClient,
    command: DiaryCommand,
    format: OutputFormat,
    out: W,
) -> anyhow::Result<()> {
    match command {
        DiaryCommand::List => {
            let diary = Diary::load(client).await?;
            if diary.is_empty() && format == OutputFormat::Table {
                println!("No diary entries yet.");
            } else {
                render_list(diary.entries(), format, out)?;
            }
        }
        DiaryCommand::Add {
            date,
            description,
            image,
        } => {
            let draft = DiaryDraft {
                date: Some(date),
                description,
                image,
            };
            let entry = stagedays::create(client, &draft).await?;
            println!("Logged {} ({})", entry.date, entry.id);
        }
        DiaryCommand::Edit {
            id,
            date,
            description,
            image,
        } => {
            let mut diary = Diary::load(client).await?;
            let entry = diary
                .get(&id)
                .with_context(|| format!("No diary entry with id {}", id))?;

            let mut draft = DiaryDraft::from_entry(entry);
            if date.is_some() {
                draft.date = date;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(image) = image {
                draft.image = image;
            }
            let entry = diary.edit(client, &id, &draft).await?;
            println!("Updated {} ({})", entry.date, entry.id);
        }
        DiaryCommand::Delete { id } => {
            stagedays::delete(client, &id).await?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

async fn run_courses<W: Write>(
    client: &ApiClient,
    command: CourseCommand,
    format: OutputFormat,
    out: W,
) -> anyhow::Result<()> {
    match command {
        CourseCommand::List => {
            let list = courses::list(client).await?;
            render_list(&list, format, out)?;
        }
        CourseCommand::Create { name } => {
            let created = courses::create(client, &NewCourse { name }).await?;
            println!("Created course {} ({})", created.name, created.id);
        }
        CourseCommand::AddSubject { course_id, name } => {
            let subject = courses::add_subject(client, &course_id, &NewSubject { name }).await?;
            println!("Added subject {} ({})", subject.name, subject.id);
        }
        CourseCommand::Enroll {
            course_id,
            student_id,
        } => {
            let mut board = CourseBoard::load(client).await?;
            board.select(&course_id)?;
            board.enroll_student(client, &student_id).await?;

            let course = board.selected().map(|c| c.name.as_str()).unwrap_or("course");
            println!("Enrolled {} in {}", student_id, course);
        }
    }
    Ok(())
}

fn require_login(client: &ApiClient) -> anyhow::Result<()> {
    if let Err(route) = auth::require_token(client.session().as_ref()) {
        bail!("Not logged in, run `evaltrack login` first ({})", route);
    }
    Ok(())
}

/// Read one line from stdin after printing `label` to stderr
fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let value = line.trim_end_matches(&['\r', '\n'][..]).to_string();
    if value.is_empty() {
        bail!("No input given");
    }
    Ok(value)
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    if s.eq_ignore_ascii_case("today") {
        return Ok(chrono::Local::now().date_naive());
    }
    models::date::parse_date(s).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
