//! Command-line front end for the admission record manager.
//!
//! # Responsibility
//! - Resolve configuration, start logging and connect to the store once.
//! - Translate one subcommand into controller actions and print the result.

use admission_core::controller::PLACEHOLDER_TEXT;
use admission_core::credentials;
use admission_core::{
    init_logging, AdmissionController, AdmissionEntry, AdmissionForm, AdmissionRepository,
    AdmissionService, AppConfig, DocumentAdmissionRepository, DocumentId, FormField, Notice,
    SqliteDocumentStore, View,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const COLUMN_WIDTH: usize = 15;
const ID_COLUMN_WIDTH: usize = 32;

#[derive(Parser, Debug)]
#[command(
    name = "admission",
    about = "Register, list, edit and delete student admission records",
    version
)]
struct Cli {
    /// Path to the service account key (default: serviceAccountKey.json)
    #[arg(long, global = true)]
    credentials: Option<PathBuf>,
    /// Document collection holding admission records
    #[arg(long, global = true)]
    collection: Option<String>,
    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a new admission
    Submit(SubmitArgs),
    /// Show all admission records
    List,
    /// Edit an existing record; omitted fields keep their current value
    Edit {
        #[arg(value_parser = parse_document_id)]
        id: DocumentId,
        #[command(flatten)]
        fields: FieldOverrides,
    },
    /// Delete a record
    Delete {
        #[arg(value_parser = parse_document_id)]
        id: DocumentId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    /// Contact number, `+91` followed by ten digits
    #[arg(long, default_value = "")]
    contact: String,
    /// Male or Female
    #[arg(long, default_value = "")]
    gender: String,
    /// Science, Arts or Commerce
    #[arg(long, default_value = "")]
    stream: String,
}

#[derive(Args, Debug)]
struct FieldOverrides {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    contact: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    stream: Option<String>,
}

impl FieldOverrides {
    fn apply(self, form: &mut AdmissionForm) {
        let overrides = [
            (FormField::Name, self.name),
            (FormField::Email, self.email),
            (FormField::Contact, self.contact),
            (FormField::Gender, self.gender),
            (FormField::Stream, self.stream),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                form.set_field(field, value);
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(message) => return report_startup_error(&message),
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let (_credentials, conn) = match credentials::connect(&config.credentials_path) {
        Ok(connected) => connected,
        Err(err) => return report_startup_error(&err.to_string()),
    };
    let store = match SqliteDocumentStore::new(&conn, &config.collection) {
        Ok(store) => store,
        Err(err) => return report_startup_error(&err.to_string()),
    };
    info!(
        "event=cli_start module=cli status=ok collection={}",
        store.collection()
    );

    let service = AdmissionService::new(DocumentAdmissionRepository::new(store));
    let mut controller = AdmissionController::new(service);
    let notices = run(cli.command, &mut controller);

    print_notices(&notices);
    print_view(&controller.state().view);

    if has_errors(&notices) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, String> {
    let mut config = AppConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(path) = &cli.credentials {
        config.credentials_path = path.clone();
    }
    if let Some(collection) = &cli.collection {
        config
            .set_collection(collection)
            .map_err(|err| err.to_string())?;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = dir.clone();
    }
    Ok(config)
}

fn run<R: AdmissionRepository>(
    command: Command,
    controller: &mut AdmissionController<R>,
) -> Vec<Notice> {
    match command {
        Command::Submit(args) => {
            *controller.form_mut() = AdmissionForm {
                name: args.name,
                email: args.email,
                contact: args.contact,
                gender: args.gender,
                stream: args.stream,
            };
            controller.submit()
        }
        Command::List => controller.view_records(),
        Command::Edit { id, fields } => {
            let mut notices = controller.view_records();
            if !notices.is_empty() {
                return notices;
            }
            notices.extend(controller.begin_edit(&id));
            let Some(draft) = controller.draft_mut() else {
                return notices;
            };
            fields.apply(draft);
            notices.extend(controller.save_edit());
            notices
        }
        Command::Delete { id, yes } => {
            let confirmed = yes || confirm("Are you sure you want to delete this record?");
            controller.delete(&id, confirmed)
        }
    }
}

fn has_errors(notices: &[Notice]) -> bool {
    notices.iter().any(Notice::is_error)
}

fn confirm(question: &str) -> bool {
    print!("{question} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"),
        Err(_) => false,
    }
}

fn parse_document_id(value: &str) -> Result<DocumentId, String> {
    DocumentId::parse(value).ok_or_else(|| "record id cannot be empty".to_string())
}

fn report_startup_error(message: &str) -> ExitCode {
    eprintln!("[Startup Error] {message}");
    ExitCode::FAILURE
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        if notice.is_error() {
            eprintln!("[{}] {}", notice.title, notice.message);
        } else {
            println!("[{}] {}", notice.title, notice.message);
        }
    }
}

fn print_view(view: &View) {
    match view {
        View::Placeholder => println!("{PLACEHOLDER_TEXT}"),
        View::Unavailable => println!("No data: records could not be loaded."),
        View::Records(entries) => print_records(entries),
        View::Editing { id, draft } => {
            println!("Edit Student Record {id}");
            for field in FormField::ALL {
                println!("  {:<9}{}", format!("{}:", field.label()), draft.field(field));
            }
        }
    }
}

fn print_records(entries: &[AdmissionEntry]) {
    println!("Current Student Records");
    let mut header = format!("{:<ID_COLUMN_WIDTH$}", "ID");
    for field in FormField::ALL {
        header.push_str(&format!(" {:<COLUMN_WIDTH$}", field.label()));
    }
    println!("{header}");

    for entry in entries {
        let record = &entry.record;
        println!(
            "{:<ID_COLUMN_WIDTH$} {:<COLUMN_WIDTH$} {:<COLUMN_WIDTH$} {:<COLUMN_WIDTH$} {:<COLUMN_WIDTH$} {:<COLUMN_WIDTH$}",
            entry.id.as_str(),
            record.name,
            record.email,
            record.contact,
            record.gender.as_str(),
            record.stream.as_str(),
        );
    }
}
