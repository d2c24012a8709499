//! A small terminal front for the agenda.
//!
//! Usage:
//!   agenda list
//!   agenda add <title> <YYYY-MM-DD> <HH:MM> <HH:MM> [category]
//!   agenda remove <task-id>
//!   agenda export
//!   agenda login
//!   agenda events

use std::path::PathBuf;
use std::str::FromStr;

use unitrack::auth;
use unitrack::store;
use unitrack::Agenda;
use unitrack::AuthState;
use unitrack::CredentialStore;
use unitrack::GoogleAgenda;
use unitrack::GoogleCalendar;
use unitrack::GoogleIdentity;
use unitrack::SyncOutcome;
use unitrack::Task;
use unitrack::TaskId;
use unitrack::TaskStore;

fn data_dir() -> PathBuf {
    match std::env::var("UNITRACK_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from(".unitrack"),
    }
}

fn open_agenda() -> GoogleAgenda {
    let dir = data_dir();
    let tasks_file = dir.join("tasks.json");

    let store = match TaskStore::from_file(&tasks_file) {
        Ok(store) => store,
        Err(err) => {
            log::debug!("Not reusing a task file ({}), starting empty", err);
            TaskStore::new(&tasks_file)
        }
    };
    let credentials = CredentialStore::load(&dir.join("credential"));

    Agenda::new(store, credentials, GoogleCalendar::new(), GoogleIdentity::new())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(|s| s.as_str()).unwrap_or("list");

    let mut agenda = open_agenda();

    match command {
        "list" => {
            unitrack::utils::print_task_list(agenda.tasks());
        }
        "add" => {
            if args.len() < 5 {
                eprintln!("usage: agenda add <title> <YYYY-MM-DD> <HH:MM> <HH:MM> [category]");
                std::process::exit(2);
            }
            let category = args.get(5).map(|s| s.as_str()).unwrap_or("");
            let task = match Task::from_form(&args[1], &args[2], &args[3], &args[4], category) {
                Ok(task) => task,
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(2);
                }
            };

            match agenda.add_task(task).await {
                Err(err) => {
                    eprintln!("Unable to save the task: {}", err);
                    std::process::exit(1);
                }
                Ok((id, outcome)) => {
                    println!("Added task {}", id);
                    match outcome {
                        SyncOutcome::Skipped => {}
                        SyncOutcome::Created(_) => {
                            println!("The task was also added to your Google Calendar.")
                        }
                        SyncOutcome::Failed(reason) => {
                            println!("Warning: the task could not be added to your Google Calendar ({}).", reason)
                        }
                    }
                }
            }
        }
        "remove" => {
            let id = match args.get(1).map(|s| TaskId::from_str(s)) {
                Some(Ok(id)) => id,
                _ => {
                    eprintln!("usage: agenda remove <task-id>");
                    std::process::exit(2);
                }
            };
            match agenda.remove_task(&id) {
                Ok(task) => println!("Removed \"{}\"", task.title()),
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            }
        }
        "export" => match agenda.export_csv() {
            Ok(csv) => {
                let path = data_dir().join(store::EXPORT_FILE_NAME);
                if let Err(err) = std::fs::write(&path, csv) {
                    eprintln!("Unable to write {:?}: {}", path, err);
                    std::process::exit(1);
                }
                println!("Exported to {:?}", path);
            }
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
        },
        "login" => {
            println!("Open this URL in your browser and log in:");
            println!("  {}", auth::authorization_url());
            let answer =
                unitrack::utils::prompt_line("Then paste the URL you were redirected to: ")
                    .unwrap_or_default();
            let redirect_url = match url::Url::parse(&answer) {
                Ok(u) => u,
                Err(err) => {
                    eprintln!("This does not look like a URL: {}", err);
                    std::process::exit(2);
                }
            };
            match agenda.complete_login(&redirect_url).await {
                Ok(profile) => println!("Hi {}! You are now logged in.", profile.display_name()),
                Err(err) => {
                    eprintln!("Login failed: {}", err);
                    std::process::exit(1);
                }
            }
        }
        "events" => match agenda.start_session().await {
            AuthState::Authenticated(_) => {
                // The upcoming events are logged by start_session. Enable logging to see them
                println!("Done (run with RUST_LOG=info to see the event list).");
            }
            AuthState::Unauthenticated => {
                println!("You are not logged in. Run `agenda login` first.");
            }
        },
        other => {
            eprintln!("Unknown command `{}`", other);
            eprintln!("Commands: list, add, remove, export, login, events");
            std::process::exit(2);
        }
    }
}
