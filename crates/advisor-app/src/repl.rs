use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use advisor_api::HttpAdvisorClient;
use advisor_session::{FileStorage, SessionController, SessionPhase, View};
use advisor_types::profile::fields;
use advisor_types::{default_target_intake, ContactInfo, ProfileForm, UserRole};

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::profile_file::{form_from_profile, load_profile_form};
use crate::surface::TerminalSurface;
use crate::transcript::Transcript;

/// Run interactive REPL mode
pub async fn run_repl_mode(cli: &Cli, config: ClientConfig) -> Result<()> {
    println!("{}", "🎓 Study-Abroad Advisor".bright_cyan().bold());
    println!("{}", format!("Backend: {}", config.api.base_url).bright_black());
    println!("{}", "Type 'exit' or 'quit' to exit, or '/help' to see available commands\n".bright_black());

    let session_store = FileStorage::new(config.session_path())?;
    let local_store = FileStorage::new(config.local_path())?;
    if cli.fresh {
        session_store.clear()?;
    }

    let transcript = match Transcript::new(&config.logs_dir()) {
        Ok(t) => {
            log::debug!("Transcript: {}", t.path().display());
            Some(t)
        }
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    let client = HttpAdvisorClient::new(config.api.clone())?;
    let controller = SessionController::new(
        client.clone(),
        TerminalSurface::new(config.language, transcript),
        session_store,
        local_store,
    )
    .with_language(config.language)
    .with_user_role(config.role);

    let mut rl = DefaultEditor::new()?;

    if !controller.restore_session() {
        match controller.phase() {
            SessionPhase::ProfileSubmitted => controller.go_to(View::Chat),
            _ => {
                if !run_setup(&controller, &mut rl, cli).await? {
                    return Ok(());
                }
            }
        }
    }

    loop {
        let line = match rl.readline(&format!("{} ", ">".bright_green().bold())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(input);

        match input {
            "exit" | "quit" => break,
            "/help" => print_help(),
            "/handoff" => {
                if let Some(contact) = prompt_contact(&mut rl)? {
                    if let Err(e) = controller.request_human_handoff(contact).await {
                        log::debug!("Handoff failed: {}", e);
                    }
                }
            }
            "/new" => {
                // The controller has already reported a storage failure
                if controller.start_new_consultation().is_err() {
                    continue;
                }
                if !run_setup(&controller, &mut rl, cli).await? {
                    break;
                }
            }
            "/health" => match client.health().await {
                Ok(status) => println!("{}", serde_json::to_string_pretty(&status)?),
                Err(e) => eprintln!("{} {}", "✗".red(), e.to_string().red()),
            },
            _ if input.starts_with("/role") => {
                let arg = input.trim_start_matches("/role").trim();
                match arg.parse::<UserRole>() {
                    Ok(role) => {
                        if let Ok(path) = controller.role_view_path(role) {
                            println!("{}{}", config.api.base_url.bright_black(), path);
                        }
                    }
                    Err(e) => eprintln!("{} {} (use: /role student|parent)", "✗".red(), e),
                }
            }
            _ if input.starts_with('/') => {
                eprintln!("{} Unknown command: {} (try /help)", "✗".red(), input);
            }
            _ => {
                if let Err(e) = controller.send_message(input).await {
                    log::debug!("Chat turn failed: {}", e);
                }
            }
        }
    }

    println!("{}", "Goodbye!".bright_cyan());
    Ok(())
}

/// Collect and submit a profile until it is accepted.
///
/// Returns `false` when the user abandons setup.
async fn run_setup(controller: &SessionController, rl: &mut DefaultEditor, cli: &Cli) -> Result<bool> {
    controller.go_to(View::Setup);

    let mut from_file = match &cli.profile_file {
        Some(path) => Some(load_profile_form(path)?),
        None => None,
    };

    loop {
        let form = match from_file.take() {
            Some(form) => form,
            None => {
                let initial = controller
                    .profile()
                    .map(|p| form_from_profile(&p))
                    .transpose()?
                    .unwrap_or_default();
                match prompt_profile(rl, initial)? {
                    Some(form) => form,
                    None => return Ok(false),
                }
            }
        };

        // Failures are already reported on the surface; prompt again
        match controller.submit_profile(&form).await {
            Ok(_) => return Ok(true),
            Err(e) => log::debug!("Profile submission failed: {}", e),
        }
    }
}

fn prompt_profile(rl: &mut DefaultEditor, mut form: ProfileForm) -> Result<Option<ProfileForm>> {
    println!("{}", "Fields marked * are required. Ctrl-D cancels.".bright_black());

    if form.get(fields::TARGET_INTAKE).is_none() {
        form.set(fields::TARGET_INTAKE, default_target_intake(Local::now().date_naive()));
    }

    for &field in fields::REQUIRED {
        let initial = form.get(field).unwrap_or("").to_string();
        let Some(value) = prompt(rl, &format!("* {}", label(field)), &initial)? else {
            return Ok(None);
        };
        form.set(field, value);
    }

    let initial = form.countries.join(", ");
    let Some(countries) = prompt(rl, "* countries (comma separated, e.g. US, UK)", &initial)? else {
        return Ok(None);
    };
    form.countries.clear();
    for code in countries.split(',') {
        form = form.with_country(code.trim());
    }

    for &field in fields::OPTIONAL {
        let initial = form.get(field).unwrap_or("").to_string();
        let Some(value) = prompt(rl, &label(field), &initial)? else {
            return Ok(None);
        };
        form.set(field, value);
    }

    Ok(Some(form))
}

fn prompt_contact(rl: &mut DefaultEditor) -> Result<Option<ContactInfo>> {
    println!("{}", "Leave a way for a human advisor to reach you.".bright_black());
    let mut contact = ContactInfo::default();
    for (name, slot) in [
        ("name", &mut contact.name),
        ("email", &mut contact.email),
        ("phone", &mut contact.phone),
        ("LINE id", &mut contact.line_user_id),
    ] {
        let Some(value) = prompt(rl, name, "")? else {
            return Ok(None);
        };
        *slot = value;
    }
    Ok(Some(contact))
}

fn prompt(rl: &mut DefaultEditor, label: &str, initial: &str) -> Result<Option<String>> {
    match rl.readline_with_initial(&format!("{}: ", label), (initial, "")) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn label(field: &str) -> String {
    field.replace('_', " ")
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan());
    println!("  /handoff              ask a human advisor to contact you");
    println!("  /new                  start a new consultation");
    println!("  /role student|parent  show the role-specific page for your profile");
    println!("  /health               check the backend");
    println!("  exit, quit            leave");
}
