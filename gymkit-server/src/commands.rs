use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use gymkit_client::{ClientError, GymClient};
use gymkit_types::{CreateRoutineRequest, Routine, SignInRequest, UpdateRoutineRequest};

use crate::cli::RoutineCommands;

pub async fn handle_routine_command(cmd: RoutineCommands) -> Result<()> {
    let client = GymClient::from_env()?;

    match cmd {
        RoutineCommands::List { json } => list_routines(&client, json).await,
        RoutineCommands::Show { slug } => {
            let routine = client.get_routine(&slug).await.map_err(describe)?;
            print_routine(&routine);
            Ok(())
        }
        RoutineCommands::Create { name, description } => {
            let routine = client
                .create_routine(&CreateRoutineRequest { name, description })
                .await
                .map_err(describe)?;
            println!("{} Created routine {} ({})", "✓".green(), routine.name, routine.id);
            Ok(())
        }
        RoutineCommands::Update { slug, name, description } => {
            let routine = client
                .update_routine(&slug, &UpdateRoutineRequest { name, description })
                .await
                .map_err(describe)?;
            println!("{} Updated routine {}", "✓".green(), routine.id);
            Ok(())
        }
        RoutineCommands::Delete { slug } => {
            client.delete_routine(&slug).await.map_err(describe)?;
            println!("{} Deleted routine {}", "✓".green(), slug);
            Ok(())
        }
    }
}

pub async fn handle_login(email: String, password: String) -> Result<()> {
    let client = GymClient::from_env()?;
    let session = client
        .sign_in(&SignInRequest {
            email,
            password,
            callback_url: None,
        })
        .await
        .map_err(describe)?;

    println!("{} Signed in as {}", "✓".green(), session.user.email);
    println!("export GYMKIT_SESSION_TOKEN={}", session.token);
    Ok(())
}

pub async fn handle_whoami() -> Result<()> {
    let client = GymClient::from_env()?;
    match client.get_session().await.map_err(describe)? {
        Some(session) => {
            println!("{} <{}>", session.user.name.bold(), session.user.email);
            println!("  Session expires: {}", session.expires_at.to_rfc2822());
        }
        None => println!("{}", "Not signed in.".yellow()),
    }
    Ok(())
}

async fn list_routines(client: &GymClient, json: bool) -> Result<()> {
    let routines = client.list_routines().await.map_err(describe)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&routines)?);
        return Ok(());
    }

    if routines.is_empty() {
        println!("{}", "No routines yet.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Name", "Description", "Last done"]);
    for routine in &routines {
        table.add_row(vec![
            Cell::new(&routine.id),
            Cell::new(&routine.name),
            Cell::new(routine.description.as_deref().unwrap_or("-")),
            Cell::new(routine.last_done.format("%a %b %d %Y")),
        ]);
    }

    println!("{table}");
    println!("\n{} routines total", routines.len());
    Ok(())
}

fn print_routine(routine: &Routine) {
    println!("{}", routine.name.cyan().bold());
    println!("  ID: {}", routine.id);
    if let Some(description) = &routine.description {
        println!("  Description: {}", description);
    }
    println!("  Last done: {}", routine.last_done.format("%a %b %d %Y"));
    println!("  Created: {}", routine.created_at.format("%a %b %d %Y"));
}

/// Backend errors read better with their type than with the bare message.
fn describe(err: ClientError) -> anyhow::Error {
    if let ClientError::Api(api) = &err {
        if api.status_code == 307 {
            return anyhow::anyhow!(
                "Not signed in. Run `gymkit login` and export GYMKIT_SESSION_TOKEN"
            );
        }
        return anyhow::anyhow!("{} ({} {})", api.message, api.status_code, api.error_type);
    }
    err.into()
}
