pub mod commands;

use crate::cli::commands::{AnalysisAction, Commands};
use crate::config::AppConfig;
use crate::db::{get_connection, service::DbService};

pub async fn run_cli(command: Commands, config_path: String) {
    let config = AppConfig::load(&config_path).expect("Failed to load config");

    match command {
        Commands::Serve => {
            panic!("Serve command should be intercepted by main.rs to boot actix-web");
        }
        Commands::Analysis { action } => {
            let pool = get_connection(&config.database).expect("DB error");
            let conn = pool.lock().unwrap();

            match action {
                AnalysisAction::List => match DbService::list_analyses(&conn) {
                    Ok(analyses) => {
                        if analyses.is_empty() {
                            println!("No analyses found.");
                        } else {
                            println!("{:<38} | {:<20} | {:<6} | {}", "ID", "Created At", "Refer", "Image");
                            println!("{:-<38}-+-{:-<20}-+-{:-<6}-+-{:-<20}", "", "", "", "");
                            for a in analyses {
                                println!(
                                    "{:<38} | {:<20} | {:<6} | {}",
                                    a.id.to_string(),
                                    a.created_at.format("%Y-%m-%d %H:%M:%S"),
                                    a.refer_to_derm,
                                    a.image_name.as_deref().unwrap_or("-"),
                                );
                            }
                        }
                    }
                    Err(e) => eprintln!("Error: {}", e),
                },
                AnalysisAction::Get { id } => match DbService::get_analysis(&conn, id) {
                    Ok(Some(analysis)) => match serde_json::to_string_pretty(&analysis) {
                        Ok(rendered) => println!("{}", rendered),
                        Err(e) => eprintln!("Error: {}", e),
                    },
                    Ok(None) => eprintln!("Analysis {} not found.", id),
                    Err(e) => eprintln!("Error: {}", e),
                },
                AnalysisAction::Delete { id } => match DbService::delete_analysis(&conn, id) {
                    Ok(true) => println!("Deleted analysis {}", id),
                    Ok(false) => eprintln!("Analysis {} not found.", id),
                    Err(e) => eprintln!("Error: {}", e),
                },
            }
        }
    }
}
