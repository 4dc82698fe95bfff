use clap::Subcommand;
use focusroom_core::{Color, Config, FocusApp, SubjectId};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// List subjects as JSON
    List,
    /// Add a subject
    Add {
        /// Subject name
        name: String,
        /// Colour as #RRGGBB (defaults to the next palette colour)
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename or recolour a subject
    Edit {
        /// Subject ID
        id: SubjectId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a subject (its history is kept)
    Remove {
        /// Subject ID
        id: SubjectId,
    },
    /// Make a subject the target of focus sessions
    Select {
        /// Subject ID
        id: SubjectId,
    },
}

pub async fn run(action: SubjectAction, config: &Config) -> CliResult {
    let mut app = open_app(config)?;
    let result = apply(&mut app, action);
    app.shutdown().await;
    result
}

fn apply(app: &mut FocusApp, action: SubjectAction) -> CliResult {
    match action {
        SubjectAction::List => print_json(app.subjects().list())?,
        SubjectAction::Add { name, color } => {
            let color = color.unwrap_or_else(|| {
                Color::from_palette(app.subjects().len()).to_string()
            });
            let id = app.add_subject(&name, &color)?;
            print_json(&app.subjects().get(id))?;
        }
        SubjectAction::Edit { id, name, color } => {
            let (current_name, current_color) = app
                .subjects()
                .get(id)
                .map(|s| (s.name.clone(), s.color.to_string()))
                .unwrap_or_default();
            app.edit_subject(
                id,
                name.as_deref().unwrap_or(&current_name),
                color.as_deref().unwrap_or(&current_color),
            )?;
            print_json(&app.subjects().get(id))?;
        }
        SubjectAction::Remove { id } => {
            let removed = app.remove_subject(id)?;
            println!("Subject removed: {} ({})", removed.name, removed.id);
        }
        SubjectAction::Select { id } => {
            app.select_subject(id)?;
            print_json(&app.subjects().get_selected())?;
        }
    }
    Ok(())
}
