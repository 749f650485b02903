//! CLI subcommands — cook, study, validate.

use crate::core::chef::Chef;
use crate::core::types::{Action, Operation};
use clap::{Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cook a material document with a recipe and print the result
    Cook {
        /// Path to the material (input) JSON document
        #[arg(short, long)]
        material: PathBuf,

        /// Path to the recipe (JSON, or YAML by extension)
        #[arg(short, long)]
        recipe: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent the result
        #[arg(long)]
        pretty: bool,

        /// Print the BLAKE3 digest of the result to stderr
        #[arg(long)]
        digest: bool,
    },

    /// Show the actions a recipe studies into, without reading any material
    Study {
        /// Path to the recipe (JSON, or YAML by extension)
        #[arg(short, long)]
        recipe: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: PlanFormat,
    },

    /// Check that a recipe studies cleanly
    Validate {
        /// Path to the recipe (JSON, or YAML by extension)
        #[arg(short, long)]
        recipe: PathBuf,
    },
}

/// How `study` prints its actions.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanFormat {
    Text,
    Json,
    Yaml,
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Cook {
            material,
            recipe,
            output,
            pretty,
            digest,
        } => cmd_cook(&material, &recipe, output.as_deref(), pretty, digest),
        Commands::Study { recipe, format } => cmd_study(&recipe, format),
        Commands::Validate { recipe } => cmd_validate(&recipe),
    }
}

/// Read a recipe file as JSON bytes. `.yaml`/`.yml` files are converted.
pub fn load_recipe(path: &Path) -> Result<Vec<u8>, String> {
    let content = std::fs::read(path)
        .map_err(|e| format!("cannot read recipe {}: {}", path.display(), e))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if !is_yaml {
        return Ok(content);
    }

    let text = String::from_utf8(content)
        .map_err(|e| format!("recipe {} is not UTF-8: {}", path.display(), e))?;
    let value: serde_json::Value = serde_yaml_ng::from_str(&text)
        .map_err(|e| format!("recipe YAML parse error in {}: {}", path.display(), e))?;
    serde_json::to_vec(&value).map_err(|e| format!("serialize error: {}", e))
}

fn load_material(path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| format!("cannot read material {}: {}", path.display(), e))
}

/// Study a recipe file. The material is an empty document.
fn study_file(recipe: &Path) -> Result<Vec<Action>, String> {
    let recipe = load_recipe(recipe)?;
    let chef = Chef::new(b"{}", &recipe).map_err(|e| e.to_string())?;
    chef.study().map_err(|e| e.to_string())
}

fn cmd_cook(
    material: &Path,
    recipe: &Path,
    output: Option<&Path>,
    pretty: bool,
    digest: bool,
) -> Result<(), String> {
    let material_bytes = load_material(material)?;
    let recipe_bytes = load_recipe(recipe)?;

    let mut chef = Chef::new(&material_bytes, &recipe_bytes).map_err(|e| e.to_string())?;
    chef.cook().map_err(|e| e.to_string())?;

    let rendered = if pretty {
        chef.pretty_result()
    } else {
        chef.json_result()
    };

    match output {
        Some(path) => std::fs::write(path, format!("{}\n", rendered))
            .map_err(|e| format!("cannot write {}: {}", path.display(), e))?,
        None => println!("{}", rendered),
    }

    if digest {
        eprintln!("{}", chef.digest());
    }
    Ok(())
}

fn cmd_study(recipe: &Path, format: PlanFormat) -> Result<(), String> {
    let actions = study_file(recipe)?;
    println!("{}", render_plan(recipe, &actions, format)?);
    Ok(())
}

fn cmd_validate(recipe: &Path) -> Result<(), String> {
    let actions = study_file(recipe)?;
    println!("OK: {} ({} actions)", recipe.display(), actions.len());
    Ok(())
}

/// Render studied actions for display.
fn render_plan(recipe: &Path, actions: &[Action], format: PlanFormat) -> Result<String, String> {
    match format {
        PlanFormat::Json => {
            serde_json::to_string_pretty(actions).map_err(|e| format!("serialize error: {}", e))
        }
        PlanFormat::Yaml => {
            serde_yaml_ng::to_string(actions).map_err(|e| format!("serialize error: {}", e))
        }
        PlanFormat::Text => {
            let mut out = format!("Studying: {} ({} actions)\n", recipe.display(), actions.len());
            for action in actions {
                let symbol = match action.operation {
                    Operation::Swap => "=",
                    Operation::Concat => "+",
                    Operation::SwapMap => "*",
                };
                out.push_str(&format!("  {} {}\n", symbol, action));
            }
            Ok(out.trim_end().to_string())
        }
    }
}
