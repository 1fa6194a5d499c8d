//! Command execution against a registry controller

use crate::cli::Command;
use crate::output;
use anyhow::{bail, Context, Result};
use plotline_core::models::UpdateLocation;
use plotline_core::navigator::find_path_by_id;
use plotline_core::registry::{ConfirmPrompt, RegistryController, CATEGORIES_FAILED};
use plotline_core::services::{LocationsService, LookupsService};
use serde::Serialize;
use serde_json::json;
use std::io::{self, BufRead, Write};

/// Asks on stderr and reads the answer from stdin
pub struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{} [y/N] ", message);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    writeln!(out, "{}", text)?;
    Ok(())
}

/// Run one command; operator notifications stay queued on the controller
pub async fn run<L, K, W>(
    controller: &mut RegistryController<L, K>,
    command: &Command,
    json: bool,
    prompt: &dyn ConfirmPrompt,
    out: &mut W,
) -> Result<()>
where
    L: LocationsService,
    K: LookupsService,
    W: Write,
{
    match command {
        Command::Summary => {
            if !controller.refresh().await {
                return Ok(());
            }
            if json {
                print_json(out, controller.metrics())?;
            } else {
                write!(out, "{}", output::render_metrics(controller.metrics()))?;
            }
        }

        Command::List { path } => {
            if !controller.refresh().await {
                return Ok(());
            }
            drill(controller, path)?;
            print_rows(controller, json, out)?;
        }

        Command::Discover { level } => {
            if !controller.load_categories().await {
                // every level stays discoverable without categories
                controller.demote_errors(CATEGORIES_FAILED);
            }
            if !controller.discoverable_levels().contains(level) {
                bail!("{} is not discoverable", level.plural_label());
            }
            if !controller.refresh().await {
                return Ok(());
            }
            controller.enter_discovery(*level);
            print_rows(controller, json, out)?;
        }

        Command::Tree { path } => {
            if !controller.refresh().await {
                return Ok(());
            }
            drill(controller, path)?;
            let nodes = controller.render_tree();
            if json {
                print_json(out, &nodes)?;
            } else {
                write!(out, "{}", output::render_outline(&nodes))?;
            }
        }

        Command::Find { key } => {
            if !controller.refresh().await {
                return Ok(());
            }
            let path = find_path_by_id(controller.tree(), key);
            let Some(node) = path.last() else {
                bail!("No node matches '{}'", key);
            };

            if json {
                let ancestors: Vec<&str> = path.iter().map(|n| n.id.as_str()).collect();
                print_json(out, &json!({ "node": node, "path": ancestors }))?;
            } else {
                let trail: Vec<String> = path
                    .iter()
                    .map(|n| format!("{} {}", n.level.label(), n.display_name()))
                    .collect();
                writeln!(out, "{}", trail.join(" > "))?;
                writeln!(out, "key:      {}", node.id)?;
                if let Some(real_id) = node.real_id {
                    writeln!(out, "id:       {}", real_id)?;
                }
                writeln!(out, "code:     {}", node.code)?;
                writeln!(out, "children: {}", node.children.len())?;
            }
        }

        Command::Categories => {
            if !controller.load_categories().await {
                return Ok(());
            }
            if json {
                print_json(out, controller.categories())?;
            } else {
                for category in controller.categories() {
                    let marker = if category.is_spatial { "spatial" } else { "" };
                    writeln!(out, "{:<24} {:<32} {}", category.code, category.label, marker)?;
                }
            }
        }

        Command::Values { code } => {
            let values = controller.lookup_values(code).await;
            if json {
                print_json(out, &values)?;
            } else {
                for value in &values {
                    writeln!(out, "{:<16} {}", value.code, value.name)?;
                }
            }
        }

        Command::Rename { key, name } => {
            if !controller.refresh().await {
                return Ok(());
            }
            if controller.begin_edit(key).is_none() {
                bail!("No node matches '{}'", key);
            }
            controller
                .update(key, UpdateLocation::new().with_name(name.as_str()))
                .await;
        }

        Command::Delete { key, yes } => {
            if !controller.refresh().await {
                return Ok(());
            }
            if controller.begin_edit(key).is_none() {
                bail!("No node matches '{}'", key);
            }
            let accept_all = |_: &str| true;
            let prompt: &dyn ConfirmPrompt = if *yes { &accept_all } else { prompt };
            if !controller.delete(key, prompt).await {
                tracing::info!("Nothing deleted");
            }
        }
    }

    Ok(())
}

fn drill<L, K>(controller: &mut RegistryController<L, K>, path: &[String]) -> Result<()>
where
    L: LocationsService,
    K: LookupsService,
{
    for key in path {
        if !controller.drill_down(key) {
            bail!("No node matches '{}'", key);
        }
    }
    Ok(())
}

fn print_rows<L, K, W>(
    controller: &RegistryController<L, K>,
    json: bool,
    out: &mut W,
) -> Result<()>
where
    L: LocationsService,
    K: LookupsService,
    W: Write,
{
    let navigation = controller.navigation();
    let level = navigation.display_level();
    let rows = controller.visible_rows();
    let columns = controller.columns();

    if json {
        return print_json(
            out,
            &json!({
                "level": level,
                "breadcrumbs": navigation.breadcrumbs(),
                "canAdd": navigation.can_add(),
                "columns": columns,
                "rows": rows,
            }),
        );
    }

    writeln!(out, "{}", output::render_breadcrumbs(navigation.breadcrumbs()))?;
    if let Some(level) = navigation.discovery_level() {
        writeln!(out, "All {}", level.plural_label().to_lowercase())?;
    }
    writeln!(out)?;
    if rows.is_empty() {
        writeln!(out, "No {} here", level.plural_label().to_lowercase())?;
    } else {
        write!(out, "{}", output::render_table(columns, &rows))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;
