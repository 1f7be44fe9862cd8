use std::fs;

use serde::Serialize;
use tracing::{error, info};

use crate::data::config::{load_config_from_env, SortieConfig};
use crate::data::universe::{load_universe, read_universe};
use crate::data::validate::validate_universe_file;
use crate::dispatch::{
    plan_dispatch, resolve_request, rule_tables, DispatchRequest, ResolveRequest,
};
use crate::parallel::{resolve_batch, WorkerPool};
use crate::server::{self, ServerState};

const USAGE: &str = "usage: sortie <serve|resolve|plan|batch|rules|validate>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Resolve,
    Plan,
    Batch,
    Rules,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("resolve") => Some(Command::Resolve),
        Some("plan") => Some(Command::Plan),
        Some("batch") => Some(Command::Batch),
        Some("rules") => Some(Command::Rules),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };

    let config = match load_config_from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    match command {
        Command::Serve => handle_serve(config),
        Command::Resolve => handle_resolve(args, &config),
        Command::Plan => handle_plan(args, &config),
        Command::Batch => handle_batch(args, &config),
        Command::Rules => handle_rules(args),
        Command::Validate => handle_validate(args, &config),
    }
}

fn print_json(value: &impl Serialize) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            1
        }
    }
}

fn read_json_arg<T: serde::de::DeserializeOwned>(path: Option<&String>, usage: &str) -> Result<T, i32> {
    let Some(path) = path else {
        eprintln!("{usage}");
        return Err(2);
    };
    let raw = fs::read_to_string(path).map_err(|err| {
        eprintln!("unable to read '{path}': {err}");
        1
    })?;
    serde_json::from_str(&raw).map_err(|err| {
        eprintln!("unable to parse json '{path}': {err}");
        1
    })
}

fn handle_serve(config: SortieConfig) -> i32 {
    let universe = load_universe(&config.universe_path);
    let bind_addr = config.bind_addr.clone();
    let state = ServerState { config, universe };
    match server::run_server(&bind_addr, &state) {
        Ok(()) => 0,
        Err(err) => {
            error!(error = %err, bind_addr = %bind_addr, "server error");
            1
        }
    }
}

fn handle_resolve(args: &[String], config: &SortieConfig) -> i32 {
    let request: ResolveRequest = match read_json_arg(args.get(2), "usage: sortie resolve <request.json>") {
        Ok(request) => request,
        Err(code) => return code,
    };
    match resolve_request(&request, &config.universe) {
        Ok(outcome) => print_json(&outcome),
        Err(err) => {
            eprintln!("resolve failed: {err}");
            1
        }
    }
}

fn handle_plan(args: &[String], config: &SortieConfig) -> i32 {
    let request: DispatchRequest =
        match read_json_arg(args.get(2), "usage: sortie plan <dispatch.json> [universe.json]") {
            Ok(request) => request,
            Err(code) => return code,
        };
    let universe_path = args.get(3).map(String::as_str).unwrap_or(config.universe_path.as_str());
    let universe = match read_universe(universe_path) {
        Ok(universe) => universe,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    match plan_dispatch(&request, &config.dispatch_settings(), &universe) {
        Ok(plan) => print_json(&plan),
        Err(err) => {
            eprintln!("dispatch rejected: {err}");
            1
        }
    }
}

fn handle_batch(args: &[String], config: &SortieConfig) -> i32 {
    let requests: Vec<ResolveRequest> =
        match read_json_arg(args.get(2), "usage: sortie batch <requests.json> [workers]") {
            Ok(requests) => requests,
            Err(code) => return code,
        };
    let workers = parse_usize_arg(args.get(3), "workers", 0);

    match resolve_batch(&requests, &config.universe, &WorkerPool::with_workers(workers)) {
        Ok(entries) => {
            let resolved = entries.iter().filter(|e| e.is_ok()).count();
            info!(requests = entries.len(), resolved, workers, "batch complete");
            print_json(&entries)
        }
        Err(err) => {
            eprintln!("unable to build worker pool: {err}");
            1
        }
    }
}

fn handle_rules(args: &[String]) -> i32 {
    let tables = rule_tables();
    if !args.iter().any(|arg| arg == "--table") {
        return print_json(&tables);
    }

    println!("ship\tid\tmissions");
    for row in &tables.ships {
        println!("{}\t{}\t{}", row.ship, row.id, join_missions(&row.missions));
    }
    println!();
    println!("destination\town\tother");
    for row in &tables.destinations {
        println!(
            "{}\t{}\t{}",
            row.destination,
            join_missions(&row.own),
            join_missions(&row.other)
        );
    }
    0
}

fn join_missions(missions: &[crate::dispatch::MissionKind]) -> String {
    if missions.is_empty() {
        return "-".to_string();
    }
    missions
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn handle_validate(args: &[String], config: &SortieConfig) -> i32 {
    let path = args.get(2).map(String::as_str).unwrap_or(config.universe_path.as_str());
    let report = match validate_universe_file(path, &config.universe) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    if report.has_errors() {
        eprintln!("validation failed: {} issue(s)", report.diagnostics.len());
        1
    } else {
        println!("validation passed: {path}");
        0
    }
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(&args(&["sortie", "plan"])), Some(Command::Plan));
        assert_eq!(parse_command(&args(&["sortie", "batch"])), Some(Command::Batch));
        assert_eq!(parse_command(&args(&["sortie", "launch"])), None);
        assert_eq!(parse_command(&args(&["sortie"])), None);
    }

    #[test]
    fn worker_argument_falls_back_on_garbage() {
        assert_eq!(parse_usize_arg(Some(&"4".to_string()), "workers", 0), 4);
        assert_eq!(parse_usize_arg(Some(&"four".to_string()), "workers", 0), 0);
        assert_eq!(parse_usize_arg(None, "workers", 3), 3);
    }
}
