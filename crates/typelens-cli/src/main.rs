use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use typelens_config::{init_tracing, load_for_workspace, TypeLensConfig};
use typelens_index::{IndexDump, ProjectRegistry};
use typelens_lsp::{LocalSender, QueryService, TypeLensClient, TypeLensServer};
use url::Url;

mod render;

#[derive(Parser)]
#[command(
    name = "typelens",
    version,
    about = "Query Java type snapshots (lookup, search, hierarchy) from an index dump"
)]
struct Cli {
    /// Path to a typelens.toml (defaults to discovery from the current directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON index dump to query
    #[arg(long)]
    index: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a type by binary (`Ljava/util/Map;`) or dotted name
    Type(TypeArgs),
    /// Fuzzy search over type names
    SearchTypes(SearchArgs),
    /// Fuzzy search over package names
    SearchPackages(SearchArgs),
    /// Transitive supertypes of a type
    Supertypes(HierarchyArgs),
    /// Transitive subtypes of a type
    Subtypes(HierarchyArgs),
    /// Print the JSON schema of typelens.toml
    ConfigSchema,
}

#[derive(Args)]
struct TypeArgs {
    name: String,
    /// Include fields, methods and annotations
    #[arg(long)]
    details: bool,
    /// Emit JSON suitable for scripting
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SearchArgs {
    query: String,
    /// Only match names that literally contain the query
    #[arg(long)]
    no_camel_case: bool,
    /// Leave out JDK and other system library types
    #[arg(long)]
    exclude_system: bool,
    /// Emit JSON suitable for scripting
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct HierarchyArgs {
    name: String,
    /// Emit JSON suitable for scripting
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    if let Command::ConfigSchema = cli.command {
        print_json(&typelens_config::json_schema())?;
        return Ok(0);
    }

    let index_path = cli
        .index
        .as_deref()
        .ok_or_else(|| anyhow!("--index <DUMP> is required for queries"))?;
    let client = open_client(&config, index_path)?;

    match cli.command {
        Command::Type(args) => {
            let found = client.java_type(&args.name, args.details)?;
            if args.json {
                print_json(&found)?;
            } else {
                match &found {
                    Some(ty) => render::print_type(ty),
                    None => eprintln!("no type named `{}`", args.name),
                }
            }
        }
        Command::SearchTypes(args) => {
            let types =
                client.search_types(&args.query, !args.no_camel_case, !args.exclude_system)?;
            if args.json {
                print_json(&types)?;
            } else {
                render::print_type_list(&types);
            }
        }
        Command::SearchPackages(args) => {
            let packages =
                client.search_packages(&args.query, !args.no_camel_case, !args.exclude_system)?;
            if args.json {
                print_json(&packages)?;
            } else {
                for package in &packages {
                    println!("{package}");
                }
            }
        }
        Command::Supertypes(args) => {
            let types = client.super_types(&args.name)?;
            print_types(&types, args.json)?;
        }
        Command::Subtypes(args) => {
            let types = client.sub_types(&args.name)?;
            print_types(&types, args.json)?;
        }
        Command::ConfigSchema => {}
    }
    Ok(0)
}

fn load_config(explicit: Option<&Path>) -> Result<TypeLensConfig> {
    if let Some(path) = explicit {
        return TypeLensConfig::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    let cwd = std::env::current_dir().context("reading current directory")?;
    let (config, _path) = load_for_workspace(&cwd)?;
    Ok(config)
}

/// Registers the dump as a single project and returns a client for it.
fn open_client(config: &TypeLensConfig, index_path: &Path) -> Result<TypeLensClient> {
    let dump = IndexDump::load(index_path)?;
    let absolute = std::path::absolute(index_path)
        .with_context(|| format!("resolving {}", index_path.display()))?;
    let project_uri = Url::from_file_path(&absolute)
        .map_err(|()| anyhow!("cannot turn {} into a file URI", absolute.display()))?
        .to_string();

    let index = dump.into_index();
    tracing::debug!(
        target: "typelens.cli",
        project = %project_uri,
        types = index.len(),
        "index dump loaded"
    );
    let registry = ProjectRegistry::new();
    registry.register(&project_uri, Arc::new(index))?;

    let filter = config.system_libraries.compile()?;
    let service = QueryService::new(Arc::new(registry), config.query.clone())
        .with_system_libraries(filter);
    let sender = LocalSender::new(TypeLensServer::new(service));
    Ok(TypeLensClient::new(Arc::new(sender), project_uri)
        .with_timeouts(config.query.timeout(), config.query.search_timeout()))
}

fn print_types(types: &[typelens_proto::TypeData], json: bool) -> Result<()> {
    if json {
        print_json(&types)
    } else {
        render::print_type_list(types);
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
