use clap::{Parser, ValueEnum};
use flowc::prelude::*;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// How the compiled flow is printed.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Entry task, counts, and one infix condition per task
    Summary,
    /// Each condition rendered as a tree
    Tree,
    /// The full compiled artifact as JSON
    Json,
}

/// Compiles a conversation flow bundle into condition-guarded tasks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the bundle JSON file (nodes, edges, tasks, ddts)
    bundle_path: String,

    /// Write the compiled artifact to this path
    #[arg(short, long)]
    output: Option<String>,

    /// What to print after compiling
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Reject dialogue steps of unknown type
    #[arg(long)]
    strict_steps: bool,

    /// Extra action kind that drives a dialogue template (repeatable)
    #[arg(long = "dialogue-action", value_name = "NAME")]
    dialogue_actions: Vec<String>,

    /// Log compiler internals
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let total_start = Instant::now();

    // --- 1. Loading and normalization ---
    let load_start = Instant::now();
    let bundle = FlowBundle::from_file(&cli.bundle_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load bundle '{}': {}",
            &cli.bundle_path, e
        ))
    });
    let load_duration = load_start.elapsed();

    // --- 2. Compilation ---
    let compile_start = Instant::now();
    let mut builder = Compiler::builder(bundle.flow).strict_step_types(cli.strict_steps);
    for action in &cli.dialogue_actions {
        builder = builder.with_dialogue_action(action);
    }
    let compiled = builder
        .build()
        .compile(&bundle.catalog)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let compile_duration = compile_start.elapsed();

    // --- 3. Output ---
    match cli.format {
        OutputFormat::Summary => print_summary(&compiled),
        OutputFormat::Tree => print_trees(&compiled),
        OutputFormat::Json => {
            let json = compiled
                .to_json_pretty()
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            println!("{}", json);
        }
    }

    if let Some(path) = &cli.output {
        compiled
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        eprintln!("Compiled flow written to '{}'", path);
    }

    eprintln!("\n--- Performance Summary ---");
    eprintln!("Bundle Loading:       {:?}", load_duration);
    eprintln!("Compilation:          {:?}", compile_duration);
    eprintln!("Total Execution:      {:?}", total_start.elapsed());
}

fn print_summary(compiled: &CompilationResult) {
    if compiled.is_empty() {
        println!("No entry node found; nothing was compiled.");
        return;
    }

    println!(
        "Entry task: {}",
        compiled.entry_task_id.as_deref().unwrap_or("<none>")
    );
    let dialogue_tasks = compiled
        .tasks
        .iter()
        .filter(|t| matches!(t.source, TaskSource::DdtRecoveryAction { .. }))
        .count();
    println!(
        "Compiled tasks: {} ({} from flow rows, {} from dialogue templates)",
        compiled.tasks.len(),
        compiled.tasks.len() - dialogue_tasks,
        dialogue_tasks
    );

    println!("\n--- Tasks ---");
    for task in &compiled.tasks {
        println!(
            "[{}] {} ({}) when {}",
            task.source.node_id(),
            task.id,
            task.action,
            ConditionFormatter::format(&task.condition)
        );
    }

    let mut waited_on = BTreeSet::new();
    for task in &compiled.tasks {
        task.condition.task_dependencies(&mut waited_on);
    }
    let dangling: Vec<_> = waited_on
        .iter()
        .filter(|id| compiled.task(id).is_none())
        .collect();
    if !dangling.is_empty() {
        println!("\nWarning: conditions wait on tasks that were never compiled: {:?}", dangling);
    }

    for (node_id, expansions) in &compiled.expansions {
        for expansion in expansions {
            println!(
                "\nDialogue '{}' under node '{}': {} steps",
                expansion.ddt_id,
                node_id,
                expansion.steps.len()
            );
            for step in &expansion.steps {
                for recovery in &step.recoveries {
                    println!(
                        "  {} / {} -> {:?}",
                        step.step_id, recovery.recovery_id, recovery.action_ids
                    );
                }
            }
        }
    }
}

fn print_trees(compiled: &CompilationResult) {
    for task in &compiled.tasks {
        println!("{} ({})", task.id, task.action);
        print!(
            "{}",
            DisplayCondition {
                condition: &task.condition
            }
        );
        println!();
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
