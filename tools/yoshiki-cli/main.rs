use clap::Parser;
use yoshiki::prelude::*;
use yoshiki::tree;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

/// Inspect, validate and generate code for visual form builder documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the exported form document JSON file
    document_path: Option<String>,
    /// Optional path to a JSON object of field values to run the preview validation against
    values_path: Option<String>,

    /// Directory the generated schema.ts and form.tsx are written to
    #[arg(short, long, default_value = "generated")]
    out_dir: String,

    /// Spaces per indentation level in generated code
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Print debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

struct RunOptions {
    document_path: String,
    values_path: Option<String>,
    out_dir: String,
    indent: usize,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.human {
        run_interactive(cli.indent);
    } else {
        run_non_interactive(cli);
    }
}

fn run(options: RunOptions) {
    let total_start = Instant::now();

    // --- 1. Loading ---
    let load_start = Instant::now();
    let document = FormDocument::from_file(&options.document_path)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let values = options.values_path.as_deref().map(load_values);
    let load_duration = load_start.elapsed();

    println!(
        "\nLoaded form '{}' (version {}, created {})",
        document.name,
        document.version,
        document.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    print_tree(&document.components, 1);

    let fields = tree::leaf_fields(&document.components);
    println!(
        "\n{} component(s), {} field(s)",
        tree::flatten(&document.components).len(),
        fields.len()
    );
    for name in tree::duplicate_names(&document.components) {
        println!("  -> Warning: field name '{}' is used more than once", name);
    }

    // --- 2. Preview validation ---
    let validate_start = Instant::now();
    if let Some(values) = &values {
        println!("\nRunning preview validation...");
        for node in tree::flatten(&document.components) {
            if !node.conditions.is_empty() {
                let trace = explain(node, values);
                println!("  {}: {}", node.name, TraceFormatter::format_trace(&trace));
            }
        }

        match submit(&document.components, values) {
            Ok(submission) => {
                println!("  -> Submission accepted");
                match serde_json::to_string_pretty(&submission) {
                    Ok(json) => println!("{}", json),
                    Err(e) => exit_with_error(&format!("Failed to serialize submission: {}", e)),
                }
            }
            Err(report) => {
                println!("  -> {} field(s) failed validation", report.errors.len());
                for (field, message) in &report.errors {
                    println!("     {}: {}", field, message);
                }
            }
        }
    } else {
        println!("\nNo values file provided. Skipping preview validation.");
    }
    let validate_duration = validate_start.elapsed();

    // --- 3. Code generation ---
    let generate_start = Instant::now();
    let mut session = EditorSession::with_document(document).with_indent_width(options.indent);
    let generated = session
        .generate()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
        .clone();

    fs::create_dir_all(&options.out_dir).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to create output directory '{}': {}",
            options.out_dir, e
        ))
    });
    write_output(&options.out_dir, "schema.ts", &generated.schema);
    write_output(&options.out_dir, "form.tsx", &generated.component);
    for warning in &generated.warnings {
        println!("  -> Skipped fragment: {}", warning);
    }
    let generate_duration = generate_start.elapsed();

    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("File Loading:         {:?}", load_duration);
    println!("Preview Validation:   {:?}", validate_duration);
    println!("Code Generation:      {:?}", generate_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_duration);
    println!();
}

fn load_values(path: &str) -> FormValues {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read values file '{}': {}", path, e))
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Values file '{}' must be a JSON object of field values: {}",
            path, e
        ))
    })
}

fn print_tree(nodes: &[ComponentNode], depth: usize) {
    for node in nodes {
        let conditions = if node.conditions.is_empty() {
            String::new()
        } else {
            format!(" [{} condition(s)]", node.conditions.len())
        };
        println!(
            "{}- {} ({}) \"{}\"{}",
            "  ".repeat(depth),
            node.name,
            node.kind,
            node.label(),
            conditions
        );
        print_tree(node.children(), depth + 1);
    }
}

fn write_output(dir: &str, file_name: &str, content: &str) {
    let path = Path::new(dir).join(file_name);
    fs::write(&path, content).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to write '{}': {}", path.display(), e))
    });
    println!("  -> Wrote '{}'", path.display());
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli) {
    let document_path = cli.document_path.unwrap_or_else(|| {
        exit_with_error("Document path is required in non-interactive mode.");
    });

    run(RunOptions {
        document_path,
        values_path: cli.values_path,
        out_dir: cli.out_dir,
        indent: cli.indent,
    });
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(indent: usize) {
    println!("--- Yoshiki Interactive Mode ---");

    let document_path = prompt_for_input("Enter form document path", Some("data/form.json"));
    let values_path_str = prompt_for_input("Enter values path (optional, blank to skip)", None);
    let out_dir = prompt_for_input("Enter output directory", Some("generated"));

    let values_path = optional_input(values_path_str);

    run(RunOptions {
        document_path,
        values_path,
        out_dir,
        indent,
    });
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to flush stdout: {}", e));
    }
    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

/// Blank answers to an optional prompt mean "skip".
fn optional_input(answer: String) -> Option<String> {
    if answer.is_empty() { None } else { Some(answer) }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_answer_skips() {
        assert_eq!(optional_input(String::new()), None);
        assert_eq!(
            optional_input("data/values.json".to_string()).as_deref(),
            Some("data/values.json")
        );
    }
}
