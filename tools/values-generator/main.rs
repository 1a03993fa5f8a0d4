use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::{Map, Value, json};
use std::fs;
use yoshiki::form::{ComponentNode, FieldKind, FormDocument};
use yoshiki::tree;

/// A CLI tool to generate preview values for the fields of a form document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the exported form document JSON file
    document_path: String,

    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_values.json")]
    output: String,

    /// Probability of leaving a field empty, between 0 and 1
    #[arg(long, default_value_t = 0.1)]
    empty_rate: f64,

    /// Probability of producing a value that breaks the field's rules, between 0 and 1
    #[arg(long, default_value_t = 0.1)]
    invalid_rate: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    for (flag, rate) in [("--empty-rate", cli.empty_rate), ("--invalid-rate", cli.invalid_rate)] {
        if !(0.0..=1.0).contains(&rate) {
            eprintln!("Error: {} ({}) must be between 0 and 1", flag, rate);
            std::process::exit(1);
        }
    }

    let document = FormDocument::from_file(&cli.document_path)?;
    let fields = tree::leaf_fields(&document.components);
    println!(
        "Generating values for {} field(s) of '{}'...",
        fields.len(),
        document.name
    );

    let mut values = Map::new();
    for field in fields {
        if rng.random_bool(cli.empty_rate) {
            println!("-> Left '{}' empty.", field.name);
            continue;
        }
        let invalid = rng.random_bool(cli.invalid_rate);
        let value = generate_value(&mut rng, field, invalid);
        if invalid {
            println!("-> Generated invalid value for '{}'.", field.name);
        }
        values.insert(field.name.clone(), value);
    }

    let json_output = serde_json::to_string_pretty(&Value::Object(values))?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved values to '{}'",
        cli.output
    );

    Ok(())
}

fn generate_value(rng: &mut ThreadRng, field: &ComponentNode, invalid: bool) -> Value {
    match field.kind {
        FieldKind::Text | FieldKind::Password | FieldKind::Textarea | FieldKind::RichText => {
            let min = field.prop_limit("minLength").unwrap_or(1.0) as usize;
            let max = field.prop_limit("maxLength").unwrap_or(24.0) as usize;
            let len = if invalid && min > 1 {
                rng.random_range(0..min)
            } else {
                rng.random_range(min.max(1)..=max.max(min.max(1)))
            };
            json!(random_word(rng, len))
        }
        FieldKind::Email if invalid => json!(random_word(rng, 8)),
        FieldKind::Email => json!(format!(
            "{}@{}.com",
            random_word(rng, 6),
            random_word(rng, 5)
        )),
        FieldKind::Tel | FieldKind::PhoneNumber => {
            let digits = if invalid {
                rng.random_range(1..7)
            } else {
                rng.random_range(10..=11)
            };
            json!(
                (0..digits)
                    .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
                    .collect::<String>()
            )
        }
        FieldKind::Number => {
            let min = field.prop_f64("min").unwrap_or(0.0);
            let max = field.prop_f64("max").unwrap_or(100.0).max(min);
            if invalid {
                json!(max + rng.random_range(1..50) as f64)
            } else {
                json!(rng.random_range(min as i64..=max as i64))
            }
        }
        FieldKind::Currency => json!(format!("{:.2}", rng.random_range(0.0..1000.0))),
        FieldKind::Url => json!(format!("https://{}.example", random_word(rng, 7))),
        FieldKind::Select | FieldKind::Radio => {
            let options: Vec<&str> = field
                .prop("options")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|o| o.get("value").and_then(Value::as_str))
                        .collect()
                })
                .unwrap_or_default();
            if options.is_empty() {
                Value::Null
            } else {
                json!(options[rng.random_range(0..options.len())])
            }
        }
        FieldKind::Checkbox | FieldKind::Switch => json!(!invalid && rng.random_bool(0.8)),
        FieldKind::Date => json!(format!(
            "2025-{:02}-{:02}",
            rng.random_range(1..=12),
            rng.random_range(1..=28)
        )),
        FieldKind::Signature => json!(format!("data:image/png;base64,{}", random_word(rng, 16))),
        FieldKind::DynamicList => {
            let count = rng.random_range(0..4);
            json!((0..count).map(|_| json!({})).collect::<Vec<_>>())
        }
        FieldKind::Grid
        | FieldKind::Flex
        | FieldKind::Row
        | FieldKind::Column
        | FieldKind::Section => Value::Null,
    }
}

fn random_word(rng: &mut ThreadRng, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
        .collect()
}
