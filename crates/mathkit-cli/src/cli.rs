//! Command definitions and their execution.
//!
//! Every command writes to a caller-supplied sink so the binary and the tests
//! share one code path.

use crate::config::{MathkitConfig, OutputConfig};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mathkit_calculator::{Calculator, expr, format, symbolic};
use mathkit_types::{CalculationResult, FieldMap, FieldValue};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Education calculators from the command line
#[derive(Parser, Debug)]
#[command(name = "mathkit")]
#[command(about = "Solve education calculators and inspect expressions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print the configuration in use to stderr before running
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a calculator by name or title
    Solve {
        /// Calculator name (`quadratic`) or display title (`Quadratic Equation Solver`)
        id: String,

        /// Input field as `name=value`, repeatable
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, FieldValue)>,

        /// JSON file holding an object of fields; `-f` entries take precedence
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Suppress worked steps
        #[arg(long)]
        no_steps: bool,
    },

    /// List every registered calculator
    List {
        #[arg(long)]
        json: bool,
    },

    /// Parse an expression, optionally evaluating or differentiating it
    Parse {
        expression: String,

        /// Variable names, comma separated
        #[arg(long, value_delimiter = ',', default_value = "x")]
        vars: Vec<String>,

        /// Values for the variables, in order
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        at: Vec<f64>,

        /// Also differentiate with respect to the first variable
        #[arg(long)]
        derive: bool,
    },
}

/// Parse a `name=value` argument; numbers become numeric fields, anything else text
pub fn parse_field(arg: &str) -> Result<(String, FieldValue), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{arg}'"));
    }

    let value = if let Ok(i) = value.trim().parse::<i64>() {
        FieldValue::Integer(i)
    } else if let Ok(f) = value.trim().parse::<f64>() {
        FieldValue::Float(f)
    } else {
        FieldValue::String(value.to_string())
    };
    Ok((name.to_string(), value))
}

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    title: &'a str,
}

impl Cli {
    pub fn execute(&self, config: &MathkitConfig, out: &mut impl Write) -> Result<()> {
        match &self.command {
            Command::Solve { id, fields, input, json, no_steps } => {
                let mut map = match input {
                    Some(path) => read_fields(path)?,
                    None => FieldMap::new(),
                };
                map.extend(fields.iter().cloned());

                let calculator = Calculator::new();
                info!(calculator = %id, fields = map.len(), "solving");
                let result = calculator.solve(id, &map);

                if *json {
                    write_json(out, &result, config.output.pretty_json)
                } else {
                    let output = OutputConfig {
                        show_steps: config.output.show_steps && !no_steps,
                        ..config.output.clone()
                    };
                    write_result(out, &result, &output)
                }
            }
            Command::List { json } => {
                let calculator = Calculator::new();
                let list = calculator.list();
                if *json {
                    let entries: Vec<ListEntry> = list.iter().map(|&(name, title)| ListEntry { name, title }).collect();
                    return write_json(out, &entries, config.output.pretty_json);
                }
                let width = list.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
                for (name, title) in list {
                    writeln!(out, "{name:<width$}  {title}")?;
                }
                Ok(())
            }
            Command::Parse { expression, vars, at, derive } => parse_command(out, expression, vars, at, *derive),
        }
    }
}

fn read_fields(path: &Path) -> Result<FieldMap> {
    let contents = fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&contents).with_context(|| format!("'{}' is not valid JSON", path.display()))?;
    let fields = FieldValue::map_from_json(&value)?;
    debug!(path = %path.display(), fields = fields.len(), "read input fields");
    Ok(fields)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    writeln!(out, "{rendered}")?;
    Ok(())
}

fn write_result(out: &mut impl Write, result: &CalculationResult, output: &OutputConfig) -> Result<()> {
    writeln!(out, "{}", result.text)?;

    if output.show_steps {
        if let Some(steps) = &result.steps {
            writeln!(out)?;
            writeln!(out, "Steps:")?;
            for step in steps {
                // Markdown bold markers carry no meaning on a terminal
                writeln!(out, "{}", step.replace("**", ""))?;
            }
        }
    }

    if let Some(plot) = &result.plot_data {
        writeln!(out)?;
        if output.show_plot {
            write_json(out, plot, output.pretty_json)?;
        } else {
            writeln!(
                out,
                "({} chart with {} dataset(s); enable output.show_plot to print it)",
                plot.plot_type.as_str(),
                plot.datasets.len()
            )?;
        }
    }
    Ok(())
}

fn parse_command(out: &mut impl Write, expression: &str, vars: &[String], at: &[f64], derive: bool) -> Result<()> {
    let names: Vec<&str> = vars.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).collect();
    let function = expr::parse(expression, &names).with_context(|| format!("Could not parse '{expression}'"))?;

    writeln!(out, "Expression: {}", function.ast())?;
    writeln!(out, "Variables: {}", function.variables().join(", "))?;

    if !at.is_empty() {
        if at.len() != names.len() {
            bail!("--at needs {} value(s), got {}", names.len(), at.len());
        }
        let value = function.try_call(at).context("Evaluation failed")?;
        let point: Vec<String> = at.iter().map(|v| format::number(*v)).collect();
        writeln!(out, "Value at ({}): {}", point.join(", "), format::number(value))?;
    }

    if derive {
        let var = names.first().copied().unwrap_or("x");
        match symbolic::derivative_expr(function.ast(), var) {
            Some(derivative) => writeln!(out, "d/d{var}: {derivative}")?,
            None => writeln!(out, "d/d{var}: no symbolic rule applies")?,
        }
    }
    Ok(())
}
