//! sheet - a minimal command-line harness around the spreadsheet engine.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use sheet_engine::{Position, Sheet};

/// Split a script line of the form `POS=TEXT` into its position and text.
/// The `=` that separates them is the *first* one on the line, so formula
/// text (which itself may start with `=`) is never mistaken for the
/// separator.
fn parse_assignment(line: &str) -> Result<(Position, &str)> {
    let (raw_pos, text) =
        line.split_once('=').ok_or_else(|| anyhow!("expected POS=TEXT, got: {line}"))?;
    let pos = Position::from_str(raw_pos.trim());
    if !pos.is_valid() {
        bail!("invalid position: {raw_pos}");
    }
    Ok((pos, text))
}

/// Apply every `POS=TEXT` line in `script` to `sheet`, reporting (but not
/// aborting on) individual structural errors.
fn run_script(sheet: &mut Sheet, script: &str) {
    for (lineno, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_assignment(line) {
            Ok((pos, text)) => {
                if let Err(e) = sheet.set_cell(pos, text) {
                    eprintln!("line {}: {e}", lineno + 1);
                }
            }
            Err(e) => eprintln!("line {}: {e}", lineno + 1),
        }
    }
}

fn run_command_mode(assignment: &str) -> Result<()> {
    let mut sheet = Sheet::new();
    let (pos, text) = parse_assignment(assignment)?;
    sheet.set_cell(pos, text)?;
    let value = sheet.value_at(pos)?.expect("just-written cell is present");
    println!("{value}");
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: sheet [OPTIONS] [SCRIPT]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [SCRIPT]                  File of `POS=TEXT` lines to apply (default: stdin)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <POS=TEXT>  Apply a single assignment and print its value");
    eprintln!("  -t, --texts               Print raw cell text instead of computed values");
    eprintln!("  -h, --help                Print help");
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut script_path: Option<PathBuf> = None;
    let mut command: Option<String> = None;
    let mut print_texts = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    bail!("--command requires an assignment string");
                }
                command = Some(args[i].clone());
            }
            "-t" | "--texts" => print_texts = true,
            arg if arg.starts_with('-') => {
                print_usage();
                bail!("unknown option: {arg}");
            }
            _ => {
                if script_path.is_none() {
                    script_path = Some(PathBuf::from(&args[i]));
                } else {
                    print_usage();
                    bail!("unexpected argument: {}", args[i]);
                }
            }
        }
        i += 1;
    }

    if let Some(assignment) = command {
        return run_command_mode(&assignment);
    }

    let script = match &script_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading script file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading script from stdin")?;
            buf
        }
    };

    let mut sheet = Sheet::new();
    run_script(&mut sheet, &script);

    let rendered = if print_texts { sheet.print_texts() } else { sheet.print_values() };
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignment_with_formula_text() {
        let (pos, text) = parse_assignment("A1==1+2").unwrap();
        assert_eq!(pos, Position::from_str("A1"));
        assert_eq!(text, "=1+2");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(parse_assignment("A1").is_err());
    }

    #[test]
    fn rejects_invalid_position() {
        assert!(parse_assignment("ZZZ1=5").is_err());
    }

    #[test]
    fn script_run_skips_blank_and_comment_lines() {
        let mut sheet = Sheet::new();
        run_script(&mut sheet, "# comment\n\nA1=1\nB1==A1+1\n");
        assert_eq!(sheet.value_at(Position::from_str("B1")).unwrap().unwrap().to_string(), "2");
    }
}
