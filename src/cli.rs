use std::fs::File;
use std::path::PathBuf;

use anyhow::{Error, Result};
use predrs::source::SourceError;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use crate::demo::{Demo, TennisPlayer};

pub async fn interactive(demo: Demo) -> Result<()> {
    let mut rl = Editor::<()>::new()?;
    load_history(&mut rl);
    println!("Enter a lambda such as `tp -> tp.age > 36`, or \\describe, \\paths.");

    loop {
        match read_lambda(&mut rl) {
            Ok(source) => {
                if !source.trim().is_empty() {
                    rl.add_history_entry(source.as_str());
                    run_lambda(&demo, source).await?;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
            }
            Err(ReadlineError::Eof) => {
                println!("Exited");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    save_history(&mut rl);
    Ok(())
}

fn history_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("predrs").join("history.txt"))
}

fn load_history(rl: &mut Editor<()>) {
    if let Some(path) = history_path() {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).ok();
        }
        if !path.exists() {
            File::create(&path).ok();
        }
        if rl.load_history(&path).is_err() {
            println!("No previous history.");
        }
    }
}

fn save_history(rl: &mut Editor<()>) {
    if let Some(path) = history_path() {
        if let Err(err) = rl.save_history(&path) {
            println!("Save history failed {}.", err);
        }
    }
}

/// A trailing `\` continues the lambda on the next line.
fn read_lambda(rl: &mut Editor<()>) -> Result<String, ReadlineError> {
    let mut source = String::new();
    loop {
        let prompt = if source.is_empty() { "> " } else { "? " };
        let line = rl.readline(prompt)?;
        if line.is_empty() {
            continue;
        }

        // internal commands starts with "\"
        if line.starts_with('\\') && source.is_empty() {
            return Ok(line);
        }

        match line.strip_suffix('\\') {
            Some(head) => {
                source.push_str(head);
                source.push('\n');
            }
            None => {
                source.push_str(&line);
                return Ok(source);
            }
        }
    }
}

async fn run_lambda(demo: &Demo, source: String) -> Result<()> {
    if let Some(cmds) = source.trim().strip_prefix('\\') {
        if let Err(err) = run_internal(demo, cmds).await {
            println!("Run Internal {} Err: {}", cmds, err);
        }
        return Ok(());
    }

    match demo.compiler.compile_async::<TennisPlayer>(source.as_str()).await {
        Ok(predicate) => demo.print(&predicate)?,
        Err(SourceError::SyntaxError(err)) => println!("{}", err.format_with_source(&source)),
        Err(err) => println!("Compile Error: {}", err),
    }
    Ok(())
}

async fn run_internal(demo: &Demo, cmds: &str) -> Result<()> {
    match cmds.trim() {
        "describe" => {
            println!("{:?}", demo.schema);
            let types = demo.compiler.available_types();
            for name in types.names() {
                if let Some(schema) = types.get_by_name(name) {
                    println!("{}: {}", name, schema.column_names().join(", "));
                }
            }
            let options = demo.compiler.options();
            println!(
                "limits: {} bytes of source, {} nesting levels, {:?} timeout",
                options.max_source_len, options.max_nesting, options.timeout
            );
            Ok(())
        }
        "paths" => demo.run_paths().await,
        _ => Err(Error::msg("Unknown internal command")),
    }
}
