use std::{env, fs::read_to_string, path::PathBuf, process, time::Instant};

use mirrow::{display_error, lexer::lexer::tokenize, parser::parser::parse};

const USAGE: &str = "usage: mirrow <file.n> [--tokens] [--ast]";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut file_path = None;
    let mut dump_tokens = false;
    let mut dump_ast = false;

    for arg in &args {
        match arg.as_str() {
            "--tokens" => dump_tokens = true,
            "--ast" => dump_ast = true,
            _ if file_path.is_none() && !arg.starts_with("--") => file_path = Some(arg.clone()),
            _ => {
                eprintln!("unexpected argument `{}`\n{}", arg, USAGE);
                process::exit(2);
            }
        }
    }

    let Some(file_path) = file_path else {
        eprintln!("{}", USAGE);
        process::exit(2);
    };

    let file_name = PathBuf::from(&file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.clone());

    let file_contents = match read_to_string(&file_path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file_path, err);
            process::exit(1);
        }
    };

    let start = Instant::now();
    let tokens = match tokenize(file_contents.clone(), Some(file_name)) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &file_contents);
            process::exit(1);
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    if dump_tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let parse_start = Instant::now();
    let mut program = parse(tokens);

    println!("Parsed in {:?}", parse_start.elapsed());

    if dump_ast {
        print!("{}", program);
    }

    if let Some(error) = program.errors().first() {
        display_error(error, &file_contents);
        process::exit(1);
    }

    println!("Parsed {} statements in {:?}", program.len(), start.elapsed());
    program.release();
}
