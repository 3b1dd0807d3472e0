use std::io::Write;
use std::{env, fs, io, process};

// Crate-level modules
mod bytecode;
mod compiler;
mod lexer;
mod objects;
mod values;
mod virtual_machine;

#[cfg(test)]
mod tests;

use virtual_machine::{InterpretResult, VirtualMachine};

/// The main function. With no arguments the interpreter enters a
/// line-at-a-time REPL; with one argument it runs the given file.
fn main() {
    let args = env::args().collect::<Vec<String>>();

    match args.as_slice() {
        [_] => repl(),
        [_, file] => run_file(file),
        _ => {
            eprintln!("Usage: triples [path]");
            process::exit(64);
        }
    }
}

/// Reads and interprets one line at a time. Lines share a single
/// virtual machine, so variables defined on one line stay visible on
/// the next. An end-of-file (Ctrl-D) exits the loop.
fn repl() {
    let mut vm = VirtualMachine::new();
    let stdin = io::stdin();

    loop {
        print!(">> ");
        io::stdout().flush().expect("Could not flush the prompt.");

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                vm.interpret(&line);
            }
            Err(_) => break,
        }
    }
}

/// Interprets the file at the given path, then exits the process with
/// a code describing the outcome.
fn run_file(path: &str) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => {
            eprintln!("Couldn't open file \"{}\".", path);
            process::exit(74);
        }
    };

    let mut vm = VirtualMachine::new();

    match vm.interpret(&contents) {
        InterpretResult::CompileError => process::exit(65),
        InterpretResult::RuntimeError => process::exit(70),
        InterpretResult::Ok => (),
    }
}
