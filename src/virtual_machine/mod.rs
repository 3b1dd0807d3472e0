use hashbrown::HashMap;
use std::rc::Rc;

use crate::bytecode::Chunk;
use crate::compiler::Compiler;
use crate::objects::{Heap, StrObj};
use crate::values::Value;

// Submodules
mod run;

/// The maximum number of values the operand stack can hold.
const STACK_MAX: usize = 256;

/// The types of results the interpreter can return.
#[derive(Debug, PartialEq, Eq)]
pub enum InterpretResult {
    Ok,
    CompileError,
    RuntimeError,
}

/// The result of executing a single instruction: keep going, halt
/// cleanly, or halt with a runtime error.
pub(crate) enum RuntimeResult {
    Continue,
    EndOk,
    Error { message: String },
}

/// Represents the TripleS virtual machine. One machine services many
/// `interpret` calls; globals and interned strings persist between
/// them, which is what lets consecutive REPL lines share state.
pub struct VirtualMachine {
    /// Byte cursor into the executing chunk's instructions.
    ip: usize,
    /// The operand stack, holding values between instructions.
    stack: Vec<Value>,
    /// Owns every heap object created by the compiler and at runtime.
    heap: Heap,
    /// The global variable environment, keyed by interned name.
    globals: HashMap<Rc<StrObj>, Value>,
}

impl VirtualMachine {
    /// Creates a new virtual machine with an empty heap and no
    /// global bindings.
    pub fn new() -> Self {
        Self {
            ip: 0,
            stack: Vec::with_capacity(STACK_MAX),
            heap: Heap::new(),
            globals: HashMap::new(),
        }
    }

    /// Compiles and executes a source string.
    ///
    /// ## Arguments
    /// * `source` – The source text to be interpreted.
    ///
    /// ## Returns
    /// `InterpretResult` – The result of the source interpretation.
    /// On a compile error no bytecode is executed.
    pub fn interpret(&mut self, source: &str) -> InterpretResult {
        let chunk = match Compiler::compile(source, &mut self.heap) {
            Ok(chunk) => chunk,
            Err(result) => return result,
        };

        self.ip = 0;

        match self.run(&chunk) {
            RuntimeResult::EndOk => InterpretResult::Ok,
            RuntimeResult::Error { message } => {
                self.report_runtime_error(&chunk, &message);
                InterpretResult::RuntimeError
            }
            RuntimeResult::Continue => {
                unreachable!("The run loop only returns halting results.")
            }
        }
    }

    /// Pushes a value onto the operand stack, failing with a runtime
    /// error instead of growing past the stack's fixed capacity.
    fn push_stack(&mut self, value: Value) -> RuntimeResult {
        if self.stack.len() >= STACK_MAX {
            return RuntimeResult::Error {
                message: String::from("Stack overflow."),
            };
        }

        self.stack.push(value);
        RuntimeResult::Continue
    }

    /// Pops and returns the value on top of the operand stack.
    ///
    /// Well-formed bytecode never pops an empty stack, so an empty
    /// stack here is an internal invariant violation.
    fn pop_stack(&mut self) -> Value {
        match self.stack.pop() {
            Some(value) => value,
            None => panic!("Stack is empty!"),
        }
    }

    /// Peeks at the value a given distance from the top of the stack.
    fn peek_stack(&self, distance: usize) -> &Value {
        &self.stack[self.stack.len() - 1 - distance]
    }

    /// Empties the operand stack.
    fn reset_stack(&mut self) {
        self.stack.clear();
    }

    /// Reports a runtime error to the console with the source line of
    /// the failed instruction, then resets the stack so the machine is
    /// reusable.
    ///
    /// ## Arguments
    /// * `chunk` – The chunk that was executing.
    /// * `message` – The error message to be displayed.
    fn report_runtime_error(&mut self, chunk: &Chunk, message: &str) {
        let line = chunk.get_line(self.ip - 1);
        eprintln!("{} at [line {}] in script", message, line);

        self.reset_stack();
    }

    /// Gets the current depth of the operand stack.
    #[cfg(test)]
    pub fn stack_size(&self) -> usize {
        self.stack.len()
    }

    /// Looks up a global variable by name.
    #[cfg(test)]
    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals
            .iter()
            .find(|(key, _)| key.chars == name)
            .map(|(_, value)| value.clone())
    }

    /// Gets the number of distinct strings interned in the heap.
    #[cfg(test)]
    pub fn interned_count(&self) -> usize {
        self.heap.strings_count()
    }
}

impl Default for VirtualMachine {
    fn default() -> Self {
        VirtualMachine::new()
    }
}
