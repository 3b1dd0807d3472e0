use std::rc::Rc;

use crate::bytecode::{Chunk, OpCode};
use crate::objects::{Object, StrObj};
use crate::values::Value;
use crate::virtual_machine::{RuntimeResult, VirtualMachine};

impl VirtualMachine {
    /// Executes the instructions in a chunk until a halting result.
    pub(crate) fn run(&mut self, chunk: &Chunk) -> RuntimeResult {
        loop {
            #[cfg(feature = "trace_execution")]
            {
                print!("        ");
                for value in self.stack.iter() {
                    print!("[ {} ]", value);
                }
                println!();
                chunk.disassemble_instruction(self.ip);
            }

            let instruction = self.next_op_code(chunk);

            let exec = match instruction {
                OpCode::LoadConstant => self.op_load_constant(chunk),
                OpCode::LoadImmNull => self.push_stack(Value::Null),
                OpCode::LoadImmTrue => self.push_stack(Value::Bool(true)),
                OpCode::LoadImmFalse => self.push_stack(Value::Bool(false)),

                OpCode::PopStackTop => {
                    self.pop_stack();
                    RuntimeResult::Continue
                }

                // Global declarations
                OpCode::DefineGlobal => self.op_define_global(chunk),
                OpCode::GetGlobal => self.op_get_global(chunk),
                OpCode::SetGlobal => self.op_set_global(chunk),

                // Operators
                OpCode::Equals => self.op_equals(false),
                OpCode::NotEq => self.op_equals(true),
                OpCode::GreaterThan => self.numeric_binary_op(|a, b| Value::Bool(a > b)),
                OpCode::GreaterThanEq => self.numeric_binary_op(|a, b| Value::Bool(a >= b)),
                OpCode::LessThan => self.numeric_binary_op(|a, b| Value::Bool(a < b)),
                OpCode::LessThanEq => self.numeric_binary_op(|a, b| Value::Bool(a <= b)),
                OpCode::Add => self.op_add(),
                OpCode::Subtract => self.numeric_binary_op(|a, b| Value::Number(a - b)),
                OpCode::Multiply => self.numeric_binary_op(|a, b| Value::Number(a * b)),
                OpCode::Divide => self.numeric_binary_op(|a, b| Value::Number(a / b)),
                OpCode::LogicNot => {
                    let value = self.pop_stack();
                    self.push_stack(Value::Bool(value.is_falsy()))
                }
                OpCode::Negate => self.op_negate(),

                OpCode::Print => {
                    let value = self.pop_stack();
                    println!("{}", value);
                    RuntimeResult::Continue
                }

                OpCode::Return => RuntimeResult::EndOk,
            };

            match exec {
                RuntimeResult::Continue => continue,
                _ => return exec,
            }
        }
    }

    /// Reads the opcode at the instruction pointer and advances past it.
    fn next_op_code(&mut self, chunk: &Chunk) -> OpCode {
        let instr = match chunk.get_op_code(self.ip) {
            Some(instr) => instr,
            None => unreachable!("Invalid instruction byte at offset {}.", self.ip),
        };

        self.ip += 1;
        instr
    }

    /// Reads the one-byte operand at the instruction pointer and
    /// advances past it.
    fn next_byte(&mut self, chunk: &Chunk) -> u8 {
        let byte = match chunk.get_byte(self.ip) {
            Some(byte) => byte,
            None => unreachable!("Missing instruction operand at offset {}.", self.ip),
        };

        self.ip += 1;
        byte
    }

    /// Reads a one-byte constant-pool operand and resolves it.
    fn read_constant(&mut self, chunk: &Chunk) -> Value {
        let pos = self.next_byte(chunk) as usize;

        match chunk.get_constant(pos) {
            Some(value) => value.clone(),
            None => unreachable!("Invalid constant pool index {}.", pos),
        }
    }

    /// Reads a constant-pool operand that the compiler guarantees to
    /// be a string, as is the case for global variable names.
    fn read_string_constant(&mut self, chunk: &Chunk) -> Rc<StrObj> {
        match self.read_constant(chunk) {
            Value::Obj(Object::Str(name)) => name,
            _ => unreachable!("Expected a string constant for a variable name."),
        }
    }

    /// Executes the instruction to load a constant onto the stack.
    fn op_load_constant(&mut self, chunk: &Chunk) -> RuntimeResult {
        let constant = self.read_constant(chunk);
        self.push_stack(constant)
    }

    /// Executes the instruction to define a global variable. Defining
    /// an already-bound name rebinds it.
    fn op_define_global(&mut self, chunk: &Chunk) -> RuntimeResult {
        let name = self.read_string_constant(chunk);
        let value = self.peek_stack(0).clone();

        self.globals.insert(name, value);
        self.pop_stack();

        RuntimeResult::Continue
    }

    /// Executes the instruction to load a global variable's value
    /// onto the stack.
    fn op_get_global(&mut self, chunk: &Chunk) -> RuntimeResult {
        let name = self.read_string_constant(chunk);

        let value = match self.globals.get(&name) {
            Some(value) => value.clone(),
            None => {
                return RuntimeResult::Error {
                    message: format!("Undefined variable '{}'", name.chars),
                }
            }
        };

        self.push_stack(value)
    }

    /// Executes the instruction to reassign an existing global
    /// variable. The assigned value stays on the stack because an
    /// assignment is itself an expression.
    fn op_set_global(&mut self, chunk: &Chunk) -> RuntimeResult {
        let name = self.read_string_constant(chunk);

        if !self.globals.contains_key(&name) {
            return RuntimeResult::Error {
                message: format!("Undefined variable '{}'", name.chars),
            };
        }

        let value = self.peek_stack(0).clone();
        self.globals.insert(name, value);

        RuntimeResult::Continue
    }

    /// Executes an equality comparison between the two values on top
    /// of the stack. Values of different kinds are never equal.
    fn op_equals(&mut self, negate: bool) -> RuntimeResult {
        let right = self.pop_stack();
        let left = self.pop_stack();

        self.push_stack(Value::Bool((left == right) != negate))
    }

    /// Executes a binary operation that requires both operands to be
    /// numbers. The operands are type-checked before either is popped
    /// so that the stack is intact when an error is reported.
    fn numeric_binary_op<F>(&mut self, op: F) -> RuntimeResult
    where
        F: Fn(f64, f64) -> Value,
    {
        if !self.peek_stack(0).is_number() || !self.peek_stack(1).is_number() {
            return RuntimeResult::Error {
                message: String::from("Operands must be numbers."),
            };
        }

        let right = self.pop_stack();
        let left = self.pop_stack();

        match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => self.push_stack(op(a, b)),
            _ => unreachable!("Operands were checked to be numbers."),
        }
    }

    /// Executes the addition instruction. Two strings concatenate, two
    /// numbers add, and every other pairing is a type error.
    fn op_add(&mut self) -> RuntimeResult {
        if self.peek_stack(0).is_str() && self.peek_stack(1).is_str() {
            return self.concatenate();
        }

        if self.peek_stack(0).is_number() && self.peek_stack(1).is_number() {
            return self.numeric_binary_op(|a, b| Value::Number(a + b));
        }

        RuntimeResult::Error {
            message: String::from("Operands must be either strings or numbers."),
        }
    }

    /// Concatenates the two strings on top of the stack. The result
    /// is interned, so equal concatenation results share one handle.
    fn concatenate(&mut self) -> RuntimeResult {
        let right = self.pop_stack();
        let left = self.pop_stack();

        let chars = match (left.as_str(), right.as_str()) {
            (Some(a), Some(b)) => format!("{}{}", a.chars, b.chars),
            _ => unreachable!("Operands were checked to be strings."),
        };

        let interned = self.heap.intern(chars);
        self.push_stack(Value::Obj(Object::Str(interned)))
    }

    /// Executes the arithmetic negation instruction.
    fn op_negate(&mut self) -> RuntimeResult {
        match self.peek_stack(0).as_number() {
            Some(value) => {
                self.pop_stack();
                self.push_stack(Value::Number(-value))
            }
            None => RuntimeResult::Error {
                message: String::from("Operand must be a number."),
            },
        }
    }
}
