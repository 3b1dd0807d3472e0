use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;

use crate::values::Value;

/// The maximum number of constants a single chunk can hold. Constant
/// operands are one byte, so the pool is capped at 256 entries.
pub const MAX_CONSTANTS: usize = 256;

/// The set of instructions supported by the virtual machine.
///
/// **NOTE:** Changing the order in which members are declared creates
/// incompatibilities between different versions of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[derive(FromPrimitive)]
pub enum OpCode {
    // Instructions with zero chunk operands. Some of them do have
    // value operands from the stack.
    Add,
    Divide,
    Equals,
    GreaterThan,
    GreaterThanEq,
    LessThan,
    LessThanEq,
    LoadImmFalse,
    LoadImmNull,
    LoadImmTrue,
    LogicNot,
    Multiply,
    Negate,
    NotEq,
    PopStackTop,
    Print,
    Return,
    Subtract,

    // Instructions with one chunk operand. These use the next byte
    // in the chunk as an index into the constant pool.
    DefineGlobal,
    GetGlobal,
    LoadConstant,
    SetGlobal,
}

/// Contains all the necessary information about the instructions to
/// be executed: the raw instruction bytes, the source line of each
/// byte, and the literal constants referenced by the instructions.
pub struct Chunk {
    instructions: Vec<u8>,
    lines: Vec<usize>,
    constants: Vec<Value>,
}

impl Chunk {
    /// Creates a new chunk.
    pub fn new() -> Self {
        Self {
            instructions: vec![],
            lines: vec![],
            constants: vec![],
        }
    }

    /// Appends a raw byte and its source line to the chunk. The
    /// instruction and line lists always grow in lock-step.
    pub fn write(&mut self, byte: u8, line: usize) {
        self.instructions.push(byte);
        self.lines.push(line);
    }

    /// Adds a constant to this chunk's constant pool.
    ///
    /// ## Arguments
    /// * `value` – The value to be added to the pool.
    ///
    /// ## Returns
    /// `Result<u8, ()>` – The position of the value in the pool. A
    /// value equal to an existing pool entry reuses that entry's
    /// position. Returns `Err` when the pool is full.
    pub fn add_constant(&mut self, value: Value) -> Result<u8, ()> {
        if let Some(pos) = self.constants.iter().position(|x| *x == value) {
            return Ok(pos as u8);
        }

        if self.constants.len() >= MAX_CONSTANTS {
            return Err(());
        }

        self.constants.push(value);
        Ok((self.constants.len() - 1) as u8)
    }

    /// Retrieves a constant from this chunk's constant pool.
    pub fn get_constant(&self, idx: usize) -> Option<&Value> {
        self.constants.get(idx)
    }

    /// Returns the OpCode associated with a byte in the instruction list.
    pub fn get_op_code(&self, idx: usize) -> Option<OpCode> {
        match self.instructions.get(idx) {
            Some(byte) => OpCode::from_u8(*byte),
            None => None,
        }
    }

    /// Retrieves a raw byte from the instruction list.
    pub fn get_byte(&self, idx: usize) -> Option<u8> {
        self.instructions.get(idx).copied()
    }

    /// Gets the source line associated with the byte at the given index.
    pub fn get_line(&self, idx: usize) -> usize {
        self.lines[idx]
    }

    /// Gets the length of the instruction list.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Gets the size of the constant pool for this chunk.
    #[cfg(test)]
    pub fn get_pool_size(&self) -> usize {
        self.constants.len()
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Chunk::new()
    }
}

#[cfg(any(feature = "show_bytecode", feature = "trace_execution"))]
impl Chunk {
    /// Disassembles the chunk, printing each instruction and its
    /// related information.
    ///
    /// ## Arguments
    /// * `name` – The name to print for the current chunk.
    pub fn disassemble(&self, name: &str) {
        println!("==== {} ====", name);

        let mut idx = 0;
        while idx < self.len() {
            idx = self.disassemble_instruction(idx);
        }
    }

    /// Disassembles the single instruction at the given offset.
    ///
    /// ## Returns
    /// `usize` – The offset of the next instruction.
    pub fn disassemble_instruction(&self, idx: usize) -> usize {
        print!("{:>04} {:>4} ", idx, self.get_line(idx));

        let instr = match self.get_op_code(idx) {
            Some(instr) => instr,
            None => {
                println!("<invalid byte {:#04X}>", self.get_byte(idx).unwrap_or(0));
                return idx + 1;
            }
        };

        match instr {
            OpCode::DefineGlobal | OpCode::GetGlobal | OpCode::LoadConstant | OpCode::SetGlobal => {
                let operand = self.get_byte(idx + 1).unwrap_or(0) as usize;
                match self.get_constant(operand) {
                    Some(value) => println!("{:?} {} ---> {}", instr, operand, value),
                    None => println!("{:?} {} ---> <missing constant>", instr, operand),
                }
                idx + 2
            }
            _ => {
                println!("{:?}", instr);
                idx + 1
            }
        }
    }
}
