use crate::bytecode::{Chunk, OpCode};
use crate::lexer::tokens::{Token, TokenKind};
use crate::lexer::Lexer;
use crate::objects::{Heap, Object};
use crate::values::Value;
use crate::virtual_machine::InterpretResult;

// Submodules
mod expressions;
mod precedence;

/// Represents the compiler and its internal state. The compiler
/// drives the lexer one token at a time and emits bytecode into a
/// chunk as it parses.
pub struct Compiler<'a> {
    lexer: Lexer,
    heap: &'a mut Heap,
    previous: Token,
    current: Token,
    had_error: bool,
    is_in_panic: bool,
    chunk: Chunk,
}

impl<'a> Compiler<'a> {
    /// Compiles a source string into a chunk of bytecode instructions.
    ///
    /// ## Arguments
    /// * `src` – The source text to be compiled.
    /// * `heap` – The heap in which string literals and identifier
    /// names are interned.
    ///
    /// ## Returns
    /// `Result<Chunk, InterpretResult>` – The compiled chunk if no
    /// compile errors were generated, `InterpretResult::CompileError`
    /// otherwise.
    pub fn compile(src: &str, heap: &'a mut Heap) -> Result<Chunk, InterpretResult> {
        let mut s = Self {
            lexer: Lexer::new(src),
            heap,
            previous: Token::internal_init(),
            current: Token::internal_init(),
            had_error: false,
            is_in_panic: false,
            chunk: Chunk::new(),
        };

        s.advance();
        while !s.matches(TokenKind::EOF) {
            s.declaration();
        }

        s.emit_op_code(OpCode::Return);

        if s.had_error {
            return Err(InterpretResult::CompileError);
        }

        #[cfg(feature = "show_bytecode")]
        s.chunk.disassemble("<script>");

        Ok(s.chunk)
    }

    /// Compiles a single declaration. On a parse error, skips ahead
    /// to the next statement boundary so that one mistake does not
    /// produce a cascade of reports.
    fn declaration(&mut self) {
        if self.matches(TokenKind::VAR_KW) {
            self.var_declaration();
        } else {
            self.statement();
        }

        if self.is_in_panic {
            self.synchronize();
        }
    }

    /// Compiles a global variable declaration. A declaration without
    /// an initializer defaults the variable to `null`.
    fn var_declaration(&mut self) {
        let global = self.parse_variable("Expect variable name.");

        if self.matches(TokenKind::EQUALS) {
            self.expression();
        } else {
            self.emit_op_code(OpCode::LoadImmNull);
        }

        self.consume(
            TokenKind::SEMICOLON,
            "Expected ';' after variable declaration.",
        );

        self.emit_op_code_with_byte(OpCode::DefineGlobal, global);
    }

    /// Compiles a single statement.
    fn statement(&mut self) {
        if self.matches(TokenKind::PRINT_KW) {
            self.print_statement();
        } else {
            self.expression_statement();
        }
    }

    /// Compiles a print statement.
    fn print_statement(&mut self) {
        self.expression();
        self.consume(TokenKind::SEMICOLON, "Expected ';' after value.");
        self.emit_op_code(OpCode::Print);
    }

    /// Compiles an expression statement. The expression's value is
    /// discarded after evaluation.
    fn expression_statement(&mut self) {
        self.expression();
        self.consume(TokenKind::SEMICOLON, "Expect ';' after expression.");
        self.emit_op_code(OpCode::PopStackTop);
    }

    /// Consumes an identifier token and registers its name in the
    /// constant pool.
    ///
    /// ## Returns
    /// `u8` – The position of the variable's name in the pool.
    fn parse_variable(&mut self, error_message: &str) -> u8 {
        self.consume(TokenKind::IDENTIFIER, error_message);
        let name = self.previous.clone();
        self.identifier_constant(&name)
    }

    /// Interns an identifier's name and adds it to the constant pool
    /// as a string value.
    fn identifier_constant(&mut self, name: &Token) -> u8 {
        let interned = self.heap.intern(name.lexeme.clone());
        self.make_constant(Value::Obj(Object::Str(interned)))
    }

    /// Adds a value to the chunk's constant pool, reporting a compile
    /// error when the pool is full.
    ///
    /// ## Returns
    /// `u8` – The position of the value in the pool, or zero after an
    /// overflow error.
    fn make_constant(&mut self, value: Value) -> u8 {
        match self.chunk.add_constant(value) {
            Ok(pos) => pos,
            Err(()) => {
                self.error("Too many constants in one chunk.");
                0
            }
        }
    }

    /// Advances the compiler to the next token, converting any error
    /// tokens produced by the lexer into compile errors.
    fn advance(&mut self) {
        self.previous = self.current.clone();

        loop {
            self.current = self.lexer.next_token();

            match self.current.kind {
                TokenKind::ERROR => {
                    let message = self.current.lexeme.clone();
                    self.error_at_current(&message);
                }
                _ => break,
            }
        }
    }

    /// Consumes the current token only if it is of a given kind.
    /// If the token does not match, emits a compile error.
    ///
    /// ## Arguments
    /// * `kind` – The expected kind of the token to consume.
    /// * `message` – The error message to be displayed if the current
    /// token does not match the provided kind.
    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.check(kind) {
            self.advance();
            return;
        }

        self.error_at_current(message);
    }

    /// Checks that the current token matches the kind provided.
    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Checks that the current token matches the kind provided. If the
    /// tokens match, the current token gets consumed and the function
    /// returns true. Otherwise the token is not consumed.
    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }

        false
    }

    /// Emits an instruction with no operand into the chunk.
    fn emit_op_code(&mut self, instr: OpCode) {
        self.chunk.write(instr as u8, self.previous.line_num);
    }

    /// Emits an instruction followed by its one-byte operand.
    fn emit_op_code_with_byte(&mut self, instr: OpCode, byte: u8) {
        self.emit_op_code(instr);
        self.chunk.write(byte, self.previous.line_num);
    }

    /// Emits a compile error from the current token.
    fn error_at_current(&mut self, message: &str) {
        let token = self.current.clone();
        self.error_at(&token, message);
    }

    /// Emits a compile error from the previous token.
    fn error(&mut self, message: &str) {
        let token = self.previous.clone();
        self.error_at(&token, message);
    }

    /// Reports a compile error at the given token. While the compiler
    /// is panicking, further reports are swallowed until it reaches a
    /// synchronization point.
    ///
    /// ## Arguments
    /// * `token` – The token that caused the error.
    /// * `message` – The error message to display.
    fn error_at(&mut self, token: &Token, message: &str) {
        if self.is_in_panic {
            return;
        }
        self.is_in_panic = true;

        eprint!("[line {}] Error", token.line_num);

        match token.kind {
            TokenKind::EOF => eprint!(" at end"),
            // The lexeme of an error token is the diagnostic itself,
            // not source text.
            TokenKind::ERROR => {}
            _ => eprint!(" at '{}'", token.lexeme),
        }

        eprintln!(": {}", message);
        self.had_error = true;
    }

    /// Synchronizes the compiler after a parse error by discarding
    /// tokens until a statement boundary.
    fn synchronize(&mut self) {
        self.is_in_panic = false;

        while self.current.kind != TokenKind::EOF {
            if self.previous.kind == TokenKind::SEMICOLON {
                return;
            }

            match self.current.kind {
                TokenKind::CLASS_KW
                | TokenKind::FUNCTION_KW
                | TokenKind::VAR_KW
                | TokenKind::FOR_KW
                | TokenKind::IF_KW
                | TokenKind::WHILE_KW
                | TokenKind::PRINT_KW
                | TokenKind::RETURN_KW => {
                    return;
                }

                _ => {}
            }

            self.advance();
        }
    }
}
