use crate::bytecode::OpCode;
use crate::compiler::precedence::{get_rule, ParseFn, Precedence};
use crate::compiler::Compiler;
use crate::lexer::tokens::{Token, TokenKind};
use crate::objects::Object;
use crate::values::Value;

impl<'a> Compiler<'a> {
    /// Compiles a single expression.
    pub(super) fn expression(&mut self) {
        self.parse_precedence(Precedence::Assignment);
    }

    /// Parses an expression at the given precedence level or higher.
    /// This is the core of the Pratt dispatch: the previous token's
    /// prefix rule starts the expression, and infix rules keep
    /// extending it while the upcoming operator binds at least as
    /// tightly as `precedence`.
    pub(super) fn parse_precedence(&mut self, precedence: Precedence) {
        self.advance();

        let prefix_rule = get_rule(self.previous.kind).prefix;
        if let ParseFn::None = prefix_rule {
            self.error("Expect expression.");
            return;
        }

        // Assignment is only allowed when this expression is parsed at
        // the lowest precedence; `a + b = c` must not compile `b = c`.
        let is_assignable = precedence <= Precedence::Assignment;
        self.handle_rule(prefix_rule, is_assignable);

        while precedence <= get_rule(self.current.kind).precedence {
            self.advance();
            let infix_rule = get_rule(self.previous.kind).infix;
            self.handle_rule(infix_rule, is_assignable);
        }

        if is_assignable && self.matches(TokenKind::EQUALS) {
            self.error("Invalid assignment target.");
        }
    }

    /// Invokes the parse function associated with a rule.
    fn handle_rule(&mut self, parse_fn: ParseFn, is_assignable: bool) {
        match parse_fn {
            ParseFn::CompileBinaryExpr => self.compile_binary_expr(),
            ParseFn::CompileGrouping => self.compile_grouping(),
            ParseFn::CompileLiteral => self.compile_literal(),
            ParseFn::CompileNumeric => self.compile_numeric(),
            ParseFn::CompileString => self.compile_string(),
            ParseFn::CompileUnary => self.compile_unary(),
            ParseFn::CompileVariable => self.compile_variable(is_assignable),
            ParseFn::None => {}
        }
    }

    /// Compiles a numeric literal expression.
    fn compile_numeric(&mut self) {
        match self.previous.lexeme.parse::<f64>() {
            Ok(value) => {
                let pos = self.make_constant(Value::Number(value));
                self.emit_op_code_with_byte(OpCode::LoadConstant, pos);
            }
            Err(_) => self.error("Invalid numeric literal."),
        }
    }

    /// Compiles a string literal expression. The lexer keeps the
    /// surrounding quotes in the lexeme, so they are stripped here
    /// before the content is interned.
    fn compile_string(&mut self) {
        let lexeme = &self.previous.lexeme;
        let content: String = lexeme[1..lexeme.len() - 1].to_string();

        let interned = self.heap.intern(content);
        let pos = self.make_constant(Value::Obj(Object::Str(interned)));
        self.emit_op_code_with_byte(OpCode::LoadConstant, pos);
    }

    /// Compiles a `true`, `false`, or `null` literal expression.
    fn compile_literal(&mut self) {
        match self.previous.kind {
            TokenKind::FALSE_LIT => self.emit_op_code(OpCode::LoadImmFalse),
            TokenKind::NULL_LIT => self.emit_op_code(OpCode::LoadImmNull),
            TokenKind::TRUE_LIT => self.emit_op_code(OpCode::LoadImmTrue),
            _ => unreachable!("Literal rule applied to a non-literal token."),
        }
    }

    /// Compiles a parenthesized expression.
    fn compile_grouping(&mut self) {
        self.expression();
        self.consume(TokenKind::R_PAREN, "Expect ')' after expression.");
    }

    /// Compiles a unary expression. The operand is compiled first so
    /// that its value sits on the stack when the operator executes.
    fn compile_unary(&mut self) {
        let operator = self.previous.kind;

        self.parse_precedence(Precedence::Unary);

        match operator {
            TokenKind::BANG => self.emit_op_code(OpCode::LogicNot),
            TokenKind::DASH => self.emit_op_code(OpCode::Negate),
            _ => unreachable!("Unary rule applied to a non-unary token."),
        }
    }

    /// Compiles a binary expression. The right operand is parsed one
    /// precedence level higher than the operator so that operators at
    /// the same level associate to the left.
    fn compile_binary_expr(&mut self) {
        let operator = self.previous.kind;

        let rule = get_rule(operator);
        self.parse_precedence(rule.precedence.one_higher());

        let instr = match operator {
            TokenKind::DASH => OpCode::Subtract,
            TokenKind::GREATER_THAN => OpCode::GreaterThan,
            TokenKind::GREATER_THAN_EQ => OpCode::GreaterThanEq,
            TokenKind::LESS_THAN => OpCode::LessThan,
            TokenKind::LESS_THAN_EQ => OpCode::LessThanEq,
            TokenKind::LOGIC_EQ => OpCode::Equals,
            TokenKind::LOGIC_NOT_EQ => OpCode::NotEq,
            TokenKind::PLUS => OpCode::Add,
            TokenKind::SLASH => OpCode::Divide,
            TokenKind::STAR => OpCode::Multiply,
            _ => unreachable!("Binary rule applied to a non-binary token."),
        };

        self.emit_op_code(instr);
    }

    /// Compiles an identifier expression as either a variable lookup
    /// or, when followed by `=` in an assignable position, a variable
    /// reassignment.
    fn compile_variable(&mut self, is_assignable: bool) {
        let name = self.previous.clone();
        self.named_variable(&name, is_assignable);
    }

    /// Emits the appropriate instruction to either get or set a
    /// global variable.
    fn named_variable(&mut self, name: &Token, is_assignable: bool) {
        let arg = self.identifier_constant(name);

        if is_assignable && self.matches(TokenKind::EQUALS) {
            self.expression();
            self.emit_op_code_with_byte(OpCode::SetGlobal, arg);
        } else {
            self.emit_op_code_with_byte(OpCode::GetGlobal, arg);
        }
    }
}
