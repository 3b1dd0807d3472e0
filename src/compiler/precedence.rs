use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;

use crate::lexer::tokens::TokenKind;

/// Represents the precedence of different expressions in ascending
/// order: a variant appearing later in the enum binds tighter than
/// one appearing earlier.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[repr(u8)]
#[derive(FromPrimitive)]
pub enum Precedence {
    None,
    Assignment, // =
    Or,         // or
    And,        // and
    Equality,   // == !=
    Comparison, // < > <= >=
    Term,       // + -
    Factor,     // * /
    Unary,      // ! -
    Call,       // . ()
    Primary,
}

impl Precedence {
    /// Gets the next-tighter precedence level. Used by the binary
    /// infix handler so that operators at one level associate to
    /// the left.
    pub fn one_higher(self) -> Precedence {
        Precedence::from_u8(self as u8 + 1).unwrap_or(Precedence::Primary)
    }
}

/// The compiling function that can be associated with a given token.
#[derive(Clone, Copy)]
pub enum ParseFn {
    CompileBinaryExpr,
    CompileGrouping,
    CompileLiteral,
    CompileNumeric,
    CompileString,
    CompileUnary,
    CompileVariable,
    None, // Do not call a parsing function
}

/// Wraps the parsing properties of a token so that they can be easily
/// accessed throughout the compiler.
pub struct ParseRule {
    pub prefix: ParseFn,
    pub infix: ParseFn,
    pub precedence: Precedence,
}

/// Gets the parse rule associated with a token kind. Returned by
/// value from a static match, so a lookup allocates nothing.
pub fn get_rule(kind: TokenKind) -> ParseRule {
    match kind {
        TokenKind::BANG => ParseRule {
            prefix: ParseFn::CompileUnary,
            infix: ParseFn::None,
            precedence: Precedence::None,
        },

        TokenKind::DASH => ParseRule {
            prefix: ParseFn::CompileUnary,
            infix: ParseFn::CompileBinaryExpr,
            precedence: Precedence::Term,
        },

        TokenKind::EQUALS => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::None,
            precedence: Precedence::None,
        },

        TokenKind::FALSE_LIT => ParseRule {
            prefix: ParseFn::CompileLiteral,
            infix: ParseFn::None,
            precedence: Precedence::None,
        },

        TokenKind::GREATER_THAN => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::CompileBinaryExpr,
            precedence: Precedence::Comparison,
        },

        TokenKind::GREATER_THAN_EQ => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::CompileBinaryExpr,
            precedence: Precedence::Comparison,
        },

        TokenKind::IDENTIFIER => ParseRule {
            prefix: ParseFn::CompileVariable,
            infix: ParseFn::None,
            precedence: Precedence::None,
        },

        TokenKind::LESS_THAN => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::CompileBinaryExpr,
            precedence: Precedence::Comparison,
        },

        TokenKind::LESS_THAN_EQ => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::CompileBinaryExpr,
            precedence: Precedence::Comparison,
        },

        TokenKind::LOGIC_EQ => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::CompileBinaryExpr,
            precedence: Precedence::Equality,
        },

        TokenKind::LOGIC_NOT_EQ => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::CompileBinaryExpr,
            precedence: Precedence::Equality,
        },

        TokenKind::L_PAREN => ParseRule {
            prefix: ParseFn::CompileGrouping,
            infix: ParseFn::None,
            precedence: Precedence::None,
        },

        TokenKind::NULL_LIT => ParseRule {
            prefix: ParseFn::CompileLiteral,
            infix: ParseFn::None,
            precedence: Precedence::None,
        },

        TokenKind::NUM_LIT => ParseRule {
            prefix: ParseFn::CompileNumeric,
            infix: ParseFn::None,
            precedence: Precedence::None,
        },

        TokenKind::PLUS => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::CompileBinaryExpr,
            precedence: Precedence::Term,
        },

        TokenKind::SLASH => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::CompileBinaryExpr,
            precedence: Precedence::Factor,
        },

        TokenKind::STAR => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::CompileBinaryExpr,
            precedence: Precedence::Factor,
        },

        TokenKind::STR_LIT => ParseRule {
            prefix: ParseFn::CompileString,
            infix: ParseFn::None,
            precedence: Precedence::None,
        },

        TokenKind::TRUE_LIT => ParseRule {
            prefix: ParseFn::CompileLiteral,
            infix: ParseFn::None,
            precedence: Precedence::None,
        },

        // The rest of the tokens do not have a parse rule.
        _ => ParseRule {
            prefix: ParseFn::None,
            infix: ParseFn::None,
            precedence: Precedence::None,
        },
    }
}
