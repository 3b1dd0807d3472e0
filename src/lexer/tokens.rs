/// A token that represents a single unit of TripleS code.
#[derive(Clone)]
pub struct Token {
    /// The token's line number in the source.
    pub line_num: usize,
    /// The token's type.
    pub kind: TokenKind,
    /// The token's text. For `ERROR` tokens this holds the
    /// diagnostic message instead of source text.
    pub lexeme: String,
}

impl Token {
    /// A placeholder token used to initialize the parser state
    /// before the first token has been scanned.
    pub fn internal_init() -> Token {
        Token {
            line_num: 0,
            kind: TokenKind::INTERNAL_INIT,
            lexeme: String::new(),
        }
    }
}

/// The types of tokens in a TripleS program.
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Symbol-based tokens
    BANG,            // !
    COMMA,           // ,
    DASH,            // -
    DOT,             // .
    EQUALS,          // =
    GREATER_THAN,    // >
    GREATER_THAN_EQ, // >=
    LESS_THAN,       // <
    LESS_THAN_EQ,    // <=
    LOGIC_EQ,        // ==
    LOGIC_NOT_EQ,    // !=
    L_CURLY,         // {
    L_PAREN,         // (
    PLUS,            // +
    R_CURLY,         // }
    R_PAREN,         // )
    SEMICOLON,       // ;
    SLASH,           // /
    STAR,            // *

    // Value literals
    FALSE_LIT,
    IDENTIFIER,
    NULL_LIT,
    NUM_LIT,
    STR_LIT,
    TRUE_LIT,

    // Keywords
    AND_KW,
    CLASS_KW,
    ELSE_KW,
    FOR_KW,
    FUNCTION_KW,
    IF_KW,
    OR_KW,
    PRINT_KW,
    RETURN_KW,
    SUPER_KW,
    THIS_KW,
    VAR_KW,
    WHILE_KW,

    // Other tokens
    EOF,
    ERROR,
    INTERNAL_INIT,
}

/// Maps a keyword string to a token kind.
///
/// ## Arguments
/// * `id` – The identifier's string name.
///
/// ## Returns
/// `TokenKind` – The kind of token matched for the given identifier name.
pub fn make_identifier_kind(id: &str) -> TokenKind {
    match id {
        "and" => TokenKind::AND_KW,
        "class" => TokenKind::CLASS_KW,
        "else" => TokenKind::ELSE_KW,
        "false" => TokenKind::FALSE_LIT,
        "for" => TokenKind::FOR_KW,
        "function" => TokenKind::FUNCTION_KW,
        "if" => TokenKind::IF_KW,
        "null" => TokenKind::NULL_LIT,
        "or" => TokenKind::OR_KW,
        "print" => TokenKind::PRINT_KW,
        "return" => TokenKind::RETURN_KW,
        "super" => TokenKind::SUPER_KW,
        "this" => TokenKind::THIS_KW,
        "true" => TokenKind::TRUE_LIT,
        "var" => TokenKind::VAR_KW,
        "while" => TokenKind::WHILE_KW,
        _ => TokenKind::IDENTIFIER,
    }
}
