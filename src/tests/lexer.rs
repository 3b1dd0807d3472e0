use crate::lexer::tokens::TokenKind;
use crate::lexer::Lexer;

/// Scans an entire source string, collecting the token kinds up to
/// and including `EOF`.
fn lex_kinds(src: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(src);
    let mut kinds = vec![];

    loop {
        let token = lexer.next_token();
        let kind = token.kind;
        kinds.push(kind);

        if kind == TokenKind::EOF {
            return kinds;
        }
    }
}

#[test]
fn scans_a_simple_statement() {
    assert_eq!(
        lex_kinds("print 1 + 2;"),
        vec![
            TokenKind::PRINT_KW,
            TokenKind::NUM_LIT,
            TokenKind::PLUS,
            TokenKind::NUM_LIT,
            TokenKind::SEMICOLON,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn scans_two_character_operators() {
    assert_eq!(
        lex_kinds("! != = == < <= > >="),
        vec![
            TokenKind::BANG,
            TokenKind::LOGIC_NOT_EQ,
            TokenKind::EQUALS,
            TokenKind::LOGIC_EQ,
            TokenKind::LESS_THAN,
            TokenKind::LESS_THAN_EQ,
            TokenKind::GREATER_THAN,
            TokenKind::GREATER_THAN_EQ,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn scans_keywords_and_identifiers() {
    assert_eq!(
        lex_kinds("var x; while printer and print"),
        vec![
            TokenKind::VAR_KW,
            TokenKind::IDENTIFIER,
            TokenKind::SEMICOLON,
            TokenKind::WHILE_KW,
            TokenKind::IDENTIFIER,
            TokenKind::AND_KW,
            TokenKind::PRINT_KW,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn accepts_both_string_delimiters() {
    let mut lexer = Lexer::new("\"double\" 'single'");

    let first = lexer.next_token();
    assert_eq!(first.kind, TokenKind::STR_LIT);
    assert_eq!(first.lexeme, "\"double\"");

    let second = lexer.next_token();
    assert_eq!(second.kind, TokenKind::STR_LIT);
    assert_eq!(second.lexeme, "'single'");
}

#[test]
fn a_quote_of_the_other_kind_does_not_close_a_string() {
    let mut lexer = Lexer::new("\"it's fine\"");

    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::STR_LIT);
    assert_eq!(token.lexeme, "\"it's fine\"");
}

#[test]
fn a_backslash_escapes_the_closing_delimiter() {
    let mut lexer = Lexer::new(r#""say \"hi\"""#);

    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::STR_LIT);
    // The backslashes are preserved; the lexer does not decode escapes.
    assert_eq!(token.lexeme, r#""say \"hi\"""#);
}

#[test]
fn an_unterminated_string_is_an_error_token() {
    let mut lexer = Lexer::new("\"no end");

    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::ERROR);
    assert_eq!(token.lexeme, "Unterminated string.");
}

#[test]
fn an_unexpected_character_is_an_error_token() {
    let mut lexer = Lexer::new("@");

    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::ERROR);
    assert_eq!(token.lexeme, "Unexpected character.");
}

#[test]
fn a_trailing_dot_is_not_part_of_a_number() {
    let mut lexer = Lexer::new("1.");

    let number = lexer.next_token();
    assert_eq!(number.kind, TokenKind::NUM_LIT);
    assert_eq!(number.lexeme, "1");

    assert_eq!(lexer.next_token().kind, TokenKind::DOT);
}

#[test]
fn scans_fractional_numbers() {
    let mut lexer = Lexer::new("12.75");

    let number = lexer.next_token();
    assert_eq!(number.kind, TokenKind::NUM_LIT);
    assert_eq!(number.lexeme, "12.75");
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
}

#[test]
fn counts_lines_through_comments_and_strings() {
    let mut lexer = Lexer::new("1\n// a comment\n2 \"a\nb\" 3");

    assert_eq!(lexer.next_token().line_num, 1);

    let two = lexer.next_token();
    assert_eq!(two.lexeme, "2");
    assert_eq!(two.line_num, 3);

    // The string spans a newline, so the token after it is a line down.
    lexer.next_token();
    assert_eq!(lexer.next_token().line_num, 4);
}

#[test]
fn comments_run_to_the_end_of_the_line() {
    assert_eq!(
        lex_kinds("// print 1;\nprint 2; // trailing"),
        vec![
            TokenKind::PRINT_KW,
            TokenKind::NUM_LIT,
            TokenKind::SEMICOLON,
            TokenKind::EOF,
        ]
    );
}
