use crate::bytecode::{Chunk, OpCode};
use crate::compiler::Compiler;
use crate::objects::Heap;

/// Compiles a source string, panicking on compile errors.
fn compile(src: &str) -> Chunk {
    let mut heap = Heap::new();

    match Compiler::compile(src, &mut heap) {
        Ok(chunk) => chunk,
        Err(_) => panic!("Compiler had errors."),
    }
}

/// Checks that a source string fails to compile.
fn compile_fails(src: &str) {
    let mut heap = Heap::new();

    if Compiler::compile(src, &mut heap).is_ok() {
        panic!("Expected a compile error.");
    }
}

/// Decodes a chunk back into its opcode sequence, skipping operand
/// bytes and asserting that every constant operand is a valid pool
/// index.
fn op_codes(chunk: &Chunk) -> Vec<OpCode> {
    let mut ops = vec![];
    let mut idx = 0;

    while idx < chunk.len() {
        let op = match chunk.get_op_code(idx) {
            Some(op) => op,
            None => panic!("Invalid instruction byte at offset {}.", idx),
        };
        ops.push(op);
        idx += 1;

        match op {
            OpCode::DefineGlobal | OpCode::GetGlobal | OpCode::LoadConstant | OpCode::SetGlobal => {
                let operand = chunk.get_byte(idx).expect("Missing operand byte.") as usize;
                assert!(
                    chunk.get_constant(operand).is_some(),
                    "Operand {} is not a valid pool index.",
                    operand
                );
                idx += 1;
            }
            _ => {}
        }
    }

    ops
}

#[test]
fn factors_bind_tighter_than_terms() {
    let chunk = compile("1 + 2 * 3;");

    assert_eq!(
        op_codes(&chunk),
        vec![
            OpCode::LoadConstant,
            OpCode::LoadConstant,
            OpCode::LoadConstant,
            OpCode::Multiply,
            OpCode::Add,
            OpCode::PopStackTop,
            OpCode::Return,
        ]
    );
}

#[test]
fn subtraction_associates_to_the_left() {
    let chunk = compile("6 - 3 - 1;");

    assert_eq!(
        op_codes(&chunk),
        vec![
            OpCode::LoadConstant,
            OpCode::LoadConstant,
            OpCode::Subtract,
            OpCode::LoadConstant,
            OpCode::Subtract,
            OpCode::PopStackTop,
            OpCode::Return,
        ]
    );
}

#[test]
fn unary_binds_tighter_than_binary() {
    let chunk = compile("-1 + 2;");

    assert_eq!(
        op_codes(&chunk),
        vec![
            OpCode::LoadConstant,
            OpCode::Negate,
            OpCode::LoadConstant,
            OpCode::Add,
            OpCode::PopStackTop,
            OpCode::Return,
        ]
    );
}

#[test]
fn a_var_declaration_defines_a_global() {
    let chunk = compile("var x = 5;");

    assert_eq!(
        op_codes(&chunk),
        vec![
            OpCode::LoadConstant,
            OpCode::DefineGlobal,
            OpCode::Return,
        ]
    );

    // The variable's name is interned into the pool as a string.
    let name_idx = chunk.get_byte(3).unwrap() as usize;
    assert!(chunk.get_constant(name_idx).unwrap().is_str());
}

#[test]
fn a_var_declaration_without_initializer_defaults_to_null() {
    let chunk = compile("var x;");

    assert_eq!(
        op_codes(&chunk),
        vec![OpCode::LoadImmNull, OpCode::DefineGlobal, OpCode::Return]
    );
}

#[test]
fn an_assignment_compiles_to_set_global() {
    let chunk = compile("x = 5;");

    assert_eq!(
        op_codes(&chunk),
        vec![
            OpCode::LoadConstant,
            OpCode::SetGlobal,
            OpCode::PopStackTop,
            OpCode::Return,
        ]
    );
}

#[test]
fn a_print_statement_emits_print() {
    let chunk = compile("print 1;");

    assert_eq!(
        op_codes(&chunk),
        vec![OpCode::LoadConstant, OpCode::Print, OpCode::Return]
    );
}

#[test]
fn every_instruction_byte_has_a_line() {
    let chunk = compile("var x = 1;\nprint x + 2;");

    // The line list grows in lock-step with the instruction list, and
    // bytes emitted while parsing line two carry that line.
    for idx in 0..chunk.len() {
        let line = chunk.get_line(idx);
        assert!(line == 1 || line == 2);
    }
    assert_eq!(chunk.get_line(chunk.len() - 1), 2);
}

#[test]
fn the_constant_pool_deduplicates_equal_values() {
    let chunk = compile(&"8.9;".repeat(500));
    assert_eq!(chunk.get_pool_size(), 1);
}

#[test]
fn equal_string_literals_share_a_pool_entry() {
    let chunk = compile("\"hi\"; \"hi\";");
    assert_eq!(chunk.get_pool_size(), 1);

    // Both statements load the same pool index.
    assert_eq!(chunk.get_byte(1), chunk.get_byte(4));
}

#[test]
fn the_constant_pool_overflows_at_256_entries() {
    let mut src = String::new();
    for n in 0..300 {
        src.push_str(&format!("{};", n));
    }

    compile_fails(&src);
}

#[test]
fn an_unbalanced_parenthesis_is_a_compile_error() {
    compile_fails("print (1 + 2;");
}

#[test]
fn a_missing_operand_is_a_compile_error() {
    compile_fails("1 + ;");
}

#[test]
fn a_missing_semicolon_is_a_compile_error() {
    compile_fails("print 1");
}

#[test]
fn an_invalid_assignment_target_is_a_compile_error() {
    compile_fails("var a; var b; var c; a + b = c;");
}

#[test]
fn a_var_without_a_name_is_a_compile_error() {
    compile_fails("var 1 = 2;");
}

#[test]
fn panic_mode_recovers_at_statement_boundaries() {
    // Both statements after the bad one still get parsed; the second
    // error proves the compiler kept going past the first.
    compile_fails("1 + ; print 2; 3 + ;");
}

#[test]
fn an_empty_program_compiles_to_a_lone_return() {
    let chunk = compile("");

    assert_eq!(op_codes(&chunk), vec![OpCode::Return]);
    assert_eq!(chunk.get_pool_size(), 0);
}
