use super::*;
use proptest::prelude::*;

fn math_imports() -> Vec<ImportDeclaration> {
    vec![
        ImportDeclaration::new("env", "print", vec![ValueType::I32], vec![]),
        ImportDeclaration::new(
            "basicMath",
            "addOne",
            vec![ValueType::I32],
            vec![ValueType::I32],
        ),
    ]
}

#[test]
fn identical_signatures_share_one_type_index() {
    let mut table = SymbolTable::new();
    let binary = FunctionType::new(vec![ValueType::I32, ValueType::I32], vec![ValueType::I32]);

    let first = table.register_type(&binary);
    let void = table.register_type(&FunctionType::void());
    let again = table.register_type(&binary.clone());

    assert_eq!(first, 0);
    assert_eq!(void, 1);
    assert_eq!(again, first);
    assert_eq!(table.type_count(), 2);
}

#[test]
fn find_type_does_not_register() {
    let mut table = SymbolTable::new();
    let unary = FunctionType::new(vec![ValueType::I64], vec![ValueType::I64]);

    assert_eq!(table.find_type(&unary), None);
    assert_eq!(table.type_count(), 0);

    let index = table.register_type(&unary);
    assert_eq!(table.find_type(&unary), Some(index));
}

#[test]
fn stored_types_are_the_encoded_signatures() {
    let mut table = SymbolTable::new();
    table.register_type(&FunctionType::new(vec![ValueType::F32], vec![]));

    assert_eq!(table.function_types(), &[vec![0x60, 0x01, 0x7D, 0x00]]);
    assert_eq!(
        table.signatures(),
        &[FunctionType::new(vec![ValueType::F32], vec![])]
    );
}

#[test]
fn imports_take_the_first_function_indices() {
    let table = SymbolTable::with_imports(math_imports());

    assert_eq!(table.import_count(), 2);
    assert_eq!(table.import_index("env", "print"), Some(0));
    assert_eq!(table.import_index("basicMath", "addOne"), Some(1));
    assert_eq!(table.import_index("basicMath", "print"), None);
    assert_eq!(table.next_function_index(), 2);
}

#[test]
fn resolving_an_undeclared_import_is_an_error() {
    let table = SymbolTable::with_imports(math_imports());

    match table.resolve_import("env", "missing") {
        Err(WasmEncodingError::UnresolvedImport { module, field }) => {
            assert_eq!(module, "env");
            assert_eq!(field, "missing");
        }
        other => panic!("expected an unresolved import, got {:?}", other),
    }
}

#[test]
fn built_functions_are_numbered_after_imports() {
    let mut table = SymbolTable::with_imports(math_imports());

    let first = table.function().end().build().unwrap();
    let second = table.function().end().build().unwrap();

    assert_eq!(first.index(), 2);
    assert_eq!(second.index(), 3);
    assert_eq!(table.function_count(), 2);
    assert_eq!(table.next_function_index(), 4);

    assert_eq!(table.function_by_index(3), Some(&second));
    assert_eq!(table.function_by_index(1), None);
    assert_eq!(table.function_by_index(4), None);
}

#[test]
fn index_translation_between_absolute_and_relative() {
    assert_eq!(section_relative_index(5, 2), Some(3));
    assert_eq!(section_relative_index(2, 2), Some(0));
    assert_eq!(section_relative_index(1, 2), None);
    assert_eq!(absolute_index(3, 2), 5);

    for import_count in 0..4 {
        for relative in 0..4 {
            let absolute = absolute_index(relative, import_count);
            assert_eq!(section_relative_index(absolute, import_count), Some(relative));
        }
    }
}

fn value_type() -> impl Strategy<Value = ValueType> {
    prop_oneof![
        Just(ValueType::I32),
        Just(ValueType::I64),
        Just(ValueType::F32),
        Just(ValueType::F64),
    ]
}

fn signature() -> impl Strategy<Value = FunctionType> {
    (
        prop::collection::vec(value_type(), 0..3),
        prop::collection::vec(value_type(), 0..2),
    )
        .prop_map(|(params, results)| FunctionType::new(params, results))
}

proptest! {
    #[test]
    fn type_count_equals_distinct_signatures(signatures in prop::collection::vec(signature(), 0..24)) {
        let mut table = SymbolTable::new();
        let mut distinct: Vec<FunctionType> = Vec::new();

        for signature in &signatures {
            let index = table.register_type(signature);
            match distinct.iter().position(|seen| seen == signature) {
                Some(position) => prop_assert_eq!(index as usize, position),
                None => {
                    prop_assert_eq!(index as usize, distinct.len());
                    distinct.push(signature.clone());
                }
            }
        }

        prop_assert_eq!(table.type_count() as usize, distinct.len());
    }
}
