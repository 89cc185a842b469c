use sea_shipper_tokenizer::{Tokenizer, Transition, TransitionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Id,
    Type,
    TypeArray,
    ArraySize,
    Data,
    DataArray,
}

/// `id:type:data;` records, where `type` may carry an array annotation `[n]type` and the data
/// of an array is a `,` separated list.
fn record_tokenizer() -> Tokenizer<Field> {
    let table = TransitionTable::new()
        .with(Field::Id, [Transition::emit(":", Field::Type)])
        .unwrap()
        .with(
            Field::Type,
            [
                Transition::restart("[", Field::ArraySize),
                Transition::emit(":", Field::Data),
            ],
        )
        .unwrap()
        .with(Field::TypeArray, [Transition::emit(":", Field::DataArray)])
        .unwrap()
        .with(Field::ArraySize, [Transition::emit("]", Field::TypeArray)])
        .unwrap()
        .with(Field::Data, [Transition::emit(";", Field::Id)])
        .unwrap()
        .with(
            Field::DataArray,
            [
                Transition::emit(",", Field::DataArray),
                Transition::emit(";", Field::Id),
            ],
        )
        .unwrap();
    Tokenizer::new(table)
}

#[test]
fn records_with_arrays() {
    let ids = ["Value1", "Value2"];
    let types = ["[3]int", "string"];
    let data = ["1,2,3", "hello world"];

    let input: String = (0..ids.len())
        .map(|i| format!("{}:{}:{};", ids[i], types[i], data[i]))
        .collect();
    assert_eq!(input, "Value1:[3]int:1,2,3;Value2:string:hello world;");

    let tokenizer = record_tokenizer();
    let tokens = tokenizer.tokenize_partial(input.as_bytes(), Field::Id);
    assert_eq!(tokens.len(), 9);
    assert!(tokens.is_complete());

    let mut idx = 0;
    let mut array_size = 0;
    let mut array_data: Vec<&str> = Vec::new();

    for token in tokens.iter() {
        let value = token.as_str().unwrap();
        match token.state() {
            Field::Id => assert_eq!(value, ids[idx]),
            Field::Type => assert_eq!(value, types[idx]),
            Field::TypeArray => {
                let name_start = types[idx].find(']').unwrap() + 1;
                assert_eq!(value, &types[idx][name_start..]);
                array_data.clear();
            }
            Field::ArraySize => {
                assert_eq!(value, "3");
                array_size = token.as_u64().unwrap();
            }
            Field::Data => {
                assert_eq!(value, data[idx]);
                idx += 1;
            }
            Field::DataArray => {
                array_data.push(value);
                array_size -= 1;
                if array_size == 0 {
                    assert_eq!(array_data.join(","), data[idx]);
                    idx += 1;
                }
            }
        }
    }

    assert_eq!(idx, 2);
}

#[test]
fn array_annotation_is_never_emitted() {
    let tokenizer = record_tokenizer();
    let tokens = tokenizer.tokenize(b"v:[2]float:0.5,1.5;", Field::Id);
    let states: Vec<Field> = tokens.iter().map(|t| t.state()).collect();
    assert_eq!(
        states,
        [
            Field::Id,
            Field::ArraySize,
            Field::TypeArray,
            Field::DataArray,
            Field::DataArray,
        ]
    );
    // the bytes before '[' are discarded, so no token carries "[2]float" or an empty type
    assert!(tokens.iter().all(|t| t.state() != Field::Type));
}

#[test]
fn record_without_terminator_leaves_residue() {
    let tokenizer = record_tokenizer();
    let tokens = tokenizer.tokenize_partial(b"a:int:1;b:string:unterminated", Field::Id);
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens.residue(), b"unterminated");
}
