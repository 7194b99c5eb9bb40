//! Property tests for `SharedList`: any sequence of operations must agree
//! with a `Vec` model, and length accounting must never drift.

use lamplist::SharedList;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    PushBack(i64),
    PopBack,
    RemoveValue(i64),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0i64..=100).prop_map(Op::PushBack),
        2 => Just(Op::PopBack),
        2 => (0i64..=100).prop_map(Op::RemoveValue),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn list_matches_vec_model(ops in proptest::collection::vec(op_strategy(), 0..200)) {
        let mut list = SharedList::new();
        let mut model: Vec<i64> = Vec::new();

        for op in ops {
            match op {
                Op::PushBack(value) => {
                    list.push_back(value);
                    model.push(value);
                }
                Op::PopBack => {
                    prop_assert_eq!(list.pop_back(), model.pop());
                }
                Op::RemoveValue(value) => {
                    let expected = match model.iter().position(|x| *x == value) {
                        Some(index) => {
                            model.remove(index);
                            true
                        }
                        None => false,
                    };
                    prop_assert_eq!(list.remove_value(&value), expected);
                }
                Op::Clear => {
                    list.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.is_empty(), model.is_empty());
            prop_assert_eq!(list.to_vec(), model.clone());
        }
    }

    #[test]
    fn length_equals_pushes_minus_successful_removals(
        values in proptest::collection::vec(0i64..=100, 0..100),
        removals in 0usize..120,
    ) {
        let mut list = SharedList::new();
        for value in &values {
            list.push_back(*value);
        }

        let mut removed = 0;
        for _ in 0..removals {
            if list.pop_back().is_some() {
                removed += 1;
            }
        }

        prop_assert_eq!(list.len(), values.len() - removed);
        prop_assert_eq!(list.to_vec(), values[..values.len() - removed].to_vec());
    }
}
