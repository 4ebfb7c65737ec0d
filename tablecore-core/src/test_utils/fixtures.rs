//! Test fixtures for creating common stores and object types

use crate::core_store::model::{ColumnType, RowHandle, ValueKind};
use crate::core_store::store::{CoreProvider, LocalStore, PersistedObject, Property};

pub const PERSON: &str = "Person";
pub const AGE: ColumnType = ColumnType::required(ValueKind::Int32);

/// Object type with one property of every supported cell type
pub struct AllTypes;

impl PersistedObject for AllTypes {
    const TABLE_NAME: &'static str = "AllTypes";

    fn properties() -> Vec<Property> {
        vec![
            Property::of::<bool>("Bool"),
            Property::of::<i16>("Int16"),
            Property::of::<i32>("Int32"),
            Property::of::<i64>("Int64"),
            Property::of::<f32>("Float"),
            Property::of::<f64>("Double"),
            Property::of::<String>("String"),
            Property::of::<Vec<u8>>("Binary"),
            Property::of::<Option<bool>>("NullableBool"),
            Property::of::<Option<i16>>("NullableInt16"),
            Property::of::<Option<i32>>("NullableInt32"),
            Property::of::<Option<i64>>("NullableInt64"),
            Property::of::<Option<f32>>("NullableFloat"),
            Property::of::<Option<f64>>("NullableDouble"),
            Property::of::<Option<String>>("NullableString"),
            Property::of::<Option<Vec<u8>>>("NullableBinary"),
        ]
    }
}

/// Store with a `Person` table declaring `Age: int32` and no rows
pub fn person_store() -> LocalStore {
    let store = LocalStore::new();
    store.add_table(PERSON).unwrap();
    store.add_column_to_table(PERSON, "Age", AGE).unwrap();
    store
}

/// `person_store` with `rows` rows inserted
pub fn person_store_with_rows(rows: u64) -> (LocalStore, Vec<RowHandle>) {
    let store = person_store();
    let handles = (0..rows)
        .map(|_| store.insert_empty_row(PERSON).unwrap())
        .collect();
    (store, handles)
}
