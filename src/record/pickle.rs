//! Pickle decoding into record values
//!
//! Records written by the retargeting pipeline mix plain Python containers
//! with numpy arrays. A numpy array pickles as a reconstructor call followed
//! by a state tuple whose payload is a byte string. serde-pickle replaces the
//! unresolved reconstructor with its state; this module then maps what JSON
//! cannot hold to `null`:
//!
//! - byte strings (array payloads, dtype descriptors)
//! - non-finite floats
//!
//! Tuples and sets become arrays. Dictionary keys that are not strings are
//! rendered in their JSON form (`1`, `[1,2]`).

use crate::error::Result;
use serde_json::{Map, Number, Value};
use serde_pickle::{DeOptions, HashableValue, Value as PickleValue};
use std::io::Read;

/// Decode options used for every record
fn options() -> DeOptions {
    DeOptions::new().decode_strings().replace_unresolved_globals()
}

/// Read one pickled value and convert it to a JSON value
pub fn read_value<R: Read>(reader: R) -> Result<Value> {
    let value = serde_pickle::value_from_reader(reader, options())?;
    Ok(to_json(value))
}

fn to_json(value: PickleValue) -> Value {
    match value {
        PickleValue::None | PickleValue::Bytes(_) => Value::Null,
        PickleValue::Bool(b) => Value::Bool(b),
        PickleValue::I64(i) => Value::from(i),
        PickleValue::Int(big) => float(big.to_string().parse().unwrap_or(f64::NAN)),
        PickleValue::F64(f) => float(f),
        PickleValue::String(s) => Value::String(s),
        PickleValue::List(items) | PickleValue::Tuple(items) => {
            Value::Array(items.into_iter().map(to_json).collect())
        }
        PickleValue::Set(items) | PickleValue::FrozenSet(items) => Value::Array(
            items
                .into_iter()
                .map(|item| to_json(item.into_value()))
                .collect(),
        ),
        PickleValue::Dict(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(key_string(key), to_json(value));
            }
            Value::Object(map)
        }
    }
}

fn float(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}

fn key_string(key: HashableValue) -> String {
    match to_json(key.into_value()) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
