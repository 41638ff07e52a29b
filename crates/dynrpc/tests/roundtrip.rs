//! Randomized round trips over generated schemas, plus schema sharing.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use dynrpc::dynpack::BinaryReader;
use dynrpc::dynpack::BinaryWriter;
use dynrpc::Envelope;
use dynrpc::Field;
use dynrpc::Schema;
use dynrpc::Value;

const CASES: usize = 200;

fn random_schema(rng: &mut StdRng, depth: usize) -> Schema {
    let pick = if depth == 0 { rng.gen_range(0..6) } else { rng.gen_range(0..9) };
    match pick {
        0 => Schema::Int16,
        1 => Schema::Int32,
        2 => Schema::Int64,
        3 => Schema::Double,
        4 => Schema::Bool,
        5 => Schema::String,
        6 => {
            let count = rng.gen_range(1..5);
            Schema::object((1..=count).map(|id| Field::new(format!("f{}", id), id, random_schema(rng, depth - 1))))
        }
        7 => Schema::array(random_schema(rng, depth - 1)),
        _ => Schema::map(random_schema(rng, depth - 1)),
    }
}

fn random_string(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..8);
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

/// A value shaped like `schema`, with the occasional `Null` hole.
fn random_value(rng: &mut StdRng, schema: &Schema) -> Value {
    if rng.gen_ratio(1, 8) {
        return Value::Null;
    }
    match schema {
        Schema::Int16 => Value::Int16(rng.gen()),
        Schema::Int32 => Value::Int32(rng.gen()),
        Schema::Int64 => Value::Int64(rng.gen()),
        Schema::Double => Value::Double(rng.gen_range(-1e9..1e9)),
        Schema::Bool => Value::Bool(rng.gen()),
        Schema::String => Value::String(random_string(rng)),
        Schema::Object(fields) => {
            let mut entries = BTreeMap::new();
            for field in fields {
                if rng.gen_ratio(3, 4) {
                    entries.insert(field.name.clone(), random_value(rng, &field.ty));
                }
            }
            Value::Map(entries)
        }
        Schema::Array(element) => {
            let len = rng.gen_range(0..4);
            (0..len).map(|_| random_value(rng, element)).collect()
        }
        Schema::Map(element) => {
            let len = rng.gen_range(0..4);
            (0..len).map(|_| (random_string(rng), random_value(rng, element))).collect()
        }
    }
}

/// What a decoder must hand back for `value`: holes and missing fields
/// become zero values.
fn expected(schema: &Schema, value: &Value) -> Value {
    match (schema, value) {
        (_, Value::Null) => Value::zero_of(schema),
        (Schema::Object(fields), value) => fields
            .iter()
            .map(|f| (f.name.clone(), expected(&f.ty, value.get(&f.name).unwrap_or(&Value::Null))))
            .collect(),
        (Schema::Array(element), Value::List(items)) => items.iter().map(|item| expected(element, item)).collect(),
        (Schema::Map(element), Value::Map(entries)) => Value::Map(
            entries
                .iter()
                .map(|(k, item)| (k.clone(), expected(element, item)))
                .collect::<BTreeMap<_, _>>(),
        ),
        (_, value) => value.clone(),
    }
}

#[test]
fn test_random_roundtrips() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..CASES {
        let schema = random_schema(&mut rng, 3);
        let value = random_value(&mut rng, &schema);

        let mut w = BinaryWriter::new();
        dynrpc::encode(&schema, &value, &mut w)?;

        let mut r = BinaryReader::new(w.as_bytes());
        let decoded = dynrpc::decode(&schema, &mut r)?;
        assert_eq!(r.remaining(), 0);
        assert_eq!(decoded, expected(&schema, &value), "schema: {}", schema.to_json());

        // Re-encoding the decoded value is byte-identical.
        let mut again = BinaryWriter::new();
        dynrpc::encode(&schema, &decoded, &mut again)?;
        assert_eq!(again.as_bytes(), w.as_bytes());
    }
    Ok(())
}

#[test]
fn test_random_schema_documents_reparse() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..CASES {
        let schema = random_schema(&mut rng, 3);
        let text = schema.to_json().to_string();
        assert_eq!(Schema::parse(&text)?, schema);
    }
    Ok(())
}

#[test]
fn test_shared_schema_across_threads() -> anyhow::Result<()> {
    let schema = Arc::new(Schema::parse(
        r#"{
            "type": "object",
            "fields": [
                { "name": "id",    "id": 1, "description": { "type": "int64" } },
                { "name": "names", "id": 2, "description": { "type": "list", "element": { "type": "string" } } }
            ]
        }"#,
    )?);

    let handles: Vec<_> = (0..4i64)
        .map(|n| {
            let schema = Arc::clone(&schema);
            std::thread::spawn(move || -> dynrpc::Result<Value> {
                let value = Value::from_iter([
                    ("id", Value::Int64(n)),
                    ("names", (0..n).map(|i| Value::from(format!("n{}", i))).collect()),
                ]);
                let mut w = BinaryWriter::new();
                Envelope::for_write(&schema, value).write_to(&mut w)?;

                let mut read = Envelope::for_read(&schema);
                read.read_from(&mut BinaryReader::new(w.as_bytes()))?;
                Ok(read.into_value().unwrap_or_default())
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let value = handle.join().map_err(|_| anyhow::anyhow!("worker panicked"))??;
        assert_eq!(value.get("id"), Some(&Value::Int64(n as i64)));
        assert_eq!(value.get("names").and_then(Value::as_list).map(<[Value]>::len), Some(n));
    }
    Ok(())
}
