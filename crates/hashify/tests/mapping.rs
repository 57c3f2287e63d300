use std::sync::LazyLock;

use hashify::prelude::*;
use hashify::Options;
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq)]
struct TrackedFile {
    path: String,
    commit: String,
}

impl FromFields for TrackedFile {
    fn from_fields(mut fields: Map) -> hashify::Result<Self> {
        Ok(TrackedFile {
            path: fields.take("path").to_string()?,
            commit: fields.take("commit").to_string()?,
        })
    }
}

impl Mappable for TrackedFile {
    fn mapper() -> &'static Mapper<TrackedFile> {
        static MAPPER: LazyLock<Mapper<TrackedFile>> = LazyLock::new(|| {
            Mapper::builder()
                .field("path", |f: &TrackedFile| Value::from(f.path.as_str()))
                .field("commit", |f: &TrackedFile| Value::from(f.commit.as_str()))
                .build()
        });
        &MAPPER
    }
}

fn tracked_file() -> TrackedFile {
    TrackedFile {
        path: "README.md".to_string(),
        commit: "cfe9aacbc02528b".to_string(),
    }
}

#[test]
fn to_map_uses_field_names_as_keys() {
    let map = tracked_file().to_map().unwrap();

    let mut expected = Map::new();
    expected.insert("path", Value::from("README.md"));
    expected.insert("commit", Value::from("cfe9aacbc02528b"));
    assert_eq!(map, expected);
}

#[test]
fn key_order_matches_registration_order() {
    let map = tracked_file().to_map().unwrap();
    let keys: Vec<_> = map.keys().collect();
    assert_eq!(keys, ["path", "commit"]);
}

#[test]
fn round_trip_reconstructs_an_equal_instance() {
    let original = tracked_file();
    let restored = TrackedFile::from_map(original.to_map().unwrap()).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn serialization_does_not_mutate_the_instance() {
    let original = tracked_file();
    let before = original.clone();
    let _ = original.to_map().unwrap();
    assert_eq!(original, before);
}

#[derive(Debug, Clone, PartialEq)]
struct Document {
    content: String,
}

impl FromFields for Document {
    fn from_fields(mut fields: Map) -> hashify::Result<Self> {
        Ok(Document {
            content: fields.take("content").to_string()?,
        })
    }
}

impl Mappable for Document {
    fn mapper() -> &'static Mapper<Document> {
        static MAPPER: LazyLock<Mapper<Document>> = LazyLock::new(|| {
            Mapper::builder()
                .field("content", |d: &Document| Value::from(d.content.as_str()))
                .encode(|value| Ok(Value::from(format!("--{}", value.to_string()?))))
                .decode(|value| {
                    let content = value.to_string()?;
                    let content = content.strip_prefix("--").unwrap_or(&content);
                    Ok(Value::from(content))
                })
                .build()
        });
        &MAPPER
    }
}

#[test]
fn transforms_apply_in_both_directions() {
    let doc = Document {
        content: "first".to_string(),
    };

    let map = doc.to_map().unwrap();
    assert_eq!(map.get("content"), Some(&Value::from("--first")));

    assert_eq!(Document::from_map(map).unwrap(), doc);
}

#[test]
fn custom_strategy_receives_the_decoded_fields() {
    let mapper = Mapper::<TrackedFile>::builder()
        .field("path", |f: &TrackedFile| Value::from(f.path.as_str()))
        .field("commit", |f: &TrackedFile| Value::from(f.commit.as_str()))
        .load_with(|mut fields| {
            Ok(TrackedFile {
                path: fields.take("path").to_string()?,
                commit: fields.take("commit").to_string()?.to_uppercase(),
            })
        })
        .build();

    let restored = mapper.from_map(mapper.to_map(&tracked_file()).unwrap()).unwrap();
    assert_eq!(restored.commit, "CFE9AACBC02528B");
}

#[test]
fn sentinel_strategy_proves_the_default_path_is_skipped() {
    let sentinel = TrackedFile {
        path: "sentinel".to_string(),
        commit: "sentinel".to_string(),
    };
    let expected = sentinel.clone();

    let mapper = Mapper::<TrackedFile>::builder()
        .field("path", |f: &TrackedFile| Value::from(f.path.as_str()))
        .load_with(move |_| Ok(sentinel.clone()))
        .build();

    let mut map = Map::new();
    map.insert("path", Value::from("anything"));
    assert_eq!(mapper.from_map(map).unwrap(), expected);
}

#[test]
fn filtered_options_attach_to_the_current_field() {
    let strategies = Options::new()
        .set("to_hash", |value| {
            Ok(Value::from(value.to_string()?.to_uppercase()))
        })
        .set("from_hash", |value| {
            Ok(Value::from(value.to_string()?.to_lowercase()))
        })
        .filter("mapping.rs")
        .strategies();

    let builder = Mapper::<TrackedFile>::builder()
        .field("path", |f: &TrackedFile| Value::from(f.path.as_str()));
    let mapper = strategies
        .apply(builder)
        .field("commit", |f: &TrackedFile| Value::from(f.commit.as_str()))
        .build();

    let map = mapper.to_map(&tracked_file()).unwrap();
    assert_eq!(map.get("path"), Some(&Value::from("README.MD")));

    let restored = mapper.from_map(map).unwrap();
    assert_eq!(restored.path, "readme.md");
}
