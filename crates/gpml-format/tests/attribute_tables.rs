//! Checks the attribute tables against the embedded XML Schemas
//!
//! Every element path declared in a schema maps to a table key (its tag
//! name, or `Parent.Graphics` for graphics elements). The table must list
//! exactly the attributes the schema declares there, with the same type,
//! default and required-ness.

use std::collections::{BTreeMap, BTreeSet};

use gpml_format::{FormatVersion, attributes::AttributeTable, validate::embedded_schema};

type Facts = BTreeMap<String, (String, Option<String>, bool)>;

fn table_key(path: &[String]) -> String {
    match path {
        [.., parent, last] if last == "Graphics" => format!("{parent}.Graphics"),
        [.., last] => last.clone(),
        [] => String::new(),
    }
}

fn table_facts(table: &AttributeTable, key: &str) -> Facts {
    table
        .attributes(key)
        .map(|spec| {
            (
                spec.name.to_string(),
                (
                    spec.xsd_type.to_string(),
                    spec.default.map(str::to_string),
                    spec.required,
                ),
            )
        })
        .collect()
}

#[test]
fn test_tables_match_schemas() {
    for version in FormatVersion::ALL {
        let schema = embedded_schema(version).unwrap();
        let table = AttributeTable::for_version(version);
        let table_keys: BTreeSet<&str> = table.element_keys().collect();
        let mut seen = BTreeSet::new();

        for (path, declared) in schema.element_paths() {
            let key = table_key(&path);
            let schema_facts: Facts = declared
                .iter()
                .map(|decl| {
                    (
                        decl.name().to_string(),
                        (
                            decl.type_name(),
                            decl.default().map(str::to_string),
                            decl.required(),
                        ),
                    )
                })
                .collect();

            if !table_keys.contains(key.as_str()) {
                assert!(
                    schema_facts.is_empty(),
                    "{version}: `{}` declares attributes but has no table entry",
                    path.join("/")
                );
                continue;
            }
            seen.insert(key.clone());
            assert_eq!(
                table_facts(table, &key),
                schema_facts,
                "{version}: attributes of `{}`",
                path.join("/")
            );
        }

        let unseen: Vec<_> = table_keys
            .iter()
            .filter(|key| !seen.contains(**key))
            .collect();
        assert!(unseen.is_empty(), "{version}: keys not in schema: {unseen:?}");
    }
}

#[test]
fn test_legacy_versions_agree() {
    let a = embedded_schema(FormatVersion::Gpml2013a).unwrap();
    let b = embedded_schema(FormatVersion::Gpml2017).unwrap();
    let paths = |schema: &gpml_format::validate::Schema| -> BTreeSet<String> {
        schema
            .element_paths()
            .into_iter()
            .map(|(path, _)| path.join("/"))
            .collect()
    };
    assert_eq!(paths(a), paths(b));
}
