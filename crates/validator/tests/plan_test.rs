//! Validation plan introspection.

use std::collections::BTreeMap;

use manifest_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct Student {
    index: String,
}
property_value!(Student);

#[derive(Debug, Clone, Default)]
struct Teacher {
    name: String,
    age: Option<u32>,
    students: Vec<Student>,
    labels: BTreeMap<String, String>,
}

fn teacher_validator() -> Validator<Teacher> {
    let student = validator![
        for_property(|s: &Student| s.index.clone())
            .with_name("index")
            .rules(string_length(9, 9)),
    ];
    validator![
        for_property(|t: &Teacher| t.name.clone())
            .with_name("name")
            .with_examples(["jake", "tom"])
            .required()
            .rules(string_is_dns_subdomain()),
        for_option(|t: &Teacher| t.age)
            .with_name("age")
            .rules(less_than(150_u32)),
        for_slice(|t: &Teacher| t.students.clone())
            .with_name("students")
            .rules(slice_max_length(3))
            .include_for_each(student),
        for_map(|t: &Teacher| t.labels.clone())
            .with_name("labels")
            .when_described(|t: &Teacher| t.age.is_some(), "age is set")
            .rules_for_keys(string_is_dns_subdomain()),
        for_property(|t: &Teacher| t.name.clone()).with_name("nickname"),
    ]
}

#[test]
fn plan_lists_rule_bearing_paths_in_order() {
    let plans = plan(&teacher_validator());

    let paths: Vec<&str> = plans.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "$.age",
            "$.labels.*",
            "$.name",
            "$.students",
            "$.students[*].index"
        ]
    );
}

#[test]
fn plan_describes_property_metadata() {
    let plans = plan(&teacher_validator());
    let by_path: BTreeMap<&str, &PropertyPlan> =
        plans.iter().map(|p| (p.path.as_str(), p)).collect();

    let name = by_path["$.name"];
    assert_eq!(name.type_name, "String");
    assert_eq!(name.examples, vec!["jake", "tom"]);
    assert!(!name.is_optional);
    assert_eq!(
        name.rules
            .iter()
            .map(|r| r.error_code.as_str())
            .collect::<Vec<_>>(),
        vec![
            "string_is_dns_subdomain:string_length",
            "string_is_dns_subdomain:string_match_regexp"
        ]
    );
    assert!(name.rules[1].details.starts_with("a DNS-1123 compliant name"));

    assert!(by_path["$.age"].is_optional);
    assert_eq!(by_path["$.students"].type_name, "Vec<Student>");
    assert_eq!(by_path["$.students[*].index"].type_name, "String");
}

#[test]
fn plan_carries_conditions() {
    let plans = plan(&teacher_validator());
    let labels = plans.iter().find(|p| p.path == "$.labels.*").unwrap();

    assert!(
        labels
            .rules
            .iter()
            .all(|r| r.conditions == vec!["age is set".to_owned()])
    );
}

#[test]
fn plan_serializes_to_json() {
    let plans = plan(&teacher_validator());
    let age = plans.iter().find(|p| p.path == "$.age").unwrap();

    insta::assert_json_snapshot!(age, @r#"
    {
      "path": "$.age",
      "type": "u32",
      "isOptional": true,
      "rules": [
        {
          "description": "should be less than '150'",
          "errorCode": "less_than"
        }
      ]
    }
    "#);
}
