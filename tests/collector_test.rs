mod common;

use common::{write_template, ScriptedResolver};
use nebula::collector::Collector;
use nebula::config::Config;
use nebula::constants::CONFIG_FILE;
use nebula::error::Error;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_consume_single_file() {
    let temp_dir = TempDir::new().unwrap();
    write_template(temp_dir.path(), "[{{env}}].config.neb", "host={{host}}");

    let mut resolver = ScriptedResolver::new(&[("env", "prod"), ("host", "db1")]);
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    collector.consume(temp_dir.path().join("[{{env}}].config.neb"), true).unwrap();

    let template = &collector.templates()["{{env}}.config"];
    assert_eq!(template.content, "host={{host}}");
    assert_eq!(collector.bindings()["{{env}}"], "prod");
    assert_eq!(collector.bindings()["{{host}}"], "db1");
    assert_eq!(resolver.asked, vec!["env", "host"]);
}

#[test]
fn test_consume_single_file_with_bracket_and_trailing_extension() {
    let temp_dir = TempDir::new().unwrap();
    let file_name = r"[{{dir}}\{{name}}].tar.gz.neb";
    write_template(temp_dir.path(), file_name, "archive");

    let mut resolver = ScriptedResolver::new(&[("dir", "dist"), ("name", "app")]);
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    collector.consume(temp_dir.path().join(file_name), true).unwrap();

    let expected = format!("{{{{dir}}}}{}{{{{name}}}}.tar.gz", std::path::MAIN_SEPARATOR);
    let keys: Vec<_> = collector.templates().keys().cloned().collect();
    assert_eq!(keys, vec![expected]);
    assert_eq!(resolver.asked, vec!["dir", "name"]);
}

#[test]
fn test_directory_configuration_extension_with_leading_dot() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE), r#"{"extension": ".tpl"}"#).unwrap();
    write_template(temp_dir.path(), "[app.toml].tpl", "name = 1");

    let mut resolver = ScriptedResolver::default();
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    collector.consume(temp_dir.path(), true).unwrap();

    assert_eq!(collector.config().extension, "tpl");
    assert!(collector.templates().contains_key("app.toml"));
}

#[test]
fn test_shared_placeholder_is_asked_once() {
    let temp_dir = TempDir::new().unwrap();
    write_template(temp_dir.path(), "[{{name}}.txt].neb", "hello {{name}}, {{name}}!");
    write_template(temp_dir.path(), "[{{name}}.md].neb", "# {{name}}");

    let mut resolver = ScriptedResolver::new(&[("name", "nebula")]);
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    collector.consume(temp_dir.path(), true).unwrap();

    assert_eq!(collector.templates().len(), 2);
    assert_eq!(collector.bindings().len(), 1);
    assert_eq!(resolver.asked, vec!["name"]);
}

#[test]
fn test_shallow_ignores_content_placeholders() {
    let temp_dir = TempDir::new().unwrap();
    write_template(temp_dir.path(), "[{{env}}.ini].neb", "user={{user}}");

    let mut resolver = ScriptedResolver::new(&[("env", "dev")]);
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    collector.consume(temp_dir.path(), false).unwrap();

    assert_eq!(collector.bindings().len(), 1);
    assert!(collector.bindings().contains_key("{{env}}"));
    assert_eq!(resolver.asked, vec!["env"]);
}

#[test]
fn test_directory_skips_non_templates_and_subdirectories() {
    let temp_dir = TempDir::new().unwrap();
    write_template(temp_dir.path(), "[a.txt].neb", "a");
    write_template(temp_dir.path(), "notes.md", "{{ignored}}");
    fs::create_dir(temp_dir.path().join("nested")).unwrap();
    write_template(&temp_dir.path().join("nested"), "[b.txt].neb", "b");

    let mut resolver = ScriptedResolver::default();
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    collector.consume(temp_dir.path(), true).unwrap();

    let keys: Vec<_> = collector.templates().keys().cloned().collect();
    assert_eq!(keys, vec!["a.txt"]);
    assert!(resolver.asked.is_empty());
}

#[test]
fn test_directory_entries_are_consumed_in_name_order() {
    let temp_dir = TempDir::new().unwrap();
    write_template(temp_dir.path(), "[c.txt].neb", "c");
    write_template(temp_dir.path(), "[a.txt].neb", "a");
    write_template(temp_dir.path(), "[b.txt].neb", "b");

    let mut resolver = ScriptedResolver::default();
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    collector.consume(temp_dir.path(), true).unwrap();

    let keys: Vec<_> = collector.templates().keys().cloned().collect();
    assert_eq!(keys, vec!["a.txt", "b.txt", "c.txt"]);
}

#[test]
fn test_single_non_template_file_is_invalid() {
    let temp_dir = TempDir::new().unwrap();
    write_template(temp_dir.path(), "plain.txt", "text");

    let mut resolver = ScriptedResolver::default();
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    let result = collector.consume(temp_dir.path().join("plain.txt"), true);

    assert!(matches!(result, Err(Error::InvalidPath { .. })));
    assert!(collector.is_empty());
}

#[test]
fn test_add_file_skips_non_template() {
    let temp_dir = TempDir::new().unwrap();
    write_template(temp_dir.path(), "plain.txt", "{{x}}");

    let mut resolver = ScriptedResolver::default();
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    collector.add_file(temp_dir.path().join("plain.txt"), true).unwrap();

    assert!(collector.is_empty());
    assert!(resolver.asked.is_empty());
}

#[test]
fn test_missing_path_is_invalid() {
    let temp_dir = TempDir::new().unwrap();

    let mut resolver = ScriptedResolver::default();
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    let result = collector.consume(temp_dir.path().join("missing"), true);

    assert!(matches!(result, Err(Error::InvalidPath { .. })));
}

#[test]
fn test_empty_destination() {
    let temp_dir = TempDir::new().unwrap();
    write_template(temp_dir.path(), "[ ].neb", "content");

    let mut resolver = ScriptedResolver::default();
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    let result = collector.consume(temp_dir.path(), true);

    assert!(matches!(result, Err(Error::EmptyDestination { .. })));
}

#[test]
fn test_empty_file_fails_before_any_prompt() {
    let temp_dir = TempDir::new().unwrap();
    write_template(temp_dir.path(), "[{{name}}.txt].neb", "");

    let mut resolver = ScriptedResolver::new(&[("name", "x")]);
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    let result = collector.consume(temp_dir.path(), true);

    assert!(matches!(result, Err(Error::EmptyFile { .. })));
    assert!(collector.is_empty());
    assert!(resolver.asked.is_empty());
}

#[test]
fn test_non_utf8_content_is_read_failure() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("[bin.dat].neb"), [0xff, 0xfe, 0x00]).unwrap();

    let mut resolver = ScriptedResolver::default();
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    let result = collector.consume(temp_dir.path(), true);

    assert!(matches!(result, Err(Error::ReadFailure { .. })));
}

#[test]
fn test_unanswered_variable_aborts() {
    let temp_dir = TempDir::new().unwrap();
    write_template(temp_dir.path(), "[{{unknown}}.txt].neb", "x");

    let mut resolver = ScriptedResolver::default();
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    let result = collector.consume(temp_dir.path(), true);

    match result {
        Err(Error::VariableResolutionFailure { name }) => assert_eq!(name, "unknown"),
        other => panic!("Expected VariableResolutionFailure, got {other:?}"),
    }
}

#[test]
fn test_directory_configuration_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE),
        r#"{"variableMatchRegex": "<%(.*?)%>", "extension": "tpl"}"#,
    )
    .unwrap();
    write_template(temp_dir.path(), "[<%app%>.toml].tpl", "name = \"<%app%>\" {{kept}}");
    write_template(temp_dir.path(), "[ignored.txt].neb", "x");

    let mut resolver = ScriptedResolver::new(&[("app", "demo")]);
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    collector.consume(temp_dir.path(), true).unwrap();

    assert_eq!(collector.config().extension, "tpl");
    let keys: Vec<_> = collector.templates().keys().cloned().collect();
    assert_eq!(keys, vec!["<%app%>.toml"]);
    assert_eq!(collector.bindings()["<%app%>"], "demo");
    assert_eq!(resolver.asked, vec!["app"]);
}

#[test]
fn test_malformed_configuration_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE), "{ not json").unwrap();
    write_template(temp_dir.path(), "[a.txt].neb", "a");

    let mut resolver = ScriptedResolver::default();
    let mut collector = Collector::new(Config::default(), &mut resolver).unwrap();
    let result = collector.consume(temp_dir.path(), true);

    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let config = Config { variable_match_regex: "(".to_string(), ..Config::default() };
    let mut resolver = ScriptedResolver::default();

    assert!(matches!(Collector::new(config, &mut resolver), Err(Error::ConfigError(_))));
}
