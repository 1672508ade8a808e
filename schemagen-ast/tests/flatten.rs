//! Behavior of the interface flattening transform on whole files.

use schemagen_ast::{Error, parse_source, transform_source_text};

fn flatten(src: &str) -> String {
    transform_source_text(src, "test.ts").expect("flattening failed")
}

const PLAYER: &str = r#"export interface IPlayer {
    id: string;
    profile: {
        name: string;
        avatarUrl: string;
    };
}
"#;

#[test]
fn test_player_profile_is_extracted() {
    insta::assert_snapshot!(flatten(PLAYER), @r"
    export interface IPlayer_properties_profile {
        name: string;
        avatarUrl: string;
    }

    export interface IPlayer {
        id: string;
        profile: IPlayer_properties_profile;
    }
    ");
}

#[test]
fn test_single_level() {
    let out = flatten("interface Foo {\n  bar: { x: string };\n}\n");
    assert_eq!(
        out,
        "export interface Foo_properties_bar {\n    x: string;\n}\n\ninterface Foo {\n  bar: Foo_properties_bar;\n}\n"
    );
}

#[test]
fn test_nested_literals_drain_through_queue() {
    let out = flatten("export interface Foo {\n  bar: { inner: { y: number } };\n}\n");
    assert_eq!(
        out,
        "export interface Foo_properties_bar_properties_inner {\n    y: number;\n}\n\n\
         export interface Foo_properties_bar {\n    inner: Foo_properties_bar_properties_inner;\n}\n\n\
         export interface Foo {\n  bar: Foo_properties_bar;\n}\n"
    );
}

#[test]
fn test_flattening_is_idempotent() {
    let once = flatten(PLAYER);
    let twice = flatten(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_no_literals_is_unchanged() {
    let src = "import { Id } from './id';\n\n/** A user. */\nexport interface User {\n  id: Id; // primary key\n  tags?: string[];\n}\n\nexport type Role = 'admin' | 'user';\n";
    assert_eq!(flatten(src), src);
}

#[test]
fn test_arrays_and_unions_of_literals_are_kept() {
    let src = "interface A {\n  list: { x: string }[];\n  either: { y: number } | null;\n  wrapped: ({ z: boolean });\n}\n";
    assert_eq!(flatten(src), src);
}

#[test]
fn test_empty_literal_still_creates_interface() {
    let out = flatten("interface A { meta: {} }");
    assert_eq!(
        out,
        "export interface A_properties_meta {}\n\ninterface A { meta: A_properties_meta }"
    );
}

#[test]
fn test_modifiers_are_copied() {
    let out = flatten("interface A {\n  b: { readonly c?: string; d(): void; [k: string]: unknown };\n}\n");
    assert!(out.starts_with(
        "export interface A_properties_b {\n    readonly c?: string;\n}\n\n"
    ));
}

#[test]
fn test_surrounding_text_is_preserved() {
    let src = "// leading\nconst x = 1;\n\ninterface A { b: { c: string } }\n\nfunction f() {\n  return x;\n}\n";
    let out = flatten(src);
    assert!(out.starts_with("// leading\nconst x = 1;\n\nexport interface A_properties_b {"));
    assert!(out.ends_with("interface A { b: A_properties_b }\n\nfunction f() {\n  return x;\n}\n"));
}

#[test]
fn test_result_has_no_literal_properties() {
    let out = flatten(
        "interface A { b: { c: { d: string }; e: { f: number } }; g: { h: boolean } }",
    );
    let file = parse_source(&out, "out.ts").unwrap();
    assert_eq!(file.interfaces().count(), 5);
    assert!(
        file.interfaces()
            .flat_map(|i| i.properties())
            .all(|p| !p.has_type_literal())
    );
}

#[test]
fn test_name_collision_is_an_error() {
    let src = "interface A_properties_b { x: string }\ninterface A { b: { c: string } }\n";
    let err = transform_source_text(src, "test.ts").unwrap_err();
    assert!(matches!(*err, Error::NameCollision { ref name, .. } if name == "A_properties_b"));
}

#[test]
fn test_parse_error_is_reported() {
    let err = transform_source_text("interface A { b: { c: string }", "test.ts").unwrap_err();
    assert!(matches!(*err, Error::Syntax { .. }));
}

#[test]
fn test_regex_literals_do_not_break_parsing() {
    let src = "export const RE = /'/;\nexport interface A { b: { c: string } }\n";
    let out = transform_source_text(src, "test.ts").unwrap();
    assert_eq!(
        out,
        "export const RE = /'/;\nexport interface A_properties_b {\n    c: string;\n}\n\nexport interface A { b: A_properties_b }\n"
    );
}
