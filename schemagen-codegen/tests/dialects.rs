//! Output of every target for the same flattened declarations.

use schemagen_ast::transform_source_text;
use schemagen_codegen::{apply_fixups, generator_for};
use schemagen_core::Target;

/// Flatten, generate and fix up `src` for `target`.
fn generate(target: Target, src: &str) -> String {
    let flattened = transform_source_text(src, "user.ts").expect("flattening failed");
    let generated = generator_for(target)
        .generate(&flattened, "user.ts")
        .expect("generation failed");
    apply_fixups(target, &generated)
}

const USER: &str = r#"export interface User {
  id: number;
  name?: string;
  tags: string[];
  role: 'admin' | 'user';
  scores: Record<string, number>;
}
"#;

#[test]
fn test_zod() {
    insta::assert_snapshot!(generate(Target::Zod, USER), @r"
    import { z } from 'zod'

    export type User = z.infer<typeof User>
    export const User = z.object({
      id: z.number(),
      name: z.string().optional(),
      tags: z.array(z.string()),
      role: z.union([z.literal('admin'), z.literal('user')]),
      scores: z.record(z.string(), z.number())
    })
    ");
}

#[test]
fn test_valibot() {
    insta::assert_snapshot!(generate(Target::Valibot, USER), @r"
    import * as v from 'valibot'

    export type User = v.InferOutput<typeof User>
    export const User = v.object({
      id: v.number(),
      name: v.optional(v.string()),
      tags: v.array(v.string()),
      role: v.union([v.literal('admin'), v.literal('user')]),
      scores: v.record(v.string(), v.number())
    })
    ");
}

#[test]
fn test_yup() {
    insta::assert_snapshot!(generate(Target::Yup, USER), @r"
    import * as y from 'yup'

    export type User = y.InferType<typeof User>
    export const User = y.object({
      id: y.number().required(),
      name: y.string().optional(),
      tags: y.array(y.string().required()).required(),
      role: y.mixed().oneOf(['admin', 'user']).required(),
      scores: y.object().required()
    }).required()
    ");
}

#[test]
fn test_effect() {
    insta::assert_snapshot!(generate(Target::Effect, USER), @r"
    import { Schema as ES } from 'effect'

    export type User = ES.Schema.Type<typeof User>
    export const User = ES.Struct({
      id: ES.Number,
      name: ES.optional(ES.String),
      tags: ES.Array(ES.String),
      role: ES.Union(ES.Literal('admin'), ES.Literal('user')),
      scores: ES.Record({ key: ES.String, value: ES.Number })
    })
    ");
}

#[test]
fn test_jsonschema() {
    insta::assert_snapshot!(generate(Target::JsonSchema, USER), @r"
    export const User = {
      type: 'object',
      properties: {
        id: { type: 'number' },
        name: { type: 'string' },
        tags: {
          type: 'array',
          items: { type: 'string' }
        },
        role: {
          anyOf: [
            { const: 'admin' },
            { const: 'user' }
          ]
        },
        scores: {
          type: 'object',
          additionalProperties: { type: 'number' }
        }
      },
      required: ['id', 'tags', 'role', 'scores']
    }
    ");
}

#[test]
fn test_typebox() {
    insta::assert_snapshot!(generate(Target::TypeBox, USER), @r"
    import { Type, Static } from '@sinclair/typebox'

    export type User = Static<typeof User>
    export const User = Type.Object({
      id: Type.Number(),
      name: Type.Optional(Type.String()),
      tags: Type.Array(Type.String()),
      role: Type.Union([Type.Literal('admin'), Type.Literal('user')]),
      scores: Type.Record(Type.String(), Type.Number())
    })
    ");
}

#[test]
fn test_types_is_flattened_source() {
    let src = "export interface A {\n  b: { c: string };\n}\n";
    assert_eq!(
        generate(Target::Types, src),
        transform_source_text(src, "user.ts").unwrap()
    );
}

#[test]
fn test_flattened_declarations_come_first() {
    let src = r#"export interface Base { id: string }
export interface Player extends Base {
  profile: { name: string };
}
"#;
    insta::assert_snapshot!(generate(Target::Zod, src), @r"
    import { z } from 'zod'

    export type Base = z.infer<typeof Base>
    export const Base = z.object({
      id: z.string()
    })

    export type Player_properties_profile = z.infer<typeof Player_properties_profile>
    export const Player_properties_profile = z.object({
      name: z.string()
    })

    export type Player = z.infer<typeof Player>
    export const Player = z.intersection(Base, z.object({
      profile: Player_properties_profile
    }))
    ");
}

#[test]
fn test_unsupported_type_fails_every_model_dialect() {
    let src = "export type Handler = (event: string) => void;\n";
    for target in [Target::Zod, Target::Valibot, Target::Yup, Target::Effect, Target::JsonSchema] {
        let err = generator_for(target).generate(src, "user.ts").unwrap_err();
        assert_eq!(
            err.to_string(),
            "type '(event: string) => void' cannot be converted to a schema",
            "{target}"
        );
    }
}
