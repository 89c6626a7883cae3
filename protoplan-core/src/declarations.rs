//! Lexical scan of the names a proto file declares.
//!
//! This is not a `.proto` parser. It only tracks `package` statements and
//! `message`/`enum`/`service` blocks (including nested ones and proto2
//! groups) so that qualified names can be matched against roots, prunes and
//! elements.

/// The package and fully-qualified types declared by one proto file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Declared package, if any.
    pub package: Option<String>,
    /// Fully-qualified names in declaration order (outer before nested).
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Punct(char),
}

impl Declarations {
    /// Scan proto source text.
    ///
    /// Types are qualified with the package once the whole file has been
    /// read, so a `package` statement after a declaration still applies.
    pub fn scan(source: &str) -> Self {
        let tokens = tokenize(source);
        let mut package = None;
        // Names relative to the package, outer before nested.
        let mut types = Vec::new();
        // One entry per open brace; `Some` for named type blocks.
        let mut scopes: Vec<Option<String>> = Vec::new();
        let mut pending: Option<String> = None;

        let mut i = 0;
        while i < tokens.len() {
            match &tokens[i] {
                Token::Word(word) if word == "package" && scopes.is_empty() => {
                    if let Some(Token::Word(name)) = tokens.get(i + 1) {
                        package = Some(name.clone());
                        i += 1;
                    }
                }
                Token::Word(word) if matches!(word.as_str(), "message" | "enum" | "service") => {
                    if let (Some(Token::Word(name)), Some(Token::Punct('{'))) =
                        (tokens.get(i + 1), tokens.get(i + 2))
                    {
                        pending = Some(name.clone());
                        i += 1;
                    }
                }
                // proto2 `optional group Result = 1 { ... }` declares a nested message.
                Token::Word(word) if word == "group" && !scopes.is_empty() => {
                    if let (Some(Token::Word(name)), Some(Token::Punct('='))) =
                        (tokens.get(i + 1), tokens.get(i + 2))
                    {
                        if group_body_follows(&tokens[i + 3..]) {
                            pending = Some(name.clone());
                            i += 1;
                        }
                    }
                }
                Token::Punct('{') => {
                    let scope = pending.take().map(|name| {
                        let relative = match scopes.iter().rev().find_map(|s| s.as_deref()) {
                            Some(enclosing) => format!("{}.{}", enclosing, name),
                            None => name,
                        };
                        types.push(relative.clone());
                        relative
                    });
                    scopes.push(scope);
                }
                Token::Punct('}') => {
                    scopes.pop();
                }
                _ => {}
            }
            i += 1;
        }

        let types = match &package {
            Some(package) => types
                .into_iter()
                .map(|name| format!("{}.{}", package, name))
                .collect(),
            None => types,
        };
        Declarations { package, types }
    }
}

/// Whether a group's field number and options end in a body rather than `;`.
fn group_body_follows(rest: &[Token]) -> bool {
    rest.iter()
        .find(|t| matches!(t, Token::Punct('{') | Token::Punct(';')))
        .is_some_and(|t| *t == Token::Punct('{'))
}

fn tokenize(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
            }
            '"' | '\'' => {
                i += 1;
                while i < chars.len() && chars[i] != c {
                    if chars[i] == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '.')
                {
                    i += 1;
                }
                tokens.push(Token::Word(chars[start..i].iter().collect()));
            }
            c if c.is_whitespace() => i += 1,
            c => {
                tokens.push(Token::Punct(c));
                i += 1;
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_and_messages() {
        let decls = Declarations::scan(
            r#"
            syntax = "proto2";
            package squareup.dinosaurs;

            import "squareup/geology/period.proto";

            message Dinosaur {
              optional string name = 1;
              optional squareup.geology.Period period = 5;
            }
            "#,
        );

        assert_eq!(decls.package.as_deref(), Some("squareup.dinosaurs"));
        assert_eq!(decls.types, vec!["squareup.dinosaurs.Dinosaur"]);
    }

    #[test]
    fn test_nested_types_and_services() {
        let decls = Declarations::scan(
            r#"
            package geo;
            message Period {
              enum Era { CENOZOIC = 1; }
              message Span { oneof bound { int32 start = 1; } }
              option (custom) = { value: "message Fake {" };
            }
            service Atlas { rpc Find(Period) returns (Period); }
            enum Unit { METERS = 0; }
            "#,
        );

        assert_eq!(
            decls.types,
            vec![
                "geo.Period",
                "geo.Period.Era",
                "geo.Period.Span",
                "geo.Atlas",
                "geo.Unit",
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let decls = Declarations::scan(
            r#"
            // message Commented {}
            /* package wrong;
               message AlsoCommented {} */
            message Real {}
            "#,
        );

        assert_eq!(decls.package, None);
        assert_eq!(decls.types, vec!["Real"]);
    }

    #[test]
    fn test_field_named_message_is_not_a_type() {
        let decls = Declarations::scan(
            r#"
            package p;
            message Envelope { optional string message = 1; }
            "#,
        );

        assert_eq!(decls.types, vec!["p.Envelope"]);
    }

    #[test]
    fn test_extend_blocks_do_not_declare() {
        let decls = Declarations::scan(
            r#"
            package p;
            extend google.protobuf.FieldOptions { optional bool redacted = 22200; }
            message After {}
            "#,
        );

        assert_eq!(decls.types, vec!["p.After"]);
    }

    #[test]
    fn test_package_after_declarations_still_qualifies() {
        let decls = Declarations::scan("message A { message B {} }\npackage late.pkg;\n");

        assert_eq!(decls.package.as_deref(), Some("late.pkg"));
        assert_eq!(decls.types, vec!["late.pkg.A", "late.pkg.A.B"]);
    }

    #[test]
    fn test_groups_declare_nested_types() {
        let decls = Declarations::scan(
            r#"
            syntax = "proto2";
            package p;
            message Outer {
              repeated group Result = 1 [deprecated = true] {
                required string url = 2;
              }
              optional string group = 3;
            }
            "#,
        );

        assert_eq!(decls.types, vec!["p.Outer", "p.Outer.Result"]);
    }
}
