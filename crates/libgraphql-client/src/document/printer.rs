//! Renders definitions as canonical GraphQL text: two-space indentation, one
//! selection per line, fragment spreads written as `... Name`, and a single
//! blank line between definitions.

use crate::ast;
use crate::definition::Definition;
use std::fmt::Write;

const INDENT: &str = "  ";

pub fn print_definition(def: &Definition) -> String {
    print_ast_definition(def.ast())
}

pub fn print_definitions<'a>(
    defs: impl IntoIterator<Item = &'a Definition>,
) -> String {
    defs.into_iter()
        .map(print_definition)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub(crate) fn print_ast_definition(def: &ast::operation::Definition) -> String {
    let mut printer = Printer::default();
    printer.definition(def);
    printer.out
}

#[derive(Default)]
struct Printer {
    depth: usize,
    out: String,
}
impl Printer {
    fn definition(&mut self, def: &ast::operation::Definition) {
        use ast::operation::Definition as Def;
        use ast::operation::OperationDefinition as OpDef;
        match def {
            Def::Fragment(frag) => {
                let ast::operation::TypeCondition::On(type_condition) =
                    &frag.type_condition;
                let _ = write!(self.out, "fragment {} on {type_condition}", frag.name);
                self.directives(&frag.directives);
                self.out.push(' ');
                self.selection_set(&frag.selection_set);
            },
            Def::Operation(OpDef::Query(op)) => self.operation(
                "query",
                op.name.as_deref(),
                &op.variable_definitions,
                &op.directives,
                &op.selection_set,
            ),
            Def::Operation(OpDef::Mutation(op)) => self.operation(
                "mutation",
                op.name.as_deref(),
                &op.variable_definitions,
                &op.directives,
                &op.selection_set,
            ),
            Def::Operation(OpDef::Subscription(op)) => self.operation(
                "subscription",
                op.name.as_deref(),
                &op.variable_definitions,
                &op.directives,
                &op.selection_set,
            ),
            Def::Operation(OpDef::SelectionSet(selection_set)) =>
                self.selection_set(selection_set),
        }
    }

    fn directives(&mut self, directives: &[ast::operation::Directive]) {
        for directive in directives {
            let _ = write!(self.out, " @{}", directive.name);
            self.arguments(&directive.arguments);
        }
    }

    fn arguments(&mut self, arguments: &[(String, ast::operation::Value)]) {
        if arguments.is_empty() {
            return;
        }
        self.out.push('(');
        for (idx, (name, value)) in arguments.iter().enumerate() {
            if idx > 0 {
                self.out.push_str(", ");
            }
            let _ = write!(self.out, "{name}: ");
            write_value(&mut self.out, value);
        }
        self.out.push(')');
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn operation(
        &mut self,
        keyword: &str,
        name: Option<&str>,
        variable_definitions: &[ast::operation::VariableDefinition],
        directives: &[ast::operation::Directive],
        selection_set: &ast::operation::SelectionSet,
    ) {
        self.out.push_str(keyword);
        if let Some(name) = name {
            let _ = write!(self.out, " {name}");
        }
        if !variable_definitions.is_empty() {
            self.out.push('(');
            for (idx, var_def) in variable_definitions.iter().enumerate() {
                if idx > 0 {
                    self.out.push_str(", ");
                }
                let _ = write!(self.out, "${}: ", var_def.name);
                write_type(&mut self.out, &var_def.var_type);
                if let Some(default_value) = &var_def.default_value {
                    self.out.push_str(" = ");
                    write_value(&mut self.out, default_value);
                }
            }
            self.out.push(')');
        }
        self.directives(directives);
        self.out.push(' ');
        self.selection_set(selection_set);
    }

    fn selection(&mut self, selection: &ast::operation::Selection) {
        self.indent();
        match selection {
            ast::operation::Selection::Field(field) => {
                if let Some(alias) = &field.alias {
                    let _ = write!(self.out, "{alias}: ");
                }
                self.out.push_str(&field.name);
                self.arguments(&field.arguments);
                self.directives(&field.directives);
                if !field.selection_set.items.is_empty() {
                    self.out.push(' ');
                    self.selection_set(&field.selection_set);
                }
            },

            ast::operation::Selection::FragmentSpread(spread) => {
                let _ = write!(self.out, "... {}", spread.fragment_name);
                self.directives(&spread.directives);
            },

            ast::operation::Selection::InlineFragment(inline) => {
                self.out.push_str("...");
                if let Some(ast::operation::TypeCondition::On(type_condition)) =
                    &inline.type_condition {
                    let _ = write!(self.out, " on {type_condition}");
                }
                self.directives(&inline.directives);
                self.out.push(' ');
                self.selection_set(&inline.selection_set);
            },
        }
        self.out.push('\n');
    }

    fn selection_set(&mut self, selection_set: &ast::operation::SelectionSet) {
        self.out.push_str("{\n");
        self.depth += 1;
        for selection in &selection_set.items {
            self.selection(selection);
        }
        self.depth -= 1;
        self.indent();
        self.out.push('}');
    }
}

fn write_type(out: &mut String, type_: &ast::operation::Type) {
    match type_ {
        ast::operation::Type::NamedType(name) => out.push_str(name),
        ast::operation::Type::ListType(inner) => {
            out.push('[');
            write_type(out, inner);
            out.push(']');
        },
        ast::operation::Type::NonNullType(inner) => {
            write_type(out, inner);
            out.push('!');
        },
    }
}

pub(crate) fn write_value(out: &mut String, value: &ast::operation::Value) {
    use ast::operation::Value;
    match value {
        Value::Variable(name) => {
            let _ = write!(out, "${name}");
        },
        Value::Int(number) => {
            let _ = write!(out, "{}", number.as_i64().unwrap_or_default());
        },
        Value::Float(float) => {
            let _ = write!(out, "{float:?}");
        },
        Value::String(string) => write_string(out, string),
        Value::Boolean(boolean) => {
            let _ = write!(out, "{boolean}");
        },
        Value::Null => out.push_str("null"),
        Value::Enum(name) => out.push_str(name),
        Value::List(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        },
        Value::Object(fields) => {
            out.push('{');
            for (idx, (name, item)) in fields.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{name}: ");
                write_value(out, item);
            }
            out.push('}');
        },
    }
}

fn write_string(out: &mut String, string: &str) {
    out.push('"');
    for c in string.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            },
            c => out.push(c),
        }
    }
    out.push('"');
}
