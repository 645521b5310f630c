//! Formula syntax tree to cross-linked HTML.
//!
//! Each tagged node is dispatched on its [`Tag`]. Tags the renderer does not
//! know, and known tags whose arguments are not shaped the way the rule needs,
//! fall back to a bracketed form such as `[external_reference, 1, A1]`.
//!
//! References inside a `sheet_reference` link to `{sheet}.html#REF`; that
//! target is passed down the recursion and never outlives the subtree.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::cell_ref::strip_absolute;
use super::node::Node;

/// Characters a sheet name may contain that would break a relative page URL.
const PAGE_NAME: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'?');

/// Relative URL of a sheet's page, `{sheet}.html` with the name percent-encoded.
pub fn page_href(sheet: &str) -> String {
    format!("{}.html", utf8_percent_encode(sheet, PAGE_NAME))
}

/// Operator tags with a dedicated rendering rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Function,
    Brackets,
    StringJoin,
    Arithmetic,
    Comparison,
    String,
    Percentage,
    Number,
    Operator,
    SheetReference,
    Area,
    Cell,
    ColumnRange,
    RowRange,
    NamedReference,
    Error,
    BooleanFalse,
    BooleanTrue,
    Prefix,
    Null,
}

impl Tag {
    pub const ALL: [Tag; 20] = [
        Tag::Function,
        Tag::Brackets,
        Tag::StringJoin,
        Tag::Arithmetic,
        Tag::Comparison,
        Tag::String,
        Tag::Percentage,
        Tag::Number,
        Tag::Operator,
        Tag::SheetReference,
        Tag::Area,
        Tag::Cell,
        Tag::ColumnRange,
        Tag::RowRange,
        Tag::NamedReference,
        Tag::Error,
        Tag::BooleanFalse,
        Tag::BooleanTrue,
        Tag::Prefix,
        Tag::Null,
    ];

    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|tag| tag.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tag::Function => "function",
            Tag::Brackets => "brackets",
            Tag::StringJoin => "string_join",
            Tag::Arithmetic => "arithmetic",
            Tag::Comparison => "comparison",
            Tag::String => "string",
            Tag::Percentage => "percentage",
            Tag::Number => "number",
            Tag::Operator => "operator",
            Tag::SheetReference => "sheet_reference",
            Tag::Area => "area",
            Tag::Cell => "cell",
            Tag::ColumnRange => "column_range",
            Tag::RowRange => "row_range",
            Tag::NamedReference => "named_reference",
            Tag::Error => "error",
            Tag::BooleanFalse => "boolean_false",
            Tag::BooleanTrue => "boolean_true",
            Tag::Prefix => "prefix",
            Tag::Null => "null",
        }
    }
}

/// Renders formula trees to HTML fragments. Stateless; one instance may be
/// shared by any number of renders.
#[derive(Clone, Copy, Debug, Default)]
pub struct FormulaRenderer;

impl FormulaRenderer {
    pub fn new() -> FormulaRenderer {
        FormulaRenderer
    }

    /// Render a node. Leaves come back unchanged; a top-level sequence is
    /// concatenated without separators.
    pub fn render(&self, node: &Node) -> String {
        self.render_in(node, None)
    }

    fn render_in(&self, node: &Node, target: Option<&str>) -> String {
        match node {
            Node::Leaf(value) => value.clone(),
            Node::Sequence(items) => self.render_parts(items, target).concat(),
            Node::Tagged { tag, args } => Tag::from_name(tag)
                .and_then(|known| self.apply(known, args, target))
                .unwrap_or_else(|| self.fallback(tag, args, target)),
        }
    }

    /// Render each argument. Nested sequences are spliced into the list so
    /// they pick up the separator of the enclosing rule.
    fn render_parts(&self, args: &[Node], target: Option<&str>) -> Vec<String> {
        let mut parts = Vec::with_capacity(args.len());
        self.collect_parts(args, target, &mut parts);
        parts
    }

    fn collect_parts(&self, args: &[Node], target: Option<&str>, parts: &mut Vec<String>) {
        for arg in args {
            match arg {
                Node::Sequence(items) => self.collect_parts(items, target, parts),
                other => parts.push(self.render_in(other, target)),
            }
        }
    }

    /// `None` means the arguments do not fit the rule.
    fn apply(&self, tag: Tag, args: &[Node], target: Option<&str>) -> Option<String> {
        let rendered = match tag {
            Tag::Function => {
                let (name, rest) = args.split_first()?;
                format!(
                    "{}({})",
                    name.as_leaf()?.to_uppercase(),
                    self.render_parts(rest, target).join(", ")
                )
            }
            Tag::Brackets => format!("({})", self.render_parts(args, target).concat()),
            Tag::StringJoin => self.render_parts(args, target).join("&"),
            Tag::Arithmetic | Tag::Comparison => self.render_parts(args, target).concat(),
            Tag::String => match args {
                [text] => format!("{:?}", text.as_leaf()?),
                _ => return None,
            },
            Tag::Percentage => match args {
                [value] => {
                    let p: f64 = value.as_leaf()?.trim().parse().ok()?;
                    format!("{}%", p * 100.0)
                }
                _ => return None,
            },
            Tag::Number | Tag::Operator | Tag::NamedReference | Tag::Error => match args {
                [value] => self.render_in(value, target),
                _ => return None,
            },
            Tag::SheetReference => match args {
                [sheet, reference] => {
                    let sheet_target = page_href(sheet.as_leaf()?);
                    self.render_in(reference, Some(&sheet_target))
                }
                _ => return None,
            },
            Tag::Area | Tag::ColumnRange | Tag::RowRange => match args {
                [start, finish] => {
                    let (start, finish) = (start.as_leaf()?, finish.as_leaf()?);
                    link(
                        target,
                        &format!("{}:{}", strip_absolute(start), strip_absolute(finish)),
                        &format!("{start}:{finish}"),
                    )
                }
                _ => return None,
            },
            Tag::Cell => match args {
                [reference] => {
                    let reference = reference.as_leaf()?;
                    link(target, &strip_absolute(reference), reference)
                }
                _ => return None,
            },
            Tag::BooleanFalse if args.is_empty() => "FALSE".to_string(),
            Tag::BooleanTrue if args.is_empty() => "TRUE".to_string(),
            Tag::Prefix => {
                let (op, rest) = args.split_first()?;
                format!("{}{}", op.as_leaf()?, self.render_parts(rest, target).concat())
            }
            Tag::Null if args.is_empty() => ", ".to_string(),
            Tag::BooleanFalse | Tag::BooleanTrue | Tag::Null => return None,
        };
        Some(rendered)
    }

    fn fallback(&self, tag: &str, args: &[Node], target: Option<&str>) -> String {
        let mut parts = vec![tag.to_string()];
        parts.extend(self.render_parts(args, target));
        format!("[{}]", parts.join(", "))
    }
}

fn link(target: Option<&str>, fragment: &str, text: &str) -> String {
    format!(
        "<a href=\"{}#{}\">{}</a>",
        target.unwrap_or_default(),
        fragment,
        text
    )
}
