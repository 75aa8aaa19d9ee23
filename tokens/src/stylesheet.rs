use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};
use nom::{
    Finish, IResult,
    branch::alt,
    bytes::complete::{is_not, tag, tag_no_case, take_until, take_while, take_while1},
    character::complete::{char, multispace0, multispace1, satisfy},
    combinator::{all_consuming, cut, eof, map, opt, recognize, rest, value, verify},
    error::{VerboseError, context, convert_error},
    multi::{many0, many1, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};
use tracing::{debug, instrument};

// a small CSS cascade
//
// this understands exactly as much CSS as the design token stylesheets use: style rules with
// compound selectors joined by descendant/child combinators, custom property declarations,
// var() with fallbacks, !important, margin/padding shorthands, and cascade layers.  other
// at-rules are skipped, as are selectors it cannot evaluate statically (sibling combinators,
// functional pseudo-classes), so that a real site stylesheet still loads

// css properties that inherit by default, besides custom properties which always do
const INHERITED: &[&str] = &[
    "color",
    "cursor",
    "direction",
    "font",
    "font-family",
    "font-size",
    "font-style",
    "font-variant",
    "font-weight",
    "letter-spacing",
    "line-height",
    "list-style",
    "text-align",
    "text-indent",
    "text-transform",
    "visibility",
    "white-space",
    "word-spacing",
];

// shorthands that fan out to -top/-right/-bottom/-left
const BOX_SHORTHANDS: &[&str] = &["margin", "padding"];

// anonymous @layer blocks never merge, even across sheets
static ANONYMOUS_LAYERS: AtomicUsize = AtomicUsize::new(0);

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub fn is_custom_property(name: &str) -> bool {
    name.starts_with("--")
}

pub fn inherits(name: &str) -> bool {
    is_custom_property(name) || INHERITED.contains(&name)
}

// the element side of selector matching
//
// the headless document implements this over its node arena
pub trait Subject: Sized {
    fn tag(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    fn parent(&self) -> Option<Self>;

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|v| v.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Simple {
    Universal,
    Type(String),
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
    // :root is the only pseudo-class with a static answer; the rest never match
    Root,
    PseudoClass(String),
    PseudoElement(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Combinator {
    Descendant,
    Child,
}

// compounds[i] and compounds[i + 1] are joined by combinators[i]
#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    compounds: Vec<Vec<Simple>>,
    combinators: Vec<Combinator>,
}

// (ids, classes/attributes/pseudo-classes, types/pseudo-elements)
pub type Specificity = (u32, u32, u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
    // full layer path, empty for unlayered rules
    pub layer: Vec<String>,
    // position of the layer in cascade order, higher wins for normal declarations
    rank: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet {
    rules: Vec<Rule>,
    // every layer path in order of first mention
    layers: Vec<Vec<String>>,
}

// what a run of css parses into, before selectors are evaluated and layers ranked
enum Item<'a> {
    Style {
        prelude: &'a str,
        declarations: Vec<Declaration>,
    },
    Layer {
        name: Option<&'a str>,
        items: Vec<Item<'a>>,
    },
    LayerOrder(Vec<&'a str>),
    Skipped(&'a str),
}

impl Selector {
    pub fn parse(text: &str) -> Option<Selector> {
        all_consuming(delimited(multispace0, complex_selector, multispace0))(text)
            .finish()
            .ok()
            .map(|(_, selector)| selector)
    }

    pub fn specificity(&self) -> Specificity {
        self.compounds
            .iter()
            .flatten()
            .fold((0, 0, 0), |(a, b, c), simple| match simple {
                Simple::Id(_) => (a + 1, b, c),
                Simple::Class(_)
                | Simple::Attribute { .. }
                | Simple::Root
                | Simple::PseudoClass(_) => (a, b + 1, c),
                Simple::Type(_) | Simple::PseudoElement(_) => (a, b, c + 1),
                Simple::Universal => (a, b, c),
            })
    }

    pub fn matches<S: Subject>(&self, subject: &S) -> bool {
        self.matches_from(self.compounds.len() - 1, subject)
    }

    fn matches_from<S: Subject>(&self, index: usize, subject: &S) -> bool {
        if !matches_compound(&self.compounds[index], subject) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Child => subject
                .parent()
                .is_some_and(|parent| self.matches_from(index - 1, &parent)),
            Combinator::Descendant => {
                let mut ancestor = subject.parent();
                while let Some(candidate) = ancestor {
                    if self.matches_from(index - 1, &candidate) {
                        return true;
                    }
                    ancestor = candidate.parent();
                }
                false
            }
        }
    }
}

fn matches_compound<S: Subject>(compound: &[Simple], subject: &S) -> bool {
    compound.iter().all(|simple| match simple {
        Simple::Universal => true,
        Simple::Type(tag) => subject.tag().eq_ignore_ascii_case(tag),
        Simple::Id(id) => subject.attribute("id") == Some(id.as_str()),
        Simple::Class(class) => subject.has_class(class),
        Simple::Attribute { name, value } => match (subject.attribute(name), value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        },
        Simple::Root => subject.parent().is_none(),
        Simple::PseudoClass(_) | Simple::PseudoElement(_) => false,
    })
}

impl StyleSheet {
    #[instrument(level = "debug", skip_all)]
    pub fn parse(css: &str) -> Result<StyleSheet> {
        let items = match stylesheet(css).finish() {
            Ok((_, items)) => items,
            Err(err) => bail!("failed to parse stylesheet:\n{}", convert_error(css, err)),
        };

        let mut sheet = StyleSheet::default();
        sheet.collect(items, &[]);
        sheet.rank_layers();

        debug!(
            rules = sheet.rules.len(),
            layers = sheet.layers.len(),
            "parsed stylesheet"
        );
        Ok(sheet)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    // append another sheet, as if it were linked after this one.  layers it mentions for the
    // first time rank above the ones already known
    pub fn extend(&mut self, other: StyleSheet) {
        for layer in other.layers {
            if !self.layers.contains(&layer) {
                self.layers.push(layer);
            }
        }
        self.rules.extend(other.rules);
        self.rank_layers();
    }

    // the raw declared value that wins the cascade for this element, if any
    //
    // importance first, then layer (later layers win normal declarations, earlier layers win
    // important ones, and unlayered rules count as the last layer), then specificity, then
    // source order
    pub fn cascaded_value<S: Subject>(&self, subject: &S, name: &str) -> Option<&str> {
        let mut winner: Option<((bool, i64, Specificity, usize), &str)> = None;

        for (index, rule) in self.rules.iter().enumerate() {
            let declared = rule.declarations.iter().any(|d| d.name == name);
            if !declared {
                continue;
            }

            let Some(specificity) = rule
                .selectors
                .iter()
                .filter(|s| s.matches(subject))
                .map(Selector::specificity)
                .max()
            else {
                continue;
            };

            for decl in rule.declarations.iter().filter(|d| d.name == name) {
                let layer = if decl.important {
                    -(rule.rank as i64)
                } else {
                    rule.rank as i64
                };
                let key = (decl.important, layer, specificity, index);
                if winner.as_ref().is_none_or(|(best, _)| key >= *best) {
                    winner = Some((key, decl.value.as_str()));
                }
            }
        }

        winner.map(|(_, value)| value)
    }

    // every custom property declared anywhere, in first-declared order
    pub fn custom_property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for decl in self.rules.iter().flat_map(|r| r.declarations.iter()) {
            if is_custom_property(&decl.name) && !names.contains(&decl.name.as_str()) {
                names.push(&decl.name);
            }
        }
        names
    }

    fn collect(&mut self, items: Vec<Item<'_>>, layer: &[String]) {
        for item in items {
            match item {
                Item::Style {
                    prelude,
                    declarations,
                } => {
                    let selectors: Vec<Selector> = selector_texts(prelude)
                        .into_iter()
                        .filter_map(|text| {
                            let selector = Selector::parse(text);
                            if selector.is_none() {
                                debug!(selector = text.trim(), "skipping unsupported selector");
                            }
                            selector
                        })
                        .collect();

                    if !selectors.is_empty() {
                        self.rules.push(Rule {
                            selectors,
                            declarations,
                            layer: layer.to_vec(),
                            rank: 0,
                        });
                    }
                }
                Item::LayerOrder(names) => {
                    for name in names {
                        self.declare_layer(layer, name);
                    }
                }
                Item::Layer { name, items } => {
                    let path = match name {
                        Some(name) => self.declare_layer(layer, name),
                        None => {
                            let id = ANONYMOUS_LAYERS.fetch_add(1, Ordering::Relaxed);
                            self.declare_layer(layer, &format!("@anonymous-{id}"))
                        }
                    };
                    self.collect(items, &path);
                }
                Item::Skipped(name) => debug!(at_rule = name, "skipping at-rule"),
            }
        }
    }

    // register a possibly dotted layer name under its parent, returning the full path
    fn declare_layer(&mut self, parent: &[String], name: &str) -> Vec<String> {
        let mut path = parent.to_vec();
        for segment in name.split('.').map(str::trim) {
            path.push(segment.to_owned());
            if !self.layers.contains(&path) {
                self.layers.push(path.clone());
            }
        }
        path
    }

    // cascade order, lowest first: sublayers in order of first mention, each followed by
    // the rules placed directly in its parent, and the unlayered rules last of all
    fn rank_layers(&mut self) {
        fn visit(path: &[String], layers: &[Vec<String>], order: &mut Vec<Vec<String>>) {
            for child in layers
                .iter()
                .filter(|l| l.len() == path.len() + 1 && l.starts_with(path))
            {
                visit(child, layers, order);
            }
            order.push(path.to_vec());
        }

        let mut order = Vec::new();
        visit(&[], &self.layers, &mut order);

        for rule in &mut self.rules {
            rule.rank = order
                .iter()
                .position(|l| *l == rule.layer)
                .unwrap_or(order.len());
        }
    }
}

// lexical pieces

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

// whitespace and comments
fn ws(input: &str) -> ParseResult<()> {
    value((), many0(alt((value((), multispace1), value((), comment)))))(input)
}

fn comment(input: &str) -> ParseResult<&str> {
    delimited(tag("/*"), take_until("*/"), tag("*/"))(input)
}

fn identifier(input: &str) -> ParseResult<&str> {
    take_while1(is_ident_char)(input)
}

fn quoted(input: &str) -> ParseResult<&str> {
    recognize(alt((
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
    )))(input)
}

// a balanced ( ... ) group, nesting included
fn parens(input: &str) -> ParseResult<&str> {
    recognize(delimited(
        char('('),
        many0(alt((is_not("()\"'"), quoted, parens))),
        char(')'),
    ))(input)
}

fn brackets(input: &str) -> ParseResult<&str> {
    recognize(delimited(char('['), take_while(|c| c != ']'), char(']')))(input)
}

// selectors

fn simple_selector(input: &str) -> ParseResult<Simple> {
    alt((
        value(Simple::Universal, char('*')),
        map(preceded(char('.'), identifier), |name: &str| {
            Simple::Class(name.to_owned())
        }),
        map(preceded(char('#'), identifier), |name: &str| {
            Simple::Id(name.to_owned())
        }),
        map(preceded(tag("::"), identifier), |name: &str| {
            Simple::PseudoElement(name.to_ascii_lowercase())
        }),
        map(preceded(char(':'), identifier), |name: &str| {
            match name.to_ascii_lowercase().as_str() {
                "root" => Simple::Root,
                other => Simple::PseudoClass(other.to_owned()),
            }
        }),
        attribute_selector,
        map(
            recognize(pair(satisfy(char::is_alphabetic), take_while(is_ident_char))),
            |name: &str| Simple::Type(name.to_ascii_lowercase()),
        ),
    ))(input)
}

// only presence and exact equality, which is all a theme attribute needs
fn attribute_selector(input: &str) -> ParseResult<Simple> {
    let (input, _) = char('[')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, name) = identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, expected) = opt(preceded(pair(char('='), multispace0), attribute_value))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(']')(input)?;

    Ok((
        input,
        Simple::Attribute {
            name: name.to_ascii_lowercase(),
            value: expected.map(str::to_owned),
        },
    ))
}

fn attribute_value(input: &str) -> ParseResult<&str> {
    alt((
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        identifier,
    ))(input)
}

fn compound_selector(input: &str) -> ParseResult<Vec<Simple>> {
    many1(simple_selector)(input)
}

fn combinator(input: &str) -> ParseResult<Combinator> {
    alt((
        value(
            Combinator::Child,
            delimited(multispace0, char('>'), multispace0),
        ),
        value(Combinator::Descendant, multispace1),
    ))(input)
}

fn complex_selector(input: &str) -> ParseResult<Selector> {
    let (input, first) = compound_selector(input)?;
    let (input, chain) = many0(pair(combinator, compound_selector))(input)?;

    let mut compounds = vec![first];
    let mut combinators = Vec::with_capacity(chain.len());
    for (combinator, compound) in chain {
        combinators.push(combinator);
        compounds.push(compound);
    }

    Ok((
        input,
        Selector {
            compounds,
            combinators,
        },
    ))
}

// split a rule prelude at its top-level commas
fn selector_texts(prelude: &str) -> Vec<&str> {
    let list: ParseResult<Vec<&str>> = separated_list0(
        char(','),
        recognize(many0(alt((is_not(",()[]\"'"), quoted, parens, brackets)))),
    )(prelude);

    match list {
        Ok((_, texts)) => texts,
        Err(_) => vec![prelude],
    }
}

// declarations

fn property_name(input: &str) -> ParseResult<&str> {
    context("property name", identifier)(input)
}

// everything up to the next ; or } or !, keeping quoted strings and parenthesised groups whole
fn property_value(input: &str) -> ParseResult<&str> {
    map(
        recognize(many0(alt((is_not(";{}()!\"'"), quoted, parens)))),
        str::trim,
    )(input)
}

fn important(input: &str) -> ParseResult<bool> {
    map(
        opt(tuple((
            char('!'),
            multispace0,
            tag_no_case("important"),
            multispace0,
        ))),
        |flag| flag.is_some(),
    )(input)
}

fn declaration(input: &str) -> ParseResult<Declaration> {
    let (input, name) = property_name(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = context("colon after property name", char(':'))(input)?;
    let (input, _) = ws(input)?;
    let (input, raw) = property_value(input)?;
    let (input, important) = important(input)?;

    let name = if is_custom_property(name) {
        name.to_owned()
    } else {
        name.to_ascii_lowercase()
    };

    Ok((
        input,
        Declaration {
            name,
            value: raw.to_owned(),
            important,
        },
    ))
}

// { name: value; ... }
//
// once the brace is open, anything that isn't a declaration is an error rather than a
// reason to try another kind of rule
fn declaration_block(input: &str) -> ParseResult<Vec<Declaration>> {
    let (input, _) = char('{')(input)?;
    let (input, declarations) = cut(terminated(
        many0(alt((
            map(preceded(ws, declaration), Some),
            value(None, preceded(ws, char(';'))),
        ))),
        preceded(ws, context("closing brace", char('}'))),
    ))(input)?;

    Ok((
        input,
        declarations
            .into_iter()
            .flatten()
            .flat_map(expand_shorthand)
            .collect(),
    ))
}

fn component_values(input: &str) -> ParseResult<Vec<&str>> {
    separated_list1(
        multispace1,
        recognize(many1(alt((is_not(" \t\r\n()\"'"), quoted, parens)))),
    )(input)
}

// margin: 1px 2px fans out to margin-top: 1px, margin-right: 2px, and so on
fn expand_shorthand(decl: Declaration) -> Vec<Declaration> {
    if !BOX_SHORTHANDS.contains(&decl.name.as_str()) {
        return vec![decl];
    }

    let parts: Vec<String> = match all_consuming(component_values)(decl.value.as_str()).finish() {
        Ok((_, parts)) => parts.into_iter().map(str::to_owned).collect(),
        Err(_) => Vec::new(),
    };

    let sides = match parts.as_slice() {
        [all] => [all, all, all, all],
        [vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
        [top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
        [top, right, bottom, left] => [top, right, bottom, left],
        _ => return vec![decl],
    };

    ["top", "right", "bottom", "left"]
        .into_iter()
        .zip(sides)
        .map(|(side, value)| Declaration {
            name: format!("{}-{side}", decl.name),
            value: value.clone(),
            important: decl.important,
        })
        .collect()
}

// rules

fn style_rule(input: &str) -> ParseResult<Item> {
    let (input, prelude) = map(
        recognize(many1(alt((is_not("{};()[]\"'"), quoted, parens, brackets)))),
        str::trim,
    )(input)?;
    let (input, declarations) = context("declaration block", declaration_block)(input)?;

    Ok((
        input,
        Item::Style {
            prelude,
            declarations,
        },
    ))
}

// skip a { ... } block wholesale, nested blocks included
fn skip_block(input: &str) -> ParseResult<&str> {
    recognize(delimited(
        char('{'),
        many0(alt((is_not("{}\"'"), quoted, skip_block))),
        char('}'),
    ))(input)
}

// @layer is the only at-rule whose contents take part in the cascade
fn at_rule(input: &str) -> ParseResult<Item> {
    let (input, name) = preceded(char('@'), identifier)(input)?;
    let (input, prelude) = map(
        recognize(many0(alt((is_not("{};()\"'"), quoted, parens)))),
        str::trim,
    )(input)?;

    if name.eq_ignore_ascii_case("layer") {
        return alt((
            map(char(';'), move |_| {
                Item::LayerOrder(
                    prelude
                        .split(',')
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                        .collect(),
                )
            }),
            map(
                delimited(char('{'), cut(items), cut(preceded(ws, char('}')))),
                move |items| Item::Layer {
                    name: (!prelude.is_empty()).then_some(prelude),
                    items,
                },
            ),
        ))(input);
    }

    let (input, _) = context(
        "at-rule",
        alt((value((), char(';')), value((), skip_block))),
    )(input)?;
    Ok((input, Item::Skipped(name)))
}

fn items(input: &str) -> ParseResult<Vec<Item>> {
    many0(preceded(ws, alt((at_rule, style_rule))))(input)
}

fn stylesheet(input: &str) -> ParseResult<Vec<Item>> {
    terminated(items, pair(ws, context("end of stylesheet", eof)))(input)
}

// var() substitution

enum Piece<'a> {
    Text(&'a str),
    Var {
        name: &'a str,
        fallback: Option<&'a str>,
    },
}

fn var_reference(input: &str) -> ParseResult<Piece> {
    let (input, _) = tag("var(")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, name) = recognize(pair(tag("--"), identifier))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, fallback) = opt(preceded(
        char(','),
        recognize(many0(alt((is_not("()\"'"), quoted, parens)))),
    ))(input)?;
    let (input, _) = char(')')(input)?;

    Ok((
        input,
        Piece::Var {
            name,
            fallback: fallback.map(str::trim),
        },
    ))
}

fn text_piece(input: &str) -> ParseResult<Piece> {
    map(
        alt((
            verify(take_until("var("), |text: &str| !text.is_empty()),
            verify(rest, |text: &str| !text.is_empty() && !text.contains("var(")),
        )),
        Piece::Text,
    )(input)
}

// substitute var() references
//
// lookup returns the computed value of a custom property, None when it has none.  a reference
// with neither a value nor a fallback makes the whole value invalid, which is reported as None,
// and so does a malformed reference
pub fn substitute_vars(value: &str, lookup: &mut dyn FnMut(&str) -> Option<String>) -> Option<String> {
    let (_, pieces) = all_consuming(many0(alt((var_reference, text_piece))))(value)
        .finish()
        .ok()?;

    let mut out = String::with_capacity(value.len());
    for piece in pieces {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Var { name, fallback } => {
                let resolved = match lookup(name).filter(|v| !v.trim().is_empty()) {
                    Some(v) => v,
                    None => substitute_vars(fallback?, lookup)?,
                };
                out.push_str(resolved.trim());
            }
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // a throwaway subject: a chain of (tag, attributes) from the element up to the root
    #[derive(Clone)]
    struct Chain<'a> {
        nodes: &'a [(&'a str, &'a [(&'a str, &'a str)])],
    }

    impl<'a> Subject for Chain<'a> {
        fn tag(&self) -> &str {
            self.nodes[0].0
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.nodes[0]
                .1
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| *v)
        }

        fn parent(&self) -> Option<Self> {
            if self.nodes.len() > 1 {
                Some(Chain {
                    nodes: &self.nodes[1..],
                })
            } else {
                None
            }
        }
    }

    const BUTTON_IN_DARK: &[(&str, &[(&str, &str)])] = &[
        ("button", &[("class", "btn btn-lg")]),
        ("div", &[("class", "card"), ("data-theme", "dark")]),
        ("html", &[]),
    ];

    fn button() -> Chain<'static> {
        Chain {
            nodes: BUTTON_IN_DARK,
        }
    }

    #[test]
    fn selectors_match_statically() {
        let button = button();
        let root = Chain {
            nodes: &BUTTON_IN_DARK[2..],
        };

        let check = |s: &str, subject: &Chain| Selector::parse(s).unwrap().matches(subject);

        assert!(check(".btn", &button));
        assert!(check("button.btn.btn-lg", &button));
        assert!(check("[data-theme=\"dark\"] .btn", &button));
        assert!(check("[ data-theme = 'dark' ] > .btn", &button));
        assert!(check(".card > .btn", &button));
        assert!(check(".card>.btn", &button));
        assert!(check("html .btn", &button));
        assert!(!check("html > .btn", &button));
        assert!(!check(".btn:hover", &button));
        assert!(!check(".btn::before", &button));
        assert!(check(":root", &root));
        assert!(!check(":root", &button));
    }

    #[test]
    fn unsupported_selectors_are_rejected() {
        assert!(Selector::parse(".a + .b").is_none());
        assert!(Selector::parse(".a ~ .b").is_none());
        assert!(Selector::parse(":not(.a)").is_none());
        assert!(Selector::parse("[lang|=en]").is_none());
        assert!(Selector::parse("> .a").is_none());
        assert!(Selector::parse(".a >").is_none());
        assert!(Selector::parse("").is_none());
    }

    #[test]
    fn specificity_counts() {
        assert_eq!(Selector::parse(":root").unwrap().specificity(), (0, 1, 0));
        assert_eq!(
            Selector::parse("#main div.card[data-theme]").unwrap().specificity(),
            (1, 2, 1)
        );
    }

    #[test]
    fn cascade_prefers_specificity_then_order_then_importance() {
        let sheet = StyleSheet::parse(
            r#"
            /* base tokens */
            :root { --brand: #6B4E3D; }
            [data-theme="dark"] { --brand: #A8D5BA; }
            .btn { color: red !important; background-color: blue; }
            button.btn { color: green; background-color: var(--brand); }
            "#,
        )
        .unwrap();

        let card = Chain {
            nodes: &BUTTON_IN_DARK[1..],
        };

        assert_eq!(sheet.cascaded_value(&card, "--brand"), Some("#A8D5BA"));
        assert_eq!(sheet.cascaded_value(&button(), "--brand"), None);
        assert_eq!(sheet.cascaded_value(&button(), "color"), Some("red"));
        assert_eq!(
            sheet.cascaded_value(&button(), "background-color"),
            Some("var(--brand)")
        );
    }

    #[test]
    fn selector_lists_keep_the_supported_parts() {
        let sheet = StyleSheet::parse(
            ".a + .b, .btn, :is(.x, .y) { color: teal; } .card__header, .card__footer { color: red; }",
        )
        .unwrap();

        assert_eq!(sheet.rules().len(), 2);
        assert_eq!(sheet.rules()[0].selectors.len(), 1);
        assert_eq!(sheet.rules()[1].selectors.len(), 2);
        assert_eq!(sheet.cascaded_value(&button(), "color"), Some("teal"));
    }

    #[test]
    fn unlayered_rules_beat_layered_ones() {
        let sheet = StyleSheet::parse(
            r#"
            * { padding-top: 0; }
            @layer components { .btn { padding-top: 12px; } }
            "#,
        )
        .unwrap();

        assert_eq!(sheet.cascaded_value(&button(), "padding-top"), Some("0"));
    }

    #[test]
    fn important_reverses_layer_order() {
        let sheet = StyleSheet::parse(
            r#"
            @layer reset, components;
            @layer components { .btn.btn-lg { color: blue !important; } }
            @layer reset { * { color: green !important; } }
            .btn { color: red !important; }
            "#,
        )
        .unwrap();

        assert_eq!(sheet.cascaded_value(&button(), "color"), Some("green"));
    }

    #[test]
    fn layer_order_follows_first_mention() {
        let sheet = StyleSheet::parse(
            r#"
            @layer reset, components;
            @layer components { .btn { margin-top: 2px; } }
            @layer reset { button.btn.btn-lg { margin-top: 1px; } }
            "#,
        )
        .unwrap();

        assert_eq!(sheet.cascaded_value(&button(), "margin-top"), Some("2px"));
    }

    #[test]
    fn sublayers_lose_to_their_parent() {
        let sheet = StyleSheet::parse(
            r#"
            @layer site {
                .btn { --tone: parent; }
                @layer primitives { .btn.btn-lg { --tone: child; } }
            }
            @layer site.primitives { button.btn { --tone: dotted; } }
            "#,
        )
        .unwrap();

        assert_eq!(sheet.rules()[2].layer, vec!["site", "primitives"]);
        assert_eq!(sheet.cascaded_value(&button(), "--tone"), Some("parent"));
    }

    #[test]
    fn extended_sheets_share_layers() {
        let mut sheet = StyleSheet::parse(
            "@layer reset, components; @layer reset { * { padding-top: 0; } }",
        )
        .unwrap();
        sheet.extend(StyleSheet::parse("@layer components { .btn { padding-top: 12px; } }").unwrap());

        assert_eq!(sheet.cascaded_value(&button(), "padding-top"), Some("12px"));

        sheet.extend(StyleSheet::parse(".btn { padding-top: 4px; }").unwrap());
        assert_eq!(sheet.cascaded_value(&button(), "padding-top"), Some("4px"));
    }

    #[test]
    fn box_shorthands_fan_out() {
        let sheet = StyleSheet::parse(
            r#"
            * { margin: 0; padding: var(--space-2) var(--space-3); }
            .btn { padding-left: 1px; margin: 1px 2px 3px !important; }
            "#,
        )
        .unwrap();

        assert_eq!(sheet.cascaded_value(&button(), "padding-top"), Some("var(--space-2)"));
        assert_eq!(sheet.cascaded_value(&button(), "padding-right"), Some("var(--space-3)"));
        assert_eq!(sheet.cascaded_value(&button(), "padding-left"), Some("1px"));
        assert_eq!(sheet.cascaded_value(&button(), "margin-bottom"), Some("3px"));
        assert_eq!(sheet.cascaded_value(&button(), "margin-left"), Some("2px"));
        assert_eq!(sheet.cascaded_value(&button(), "padding"), None);
    }

    #[test]
    fn other_at_rules_are_skipped() {
        let sheet = StyleSheet::parse(
            r#"
            @charset "utf-8";
            @layer base, components;
            @layer base { :root { --space-4: 16px; } }
            @media (prefers-color-scheme: dark) { :root { --space-4: 99px; } }
            @layer components { .card { padding-top: var(--space-4); } }
            .a + .b { color: red; }
            "#,
        )
        .unwrap();

        assert_eq!(sheet.rules().len(), 2);
        assert_eq!(sheet.custom_property_names(), vec!["--space-4"]);
    }

    #[test]
    fn malformed_sheets_are_errors() {
        assert!(StyleSheet::parse(":root { --brand: red;").is_err());
        assert!(StyleSheet::parse(":root { --brand }").is_err());
        assert!(StyleSheet::parse("/* never closed").is_err());
        assert!(StyleSheet::parse(".a { color: red; } }").is_err());
        assert!(StyleSheet::parse("@layer components { .a { color: red; }").is_err());
        assert!(StyleSheet::parse("").unwrap().rules().is_empty());
    }

    #[test]
    fn values_keep_quotes_and_functions_whole() {
        let sheet = StyleSheet::parse(
            r#".btn { font-family: "Cormorant; Garamond", serif; box-shadow: 0 0 0 3px rgb(0 0 0 / 20%); --empty: ; }"#,
        )
        .unwrap();

        assert_eq!(
            sheet.cascaded_value(&button(), "font-family"),
            Some("\"Cormorant; Garamond\", serif")
        );
        assert_eq!(
            sheet.cascaded_value(&button(), "box-shadow"),
            Some("0 0 0 3px rgb(0 0 0 / 20%)")
        );
        assert_eq!(sheet.cascaded_value(&button(), "--empty"), Some(""));
    }

    #[test]
    fn var_substitution_uses_fallbacks() {
        let mut lookup = |name: &str| match name {
            "--brand" => Some("#6B4E3D".to_owned()),
            "--space-3" => Some(" 12px".to_owned()),
            _ => None,
        };

        assert_eq!(
            substitute_vars("var(--brand)", &mut lookup).as_deref(),
            Some("#6B4E3D")
        );
        assert_eq!(
            substitute_vars("var(--space-3) var(--space-9, 4px)", &mut lookup).as_deref(),
            Some("12px 4px")
        );
        assert_eq!(
            substitute_vars("inset 0 0 0 1px var(--nope, var(--brand))", &mut lookup).as_deref(),
            Some("inset 0 0 0 1px #6B4E3D")
        );
        assert_eq!(substitute_vars("var(--nope)", &mut lookup), None);
        assert_eq!(substitute_vars("var(--brand", &mut lookup), None);
        assert_eq!(substitute_vars("", &mut lookup).as_deref(), Some(""));
    }
}
