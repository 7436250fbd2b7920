//! The precedence table driving the Pratt parser.
//!
//! For every token kind the table answers three questions: how to start an
//! expression with it (NUD), how to continue an expression with it (LED) and
//! how strongly it binds as an infix operator. Statement keywords get their
//! own handler table.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::ast::Node, lexer::tokens::{Token, TokenKind}};

use super::{expr::*, parser::{ParseResult, Parser}, stmt::*};

/// Infix binding power, weakest first. `Default` never binds, so a token
/// without an entry always ends the current expression.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Pipeline,
    Logical,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser<'_>) -> ParseResult<Node>;
pub type NUDHandler = fn(&mut Parser<'_>, Token) -> ParseResult<Node>;
pub type LEDHandler = fn(&mut Parser<'_>, Node, Token) -> ParseResult<Node>;

// Lookup tables inside the rules struct, so a parser only needs one reference
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

lazy_static! {
    static ref DEFAULT_RULES: ParseRules = create_token_lookups();
}

pub struct ParseRules {
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
    /// Used for kinds without a registered LED handler.
    default_led: Option<LEDHandler>,
}

impl ParseRules {
    /// A table where no token starts an expression, every infix position
    /// reports an unexpected operator and nothing binds.
    pub fn new() -> Self {
        ParseRules {
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            default_led: Some(led_unexpected_infix),
        }
    }

    /// The language's table, built on first use and shared afterwards.
    pub fn default_rules() -> &'static ParseRules {
        &DEFAULT_RULES
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a leading token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Gives a token an infix binding power without touching its handlers.
    pub fn binding_power(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    pub fn set_default_led(&mut self, led_fn: Option<LEDHandler>) {
        self.default_led = led_fn;
    }

    pub fn get_stmt(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    pub fn get_nud(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    pub fn get_led(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.led_lookup.get(&kind).copied().or(self.default_led)
    }

    pub fn get_binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }
}

impl Default for ParseRules {
    fn default() -> Self {
        ParseRules::new()
    }
}

pub fn create_token_lookups() -> ParseRules {
    let mut rules = ParseRules::new();

    rules.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);

    rules.led(TokenKind::Pipeline, BindingPower::Pipeline, parse_pipeline_expr);
    rules.led(TokenKind::LArrow, BindingPower::Pipeline, parse_struct_update_expr);

    // Logical
    rules.led(TokenKind::And, BindingPower::Logical, parse_binary_expr);
    rules.led(TokenKind::Or, BindingPower::Logical, parse_binary_expr);

    // Relational
    rules.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    rules.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    rules.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    rules.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);
    rules.led(TokenKind::Equals, BindingPower::Relational, parse_binary_expr);
    rules.led(TokenKind::NotEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    rules.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    rules.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    rules.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    rules.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    rules.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);

    // Member
    rules.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);
    rules.led(TokenKind::DoubleColon, BindingPower::Member, parse_enum_constructor_expr);

    // Literals and symbols
    rules.nud(TokenKind::Number, parse_literal_expr);
    rules.nud(TokenKind::String, parse_literal_expr);
    rules.nud(TokenKind::True, parse_bool_expr);
    rules.nud(TokenKind::False, parse_bool_expr);
    rules.nud(TokenKind::Identifier, parse_variable_expr);
    rules.nud(TokenKind::Dash, parse_prefix_expr);
    rules.nud(TokenKind::Not, parse_prefix_expr);
    rules.nud(TokenKind::OpenParen, parse_grouping_expr);
    rules.nud(TokenKind::OpenBracket, parse_list_expr);
    rules.nud(TokenKind::OpenCurly, parse_brace_expr);
    rules.nud(TokenKind::Fn, parse_lambda_expr);

    // Statements
    rules.stmt(TokenKind::Let, parse_let_stmt);
    rules.stmt(TokenKind::LetBang, parse_let_stmt);
    rules.stmt(TokenKind::Func, parse_function_stmt);
    rules.stmt(TokenKind::Match, parse_match_stmt);
    rules.stmt(TokenKind::Import, parse_import_stmt);
    rules.stmt(TokenKind::Enum, parse_enum_stmt);

    rules
}
