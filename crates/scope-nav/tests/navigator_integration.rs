use pretty_assertions::assert_eq;
use scope_nav::{
    BracketJumper, BracketScopeMode, Buffer, DelimiterSetConfig, NavigationCommand,
    NavigationConfig, NoSymbols, ScopeNavigator, ScopeOrigin, Span, SymbolKind, SymbolNode,
    SymbolProvider,
};
use std::collections::HashMap;

struct CountingProvider {
    tree: Vec<SymbolNode>,
    calls: usize,
}

impl CountingProvider {
    fn new(tree: Vec<SymbolNode>) -> Self {
        Self { tree, calls: 0 }
    }
}

impl SymbolProvider for CountingProvider {
    fn document_symbols(&mut self, _doc: &str) -> Vec<SymbolNode> {
        self.calls += 1;
        self.tree.clone()
    }
}

fn symbol(name: &str, span: Span) -> SymbolNode {
    SymbolNode {
        name: name.to_string(),
        kind: SymbolKind::Function,
        span,
        selection_span: Span::new(span.start, span.start + 1),
        children: Vec::new(),
    }
}

#[test]
fn test_symbol_tree_is_fetched_lazily_and_cached() {
    let mut nav = ScopeNavigator::with_defaults();
    let buffer = Buffer::from_text(&" ".repeat(40));
    let mut provider = CountingProvider::new(vec![symbol("f", Span::new(0, 30))]);

    let target = nav
        .navigate("a.rs", &buffer, 10, NavigationCommand::GoToUpScope, &mut provider, None)
        .unwrap();
    assert_eq!(target.offset, 0);
    assert_eq!(target.origin, ScopeOrigin::Symbol);
    assert_eq!(provider.calls, 1);

    // Repeated queries, even at a different position, reuse the cached tree.
    nav.navigate("a.rs", &buffer, 12, NavigationCommand::GoToUpScope, &mut provider, None);
    nav.navigate("a.rs", &buffer, 10, NavigationCommand::GoToDownScope, &mut provider, None);
    assert_eq!(provider.calls, 1);

    // An edit invalidates the tree; the next query refetches once.
    nav.document_edited("a.rs");
    nav.navigate("a.rs", &buffer, 10, NavigationCommand::GoToUpScope, &mut provider, None);
    assert_eq!(provider.calls, 2);

    // Closing drops all state; reopening starts from scratch.
    nav.document_closed("a.rs");
    nav.navigate("a.rs", &buffer, 10, NavigationCommand::GoToUpScope, &mut provider, None);
    assert_eq!(provider.calls, 3);
}

#[test]
fn test_documents_are_cached_independently() {
    let mut nav = ScopeNavigator::with_defaults();
    let buffer = Buffer::from_text(&" ".repeat(40));
    let mut provider = CountingProvider::new(vec![symbol("f", Span::new(0, 30))]);

    nav.navigate("a.rs", &buffer, 10, NavigationCommand::GoToUpScope, &mut provider, None);
    nav.navigate("b.rs", &buffer, 10, NavigationCommand::GoToUpScope, &mut provider, None);
    assert_eq!(provider.calls, 2);

    // Editing one document does not invalidate the other.
    nav.document_edited("a.rs");
    nav.navigate("b.rs", &buffer, 10, NavigationCommand::GoToUpScope, &mut provider, None);
    assert_eq!(provider.calls, 2);
}

#[test]
fn test_symbol_scope_wins_inside_a_wider_bracket_scope() {
    let mut nav = ScopeNavigator::with_defaults();
    let buffer = Buffer::from_text("{abcdefghijklmn}");
    let mut provider = CountingProvider::new(vec![symbol("f", Span::new(3, 10))]);

    let target = nav
        .navigate("a.rs", &buffer, 5, NavigationCommand::GoToUpScope, &mut provider, None)
        .unwrap();
    assert_eq!(target.origin, ScopeOrigin::Symbol);
    assert_eq!(target.offset, 3);
}

#[test]
fn test_bracket_scope_wins_when_symbol_is_not_nested_inside_it() {
    let mut nav = ScopeNavigator::with_defaults();
    let buffer = Buffer::from_text("{abcdefghijklmn}    ");
    let mut provider = CountingProvider::new(vec![symbol("f", Span::new(0, 20))]);

    let target = nav
        .navigate("a.rs", &buffer, 5, NavigationCommand::GoToUpScope, &mut provider, None)
        .unwrap();
    assert_eq!(target.origin, ScopeOrigin::Bracket);
    assert_eq!(target.offset, 0);
}

#[test]
fn test_malformed_delimiter_config_falls_back_to_defaults() {
    let config = NavigationConfig {
        plain: DelimiterSetConfig {
            opening: vec![],
            closing: vec![],
            separators: vec![],
            pseudo_separators: vec![],
        },
        ..NavigationConfig::default()
    };
    let mut nav = ScopeNavigator::new(config);
    let buffer = Buffer::from_text("a(b)c");
    // The empty plain set is rejected at compile time and the built-in
    // defaults stand in, so bracket navigation keeps working.
    let target = nav
        .navigate("a.rs", &buffer, 2, NavigationCommand::GoToUpScope, &mut NoSymbols, None)
        .unwrap();
    assert_eq!(target.offset, 1);
}

#[test]
fn test_zero_width_pattern_config_navigates_with_defaults() {
    let config = NavigationConfig {
        plain: DelimiterSetConfig {
            opening: vec!["/a?/".into()],
            closing: vec![")".into()],
            separators: vec![",".into()],
            pseudo_separators: vec![],
        },
        ..NavigationConfig::default()
    };
    let mut nav = ScopeNavigator::new(config);
    let buffer = Buffer::from_text("a(b)c");
    // `a?` can match zero characters, which would pin the bracket scan to one
    // offset; the set is rejected at compile time and the built-in defaults
    // stand in, so the query terminates with the default answer.
    let target = nav
        .navigate("a.rs", &buffer, 2, NavigationCommand::GoToUpScope, &mut NoSymbols, None)
        .unwrap();
    assert_eq!(target.offset, 1);
}

struct ScriptedJumper {
    moves: HashMap<usize, usize>,
}

impl BracketJumper for ScriptedJumper {
    fn jump(&mut self, pos: usize) -> Option<usize> {
        self.moves.get(&pos).copied()
    }
}

#[test]
fn test_host_verified_bracket_backend() {
    let config = NavigationConfig {
        bracket_scope_mode: BracketScopeMode::HostVerified,
        ..NavigationConfig::default()
    };
    let mut nav = ScopeNavigator::new(config);
    let buffer = Buffer::from_text("(a(b)c)");
    let mut jumper = ScriptedJumper {
        moves: [(3, 4), (4, 2), (2, 4)].into_iter().collect(),
    };

    let target = nav
        .navigate(
            "a.rs",
            &buffer,
            3,
            NavigationCommand::GoToUpScope,
            &mut NoSymbols,
            Some(&mut jumper),
        )
        .unwrap();
    assert_eq!(target.span, Span::new(2, 5));
    assert_eq!(target.offset, 2);
}

#[test]
fn test_host_verified_sibling_consults_the_jumper() {
    let config = NavigationConfig {
        bracket_scope_mode: BracketScopeMode::HostVerified,
        block_scope_mode: scope_nav::BlockScopeMode::Disabled,
        ..NavigationConfig::default()
    };
    let mut nav = ScopeNavigator::new(config);
    let buffer = Buffer::from_text("x (a) (b)");
    // The host disowns the bracket at offset 2 (string content) and only
    // pairs 6 <-> 8; a literal scan would have answered with the first group.
    let mut jumper = ScriptedJumper {
        moves: [(6, 8), (8, 6)].into_iter().collect(),
    };

    let target = nav
        .navigate(
            "a.rs",
            &buffer,
            0,
            NavigationCommand::GoPastNextScope,
            &mut NoSymbols,
            Some(&mut jumper),
        )
        .unwrap();
    assert_eq!(target.span, Span::new(6, 9));
    assert_eq!(target.offset, 9);

    // Without a jumper the backend has no answer, literal or otherwise.
    let target = nav.navigate(
        "a.rs",
        &buffer,
        0,
        NavigationCommand::GoPastNextScope,
        &mut NoSymbols,
        None,
    );
    assert_eq!(target, None);
}

#[test]
fn test_host_verified_separator_jump() {
    let config = NavigationConfig {
        bracket_scope_mode: BracketScopeMode::HostVerified,
        block_scope_mode: scope_nav::BlockScopeMode::Disabled,
        ..NavigationConfig::default()
    };
    let mut nav = ScopeNavigator::new(config);
    let buffer = Buffer::from_text("f(a, b(c), d)");
    let mut jumper = ScriptedJumper {
        moves: [(6, 8), (8, 6), (1, 12), (12, 1)].into_iter().collect(),
    };

    let target = nav
        .navigate(
            "a.rs",
            &buffer,
            9,
            NavigationCommand::GoPastNextSeparator,
            &mut NoSymbols,
            Some(&mut jumper),
        )
        .unwrap();
    assert_eq!(target.span, Span::new(9, 12));
    assert_eq!(target.offset, 12);
}

#[test]
fn test_host_verified_narrower_scope_at_landing() {
    let mut nav = ScopeNavigator::new(NavigationConfig {
        bracket_scope_mode: BracketScopeMode::HostVerified,
        ..NavigationConfig::default()
    });
    let buffer = Buffer::from_text("((ab) cd)x");
    let mut provider = CountingProvider::new(vec![symbol("f", Span::new(1, 8))]);
    let mut jumper = ScriptedJumper {
        moves: [(6, 8), (8, 0), (0, 8), (1, 4), (4, 1)].into_iter().collect(),
    };

    // The symbol scope wins the merge, but its start sits on the inner '(';
    // the narrower bracket scope opening there takes over, paired through the
    // host like everything else in this mode.
    let target = nav
        .navigate(
            "a.rs",
            &buffer,
            6,
            NavigationCommand::GoToUpScope,
            &mut provider,
            Some(&mut jumper),
        )
        .unwrap();
    assert_eq!(target.origin, ScopeOrigin::Bracket);
    assert_eq!(target.span, Span::new(1, 5));
    assert_eq!(target.offset, 1);
}

#[test]
fn test_host_verified_without_a_jumper_finds_nothing() {
    let config = NavigationConfig {
        bracket_scope_mode: BracketScopeMode::HostVerified,
        ..NavigationConfig::default()
    };
    let mut nav = ScopeNavigator::new(config);
    let buffer = Buffer::from_text("(a(b)c)");
    let target = nav.navigate(
        "a.rs",
        &buffer,
        3,
        NavigationCommand::GoToUpScope,
        &mut NoSymbols,
        None,
    );
    assert_eq!(target, None);
}

#[test]
fn test_disabled_backends_yield_no_targets() {
    let config = NavigationConfig {
        bracket_scope_mode: BracketScopeMode::Disabled,
        block_scope_mode: scope_nav::BlockScopeMode::Disabled,
        ..NavigationConfig::default()
    };
    let mut nav = ScopeNavigator::new(config);
    let buffer = Buffer::from_text("(a(b)c)");
    for command in [
        NavigationCommand::GoToUpScope,
        NavigationCommand::GoToDownScope,
        NavigationCommand::GoPastNextScope,
        NavigationCommand::GoPastNextSeparator,
    ] {
        assert_eq!(
            nav.navigate("a.rs", &buffer, 3, command, &mut NoSymbols, None),
            None
        );
    }
}
